//! Record packing example
//! Reads `name = number` lines with `TextCursor`, packs them with
//! `BinaryWriter`, and decodes the packed bytes again with `BinaryReader`.
//!
//! Usage: record-pack [FILE] [--big-endian]   (reads stdin without FILE)
//!
//! Packed layout: magic "RPK1", u8 byte-order flag (0 little, 1 big), u32
//! record count, then per record: u16 name length, name bytes, f64 value.

use anyhow::{bail, Context, Result};
use binary_cursor::{BinaryReader, BinaryWriter, Endian};
use log::{debug, info};
use std::fs::File;
use std::io::{self, Read, Write};
use text_cursor::TextCursor;

const MAGIC: &[u8; 4] = b"RPK1";

#[derive(Debug, PartialEq)]
struct Record {
    name: String,
    value: f64,
}

fn parse_records<R: Read>(cursor: &mut TextCursor<R>) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    loop {
        cursor.skip_while(char::is_whitespace);
        if cursor.at_end() {
            break;
        }
        if cursor.match_literal("#") {
            cursor.skip_while(|c| c != '\n');
            continue;
        }
        let Some(name) = cursor.scan_until_any(|c| c == '=' || c.is_whitespace()) else {
            break;
        };
        cursor.skip_while(|c| c == ' ' || c == '\t');
        if !cursor.match_literal("=") {
            bail!("expected '=' after {:?} at {}", name, cursor.position());
        }
        cursor.skip_while(|c| c == ' ' || c == '\t');
        let Some(number) = cursor.scan_while(|c| c.is_ascii_digit() || "+-.eE".contains(c))
        else {
            break;
        };
        let value = number
            .parse::<f64>()
            .with_context(|| format!("bad number {:?} for {}", number, name))?;
        debug!("record {} = {}", name, value);
        records.push(Record { name, value });
    }
    if let Some(fault) = cursor.error() {
        bail!("input stopped at {}: {}", cursor.position(), fault);
    }
    Ok(records)
}

fn pack<W: Write>(writer: &mut BinaryWriter<W>, records: &[Record]) -> Option<()> {
    let order = writer.byte_order();
    writer.write_bytes(MAGIC)?;
    writer.write(u8::from(order == Endian::Big))?;
    writer.write(u32::try_from(records.len()).ok()?)?;
    for record in records {
        writer.write(u16::try_from(record.name.len()).ok()?)?;
        writer.write_bytes(record.name.as_bytes())?;
        writer.write(record.value)?;
    }
    writer.flush()
}

fn unpack<R: Read>(reader: &mut BinaryReader<R>) -> Option<Vec<Record>> {
    let mut magic = [0u8; 4];
    reader.read_bytes(&mut magic)?;
    if &magic != MAGIC {
        return None;
    }
    let order = if reader.read::<u8>()? == 1 {
        Endian::Big
    } else {
        Endian::Little
    };
    reader.set_byte_order(order);
    let count = reader.read::<u32>()?;
    let mut records = Vec::new();
    for _ in 0..count {
        let len = reader.read::<u16>()? as usize;
        let mut name = vec![0u8; len];
        reader.read_bytes(&mut name)?;
        let value = reader.read::<f64>()?;
        records.push(Record {
            name: String::from_utf8_lossy(&name).into_owned(),
            value,
        });
    }
    Some(records)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut path = None;
    let mut order = Endian::Little;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--big-endian" => order = Endian::Big,
            _ => path = Some(arg),
        }
    }
    let input: Box<dyn Read> = match &path {
        Some(path) => Box::new(File::open(path).with_context(|| format!("opening {}", path))?),
        None => Box::new(io::stdin()),
    };

    let mut cursor = TextCursor::new(input);
    let records = parse_records(&mut cursor)?;
    info!("parsed {} records from {} bytes", records.len(), cursor.consumed());

    let mut writer = BinaryWriter::with_byte_order(Vec::new(), order);
    if pack(&mut writer, &records).is_none() {
        match writer.error() {
            Some(fault) => bail!("packing failed: {}", fault),
            None => bail!("too many records or name too long"),
        }
    }
    let packed = writer.into_inner();
    println!("Packed {} records into {} bytes ({:?})", records.len(), packed.len(), order);

    let mut reader = BinaryReader::new(&packed[..]);
    let decoded = unpack(&mut reader);
    let consumed = reader.finish()?;
    let Some(decoded) = decoded else {
        bail!("packed data has a bad header");
    };
    for record in &decoded {
        println!("  {:<16} {}", record.name, record.value);
    }
    if decoded != records || consumed != packed.len() as u64 {
        bail!("decoded records differ from input");
    }
    Ok(())
}
