//! Request head parser example
//! Parses an HTTP/1.x style request head with `TextCursor`.
//!
//! Usage: request-line [FILE]   (reads stdin without FILE)

use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{self, Read};
use text_cursor::TextCursor;

const METHODS: [&str; 5] = ["GET", "HEAD", "POST", "PUT", "DELETE"];

#[derive(Debug)]
struct RequestHead {
    method: &'static str,
    target: String,
    version: String,
    headers: Vec<(String, String)>,
}

fn line_end<R: Read>(cursor: &mut TextCursor<R>) -> bool {
    cursor.match_literal("\r\n") || cursor.match_literal("\n")
}

fn parse_head<R: Read>(cursor: &mut TextCursor<R>) -> Result<RequestHead> {
    let Some(method) = METHODS.into_iter().find(|m| cursor.match_literal(m)) else {
        let pos = cursor.position();
        bail!("unknown method at {}", pos);
    };
    cursor.skip_while(|c| c == ' ');
    let target = cursor.scan_until_char(' ').unwrap_or_default();
    if !cursor.match_literal("HTTP/") {
        bail!("expected HTTP version at {}", cursor.position());
    }
    let version = cursor
        .scan_while(|c| c.is_ascii_digit() || c == '.')
        .unwrap_or_default();
    if !line_end(cursor) {
        bail!("expected end of request line at {}", cursor.position());
    }
    debug!("request line parsed, {} bytes", cursor.consumed());

    let mut headers = Vec::new();
    while !line_end(cursor) && !cursor.at_end() {
        let Some(name) = cursor.scan_until_char(':') else {
            break;
        };
        cursor.skip_while(|c| c == ' ' || c == '\t');
        let Some(value) = cursor.scan_until_any(|c| c == '\r' || c == '\n') else {
            break;
        };
        line_end(cursor);
        headers.push((name, value.trim_end().to_string()));
    }

    if let Some(fault) = cursor.error() {
        bail!("malformed request head at {}: {}", cursor.position(), fault);
    }
    Ok(RequestHead {
        method,
        target,
        version,
        headers,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let input: Box<dyn Read> = match std::env::args().nth(1) {
        Some(path) => Box::new(File::open(&path).with_context(|| format!("opening {}", path))?),
        None => Box::new(io::stdin()),
    };

    let mut cursor = TextCursor::new(input);
    let head = parse_head(&mut cursor)?;
    let body = cursor.scan_remainder().unwrap_or_default();
    info!("consumed {} bytes", cursor.consumed());

    println!("Method:  {}", head.method);
    println!("Target:  {}", head.target);
    println!("Version: {}", head.version);
    println!("Headers:");
    for (name, value) in &head.headers {
        println!("  {}: {}", name, value);
    }
    if !body.is_empty() {
        println!("Body ({} bytes):", body.len());
        println!("{}", body);
    }
    cursor.finish()?;
    Ok(())
}
