use text_cursor::{Fault, TextCursor};

fn cursor(input: &str) -> TextCursor<&[u8]> {
    TextCursor::new(input.as_bytes())
}

#[test]
fn test_cursor_new_is_lazy() {
    let cursor = cursor("hello");
    assert_eq!(cursor.consumed(), 0);
    assert!(cursor.error().is_none());
    assert_eq!(cursor.get_ref().len(), 5);
}

#[test]
fn test_next() {
    let mut cursor = cursor("hi");
    assert_eq!(cursor.next(), Some('h'));
    assert_eq!(cursor.next(), Some('i'));
    assert_eq!(cursor.consumed(), 2);
    assert_eq!(cursor.next(), None);
    assert!(cursor.error().is_some_and(Fault::is_eof));
    assert_eq!(cursor.consumed(), 2);
}

#[test]
fn test_next_counts_encoded_width() {
    let mut cursor = cursor("é😀");
    assert_eq!(cursor.next(), Some('é'));
    assert_eq!(cursor.consumed(), 2);
    assert_eq!(cursor.next(), Some('😀'));
    assert_eq!(cursor.consumed(), 6);
}

#[test]
fn test_must_next_upgrades_eof() {
    let mut cursor = cursor("a");
    assert_eq!(cursor.must_next(), Some('a'));
    assert_eq!(cursor.must_next(), None);
    assert!(cursor.error().is_some_and(Fault::is_unexpected_eof));
}

#[test]
fn test_must_next_keeps_earlier_clean_eof() {
    let mut cursor = cursor("");
    assert_eq!(cursor.next(), None);
    assert_eq!(cursor.must_next(), None);
    assert!(cursor.error().is_some_and(Fault::is_eof));
}

#[test]
fn test_peek_does_not_consume() {
    let mut cursor = cursor("xy");
    assert_eq!(cursor.peek(), Some('x'));
    assert_eq!(cursor.peek(), Some('x'));
    assert_eq!(cursor.consumed(), 0);
    assert_eq!(cursor.next(), Some('x'));
    assert_eq!(cursor.peek(), Some('y'));
}

#[test]
fn test_peek_at_end_latches_nothing() {
    let mut cursor = cursor("");
    assert_eq!(cursor.peek(), None);
    assert!(cursor.error().is_none());
}

#[test]
fn test_match_literal_get() {
    let mut cursor = cursor("GET /x");
    assert!(cursor.match_literal("GET"));
    assert_eq!(cursor.consumed(), 3);
    assert_eq!(cursor.next(), Some(' '));
}

#[test]
fn test_match_literal_mismatch_leaves_stream() {
    let mut cursor = cursor("POST /x");
    assert!(!cursor.match_literal("GET"));
    assert_eq!(cursor.consumed(), 0);
    assert!(cursor.error().is_none());
    assert!(cursor.match_literal("POST"));
}

#[test]
fn test_match_literal_past_end_is_no_match() {
    let mut cursor = cursor("GE");
    assert!(!cursor.match_literal("GET"));
    assert!(cursor.error().is_none());
    assert_eq!(cursor.scan_remainder().as_deref(), Some("GE"));
}

#[test]
fn test_match_literal_empty() {
    let mut cursor = cursor("abc");
    assert!(cursor.match_literal(""));
    assert_eq!(cursor.consumed(), 0);

    let mut empty = self::cursor("");
    assert!(empty.match_literal(""));
}

#[test]
fn test_match_literal_multibyte() {
    let mut cursor = cursor("→ next");
    assert!(cursor.match_literal("→"));
    assert_eq!(cursor.consumed(), 3);
    assert_eq!(cursor.position().column, 2);
}

#[test]
fn test_scan_while() {
    let mut cursor = cursor("hello world");
    assert_eq!(
        cursor.scan_while(|c| c.is_alphabetic()).as_deref(),
        Some("hello")
    );
    assert_eq!(cursor.consumed(), 5);
    assert_eq!(cursor.next(), Some(' '));
}

#[test]
fn test_scan_while_empty_span() {
    let mut cursor = cursor("123");
    assert_eq!(cursor.scan_while(|c| c.is_alphabetic()).as_deref(), Some(""));
    assert_eq!(cursor.consumed(), 0);
    assert_eq!(cursor.peek(), Some('1'));
}

#[test]
fn test_scan_while_to_end_is_clean() {
    let mut cursor = cursor("abc");
    assert_eq!(cursor.scan_while(|_| true).as_deref(), Some("abc"));
    assert!(cursor.error().is_none());
    assert!(cursor.at_end());
}

#[test]
fn test_skip_while() {
    let mut cursor = cursor("   \t x");
    assert_eq!(cursor.skip_while(char::is_whitespace), Some(()));
    assert_eq!(cursor.consumed(), 5);
    assert_eq!(cursor.next(), Some('x'));
    assert_eq!(cursor.skip_while(char::is_whitespace), Some(()));
    assert!(cursor.error().is_none());
}

#[test]
fn test_scan_until_char_scenario() {
    let mut cursor = cursor("abc;def");
    assert_eq!(cursor.scan_until_char(';').as_deref(), Some("abc"));
    assert_eq!(cursor.consumed(), 4);
    assert_eq!(cursor.scan_remainder().as_deref(), Some("def"));
}

#[test]
fn test_scan_until_char_immediate() {
    let mut cursor = cursor(";rest");
    assert_eq!(cursor.scan_until_char(';').as_deref(), Some(""));
    assert_eq!(cursor.consumed(), 1);
}

#[test]
fn test_scan_until_char_missing_is_unexpected_eof() {
    let mut cursor = cursor("abc");
    assert_eq!(cursor.scan_until_char(';'), None);
    assert!(cursor.error().is_some_and(Fault::is_unexpected_eof));
    assert_eq!(cursor.consumed(), 3);
    assert!(!cursor.at_end());
}

#[test]
fn test_scan_until_any_leaves_match_unread() {
    let mut cursor = cursor("key=value");
    assert_eq!(
        cursor.scan_until_any(|c| c == '=' || c == ':').as_deref(),
        Some("key")
    );
    assert_eq!(cursor.consumed(), 3);
    assert_eq!(cursor.next(), Some('='));
}

#[test]
fn test_scan_until_any_missing_is_unexpected_eof() {
    let mut cursor = cursor("novalue");
    assert_eq!(cursor.scan_until_any(|c| c == '='), None);
    assert!(cursor.error().is_some_and(Fault::is_unexpected_eof));
}

#[test]
fn test_at_end() {
    let mut cursor = cursor("a");
    assert!(!cursor.at_end());
    cursor.next();
    assert!(cursor.at_end());
    assert!(cursor.error().is_none());
    cursor.next();
    assert!(cursor.error().is_some_and(Fault::is_eof));
    assert!(cursor.at_end());
}

#[test]
fn test_scan_remainder() {
    let mut cursor = cursor("head tail\nmore");
    cursor.skip_while(|c| c != ' ');
    assert_eq!(cursor.scan_remainder().as_deref(), Some(" tail\nmore"));
    assert_eq!(cursor.consumed(), 14);
    assert_eq!(cursor.scan_remainder().as_deref(), Some(""));
    assert!(cursor.at_end());
}

#[test]
fn test_end_and_finish() {
    let mut cursor = cursor("ab");
    cursor.next();
    let (n, fault) = cursor.end();
    assert_eq!(n, 1);
    assert!(fault.is_none());
    assert_eq!(cursor.finish().ok(), Some(1));

    let mut cursor = self::cursor("");
    cursor.must_next();
    assert!(matches!(cursor.finish(), Err(Fault::UnexpectedEof)));
}

#[test]
fn test_small_grammar() {
    // name ':' ws digits '\n'
    let mut cursor = cursor("width: 640\nheight: 480\n");
    let mut fields = Vec::new();
    while !cursor.at_end() {
        let name = cursor.scan_until_char(':');
        cursor.skip_while(|c| c == ' ');
        let digits = cursor.scan_while(|c| c.is_ascii_digit());
        cursor.must_next();
        if let (Some(name), Some(digits)) = (name, digits) {
            fields.push((name, digits.parse::<u32>().unwrap()));
        }
    }
    assert!(cursor.error().is_none());
    assert_eq!(
        fields,
        vec![("width".to_string(), 640), ("height".to_string(), 480)]
    );
}
