use lampwick::http::percent::decode;

#[test]
fn test_decode_plus_and_escape() {
    assert_eq!(decode("a+b%20c"), b"a b c");
}

#[test]
fn test_decode_plain_text_unchanged() {
    assert_eq!(decode("/images/cat.png"), b"/images/cat.png");
}

#[test]
fn test_decode_mixed_case_hex() {
    assert_eq!(decode("%2f%2F%7e"), b"//~");
}

#[test]
fn test_decode_non_utf8_byte() {
    assert_eq!(decode("/%FF"), vec![b'/', 0xff]);
}

#[test]
fn test_decode_escaped_percent_and_plus() {
    assert_eq!(decode("100%25+%2B"), b"100% +");
}

#[test]
fn test_decode_truncated_escape_kept() {
    assert_eq!(decode("%"), b"%");
    assert_eq!(decode("a%4"), b"a%4");
    assert_eq!(decode("a%41"), b"aA");
}

#[test]
fn test_decode_invalid_hex_kept() {
    assert_eq!(decode("%zz"), b"%zz");
    assert_eq!(decode("%4g1"), b"%4g1");
}

#[test]
fn test_decode_every_byte_round_trips() {
    let encoded: String = (0u8..=255).map(|b| format!("%{b:02X}")).collect();
    let expected: Vec<u8> = (0u8..=255).collect();

    assert_eq!(decode(&encoded), expected);
}
