use super::*;

#[test]
fn parses_short_long_and_alpha_forms() {
    assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
    assert_eq!(Color::parse("#FFD700").unwrap(), Color::rgb(255, 215, 0));
    assert_eq!(
        Color::parse(" #00000080 ").unwrap(),
        Color::rgba(0, 0, 0, 0x80)
    );
}

#[test]
fn rejects_malformed_hex() {
    assert!(Color::parse("FFFFFF").is_err());
    assert!(Color::parse("#FFFFF").is_err());
    assert!(Color::parse("#GGGGGG").is_err());
    assert!(Color::parse("#ééé").is_err());
}

#[test]
fn rejects_signs_inside_hex_digits() {
    assert!(Color::parse("#+FFFFF").is_err());
    assert!(Color::parse("#+FF").is_err());
    assert!(Color::parse("#-1-1-1").is_err());
}

#[test]
fn display_is_uppercase_and_omits_opaque_alpha() {
    assert_eq!(Color::rgb(0xab, 0xcd, 0xef).to_string(), "#ABCDEF");
    assert_eq!(Color::BLACK.with_alpha(0xb2).to_string(), "#000000B2");
}

#[test]
fn serde_accepts_hex_and_arrays() {
    let c: Color = serde_json::from_str("\"#ff0000\"").unwrap();
    assert_eq!(c, Color::rgb(255, 0, 0));
    let c: Color = serde_json::from_str("[1,2,3,4]").unwrap();
    assert_eq!(c, Color::rgba(1, 2, 3, 4));
    assert!(serde_json::from_str::<Color>("[1,2]").is_err());
    assert_eq!(serde_json::to_string(&Color::WHITE).unwrap(), "\"#FFFFFF\"");
}
