use super::*;

#[test]
fn family_list_parses_quotes_and_generics() {
    assert_eq!(
        parse_family_list("'Open Sans', \"Arial\" , sans-serif, MONOSPACE"),
        vec![
            FamilyName::Named("Open Sans".to_string()),
            FamilyName::Named("Arial".to_string()),
            FamilyName::SansSerif,
            FamilyName::Monospace,
        ]
    );
    assert!(parse_family_list(" , ").is_empty());
}

#[test]
fn empty_book_reports_font_error() {
    let book = FontBook::empty();
    assert_eq!(book.face_count(), 0);
    let err = book.resolve("Arial, sans-serif", false, false).unwrap_err();
    assert!(matches!(err, CaptionError::Font(_)));
}

#[test]
fn garbage_font_data_is_not_a_face() {
    let book = FontBook::from_font_data([b"definitely not a font".to_vec()]);
    assert_eq!(book.face_count(), 0);
    assert!(book.resolve("serif", true, true).is_err());
}
