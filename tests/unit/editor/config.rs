use super::*;

#[test]
fn empty_document_uses_defaults() {
    let cfg = EditorConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, EditorConfig::default());
    assert_eq!(cfg.preview.to_size(), Size::new(900.0, 600.0));
    assert_eq!(cfg.download_scale, 2.0);
    assert_eq!(cfg.clipboard_scale, 1.0);
    assert_eq!(cfg.output_dir, PathBuf::from("."));
}

#[test]
fn fields_override_defaults() {
    let cfg = EditorConfig::from_json_str(
        r##"{
            "preview": {"width": 640, "height": 480},
            "letterbox_color": "#fff",
            "corner_style": "rounded",
            "fonts_dir": "fonts",
            "download_scale": 3
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.preview.width, 640.0);
    assert_eq!(cfg.letterbox_color, Color::WHITE);
    assert_eq!(cfg.corner_style, CornerStyle::Rounded);
    assert_eq!(cfg.font_dirs(), vec![PathBuf::from("fonts")]);
    assert_eq!(cfg.download_scale, 3.0);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = EditorConfig::from_json_str(r#"{"theme":"dark"}"#).unwrap_err();
    assert!(matches!(err, CaptionError::Serde(_)));
}

#[test]
fn non_positive_values_are_rejected() {
    let err = EditorConfig::from_json_str(r#"{"preview":{"width":0,"height":10}}"#).unwrap_err();
    assert!(matches!(err, CaptionError::Validation(_)));
    let err = EditorConfig::from_json_str(r#"{"clipboard_scale":-1}"#).unwrap_err();
    assert!(matches!(err, CaptionError::Validation(_)));
}

#[test]
fn missing_file_is_reported() {
    let err = EditorConfig::from_path("/nonexistent/captioner.json").unwrap_err();
    assert!(err.to_string().contains("read config"));
}
