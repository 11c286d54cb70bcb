use super::*;

#[test]
fn reset_restores_documented_defaults() {
    let mut s = StyleState::default();
    s.set_caption_text("Hello");
    s.text_color = Color::rgb(255, 215, 0);
    s.background_color = Color::rgb(10, 10, 10);
    s.set_background_opacity(70);
    s.set_font_family("courier new");
    s.set_font_size_px(40.0);
    s.set_stroke_width_px(7.0);
    s.stroke_color = Color::WHITE;
    s.filter = FilterId::Sepia;
    s.bold = true;
    s.underline = true;

    s.reset();

    assert_eq!(s.caption_text, "");
    assert_eq!(s.text_color.to_string(), "#FFFFFF");
    assert_eq!(s.background_color.to_string(), "#000000");
    assert_eq!(s.background_opacity, 0);
    assert_eq!(s.font_family, "Arial, sans-serif");
    assert_eq!(s.font_size_px, 28.0);
    assert_eq!(s.stroke_width_px, 3.0);
    assert_eq!(s.stroke_color.to_string(), "#000000");
    assert_eq!(s.filter, FilterId::None);
    assert!(!s.bold && !s.italic && !s.underline);
}

#[test]
fn setters_clamp_to_control_ranges() {
    let mut s = StyleState::default();
    s.set_background_opacity(250);
    assert_eq!(s.background_opacity, 100);
    s.set_stroke_width_px(25.0);
    assert_eq!(s.stroke_width_px, 10.0);
    s.set_stroke_width_px(-1.0);
    assert_eq!(s.stroke_width_px, 0.0);
    s.set_stroke_width_px(f32::NAN);
    assert_eq!(s.stroke_width_px, DEFAULT_STROKE_WIDTH_PX);
    s.set_font_size_px(1.0);
    assert_eq!(s.font_size_px, 8.0);
}

#[test]
fn background_fill_alpha_floors_percentage() {
    let mut s = StyleState::default();
    assert_eq!(s.background_fill(), None);
    s.set_background_opacity(100);
    assert_eq!(s.background_fill().unwrap().a, 255);
    s.set_background_opacity(70);
    assert_eq!(s.background_fill().unwrap().a, 178);
    s.set_background_opacity(1);
    assert_eq!(s.background_fill().unwrap().a, 2);
}

#[test]
fn json_defaults_missing_fields_and_clamps() {
    let s = StyleState::from_json_str(
        r##"{ "caption_text": "Hi", "stroke_width_px": 42, "filter": "grainy", "font_family": " " }"##,
    )
    .unwrap();
    assert_eq!(s.caption_text, "Hi");
    assert_eq!(s.stroke_width_px, 10.0);
    assert_eq!(s.filter, FilterId::Grainy);
    assert_eq!(s.font_family, DEFAULT_FONT_FAMILY);
    assert_eq!(s.font_size_px, DEFAULT_FONT_SIZE_PX);

    let back = StyleState::from_json_str(&s.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, s);

    assert!(matches!(
        StyleState::from_json_str("{ \"text_color\": \"white\" }"),
        Err(CaptionError::Serde(_))
    ));
}
