use super::*;

#[test]
fn every_preset_css_matches_its_primitive_chain() {
    for id in FilterId::ALL {
        assert_eq!(ops_to_css(&id.ops()), id.css(), "{}", id.id());
        assert_eq!(parse_css_filter(id.css()).unwrap(), id.ops(), "{}", id.id());
    }
}

#[test]
fn unknown_ids_fall_back_to_none() {
    assert_eq!(FilterId::from_id("vaporwave"), FilterId::None);
    assert_eq!(FilterId::from_id(" Sepia "), FilterId::Sepia);
    let f: FilterId = serde_json::from_str("\"nope\"").unwrap();
    assert_eq!(f, FilterId::None);
    assert_eq!(
        serde_json::to_string(&FilterId::Cinematic).unwrap(),
        "\"cinematic\""
    );
}

#[test]
fn parse_accepts_percent_and_fraction_amounts() {
    assert_eq!(
        parse_css_filter("grayscale(50%) invert(0.25) blur(2px) blur()").unwrap(),
        vec![
            FilterOp::Grayscale(0.5),
            FilterOp::Invert(0.25),
            FilterOp::Blur { std_dev_px: 2.0 },
            FilterOp::Blur { std_dev_px: 0.0 },
        ]
    );
    assert!(parse_css_filter("none").unwrap().is_empty());
}

#[test]
fn parse_rejects_malformed_input() {
    assert!(parse_css_filter("hue-rotate(90deg)").is_err());
    assert!(parse_css_filter("contrast(1.2").is_err());
    assert!(parse_css_filter("contrast(-1)").is_err());
    assert!(parse_css_filter("sepia").is_err());
}

#[test]
fn normalize_drops_identity_primitives() {
    let ops = vec![
        FilterOp::Brightness(1.0),
        FilterOp::Blur { std_dev_px: 0.0 },
        FilterOp::Contrast(1.2),
        FilterOp::Grayscale(0.0),
    ];
    assert_eq!(normalize_ops(&ops), vec![FilterOp::Contrast(1.2)]);
}

#[test]
fn blur_has_no_color_matrix() {
    assert!(FilterOp::Blur { std_dev_px: 4.0 }.color_matrix().is_none());
    let m = FilterOp::Invert(1.0).color_matrix().unwrap();
    assert_eq!(m[0], -1.0);
    assert_eq!(m[4], 1.0);
}
