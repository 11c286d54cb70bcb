use super::*;

fn png_bytes(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(px));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn decode_png_premultiplies() {
    let img = decode_image(&png_bytes(3, 2, [200, 100, 50, 128])).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    assert_eq!(img.rgba8_premul.len(), 3 * 2 * 4);
    assert_eq!(&img.rgba8_premul[0..4], &[100, 50, 25, 128]);
}

#[test]
fn decode_rejects_garbage() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(matches!(err, CaptionError::Decode(_)));
}

#[test]
fn data_url_round_trips_through_decoder() {
    let url = to_data_url("image/png", &png_bytes(4, 4, [10, 20, 30, 255]));
    assert!(url.starts_with("data:image/png;base64,"));

    let img = SourceImage::from_data_url(&url).unwrap();
    assert_eq!(img.natural_size(), Size::new(4.0, 4.0));
    assert_eq!(&img.rgba8_premul[0..4], &[10, 20, 30, 255]);
}

#[test]
fn data_url_requires_base64_marker() {
    assert!(matches!(
        parse_data_url("data:image/png,abcd").unwrap_err(),
        CaptionError::Decode(_)
    ));
    assert!(matches!(
        parse_data_url("image/png;base64,abcd").unwrap_err(),
        CaptionError::Decode(_)
    ));
    assert!(matches!(
        parse_data_url("data:image/png;base64,@@@").unwrap_err(),
        CaptionError::Decode(_)
    ));
}

#[test]
fn open_reads_paths() {
    let dir = std::env::temp_dir().join(format!("captioner_decode_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("in.png");
    std::fs::write(&path, png_bytes(5, 3, [0, 0, 0, 255])).unwrap();

    let img = SourceImage::open(path.to_str().unwrap()).unwrap();
    assert_eq!((img.width, img.height), (5, 3));

    let missing = SourceImage::open(dir.join("missing.png").to_str().unwrap()).unwrap_err();
    assert!(matches!(missing, CaptionError::Decode(_)));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn scaled_premul_keeps_color_within_alpha() {
    let src = SourceImage::from_premul(
        2,
        1,
        vec![255, 255, 255, 255, 0, 0, 0, 0],
    )
    .unwrap();
    let out = src.scaled_premul(Canvas::new(8, 2).unwrap()).unwrap();
    assert_eq!(out.len(), 8 * 2 * 4);
    for px in out.chunks_exact(4) {
        assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3]);
    }
}

#[test]
fn from_premul_checks_length() {
    assert!(SourceImage::from_premul(2, 2, vec![0; 4]).is_err());
    assert!(SourceImage::from_premul(0, 2, vec![]).is_err());
}
