use super::*;
use crate::effects::filter::FilterId;

fn solid(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    px.repeat((w * h) as usize)
}

#[test]
fn none_filter_is_identity() {
    let src = vec![10u8, 20, 30, 255, 200, 100, 50, 128];
    let mut buf = src.clone();
    apply_filter_ops(&mut buf, 2, 1, &FilterId::None.ops(), 1.0).unwrap();
    assert_eq!(buf, src);
}

#[test]
fn grayscale_equalizes_channels() {
    let mut buf = vec![255u8, 0, 0, 255, 0, 255, 0, 255];
    apply_filter_ops(&mut buf, 2, 1, &FilterId::Grayscale.ops(), 1.0).unwrap();
    for px in buf.chunks_exact(4) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[3], 255);
    }
    // Rec. 709 luma: red is darker than green.
    assert!(buf[0] < buf[4]);
}

#[test]
fn invert_flips_opaque_pixels() {
    let mut buf = vec![0u8, 64, 255, 255];
    apply_filter_ops(&mut buf, 1, 1, &FilterId::Invert.ops(), 1.0).unwrap();
    assert_eq!(buf, vec![255, 191, 0, 255]);
}

#[test]
fn brightness_clamps_at_white() {
    let mut buf = vec![250u8, 100, 0, 255];
    apply_filter_ops(&mut buf, 1, 1, &FilterId::Brightness.ops(), 1.0).unwrap();
    assert_eq!(buf, vec![255, 120, 0, 255]);
}

#[test]
fn transparent_pixels_stay_transparent() {
    let mut buf = vec![0u8, 0, 0, 0];
    apply_filter_ops(&mut buf, 1, 1, &FilterId::Cinematic.ops(), 1.0).unwrap();
    assert_eq!(buf, vec![0, 0, 0, 0]);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (6u32, 5u32);
    let src = solid(w, h, [10, 20, 30, 40]);
    let mut buf = src.clone();
    apply_filter_ops(&mut buf, w, h, &FilterId::Blur.ops(), 0.5).unwrap();
    assert_eq!(buf, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn blur_radius_tracks_sigma() {
    assert_eq!(blur_radius_for_sigma(0.0), 0);
    assert_eq!(blur_radius_for_sigma(4.0), 12);
    assert_eq!(blur_radius_for_sigma(0.2), 1);
}

#[test]
fn mismatched_buffer_is_rejected() {
    let mut buf = vec![0u8; 7];
    assert!(apply_filter_ops(&mut buf, 2, 1, &FilterId::Sepia.ops(), 1.0).is_err());
}
