use super::*;

#[test]
fn new_surface_is_cleared() {
    let canvas = Canvas::new(4, 3).unwrap();
    let frame = CpuSurface::new(canvas, Color::BLACK).unwrap().finish();
    assert_eq!((frame.width, frame.height), (4, 3));
    assert!(frame.premultiplied);
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn clear_color_survives_later_draws() {
    let canvas = Canvas::new(8, 8).unwrap();
    let mut surface = CpuSurface::new(canvas, Color::rgb(0, 0, 255)).unwrap();
    surface.ctx.set_paint(to_cpu_color(Color::rgb(255, 0, 0)));
    surface
        .ctx
        .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 4.0, 8.0));
    let frame = surface.finish();
    assert_eq!(frame.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(6, 6), Some([0, 0, 255, 255]));
}

#[test]
fn transparent_clear_leaves_surface_empty() {
    let canvas = Canvas::new(2, 2).unwrap();
    let frame = CpuSurface::new(canvas, Color::rgba(0, 0, 0, 0)).unwrap().finish();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn oversized_surface_is_rejected() {
    let canvas = Canvas::new(70_000, 2).unwrap();
    let err = CpuSurface::new(canvas, Color::BLACK).err().unwrap();
    assert!(matches!(err, CaptionError::Surface(_)));
}

#[test]
fn to_rgba_image_unpremultiplies() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    };
    let img = frame.to_rgba_image().unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [128, 0, 0, 128]);
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 4, 5, 6, 7, 8],
        premultiplied: false,
    };
    assert_eq!(frame.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(frame.pixel(2, 0), None);
    assert_eq!(frame.pixel(0, 1), None);
}

#[test]
fn image_paint_checks_length() {
    let canvas = Canvas::new(2, 2).unwrap();
    assert!(image_paint(&[0; 16], canvas).is_ok());
    assert!(image_paint(&[0; 12], canvas).is_err());
}
