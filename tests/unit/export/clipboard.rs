use super::*;

fn tiny() -> image::RgbaImage {
    image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 255, 255, 255]))
}

#[derive(Default)]
struct RecordingSink {
    copied: Vec<(u32, u32)>,
}

impl ClipboardSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn copy_image(&mut self, img: &image::RgbaImage) -> CaptionResult<()> {
        self.copied.push(img.dimensions());
        Ok(())
    }
}

#[test]
fn sinks_are_usable_as_trait_objects() {
    let mut sink = RecordingSink::default();
    {
        let dyn_sink: &mut dyn ClipboardSink = &mut sink;
        dyn_sink.copy_image(&tiny()).unwrap();
    }
    assert_eq!(sink.copied, vec![(2, 2)]);
}

#[test]
fn wl_copy_backend_opens_without_a_display() {
    let sink = open_clipboard(ClipboardKind::WlCopy).unwrap();
    assert_eq!(sink.name(), "wl-copy");
}

#[test]
fn missing_command_is_a_clipboard_error() {
    let mut sink = WlCopyClipboard {
        command: "captioner-test-no-such-command".to_string(),
    };
    let err = sink.copy_image(&tiny()).unwrap_err();
    assert!(matches!(err, CaptionError::Clipboard(_)));
    assert_eq!(err.user_message("Copy"), "Copy failed. Please try again.");
}

#[cfg(unix)]
#[test]
fn failing_command_is_a_clipboard_error() {
    let mut sink = WlCopyClipboard {
        command: "false".to_string(),
    };
    let err = sink.copy_image(&tiny()).unwrap_err();
    assert!(matches!(err, CaptionError::Clipboard(_)));
}

#[cfg(unix)]
#[test]
fn command_that_ignores_stdin_fails_the_write() {
    // Noise does not compress, so the PNG outgrows the pipe buffer.
    let mut state = 0x2545_f491_u32;
    let noisy = image::RgbaImage::from_fn(512, 512, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        image::Rgba(state.to_le_bytes())
    });
    let mut sink = WlCopyClipboard {
        command: "true".to_string(),
    };
    let err = sink.copy_image(&noisy).unwrap_err();
    assert!(matches!(err, CaptionError::Clipboard(ref m) if m.contains("write png to 'true'")), "{err}");
}

#[test]
fn clipboard_kind_uses_kebab_case() {
    let kind: ClipboardKind = serde_json::from_str("\"wl-copy\"").unwrap();
    assert_eq!(kind, ClipboardKind::WlCopy);
    assert_eq!(ClipboardKind::default(), ClipboardKind::System);
}
