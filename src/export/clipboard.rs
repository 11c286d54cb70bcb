use std::{
    io::Write,
    process::{Command, Stdio},
};

use crate::{
    export::pipeline::encode_png,
    foundation::error::{CaptionError, CaptionResult},
};

const WL_COPY_COMMAND: &str = "wl-copy";
const MIME_IMAGE_PNG: &str = "image/png";

/// Destination for a copied export.
pub trait ClipboardSink {
    fn name(&self) -> &str;
    fn copy_image(&mut self, img: &image::RgbaImage) -> CaptionResult<()>;
}

/// Which clipboard implementation to open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClipboardKind {
    /// Native clipboard through `arboard`.
    #[default]
    System,
    /// PNG piped to `wl-copy` on Wayland.
    WlCopy,
}

pub fn open_clipboard(kind: ClipboardKind) -> CaptionResult<Box<dyn ClipboardSink>> {
    match kind {
        ClipboardKind::System => open_system(),
        ClipboardKind::WlCopy => Ok(Box::new(WlCopyClipboard::default())),
    }
}

#[cfg(feature = "clipboard")]
fn open_system() -> CaptionResult<Box<dyn ClipboardSink>> {
    Ok(Box::new(SystemClipboard::new()?))
}

#[cfg(not(feature = "clipboard"))]
fn open_system() -> CaptionResult<Box<dyn ClipboardSink>> {
    Err(CaptionError::clipboard(
        "built without the `clipboard` feature; use the wl-copy backend",
    ))
}

#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> CaptionResult<Self> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| CaptionError::clipboard(format!("open system clipboard: {e}")))?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "clipboard")]
impl ClipboardSink for SystemClipboard {
    fn name(&self) -> &str {
        "system"
    }

    #[tracing::instrument(skip(self, img), fields(w = img.width(), h = img.height()))]
    fn copy_image(&mut self, img: &image::RgbaImage) -> CaptionResult<()> {
        let data = arboard::ImageData {
            width: img.width() as usize,
            height: img.height() as usize,
            bytes: std::borrow::Cow::Borrowed(img.as_raw()),
        };
        self.inner
            .set_image(data)
            .map_err(|e| CaptionError::clipboard(format!("set clipboard image: {e}")))
    }
}

/// Pipes PNG bytes to a `wl-copy`-compatible command.
#[derive(Clone, Debug)]
pub struct WlCopyClipboard {
    pub command: String,
}

impl Default for WlCopyClipboard {
    fn default() -> Self {
        Self {
            command: WL_COPY_COMMAND.to_string(),
        }
    }
}

impl ClipboardSink for WlCopyClipboard {
    fn name(&self) -> &str {
        &self.command
    }

    #[tracing::instrument(skip(self, img), fields(command = %self.command))]
    fn copy_image(&mut self, img: &image::RgbaImage) -> CaptionResult<()> {
        let png = encode_png(img)?;
        let mut child = Command::new(&self.command)
            .args(["--type", MIME_IMAGE_PNG])
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| CaptionError::clipboard(format!("run '{}': {e}", self.command)))?;

        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&png).map_err(|e| {
                CaptionError::clipboard(format!("write png to '{}': {e}", self.command))
            }),
            None => Err(CaptionError::clipboard("clipboard command has no stdin")),
        };
        if let Err(err) = written {
            // Reap the child so a failed copy leaves no zombie behind.
            let _ = child.kill();
            let _ = child.wait();
            return Err(err);
        }

        let status = child
            .wait()
            .map_err(|e| CaptionError::clipboard(format!("wait for '{}': {e}", self.command)))?;
        if status.success() {
            Ok(())
        } else {
            Err(CaptionError::clipboard(format!(
                "'{}' exited with {status}",
                self.command
            )))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/clipboard.rs"]
mod tests;
