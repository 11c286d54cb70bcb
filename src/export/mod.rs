//! PNG export shared by the download and clipboard paths.

pub mod clipboard;
pub mod pipeline;

pub use clipboard::{ClipboardKind, ClipboardSink, WlCopyClipboard, open_clipboard};
pub use pipeline::{encode_png, export_file_name, export_image, write_png};
