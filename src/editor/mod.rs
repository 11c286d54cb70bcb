//! Editing session and its JSON configuration.

pub mod config;
pub mod session;

pub use config::{EditorConfig, PreviewSize};
pub use session::Editor;
