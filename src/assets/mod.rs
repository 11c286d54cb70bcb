//! Source image ingestion: file paths, data URLs and raw encoded bytes.

pub mod decode;

pub use decode::{SourceImage, decode_image, parse_data_url, to_data_url};
