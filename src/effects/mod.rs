/// Pixel application of filter chains (color matrices and Gaussian blur).
pub mod apply;
/// Filter presets, CSS filter strings and their primitive chains.
pub mod filter;
