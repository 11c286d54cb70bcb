/// Caption block geometry: wrapping, metrics, line and background placement.
pub mod caption;
/// Aspect-fit (letterbox) scaling.
pub mod fit;
/// Greedy word wrap over a pluggable text measure.
pub mod wrap;
