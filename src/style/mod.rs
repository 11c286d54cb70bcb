pub mod color;
pub mod state;
