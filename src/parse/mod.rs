//! Text heuristics applied to map provider output.

mod address;
mod coordinates;

pub use address::decompose_address;
pub use coordinates::extract_coordinates;
