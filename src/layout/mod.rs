//! Layout inference: rows of frames and the uniform output grid.

mod grid;
mod rows;

pub use grid::Grid;
pub use rows::{cluster_rows, Row};
