pub mod day_view;
pub mod grid;
pub mod theme;

pub use grid::{BoxGeometry, GridConfig, OutOfRangePolicy};
