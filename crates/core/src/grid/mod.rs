//! Sampling lattices for the temperature field

pub mod bounds;
pub mod field_data;
pub mod scalar_grid;

// Re-export main types
pub use bounds::{SampleBounds, DEFAULT_PADDING};
pub use field_data::FieldData;
pub use scalar_grid::ScalarGrid;
