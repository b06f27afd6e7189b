//! Steady-state conduction physics for buried pipes

pub mod image_sources;
pub mod interaction;
pub mod resistance;
pub mod soil_conductivity;
pub mod temperature_field;

pub use image_sources::{line_source_rise, ImageGeometry};
pub use interaction::InteractionResult;
pub use resistance::{
    bedding_surface_temperature, shell_resistance, soil_resistance, solve_source,
    SourceResistanceResult,
};
pub use soil_conductivity::{
    effective_k_for_path, effective_k_for_pipe, k_at_depth, DEFAULT_SOIL_CONDUCTIVITY,
    PATH_SEGMENTS,
};
pub use temperature_field::{HeatSource, ScalarField, SolvedPipe, ThermalScene};
