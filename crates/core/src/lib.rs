//! Buried Pipeline Thermal Engine
//!
//! Estimates steady-state temperatures of buried pipes heated by nearby heat-source pipes
//! through layered soil, and turns the resulting temperature field into isotherm lines
//! and isosurface meshes.
//!
//! ## Pipeline
//!
//! - [`solver::solve`]: resistance network per heat source, image-source superposition
//!   onto every affected pipe
//! - [`ThermalScene::temperature_at`]: the field itself, evaluated at any point
//! - [`grid`]: parallel sampling into 2D rasters and 3D lattices
//! - [`isosurface`]: marching squares and marching cubes over the samples
//!
//! The model is analytic (radial conduction resistances plus 2D line sources with
//! same-sign ground images), steady state only.

// Core types and utilities
pub mod core_types;
pub mod error;

pub mod grid;
pub mod isosurface;
pub mod physics;
pub mod solver;

// Re-export core types
pub use core_types::{
    Celsius, CelsiusDelta, Meters, Orientation, Pipe, PipeId, PipeRole, PlanePoint, Position,
    Sheath, SoilLayer, ThermalConductivity, ThermalResistance, Vec3, WattsPerMeter,
};
pub use error::{ConfigError, ConfigResult};

// Re-export engine entry points
pub use grid::{FieldData, SampleBounds, ScalarGrid, DEFAULT_PADDING};
pub use isosurface::{extract, extract_isotherm, extract_par, Isotherm, Mesh, Triangle};
pub use physics::{InteractionResult, ScalarField, SourceResistanceResult, ThermalScene};
pub use solver::{solve, PipeTemperature, SamplingQuality, Scenario, SolveResult};
