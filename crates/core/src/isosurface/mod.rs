//! Isosurface and isotherm extraction
//!
//! Both extractors depend only on sampled values, never on the physics:
//! - [`extract`] / [`extract_par`]: marching cubes over a 3D [`crate::grid::ScalarGrid`]
//! - [`extract_isotherm`]: marching squares over a 2D [`crate::grid::FieldData`]
//!
//! Neither ever emits a non-finite vertex.

pub mod marching_cubes;
pub mod marching_squares;
pub mod mesh;
pub mod tables;

pub use marching_cubes::{extract, extract_par, interpolate_edge, INTERPOLATION_TOLERANCE};
pub use marching_squares::{extract_isotherm, Isotherm};
pub use mesh::{Mesh, Triangle};
pub use tables::{EDGE_TABLE, TRI_TABLE};
