//! Core types and utilities

pub mod pipe;
pub mod soil;
pub mod units;
pub mod vec3;

pub use pipe::{Orientation, Pipe, PipeId, PipeRole, Sheath};
pub use soil::SoilLayer;
pub use units::*;
pub use vec3::{PlanePoint, Position, Vec3};
