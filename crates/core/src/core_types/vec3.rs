//! Vector and point aliases for positions in the soil volume.
//!
//! Axes follow the cross-section convention used throughout the crate:
//! `x` runs across the section, `y` runs along parallel pipes, and `z` is depth below
//! grade, positive downward.

use nalgebra::{Point2, Point3, Vector3};

/// 3D vector type for offsets and directions.
pub type Vec3 = Vector3<f64>;

/// 3D position `(x, y, depth)` in meters.
pub type Position = Point3<f64>;

/// Position inside one pipe's cross-section plane: `(horizontal offset, depth)`.
pub type PlanePoint = Point2<f64>;
