//! Method-of-images geometry
//!
//! Every heat source has a mirror twin reflected across grade (depth `-z`) carrying the
//! same sign of heat flow. A target's temperature rise is
//! `Q / (2π·k_path) · ln(d_image / d_real)`.
//!
//! Distances are planar in the source's cross-section plane. Pipe-to-pipe pairs of
//! different orientation collapse to depth only.

use crate::core_types::{Pipe, PlanePoint, Position};
use std::f64::consts::TAU;

/// Distances from a target to a source and to its image, plus the path the soil
/// conductivity is integrated along
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageGeometry {
    /// Distance to the real source, clamped below to the source's outer radius
    /// (not clamped for depth-only pairs)
    pub real: f64,
    /// Distance to the image source
    pub image: f64,
    /// Path start (source side) as `(offset, depth)`
    pub path_from: PlanePoint,
    /// Path end (target side) as `(offset, depth)`
    pub path_to: PlanePoint,
}

impl ImageGeometry {
    /// Geometry between `source` and an arbitrary point
    pub fn for_point(source: &Pipe, position: &Position) -> Self {
        Self::planar(source, source.project(position))
    }

    /// Geometry between `source` and another pipe's centreline
    pub fn between(source: &Pipe, target: &Pipe) -> Self {
        if source.orientation == target.orientation {
            return Self::planar(source, target.center());
        }

        let z_source = *source.depth;
        let z_target = *target.depth;
        Self {
            real: (z_target - z_source).abs(),
            image: z_target + z_source,
            path_from: PlanePoint::new(0.0, z_source),
            path_to: PlanePoint::new(0.0, z_target),
        }
    }

    fn planar(source: &Pipe, target: PlanePoint) -> Self {
        let center = source.center();
        let image = PlanePoint::new(center.x, -center.y);
        Self {
            real: (target - center).norm().max(source.bedding_radius()),
            image: (target - image).norm(),
            path_from: center,
            path_to: target,
        }
    }
}

/// Temperature rise from one line source with heat flow `q` (W/m)
///
/// Zero unless `k_path > 0` and the image is farther than the real source; any
/// non-finite intermediate also yields zero.
pub fn line_source_rise(q: f64, k_path: f64, geometry: &ImageGeometry) -> f64 {
    if k_path <= 0.0 || geometry.image <= geometry.real {
        return 0.0;
    }
    let rise = q / (TAU * k_path) * (geometry.image / geometry.real).ln();
    if rise.is_finite() {
        rise
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Celsius, Meters};
    use std::f64::consts::PI;

    fn source() -> Pipe {
        Pipe::heat_source(1, "hot", Celsius::new(80.0), Meters::new(0.2))
            .parallel_at(Meters::ZERO, Meters::new(1.5))
    }

    #[test]
    fn test_point_distances_in_source_plane() {
        let geometry = ImageGeometry::for_point(&source(), &Position::new(1.0, 42.0, 1.5));
        assert!((geometry.real - 1.0).abs() < 1e-12);
        assert!((geometry.image - 10.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_real_distance_clamped_to_outer_radius() {
        let geometry = ImageGeometry::for_point(&source(), &Position::new(0.0, 0.0, 1.5));
        assert_eq!(geometry.real, 0.1);
        assert!((geometry.image - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_perpendicular_source_uses_lateral_plane() {
        let pipe = source().perpendicular_at(Meters::new(2.0), Meters::new(1.0));
        let geometry = ImageGeometry::for_point(&pipe, &Position::new(100.0, 5.0, 5.0));
        assert!((geometry.real - 5.0).abs() < 1e-12);
        assert!((geometry.image - (9.0_f64 + 36.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_mixed_orientation_pair_is_depth_only() {
        let target = Pipe::affected(2, "cold", Meters::new(0.1))
            .perpendicular_at(Meters::new(30.0), Meters::new(0.8));
        let geometry = ImageGeometry::between(&source(), &target);
        assert!((geometry.real - 0.7).abs() < 1e-12);
        assert!((geometry.image - 2.3).abs() < 1e-12);
    }

    #[test]
    fn test_line_source_rise_formula() {
        let geometry = ImageGeometry::for_point(&source(), &Position::new(1.0, 0.0, 1.5));
        let rise = line_source_rise(600.0, 1.5, &geometry);
        let expected = 600.0 / (2.0 * PI * 1.5) * 10.0_f64.sqrt().ln();
        assert!((rise - expected).abs() < 1e-9);
    }

    #[test]
    fn test_line_source_rise_guards() {
        let geometry = ImageGeometry::for_point(&source(), &Position::new(1.0, 0.0, 1.5));
        assert_eq!(line_source_rise(600.0, 0.0, &geometry), 0.0);

        let coincident = ImageGeometry {
            real: 0.0,
            image: 3.0,
            path_from: PlanePoint::new(0.0, 1.5),
            path_to: PlanePoint::new(0.0, 1.5),
        };
        assert_eq!(line_source_rise(600.0, 1.5, &coincident), 0.0);

        let inverted = ImageGeometry {
            real: 3.0,
            image: 2.0,
            ..coincident
        };
        assert_eq!(line_source_rise(600.0, 1.5, &inverted), 0.0);
    }
}
