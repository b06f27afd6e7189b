//! Axis-aligned sampling box around a scene

use crate::core_types::{Orientation, Position, Vec3};
use crate::physics::ThermalScene;
use serde::{Deserialize, Serialize};

/// Margin added around the pipes when deriving sample bounds (m)
pub const DEFAULT_PADDING: f64 = 1.0;

/// Axis-aligned box to sample the field in, `z` positive downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleBounds {
    pub min: Position,
    pub max: Position,
}

impl SampleBounds {
    pub fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    /// Box covering every pipe envelope and every finite soil boundary, plus `padding`
    ///
    /// Parallel pipes widen `x`, perpendicular pipes widen `y`. An axis no pipe constrains
    /// spans `[-padding, padding]`. The top never rises above grade.
    pub fn around_scene(scene: &ThermalScene, padding: f64) -> Self {
        let mut x = Span::default();
        let mut y = Span::default();
        let mut deepest: f64 = 0.0;

        for pipe in scene.pipes() {
            let radius = pipe.bedding_radius();
            let offset = *pipe.offset;
            match pipe.orientation {
                Orientation::Parallel => x.include(offset - radius, offset + radius),
                Orientation::Perpendicular => y.include(offset - radius, offset + radius),
            }
            deepest = deepest.max(*pipe.depth + radius);
        }

        for layer in scene.soil_layers() {
            let bottom = *layer.depth_bottom;
            if bottom.is_finite() {
                deepest = deepest.max(bottom);
            }
        }

        let (x_min, x_max) = x.padded(padding);
        let (y_min, y_max) = y.padded(padding);
        Self {
            min: Position::new(x_min, y_min, 0.0),
            max: Position::new(x_max, y_max, deepest + padding),
        }
    }

    /// Size along each axis
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Lattice spacing for `dims` points per axis spanning the box corner to corner
    ///
    /// Axes with fewer than two points get zero spacing.
    pub fn spacing(&self, dims: (usize, usize, usize)) -> Vec3 {
        let extent = self.extent();
        Vec3::new(
            step(extent.x, dims.0),
            step(extent.y, dims.1),
            step(extent.z, dims.2),
        )
    }
}

#[allow(clippy::cast_precision_loss)]
fn step(extent: f64, points: usize) -> f64 {
    if points < 2 {
        0.0
    } else {
        extent / (points - 1) as f64
    }
}

/// Running min/max along one axis
#[derive(Debug, Default, Clone, Copy)]
struct Span(Option<(f64, f64)>);

impl Span {
    fn include(&mut self, lo: f64, hi: f64) {
        self.0 = Some(match self.0 {
            Some((min, max)) => (min.min(lo), max.max(hi)),
            None => (lo, hi),
        });
    }

    fn padded(self, padding: f64) -> (f64, f64) {
        self.0
            .map_or((-padding, padding), |(min, max)| (min - padding, max + padding))
    }
}
