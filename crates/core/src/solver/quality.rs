//! Quality presets for field sampling resolution
//!
//! This module defines quality presets that determine how densely the temperature field
//! is sampled. Higher quality means smoother isotherms but more field evaluations.

use crate::grid::SampleBounds;
use serde::{Deserialize, Serialize};

/// Quality preset determining sampling resolution
///
/// Each preset balances smoothness and cost. The raster width is fixed per preset and the
/// height follows the aspect ratio of the sampled cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SamplingQuality {
    /// 80 points per axis, 1024 px rasters
    Ultra,
    /// 60 points per axis, 512 px rasters
    High,
    /// 40 points per axis, 256 px rasters
    #[default]
    Medium,
    /// 20 points per axis, 128 px rasters
    Low,
}

impl SamplingQuality {
    /// Lattice points per axis for 3D isosurface grids
    #[must_use]
    pub const fn grid_points(&self) -> usize {
        match self {
            Self::Ultra => 80,
            Self::High => 60,
            Self::Medium => 40,
            Self::Low => 20,
        }
    }

    /// Raster width in pixels for 2D cross-sections
    #[must_use]
    pub const fn raster_width(&self) -> usize {
        match self {
            Self::Ultra => 1024,
            Self::High => 512,
            Self::Medium => 256,
            Self::Low => 128,
        }
    }

    /// 3D grid dimensions `(nx, ny, nz)`
    #[must_use]
    pub const fn grid_dimensions(&self) -> (usize, usize, usize) {
        let n = self.grid_points();
        (n, n, n)
    }

    /// Raster dimensions `(width, height)` for the `x`/`z` extent of `bounds`
    ///
    /// The height keeps square pixels and is clamped to at least 2 rows.
    #[must_use]
    pub fn raster_dimensions(&self, bounds: &SampleBounds) -> (usize, usize) {
        let width = self.raster_width();
        let extent = bounds.extent();
        let aspect = if extent.x > 0.0 {
            extent.z / extent.x
        } else {
            1.0
        };

        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let height = ((width as f64 * aspect).round() as usize).clamp(2, 4096);

        (width, height)
    }
}
