//! 2D raster of field samples
//!
//! Stores one cross-section of the temperature field as a flat `Vec<f64>` in row-major
//! order. Rows run along `x`, successive rows go down in depth.

use crate::core_types::{PlanePoint, Position};
use crate::grid::SampleBounds;
use crate::physics::ScalarField;
use nalgebra::Vector2;
use rayon::prelude::*;
use tracing::debug;

/// Field raster in the `(x, z)` plane
#[derive(Debug, Clone)]
pub struct FieldData {
    /// Field values in row-major order (row * width + column)
    pub data: Vec<f64>,
    /// Raster width in pixels
    pub width: usize,
    /// Raster height in pixels
    pub height: usize,
    /// World `(x, z)` of pixel `(0, 0)`
    pub origin: PlanePoint,
    /// World distance between neighbouring pixels along `x` and `z`
    pub spacing: Vector2<f64>,
}

impl FieldData {
    /// Create a new raster with given dimensions, initialized to zero
    ///
    /// Pixel coordinates map one to one onto world units until a sampler sets
    /// `origin` and `spacing`.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_value(width, height, 0.0)
    }

    /// Create a new raster with given dimensions, initialized to a value
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: f64) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
            origin: PlanePoint::origin(),
            spacing: Vector2::new(1.0, 1.0),
        }
    }

    /// Sample the `(x, z)` cross-section of `field` at lateral offset `y`
    ///
    /// Pixels span `bounds` corner to corner. Rows are filled in parallel.
    #[must_use]
    pub fn sample_cross_section<F: ScalarField>(
        field: &F,
        bounds: &SampleBounds,
        width: usize,
        height: usize,
        y: f64,
    ) -> Self {
        let mut raster = Self::new(width, height);
        raster.origin = PlanePoint::new(bounds.min.x, bounds.min.z);
        let spacing = bounds.spacing((width, 1, height));
        raster.spacing = Vector2::new(spacing.x, spacing.z);

        if width == 0 {
            return raster;
        }

        let origin = raster.origin;
        let step = raster.spacing;
        raster
            .data
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, pixels)| {
                #[allow(clippy::cast_precision_loss)]
                let z = origin.y + row as f64 * step.y;
                for (column, pixel) in pixels.iter_mut().enumerate() {
                    #[allow(clippy::cast_precision_loss)]
                    let x = origin.x + column as f64 * step.x;
                    *pixel = field.value_at(&Position::new(x, y, z));
                }
            });

        debug!("Sampled {}x{} cross-section at y={:.3}", width, height, y);
        raster
    }

    /// Get value at pixel, `None` outside the raster
    #[must_use]
    pub fn get(&self, column: usize, row: usize) -> Option<f64> {
        if column < self.width && row < self.height {
            Some(self.data[row * self.width + column])
        } else {
            None
        }
    }

    /// Set value at pixel
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, column: usize, row: usize, value: f64) {
        assert!(
            column < self.width && row < self.height,
            "Coordinates out of bounds"
        );
        self.data[row * self.width + column] = value;
    }

    /// World `(x, z)` of a raster-local point
    #[must_use]
    pub fn to_world(&self, local: PlanePoint) -> PlanePoint {
        PlanePoint::new(
            self.origin.x + local.x * self.spacing.x,
            self.origin.y + local.y * self.spacing.y,
        )
    }

    /// Smallest and largest value, `None` for an empty raster
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        self.data.iter().fold(None, |range, &value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
    }
}
