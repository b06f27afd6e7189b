//! 3D lattice of field samples feeding isosurface extraction

use crate::core_types::{Position, Vec3};
use crate::grid::SampleBounds;
use crate::isosurface::{self, Mesh};
use crate::physics::ScalarField;
use rayon::prelude::*;
use tracing::debug;

/// Regular lattice of scalar samples, `x` fastest then `y` then `z`
///
/// Written once by a sampler and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarGrid {
    values: Vec<f64>,
    dims: (usize, usize, usize),
    /// World position of lattice point `(0, 0, 0)`
    pub origin: Position,
    /// World distance between neighbouring lattice points
    pub spacing: Vec3,
}

impl ScalarGrid {
    /// Wrap existing samples, or `None` if `values` does not hold `nx * ny * nz` entries
    pub fn from_values(dims: (usize, usize, usize), values: Vec<f64>) -> Option<Self> {
        (values.len() == dims.0 * dims.1 * dims.2).then(|| Self {
            values,
            dims,
            origin: Position::origin(),
            spacing: Vec3::new(1.0, 1.0, 1.0),
        })
    }

    /// Fill a lattice in index space from `f(i, j, k)`
    pub fn from_fn(dims: (usize, usize, usize), f: impl Fn(usize, usize, usize) -> f64) -> Self {
        let (nx, ny, nz) = dims;
        let mut values = Vec::with_capacity(nx * ny * nz);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    values.push(f(i, j, k));
                }
            }
        }
        Self {
            values,
            dims,
            origin: Position::origin(),
            spacing: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Sample `field` on a `(nx, ny, nz)` lattice spanning `bounds` corner to corner
    ///
    /// Depth slabs are filled in parallel.
    pub fn sample<F: ScalarField>(
        field: &F,
        bounds: &SampleBounds,
        dims: (usize, usize, usize),
    ) -> Self {
        let (nx, ny, nz) = dims;
        let origin = bounds.min;
        let spacing = bounds.spacing(dims);
        let mut values = vec![0.0; nx * ny * nz];

        let slab = nx * ny;
        if slab > 0 {
            values
                .par_chunks_mut(slab)
                .enumerate()
                .for_each(|(k, layer)| {
                    #[allow(clippy::cast_precision_loss)]
                    let z = origin.z + k as f64 * spacing.z;
                    for (index, value) in layer.iter_mut().enumerate() {
                        let (i, j) = (index % nx, index / nx);
                        #[allow(clippy::cast_precision_loss)]
                        let position = Position::new(
                            origin.x + i as f64 * spacing.x,
                            origin.y + j as f64 * spacing.y,
                            z,
                        );
                        *value = field.value_at(&position);
                    }
                });
        }

        debug!("Sampled {}x{}x{} grid ({} points)", nx, ny, nz, values.len());
        Self {
            values,
            dims,
            origin,
            spacing,
        }
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        self.dims
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.dims.1 + j) * self.dims.0 + i
    }

    /// Sample at lattice point `(i, j, k)`; zero outside the lattice
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> f64 {
        let (nx, ny, nz) = self.dims;
        if i < nx && j < ny && k < nz {
            self.values[self.index(i, j, k)]
        } else {
            0.0
        }
    }

    /// Extract an isosurface and map it into world coordinates with this grid's
    /// origin and spacing
    pub fn extract_world(&self, isolevel: f64) -> Mesh {
        isosurface::extract_par(self, isolevel).to_world(self.origin, self.spacing)
    }
}
