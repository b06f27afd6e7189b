//! Horizontal soil layers
//!
//! The soil column is a stack of laterally infinite slabs ordered by depth, starting at
//! grade. Each slab has one isotropic conductivity.

use crate::core_types::units::{Meters, ThermalConductivity};
use serde::{Deserialize, Serialize};

/// One horizontal soil slab covering `[depth_top, depth_bottom)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilLayer {
    pub depth_top: Meters,
    /// May be [`Meters::INFINITY`] for the deepest layer
    pub depth_bottom: Meters,
    pub conductivity: ThermalConductivity,
}

impl SoilLayer {
    pub fn new(depth_top: Meters, depth_bottom: Meters, conductivity: ThermalConductivity) -> Self {
        Self {
            depth_top,
            depth_bottom,
            conductivity,
        }
    }

    /// Single layer from grade to infinite depth
    pub fn half_space(conductivity: ThermalConductivity) -> Self {
        Self::new(Meters::ZERO, Meters::INFINITY, conductivity)
    }

    /// Build a contiguous column from grade out of `(thickness, conductivity)` pairs.
    ///
    /// The last entry is extended to infinite depth regardless of its thickness.
    pub fn stack(layers: &[(Meters, ThermalConductivity)]) -> Vec<SoilLayer> {
        let mut top = Meters::ZERO;
        let last = layers.len().saturating_sub(1);
        layers
            .iter()
            .enumerate()
            .map(|(i, &(thickness, conductivity))| {
                let bottom = if i == last {
                    Meters::INFINITY
                } else {
                    top + thickness
                };
                let layer = SoilLayer::new(top, bottom, conductivity);
                top = bottom;
                layer
            })
            .collect()
    }

    /// Band test `depth_top <= z < depth_bottom`
    #[inline]
    pub fn contains(&self, z: f64) -> bool {
        *self.depth_top <= z && z < *self.depth_bottom
    }

    /// Whether the layer overlaps the closed depth band `[lo, hi]`
    #[inline]
    pub fn intersects(&self, lo: f64, hi: f64) -> bool {
        *self.depth_top <= hi && lo < *self.depth_bottom
    }

    /// Band thickness, infinite for a half-space
    pub fn thickness(&self) -> Meters {
        self.depth_bottom - self.depth_top
    }
}
