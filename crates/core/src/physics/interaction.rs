//! Heat-source to affected-pipe interaction

use crate::core_types::{Pipe, PipeId, SoilLayer};
use crate::physics::image_sources::{line_source_rise, ImageGeometry};
use crate::physics::soil_conductivity::effective_k_for_path;
use crate::physics::temperature_field::HeatSource;
use serde::{Deserialize, Serialize};

/// Contribution of one heat source to one affected pipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionResult {
    pub source_id: PipeId,
    pub target_id: PipeId,
    /// Series-averaged soil conductivity between the two centrelines
    pub path_conductivity: f64,
    pub real_distance: f64,
    pub image_distance: f64,
    /// Temperature rise at the target (K)
    pub temperature_rise: f64,
}

impl InteractionResult {
    /// Evaluate the image-source rise of `source` at `target`'s centreline
    pub fn between(source: &HeatSource, target: &Pipe, layers: &[SoilLayer]) -> Self {
        let geometry = ImageGeometry::between(&source.pipe, target);
        let path_conductivity = effective_k_for_path(geometry.path_from, geometry.path_to, layers);

        Self {
            source_id: source.pipe.id,
            target_id: target.id,
            path_conductivity,
            real_distance: geometry.real,
            image_distance: geometry.image,
            temperature_rise: line_source_rise(*source.heat_flow, path_conductivity, &geometry),
        }
    }
}
