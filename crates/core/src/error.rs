//! Configuration errors reported before a solve starts.
//!
//! Numeric degeneracies are never errors; the physics substitutes safe fallbacks
//! instead. Only inputs that make the scenario meaningless end up here.

use crate::core_types::PipeId;
use thiserror::Error;

/// Result type for scenario validation and solving.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Scenario inputs that cannot be solved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// No soil layers were supplied.
    #[error("at least one soil layer is required")]
    NoSoilLayers,

    /// A layer does not start where the previous one ended (or the first is not at grade).
    #[error("soil layer {index} starts at {actual_top} m, expected {expected_top} m")]
    SoilLayerGap {
        /// Index of the offending layer.
        index: usize,
        /// Depth where the layer should start.
        expected_top: f64,
        /// Depth where it actually starts.
        actual_top: f64,
    },

    /// A layer has unusable properties.
    #[error("soil layer {index} is invalid: {reason}")]
    InvalidSoilLayer {
        /// Index of the offending layer.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A pipe has unusable geometry or materials.
    #[error("pipe {id} is invalid: {reason}")]
    InvalidPipe {
        /// Offending pipe.
        id: PipeId,
        /// What is wrong with it.
        reason: String,
    },

    /// The pipe's outer envelope reaches grade.
    #[error("pipe {id} at depth {depth} m does not clear its outer radius of {outer_radius} m")]
    PipeAboveGrade {
        /// Offending pipe.
        id: PipeId,
        /// Centreline depth.
        depth: f64,
        /// Total outer radius including insulation and bedding.
        outer_radius: f64,
    },

    /// Two pipes share an id.
    #[error("duplicate pipe id {0}")]
    DuplicatePipeId(PipeId),

    /// Ambient soil temperature is not a finite number.
    #[error("soil temperature must be finite, got {0}")]
    InvalidSoilTemperature(f64),
}
