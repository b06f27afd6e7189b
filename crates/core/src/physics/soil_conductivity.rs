//! Effective soil conductivity from layered soil data
//!
//! Three views of the same layer stack:
//! - point lookup by depth
//! - arithmetic mean over a pipe's depth band (used for the pipe's own soil resistance)
//! - series (harmonic) average along a straight path (used between a source and a target)
//!
//! Horizontal variation is not modelled: only the depth of each path sample matters.

use crate::core_types::{Pipe, PlanePoint, SoilLayer};

/// Conductivity of typical moist soil, used when no layer data applies (W/(m·K))
pub const DEFAULT_SOIL_CONDUCTIVITY: f64 = 1.5;

/// Number of equal sub-segments a path is split into
pub const PATH_SEGMENTS: usize = 100;

/// Paths shorter than this are treated as zero length
const MIN_PATH_LENGTH: f64 = 1e-9;

/// First layer's conductivity, or the typical-soil sentinel when there are no layers
#[inline]
pub fn fallback_conductivity(layers: &[SoilLayer]) -> f64 {
    layers
        .first()
        .map_or(DEFAULT_SOIL_CONDUCTIVITY, |layer| *layer.conductivity)
}

/// Conductivity of the layer containing depth `z`
///
/// Depths at or below the deepest layer's bottom take the deepest layer's value.
/// Depths that fall in no band otherwise (above grade, gaps) take the first layer's value.
pub fn k_at_depth(z: f64, layers: &[SoilLayer]) -> f64 {
    if let Some(layer) = layers.iter().find(|layer| layer.contains(z)) {
        return *layer.conductivity;
    }

    let deepest = layers.iter().max_by(|a, b| a.depth_bottom.cmp(&b.depth_bottom));
    match deepest {
        Some(layer) if z >= *layer.depth_bottom => *layer.conductivity,
        _ => fallback_conductivity(layers),
    }
}

/// Mean conductivity of every layer overlapping the pipe's full outer band
/// `[depth - r_outer, depth + r_outer]`
pub fn effective_k_for_pipe(pipe: &Pipe, layers: &[SoilLayer]) -> f64 {
    let r_outer = pipe.bedding_radius();
    let lo = *pipe.depth - r_outer;
    let hi = *pipe.depth + r_outer;

    let (sum, count) = layers
        .iter()
        .filter(|layer| layer.intersects(lo, hi))
        .fold((0.0, 0_usize), |(sum, count), layer| {
            (sum + *layer.conductivity, count + 1)
        });

    if count == 0 {
        fallback_conductivity(layers)
    } else {
        sum / count as f64
    }
}

/// Effective conductivity along the straight segment `p1 → p2`
///
/// Points are `(horizontal offset, depth)`. The segment is split into
/// [`PATH_SEGMENTS`] equal pieces; each adds `length / k(midpoint depth)` to a series
/// resistance and the result is `total_length / total_resistance`. Pieces lying in a
/// zero-conductivity layer are skipped.
pub fn effective_k_for_path(p1: PlanePoint, p2: PlanePoint, layers: &[SoilLayer]) -> f64 {
    let length = (p2 - p1).norm();
    if length.is_nan() || length <= MIN_PATH_LENGTH {
        return fallback_conductivity(layers);
    }

    let segment = length / PATH_SEGMENTS as f64;
    let mut resistance = 0.0;
    for i in 0..PATH_SEGMENTS {
        let t = (i as f64 + 0.5) / PATH_SEGMENTS as f64;
        let depth = p1.y + t * (p2.y - p1.y);
        let k = k_at_depth(depth, layers);
        if k > 0.0 {
            resistance += segment / k;
        }
    }

    let k_eff = length / resistance;
    if resistance > 0.0 && k_eff.is_finite() {
        k_eff
    } else {
        fallback_conductivity(layers)
    }
}
