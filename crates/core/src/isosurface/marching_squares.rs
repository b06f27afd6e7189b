//! Marching squares algorithm for isotherm extraction
//!
//! This module implements the marching squares algorithm to extract a line of constant
//! temperature from a [`FieldData`] cross-section raster.

use super::marching_cubes::INTERPOLATION_TOLERANCE;
use crate::core_types::PlanePoint;
use crate::grid::FieldData;
use serde::{Deserialize, Serialize};

/// Isotherm line segments in raster-local coordinates `(column, row)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Isotherm {
    /// Temperature the line was traced at
    pub level: f64,
    /// Unordered segments; consecutive cells share endpoints
    pub segments: Vec<[PlanePoint; 2]>,
}

impl Isotherm {
    /// Get number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get number of segment endpoints
    pub fn vertex_count(&self) -> usize {
        self.segments.len() * 2
    }

    /// Segments mapped to world `(x, z)` through the raster's origin and spacing
    #[must_use]
    pub fn to_world(&self, raster: &FieldData) -> Isotherm {
        Isotherm {
            level: self.level,
            segments: self
                .segments
                .iter()
                .map(|[a, b]| [raster.to_world(*a), raster.to_world(*b)])
                .collect(),
        }
    }
}

/// Extract the `isolevel` isotherm from a raster using marching squares
///
/// Corners below `isolevel` count as inside. Fully inside and fully outside cells are
/// skipped; the two saddle cases each emit two segments.
pub fn extract_isotherm(raster: &FieldData, isolevel: f64) -> Isotherm {
    let mut isotherm = Isotherm {
        level: isolevel,
        segments: Vec::new(),
    };
    let width = raster.width;
    let height = raster.height;
    if raster.data.len() < width * height {
        return isotherm;
    }

    for y in 0..height.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            // Get 4 corners of cell
            let tl = raster.data[y * width + x];
            let tr = raster.data[y * width + x + 1];
            let bl = raster.data[(y + 1) * width + x];
            let br = raster.data[(y + 1) * width + x + 1];

            // Compute marching squares case (0-15)
            let case = u8::from(tl < isolevel)
                | (u8::from(tr < isolevel) << 1)
                | (u8::from(br < isolevel) << 2)
                | (u8::from(bl < isolevel) << 3);

            // Skip empty and full cells
            if case == 0 || case == 15 {
                continue;
            }

            add_cell_segments(&mut isotherm.segments, case, (x, y), (tl, tr, br, bl), isolevel);
        }
    }

    isotherm
}

/// Add segments for a marching square cell
fn add_cell_segments(
    segments: &mut Vec<[PlanePoint; 2]>,
    case: u8,
    cell: (usize, usize),
    corners: (f64, f64, f64, f64), // (tl, tr, br, bl)
    isolevel: f64,
) {
    let (tl, tr, br, bl) = corners;
    #[allow(clippy::cast_precision_loss)]
    let (x, y) = (cell.0 as f64, cell.1 as f64);

    let p_tl = PlanePoint::new(x, y);
    let p_tr = PlanePoint::new(x + 1.0, y);
    let p_br = PlanePoint::new(x + 1.0, y + 1.0);
    let p_bl = PlanePoint::new(x, y + 1.0);

    // Edge crossings
    let top = crossing(isolevel, p_tl, p_tr, tl, tr);
    let right = crossing(isolevel, p_tr, p_br, tr, br);
    let bottom = crossing(isolevel, p_bl, p_br, bl, br);
    let left = crossing(isolevel, p_tl, p_bl, tl, bl);

    match case {
        1 | 14 => segments.push([top, left]),
        2 | 13 => segments.push([right, top]),
        3 | 12 => segments.push([right, left]),
        4 | 11 => segments.push([bottom, right]),
        6 | 9 => segments.push([bottom, top]),
        7 | 8 => segments.push([left, bottom]),
        // Saddles: keep the two inside corners separated
        5 => {
            segments.push([top, left]);
            segments.push([bottom, right]);
        }
        10 => {
            segments.push([right, top]);
            segments.push([left, bottom]);
        }
        _ => {}
    }
}

/// Where the linear interpolant along `p1 → p2` reaches `isolevel`, falling back to `p1`
fn crossing(isolevel: f64, p1: PlanePoint, p2: PlanePoint, v1: f64, v2: f64) -> PlanePoint {
    let dv = v2 - v1;
    if dv.is_nan() || dv.abs() < INTERPOLATION_TOLERANCE {
        return p1;
    }
    let p = p1 + (p2 - p1) * ((isolevel - v1) / dv);
    if p.x.is_finite() && p.y.is_finite() {
        p
    } else {
        p1
    }
}
