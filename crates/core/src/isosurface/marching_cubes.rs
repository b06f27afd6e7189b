//! Marching cubes over a [`ScalarGrid`]
//!
//! Every cell between neighbouring lattice points is classified by which of its eight
//! corners lie below the isolevel. The 8-bit mask indexes [`EDGE_TABLE`] for the crossed
//! edges and [`TRI_TABLE`] for how to triangulate them. Vertices are produced in
//! grid-local index units; see [`Mesh::to_world`] for the mapping to world space.

use super::mesh::{Mesh, Triangle};
use super::tables::{CORNERS, EDGE_CORNERS, EDGE_TABLE, TRI_TABLE};
use crate::core_types::Position;
use crate::grid::ScalarGrid;
use rayon::prelude::*;
use tracing::debug;

/// Corner values closer than this are treated as equal during interpolation
pub const INTERPOLATION_TOLERANCE: f64 = 1e-9;

/// Point on the edge `p1 → p2` where the linear interpolant of `v1 → v2` hits `isolevel`
///
/// Returns `p1` unchanged when the two values are too close to divide by, or when the
/// result would not be finite.
pub fn interpolate_edge(isolevel: f64, p1: Position, p2: Position, v1: f64, v2: f64) -> Position {
    let dv = v2 - v1;
    if dv.is_nan() || dv.abs() < INTERPOLATION_TOLERANCE {
        return p1;
    }
    let t = (isolevel - v1) / dv;
    let p = p1 + (p2 - p1) * t;
    if p.coords.iter().all(|c| c.is_finite()) {
        p
    } else {
        p1
    }
}

/// Extract the `isolevel` surface from `grid`
pub fn extract(grid: &ScalarGrid, isolevel: f64) -> Mesh {
    let (_, _, nz) = grid.dims();
    let mut triangles = Vec::new();
    for k in 0..nz.saturating_sub(1) {
        march_slab(grid, isolevel, k, &mut triangles);
    }
    debug!("Extracted {} triangle(s) at isolevel {:.3}", triangles.len(), isolevel);
    Mesh::new(triangles)
}

/// Same output as [`extract`], with depth slabs processed in parallel
///
/// Slabs are concatenated in order, so the triangle order matches the serial path.
pub fn extract_par(grid: &ScalarGrid, isolevel: f64) -> Mesh {
    let (_, _, nz) = grid.dims();
    let slabs: Vec<Vec<Triangle>> = (0..nz.saturating_sub(1))
        .into_par_iter()
        .map(|k| {
            let mut triangles = Vec::new();
            march_slab(grid, isolevel, k, &mut triangles);
            triangles
        })
        .collect();

    let triangles: Vec<Triangle> = slabs.into_iter().flatten().collect();
    debug!("Extracted {} triangle(s) at isolevel {:.3}", triangles.len(), isolevel);
    Mesh::new(triangles)
}

fn march_slab(grid: &ScalarGrid, isolevel: f64, k: usize, out: &mut Vec<Triangle>) {
    let (nx, ny, _) = grid.dims();
    for j in 0..ny.saturating_sub(1) {
        for i in 0..nx.saturating_sub(1) {
            march_cell(grid, isolevel, (i, j, k), out);
        }
    }
}

fn march_cell(
    grid: &ScalarGrid,
    isolevel: f64,
    cell: (usize, usize, usize),
    out: &mut Vec<Triangle>,
) {
    let (i, j, k) = cell;

    let mut positions = [Position::origin(); 8];
    let mut values = [0.0; 8];
    let mut mask = 0usize;
    for (corner, &(dx, dy, dz)) in CORNERS.iter().enumerate() {
        let (ci, cj, ck) = (i + dx, j + dy, k + dz);
        #[allow(clippy::cast_precision_loss)]
        let position = Position::new(ci as f64, cj as f64, ck as f64);
        positions[corner] = position;
        values[corner] = grid.get(ci, cj, ck);
        if values[corner] < isolevel {
            mask |= 1 << corner;
        }
    }

    let edges = EDGE_TABLE[mask];
    if edges == 0 {
        return;
    }

    let mut crossings = [Position::origin(); 12];
    for (edge, &(a, b)) in EDGE_CORNERS.iter().enumerate() {
        if edges & (1 << edge) != 0 {
            crossings[edge] =
                interpolate_edge(isolevel, positions[a], positions[b], values[a], values[b]);
        }
    }

    for triple in TRI_TABLE[mask].chunks_exact(3) {
        let (Ok(a), Ok(b), Ok(c)) = (
            usize::try_from(triple[0]),
            usize::try_from(triple[1]),
            usize::try_from(triple[2]),
        ) else {
            break;
        };
        out.push(Triangle::new(crossings[a], crossings[b], crossings[c]));
    }
}
