//! Isosurface and isotherm extraction properties
//!
//! Run tests with: cargo test --test `isosurface_extraction`

use pipe_thermal_core::{
    extract, extract_isotherm, extract_par, solve, Celsius, FieldData, Meters, Pipe, Position,
    SampleBounds, SamplingQuality, ScalarGrid, Scenario, SoilLayer, ThermalConductivity,
    DEFAULT_PADDING,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn reference_scenario() -> Scenario {
    Scenario {
        pipes: vec![
            Pipe::heat_source(1, "steam", Celsius::new(232.0), Meters::new(0.2))
                .parallel_at(Meters::ZERO, Meters::new(1.5)),
            Pipe::affected(2, "water", Meters::new(0.2))
                .parallel_at(Meters::new(1.0), Meters::new(1.5)),
        ],
        soil_layers: vec![SoilLayer::half_space(ThermalConductivity::new(1.5))],
        soil_temperature: Celsius::new(17.0),
    }
}

fn inside(bounds: &SampleBounds, p: &Position) -> bool {
    const SLACK: f64 = 1e-9;
    (0..3).all(|axis| p[axis] >= bounds.min[axis] - SLACK && p[axis] <= bounds.max[axis] + SLACK)
}

#[test]
fn test_uniform_grid_yields_no_triangles() {
    let grid = ScalarGrid::from_fn((6, 5, 4), |_, _, _| 42.0);
    for isolevel in [-1.0, 0.0, 41.999, 42.001, 1e9] {
        assert!(extract(&grid, isolevel).is_empty(), "isolevel {isolevel}");
    }
}

#[test]
fn test_near_identical_corners_stay_finite() {
    // Corners straddle the isolevel by far less than the interpolation tolerance
    let grid = ScalarGrid::from_fn((4, 4, 4), |i, j, k| {
        if (i + j + k) % 2 == 0 {
            1.0
        } else {
            1.0 + 5e-10
        }
    });
    let mesh = extract(&grid, 1.0 + 2.5e-10);
    assert!(!mesh.is_empty());
    assert!(mesh.is_finite());
}

#[test]
fn test_random_grids_never_emit_non_finite_vertices() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..20 {
        let dims = (
            rng.random_range(2..9),
            rng.random_range(2..9),
            rng.random_range(2..9),
        );
        let values: Vec<f64> = (0..dims.0 * dims.1 * dims.2)
            .map(|_| {
                if rng.random_bool(0.1) {
                    0.5
                } else {
                    rng.random_range(-1.0..1.0)
                }
            })
            .collect();
        let grid = ScalarGrid::from_values(dims, values).unwrap();

        let mesh = extract(&grid, 0.5);
        assert!(mesh.is_finite());
        assert_eq!(mesh, extract_par(&grid, 0.5));

        if let Some((min, max)) = mesh.bounding_box() {
            assert!(min.x >= 0.0 && min.y >= 0.0 && min.z >= 0.0);
            assert!(max.x <= (dims.0 - 1) as f64);
            assert!(max.y <= (dims.1 - 1) as f64);
            assert!(max.z <= (dims.2 - 1) as f64);
        }
    }
}

#[test]
fn test_sphere_isosurface_spans_the_sphere() {
    let n = 14;
    let grid = ScalarGrid::from_fn((n, n, n), |i, j, k| {
        let p = Position::new(i as f64, j as f64, k as f64);
        (p - Position::new(6.3, 6.1, 6.7)).norm()
    });
    let mesh = extract(&grid, 4.2);

    assert!(mesh.len() > 100);
    let (min, max) = mesh.bounding_box().unwrap();
    assert!((min.x - 2.1).abs() < 0.2 && (max.x - 10.5).abs() < 0.2);
    assert!((min.z - 2.5).abs() < 0.2 && (max.z - 10.9).abs() < 0.2);
}

#[test]
fn test_temperature_isosurface_from_solved_scene() {
    let result = solve(&reference_scenario()).unwrap();
    let bounds = SampleBounds::around_scene(&result.scene, DEFAULT_PADDING);
    let grid = ScalarGrid::sample(
        &result.scene,
        &bounds,
        SamplingQuality::Low.grid_dimensions(),
    );
    assert!(grid.values().iter().all(|t| t.is_finite()));

    let mesh = grid.extract_world(60.0);
    assert!(!mesh.is_empty());
    assert!(mesh.is_finite());
    for triangle in &mesh.triangles {
        for vertex in &triangle.vertices {
            assert!(inside(&bounds, vertex), "vertex {vertex:?} outside {bounds:?}");
        }
    }

    // Far above any sampled temperature
    assert!(grid.extract_world(1000.0).is_empty());
}

#[test]
fn test_cross_section_isotherm_from_solved_scene() {
    let result = solve(&reference_scenario()).unwrap();
    let bounds = SampleBounds::around_scene(&result.scene, DEFAULT_PADDING);
    let (width, height) = SamplingQuality::Low.raster_dimensions(&bounds);
    let raster = FieldData::sample_cross_section(&result.scene, &bounds, width, height, 0.0);

    let (min, max) = raster.range().unwrap();
    assert!(min >= 17.0 && max > 60.0);

    let isotherm = extract_isotherm(&raster, 60.0).to_world(&raster);
    assert!(!isotherm.is_empty());
    for [a, b] in &isotherm.segments {
        for p in [a, b] {
            assert!(p.x >= bounds.min.x - 1e-9 && p.x <= bounds.max.x + 1e-9);
            assert!(p.y >= bounds.min.z - 1e-9 && p.y <= bounds.max.z + 1e-9);
        }
    }
}
