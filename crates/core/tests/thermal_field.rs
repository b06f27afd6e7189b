//! Solve and field properties of the buried pipe model
//!
//! Run tests with: cargo test --test `thermal_field`

use approx::assert_relative_eq;
use pipe_thermal_core::{
    physics::{effective_k_for_path, DEFAULT_SOIL_CONDUCTIVITY},
    solve, Celsius, ConfigError, Meters, Pipe, PipeId, PlanePoint, Position, Scenario, SoilLayer,
    ThermalConductivity, ThermalScene,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::PI;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn uniform_soil(k: f64) -> Vec<SoilLayer> {
    vec![SoilLayer::half_space(ThermalConductivity::new(k))]
}

fn steam_line(id: u32, x: f64, depth: f64) -> Pipe {
    Pipe::heat_source(id, "steam", Celsius::new(232.0), Meters::new(0.2))
        .parallel_at(Meters::new(x), Meters::new(depth))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Reference scenario: bare pipe, single soil layer
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_reference_scenario() {
    init_tracing();
    let scenario = Scenario {
        pipes: vec![
            steam_line(1, 0.0, 1.5),
            Pipe::affected(2, "water", Meters::new(0.2))
                .parallel_at(Meters::new(1.0), Meters::new(1.5)),
        ],
        soil_layers: uniform_soil(1.5),
        soil_temperature: Celsius::new(17.0),
    };
    let result = solve(&scenario).unwrap();

    let r_soil = (2.0_f64 * 1.5 / 0.1).ln() / (2.0 * PI * 1.5);
    let source = result.source(PipeId(1)).unwrap();
    assert_relative_eq!(*source.soil, r_soil, epsilon = 1e-12);
    assert_relative_eq!(*source.total, r_soil, epsilon = 1e-12);
    assert_relative_eq!(*source.heat_flow, 215.0 / r_soil, epsilon = 1e-9);

    let q = 215.0 / r_soil;
    let expected_rise = q / (2.0 * PI * 1.5) * 10.0_f64.sqrt().ln();
    let temperature = *result.temperature_of(PipeId(2)).unwrap();
    let rise = temperature - 17.0;
    assert!(rise.is_finite() && rise > 0.0 && rise < 215.0);
    assert_relative_eq!(rise, expected_rise, epsilon = 1e-6);
    assert_relative_eq!(rise, 72.7767, epsilon = 1e-3);

    let interaction = result.interactions_on(PipeId(2)).next().unwrap();
    assert_relative_eq!(interaction.path_conductivity, 1.5, epsilon = 1e-12);
    assert_relative_eq!(interaction.real_distance, 1.0, epsilon = 1e-12);
    assert_relative_eq!(interaction.image_distance, 10.0_f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn test_heat_flow_matches_resistance_network() {
    let pipe = steam_line(1, 0.0, 2.0)
        .with_wall(Meters::new(0.008), ThermalConductivity::STEEL)
        .with_insulation(Meters::new(0.05), ThermalConductivity::MINERAL_WOOL)
        .with_bedding(Meters::new(0.15), ThermalConductivity::SAND_MOIST);
    let scenario = Scenario {
        pipes: vec![pipe],
        soil_layers: SoilLayer::stack(&[
            (Meters::new(1.0), ThermalConductivity::LOAM),
            (Meters::new(2.0), ThermalConductivity::CLAY),
        ]),
        soil_temperature: Celsius::new(12.0),
    };
    let result = solve(&scenario).unwrap();
    let source = &result.sources[0];

    assert!(*source.total > 0.0);
    assert_relative_eq!(*source.heat_flow, 220.0 / *source.total, max_relative = 1e-12);
    assert_relative_eq!(
        *source.total,
        *source.pipe + *source.insulation + *source.bedding + *source.soil,
        max_relative = 1e-12
    );
    // Pipe band [1.7, 2.3] lies entirely in the clay layer
    assert_eq!(*source.soil_conductivity, 1.3);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Field function
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_source_centre_short_circuits() {
    let scenario = Scenario {
        pipes: vec![
            steam_line(1, 0.0, 1.5),
            Pipe::heat_source(2, "hot water", Celsius::new(90.0), Meters::new(0.3))
                .parallel_at(Meters::new(0.6), Meters::new(1.2)),
            Pipe::affected(3, "water", Meters::new(0.1))
                .perpendicular_at(Meters::new(2.0), Meters::new(0.9)),
        ],
        soil_layers: uniform_soil(1.5),
        soil_temperature: Celsius::new(17.0),
    };
    let scene = solve(&scenario).unwrap().scene;

    assert_eq!(scene.temperature_at(&Position::new(0.0, 0.0, 1.5)), 232.0);
    assert_eq!(scene.temperature_at(&Position::new(0.0, -40.0, 1.5)), 232.0);
    assert_eq!(scene.temperature_at(&Position::new(0.6, 3.0, 1.2)), 90.0);
}

#[test]
fn test_superposition_of_distant_sources() {
    let soil = uniform_soil(1.5);
    let t_soil = Celsius::new(17.0);
    let single = ThermalScene::from_sources([&steam_line(1, 30.0, 1.5)], soil.clone(), t_soil);
    let pair = ThermalScene::from_sources(
        &[steam_line(1, 30.0, 1.5), steam_line(2, -30.0, 1.5)],
        soil,
        t_soil,
    );

    let probe = Position::new(0.0, 0.0, 1.5);
    let one = single.temperature_rise_at(&probe);
    let two = pair.temperature_rise_at(&probe);
    assert!(one > 0.0);
    assert_relative_eq!(two, 2.0 * one, max_relative = 1e-9);
}

#[test]
fn test_deeper_source_warms_probe_less() {
    // Near grade, and at the affected pipe of the reference scenario
    let cases = [
        (Position::new(1.0, 0.0, 0.3), vec![1.0, 1.5, 2.0, 3.0, 4.0, 6.0]),
        (Position::new(1.0, 0.0, 1.5), vec![1.5, 2.0, 3.0, 4.0, 6.0]),
    ];

    for (probe, depths) in cases {
        let rises: Vec<f64> = depths
            .iter()
            .map(|&depth| {
                ThermalScene::from_sources(
                    [&steam_line(1, 0.0, depth)],
                    uniform_soil(1.5),
                    Celsius::new(17.0),
                )
                .temperature_rise_at(&probe)
            })
            .collect();

        for pair in rises.windows(2) {
            assert!(pair[1] < pair[0], "rise did not decay at {probe:?}: {rises:?}");
        }
    }
}

#[test]
fn test_field_is_finite_for_random_points() {
    let scenario = Scenario {
        pipes: vec![
            steam_line(1, 0.0, 1.5),
            Pipe::heat_source(2, "district heat", Celsius::new(120.0), Meters::new(0.25))
                .perpendicular_at(Meters::new(0.0), Meters::new(0.9))
                .with_insulation(Meters::new(0.04), ThermalConductivity::POLYURETHANE_FOAM),
        ],
        soil_layers: SoilLayer::stack(&[
            (Meters::new(0.5), ThermalConductivity::new(0.0)),
            (Meters::new(1.0), ThermalConductivity::SAND_DRY),
            (Meters::new(1.0), ThermalConductivity::CLAY),
        ]),
        soil_temperature: Celsius::new(8.0),
    };
    let scene = solve(&scenario).unwrap().scene;

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..2000 {
        let position = Position::new(
            rng.random_range(-5.0..5.0),
            rng.random_range(-5.0..5.0),
            rng.random_range(-1.0..6.0),
        );
        let t = scene.temperature_at(&position);
        assert!(t.is_finite(), "non-finite temperature at {position:?}");
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Soil conductivity
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_single_layer_path_is_layer_conductivity() {
    let soil = uniform_soil(0.7);
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let p1 = PlanePoint::new(rng.random_range(-20.0..20.0), rng.random_range(0.0..10.0));
        let p2 = PlanePoint::new(rng.random_range(-20.0..20.0), rng.random_range(0.0..10.0));
        assert_relative_eq!(effective_k_for_path(p1, p2, &soil), 0.7, max_relative = 1e-12);
    }
    assert_eq!(
        effective_k_for_path(PlanePoint::origin(), PlanePoint::origin(), &[]),
        DEFAULT_SOIL_CONDUCTIVITY
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Configuration errors
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_configuration_errors_abort_solve() {
    let mut scenario = Scenario {
        pipes: vec![steam_line(1, 0.0, 1.5)],
        soil_layers: Vec::new(),
        soil_temperature: Celsius::new(17.0),
    };
    assert_eq!(solve(&scenario).unwrap_err(), ConfigError::NoSoilLayers);

    scenario.soil_layers = uniform_soil(1.5);
    scenario.pipes[0] = steam_line(1, 0.0, 0.08);
    assert!(matches!(
        solve(&scenario),
        Err(ConfigError::PipeAboveGrade { id: PipeId(1), .. })
    ));

    scenario.pipes = vec![steam_line(1, 0.0, 1.5), steam_line(1, 2.0, 1.5)];
    assert_eq!(
        solve(&scenario).unwrap_err(),
        ConfigError::DuplicatePipeId(PipeId(1))
    );
}

#[test]
fn test_error_messages_are_user_facing() {
    let scenario = Scenario {
        pipes: vec![steam_line(9, 0.0, 0.05)],
        ..Scenario::default()
    };
    let message = solve(&scenario).unwrap_err().to_string();
    assert_eq!(
        message,
        "pipe #9 at depth 0.05 m does not clear its outer radius of 0.1 m"
    );
}
