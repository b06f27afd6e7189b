use clap::{Parser, ValueEnum};
use pipe_thermal_core::{
    extract_isotherm, solve, Celsius, FieldData, Meters, Pipe, SampleBounds, SamplingQuality,
    ScalarGrid, Scenario, SoilLayer, ThermalConductivity, DEFAULT_PADDING,
};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Sampling resolution preset
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Quality {
    Low,
    Medium,
    High,
    Ultra,
}

impl From<Quality> for SamplingQuality {
    fn from(quality: Quality) -> Self {
        match quality {
            Quality::Low => SamplingQuality::Low,
            Quality::Medium => SamplingQuality::Medium,
            Quality::High => SamplingQuality::High,
            Quality::Ultra => SamplingQuality::Ultra,
        }
    }
}

/// Buried pipe thermal demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "pipe-thermal-demo")]
#[command(about = "Steady-state buried pipeline temperature demo", long_about = None)]
struct Args {
    /// Heat source temperature in °C
    #[arg(short = 't', long, default_value_t = 232.0)]
    source_temperature: f64,

    /// Undisturbed soil temperature in °C
    #[arg(short, long, default_value_t = 17.0)]
    soil_temperature: f64,

    /// Heat source centreline depth in meters
    #[arg(long, default_value_t = 1.5)]
    source_depth: f64,

    /// Heat source outer diameter in meters
    #[arg(long, default_value_t = 0.2)]
    source_diameter: f64,

    /// Heat source insulation thickness in meters (0 = bare)
    #[arg(long, default_value_t = 0.0)]
    insulation: f64,

    /// Affected pipe centreline depth in meters
    #[arg(long, default_value_t = 1.5)]
    affected_depth: f64,

    /// Horizontal separation between heat source and affected pipe in meters
    #[arg(short = 'x', long, default_value_t = 1.0)]
    separation: f64,

    /// Depth of an extra perpendicular affected pipe crossing the source (omit for none)
    #[arg(long)]
    crossing_depth: Option<f64>,

    /// Soil thermal conductivity in W/(m·K); repeat with --layer-thickness for layered soil
    #[arg(short = 'k', long, default_value = "1.5")]
    soil_k: Vec<f64>,

    /// Thickness of every soil layer but the last, in meters
    #[arg(long)]
    layer_thickness: Vec<f64>,

    /// Sampling quality preset
    #[arg(short, long, value_enum, default_value_t = Quality::Medium)]
    quality: Quality,

    /// Isotherm temperatures in °C to extract
    #[arg(short, long, default_values_t = vec![40.0, 60.0, 100.0])]
    isotherm: Vec<f64>,
}

impl Args {
    fn soil_layers(&self) -> Vec<SoilLayer> {
        let layers: Vec<(Meters, ThermalConductivity)> = self
            .soil_k
            .iter()
            .enumerate()
            .map(|(i, &k)| {
                let thickness = self.layer_thickness.get(i).copied().unwrap_or(f64::INFINITY);
                (Meters::new(thickness), ThermalConductivity::from(k))
            })
            .collect();
        SoilLayer::stack(&layers)
    }

    fn scenario(&self) -> Scenario {
        let mut source = Pipe::heat_source(
            1,
            "heat source",
            Celsius::from(self.source_temperature),
            Meters::new(self.source_diameter),
        )
        .parallel_at(Meters::ZERO, Meters::new(self.source_depth))
        .with_wall(Meters::from_millimeters(8.0), ThermalConductivity::STEEL);
        if self.insulation > 0.0 {
            source = source.with_insulation(
                Meters::new(self.insulation),
                ThermalConductivity::MINERAL_WOOL,
            );
        }

        let mut pipes = vec![
            source,
            Pipe::affected(2, "affected", Meters::new(0.2))
                .parallel_at(Meters::new(self.separation), Meters::new(self.affected_depth))
                .with_wall(Meters::from_millimeters(12.0), ThermalConductivity::HDPE),
        ];
        if let Some(depth) = self.crossing_depth {
            pipes.push(
                Pipe::affected(3, "crossing", Meters::new(0.1))
                    .perpendicular_at(Meters::ZERO, Meters::new(depth)),
            );
        }

        Scenario {
            pipes,
            soil_layers: self.soil_layers(),
            soil_temperature: Celsius::from(self.soil_temperature),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let quality = SamplingQuality::from(args.quality);

    println!("=== Buried Pipe Thermal Demo ===\n");

    let scenario = args.scenario();
    let start = Instant::now();
    let result = match solve(&scenario) {
        Ok(result) => result,
        Err(e) => {
            error!("Invalid scenario: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!("Solved in {:.2?}", start.elapsed());

    println!("Heat sources:");
    for source in &result.sources {
        println!(
            "  {}: R_pipe={}, R_ins={}, R_bed={}, R_soil={}, Q={}, surface {}",
            source.pipe_id,
            source.pipe,
            source.insulation,
            source.bedding,
            source.soil,
            source.heat_flow,
            source.surface_temperature
        );
    }

    println!("\nPipe temperatures:");
    for pipe in &scenario.pipes {
        if let Some(temperature) = result.temperature_of(pipe.id) {
            println!("  {:<20} {}", pipe.to_string(), temperature);
        }
    }

    println!("\nInteractions:");
    for interaction in &result.interactions {
        println!(
            "  {} -> {}: k_path={:.3}, d_real={:.3} m, d_image={:.3} m, ΔT={:+.2} K",
            interaction.source_id,
            interaction.target_id,
            interaction.path_conductivity,
            interaction.real_distance,
            interaction.image_distance,
            interaction.temperature_rise
        );
    }

    let bounds = SampleBounds::around_scene(&result.scene, DEFAULT_PADDING);
    let (width, height) = quality.raster_dimensions(&bounds);
    let start = Instant::now();
    let raster = FieldData::sample_cross_section(&result.scene, &bounds, width, height, 0.0);
    info!("Sampled {}x{} raster in {:.2?}", width, height, start.elapsed());

    let dims = quality.grid_dimensions();
    let start = Instant::now();
    let grid = ScalarGrid::sample(&result.scene, &bounds, dims);
    info!(
        "Sampled {}x{}x{} grid in {:.2?}",
        dims.0,
        dims.1,
        dims.2,
        start.elapsed()
    );

    if let Some((min, max)) = raster.range() {
        println!("\nCross-section range: {:.2}°C .. {:.2}°C", min, max);
    }

    println!("\nIsotherms:");
    for &level in &args.isotherm {
        let isotherm = extract_isotherm(&raster, level);
        let mesh = grid.extract_world(level);
        let extent = mesh.bounding_box().map_or_else(
            || "empty".to_string(),
            |(min, max)| {
                format!(
                    "x {:.2}..{:.2} m, z {:.2}..{:.2} m",
                    min.x, max.x, min.z, max.z
                )
            },
        );
        println!(
            "  {:>7.1}°C: {} contour segment(s), {} surface triangle(s), {}",
            level,
            isotherm.len(),
            mesh.len(),
            extent
        );
    }

    ExitCode::SUCCESS
}
