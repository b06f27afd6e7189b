//! Steady-state solve for a buried pipe scenario
//!
//! The solve runs in three passes over an immutable [`Scenario`]:
//! 1. resistance network for every heat source, giving its heat flow `Q`
//! 2. image-source interaction for every `(heat source, affected pipe)` pair
//! 3. affected pipe temperatures as ambient plus the sum of their interactions
//!
//! The result carries a [`ThermalScene`] ready for field sampling.
//!
//! # Example
//!
//! ```rust
//! use pipe_thermal_core::core_types::{Celsius, Meters, Pipe, SoilLayer, ThermalConductivity};
//! use pipe_thermal_core::solver::{solve, Scenario};
//!
//! let scenario = Scenario {
//!     pipes: vec![
//!         Pipe::heat_source(1, "steam", Celsius::new(232.0), Meters::new(0.2))
//!             .parallel_at(Meters::ZERO, Meters::new(1.5)),
//!         Pipe::affected(2, "water", Meters::new(0.2))
//!             .parallel_at(Meters::new(1.0), Meters::new(1.5)),
//!     ],
//!     soil_layers: vec![SoilLayer::half_space(ThermalConductivity::SOIL_TYPICAL)],
//!     soil_temperature: Celsius::new(17.0),
//! };
//!
//! let result = solve(&scenario)?;
//! assert!(*result.temperature_of(2.into()).unwrap() > 17.0);
//! # Ok::<(), pipe_thermal_core::ConfigError>(())
//! ```

mod quality;
pub mod validation;

pub use quality::SamplingQuality;
pub use validation::validate;

use crate::core_types::{Celsius, Pipe, PipeId, SoilLayer, ThermalConductivity};
use crate::error::ConfigResult;
use crate::physics::{
    effective_k_for_pipe, solve_source, InteractionResult, SourceResistanceResult, ThermalScene,
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Everything a solve needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub pipes: Vec<Pipe>,
    /// Contiguous from grade, ordered by depth
    pub soil_layers: Vec<SoilLayer>,
    /// Undisturbed ground temperature
    pub soil_temperature: Celsius,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            pipes: Vec::new(),
            soil_layers: vec![SoilLayer::half_space(ThermalConductivity::SOIL_TYPICAL)],
            soil_temperature: Celsius::new(15.0),
        }
    }
}

/// Final temperature of one pipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeTemperature {
    pub pipe_id: PipeId,
    pub temperature: Celsius,
}

/// Output of [`solve`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResult {
    /// One entry per input pipe, in input order
    pub pipe_temperatures: Vec<PipeTemperature>,
    /// Resistance network of every heat source, in input order
    pub sources: Vec<SourceResistanceResult>,
    /// Every `(heat source, affected pipe)` pair
    pub interactions: Vec<InteractionResult>,
    /// Precomputed input for field sampling
    pub scene: ThermalScene,
    #[serde(skip)]
    index: FxHashMap<PipeId, usize>,
}

impl SolveResult {
    fn new(
        pipe_temperatures: Vec<PipeTemperature>,
        sources: Vec<SourceResistanceResult>,
        interactions: Vec<InteractionResult>,
        scene: ThermalScene,
    ) -> Self {
        let index = pipe_temperatures
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.pipe_id, i))
            .collect();
        Self {
            pipe_temperatures,
            sources,
            interactions,
            scene,
            index,
        }
    }

    /// Final temperature of a pipe by id
    pub fn temperature_of(&self, pipe_id: PipeId) -> Option<Celsius> {
        if self.index.is_empty() {
            // Deserialized results carry no index
            return self
                .pipe_temperatures
                .iter()
                .find(|entry| entry.pipe_id == pipe_id)
                .map(|entry| entry.temperature);
        }
        self.index
            .get(&pipe_id)
            .map(|&i| self.pipe_temperatures[i].temperature)
    }

    /// Resistance network of a heat source by id
    pub fn source(&self, pipe_id: PipeId) -> Option<&SourceResistanceResult> {
        self.sources.iter().find(|source| source.pipe_id == pipe_id)
    }

    /// Interactions acting on one affected pipe
    pub fn interactions_on(&self, pipe_id: PipeId) -> impl Iterator<Item = &InteractionResult> {
        self.interactions
            .iter()
            .filter(move |interaction| interaction.target_id == pipe_id)
    }
}

/// Validate and solve a scenario
///
/// # Errors
///
/// Returns the first [`crate::ConfigError`] found by [`validate`]; the solve itself never
/// fails.
pub fn solve(scenario: &Scenario) -> ConfigResult<SolveResult> {
    let t_soil = scenario.soil_temperature;
    let layers = &scenario.soil_layers;
    validate(&scenario.pipes, layers, *t_soil)?;

    let (heat_sources, affected): (Vec<&Pipe>, Vec<&Pipe>) = scenario
        .pipes
        .iter()
        .partition(|pipe| pipe.is_heat_source());

    info!(
        "Solving {} heat source(s), {} affected pipe(s), {} soil layer(s)",
        heat_sources.len(),
        affected.len(),
        layers.len()
    );

    let mut scene = ThermalScene::new(layers.clone(), t_soil);
    let mut sources = Vec::with_capacity(heat_sources.len());
    for pipe in heat_sources {
        let soil_k = effective_k_for_pipe(pipe, layers);
        let result = solve_source(pipe, soil_k, t_soil);

        debug!(
            "Source {}: R_total={:.5} m·K/W, Q={:.2} W/m, k_soil={:.3}",
            pipe, *result.total, *result.heat_flow, soil_k
        );
        if *result.heat_flow == 0.0 {
            warn!("Source {} transfers no heat (R_total={:.5})", pipe, *result.total);
        }

        scene.push_source(pipe.clone(), result.heat_flow, soil_k);
        sources.push(result);
    }

    let mut interactions = Vec::with_capacity(scene.sources().len() * affected.len());
    let mut solved = FxHashMap::default();
    for pipe in affected {
        let first = interactions.len();
        interactions.extend(
            scene
                .sources()
                .iter()
                .map(|source| InteractionResult::between(source, pipe, layers)),
        );
        let rise: f64 = interactions[first..]
            .iter()
            .map(|interaction| interaction.temperature_rise)
            .sum();

        let total = *t_soil + rise;
        let temperature = if total.is_finite() {
            Celsius::from(total)
        } else {
            t_soil
        };
        debug!("Affected {}: {} (rise {:+.2} K)", pipe, temperature, rise);

        scene.push_affected(pipe.clone(), temperature);
        solved.insert(pipe.id, temperature);
    }

    let pipe_temperatures: Vec<PipeTemperature> = scenario
        .pipes
        .iter()
        .map(|pipe| PipeTemperature {
            pipe_id: pipe.id,
            temperature: pipe
                .fixed_temperature()
                .or_else(|| solved.get(&pipe.id).copied())
                .unwrap_or(t_soil),
        })
        .collect();

    info!(
        "Solve complete: {} source(s), {} interaction(s)",
        sources.len(),
        interactions.len()
    );

    Ok(SolveResult::new(
        pipe_temperatures,
        sources,
        interactions,
        scene,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Meters;
    use crate::error::ConfigError;

    fn scenario() -> Scenario {
        Scenario {
            pipes: vec![
                Pipe::heat_source(1, "steam", Celsius::new(232.0), Meters::new(0.2))
                    .parallel_at(Meters::ZERO, Meters::new(1.5)),
                Pipe::affected(2, "water", Meters::new(0.2))
                    .parallel_at(Meters::new(1.0), Meters::new(1.5)),
                Pipe::affected(3, "gas", Meters::new(0.1))
                    .perpendicular_at(Meters::new(4.0), Meters::new(0.8)),
            ],
            soil_layers: vec![SoilLayer::half_space(ThermalConductivity::new(1.5))],
            soil_temperature: Celsius::new(17.0),
        }
    }

    #[test]
    fn test_solve_reports_every_pipe() {
        let result = solve(&scenario()).unwrap();
        assert_eq!(result.pipe_temperatures.len(), 3);
        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.interactions.len(), 2);
        assert_eq!(result.temperature_of(PipeId(1)), Some(Celsius::new(232.0)));
        assert_eq!(result.temperature_of(PipeId(99)), None);
    }

    #[test]
    fn test_affected_temperature_is_ambient_plus_rises() {
        let result = solve(&scenario()).unwrap();
        for id in [PipeId(2), PipeId(3)] {
            let rise: f64 = result
                .interactions_on(id)
                .map(|interaction| interaction.temperature_rise)
                .sum();
            let temperature = result.temperature_of(id).unwrap();
            assert!((*temperature - (17.0 + rise)).abs() < 1e-12);
            assert!(*temperature > 17.0 && *temperature < 232.0);
        }
    }

    #[test]
    fn test_scene_matches_solve() {
        let result = solve(&scenario()).unwrap();
        assert_eq!(result.scene.sources().len(), 1);
        assert_eq!(result.scene.affected().len(), 2);
        assert_eq!(result.scene.sources()[0].heat_flow, result.sources[0].heat_flow);
    }

    #[test]
    fn test_solve_rejects_invalid_scenario() {
        let mut bad = scenario();
        bad.soil_layers.clear();
        assert_eq!(solve(&bad).unwrap_err(), ConfigError::NoSoilLayers);
    }

    #[test]
    fn test_only_affected_pipes_stay_at_ambient() {
        let mut quiet = scenario();
        quiet.pipes.remove(0);
        let result = solve(&quiet).unwrap();
        assert!(result.interactions.is_empty());
        assert_eq!(result.temperature_of(PipeId(2)), Some(Celsius::new(17.0)));
    }
}
