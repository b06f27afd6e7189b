//! Steady-state soil temperature field
//!
//! [`ThermalScene`] is the precomputed input for field sampling: every heat source with
//! its solved heat flow, every affected pipe with its solved temperature, the soil
//! column and the ambient temperature. [`ThermalScene::temperature_at`] evaluates one
//! point with no shared mutable state, so callers may sample in parallel freely.
//!
//! # Algorithm
//!
//! 1. Inside a pipe (projected into that pipe's plane):
//!    - within the bare radius: the pipe's fixed or solved temperature
//!    - within a heat source's insulation/bedding annulus: the analytic temperature at the
//!      bedding surface
//! 2. Otherwise: `T_soil + Σ Q/(2π·k_path)·ln(d_image/d_real)` over all heat sources,
//!    with `k_path` integrated from the source to the point
//!    (see [`crate::physics::effective_k_for_path`]).
//!
//! The result is always finite; a non-finite sum falls back to `T_soil`.

use crate::core_types::{Celsius, Pipe, Position, SoilLayer, WattsPerMeter};
use crate::physics::image_sources::{line_source_rise, ImageGeometry};
use crate::physics::resistance::{bedding_surface_temperature, solve_source};
use crate::physics::soil_conductivity::{effective_k_for_path, effective_k_for_pipe};
use serde::{Deserialize, Serialize};

/// Anything that can be sampled as a scalar at a 3D position
///
/// Grid and raster samplers are written against this trait so they stay independent of
/// the physics.
pub trait ScalarField: Sync {
    /// Value at `position`
    fn value_at(&self, position: &Position) -> f64;
}

/// A heat source with its solved heat flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatSource {
    pub pipe: Pipe,
    /// Heat flow per unit length `Q`
    pub heat_flow: WattsPerMeter,
    /// Effective conductivity of the soil around the pipe
    pub soil_conductivity: f64,
}

impl HeatSource {
    /// Analytic temperature at the outside of the bedding
    pub fn surface_temperature(&self, t_soil: f64) -> f64 {
        bedding_surface_temperature(
            *self.heat_flow,
            self.soil_conductivity,
            *self.pipe.depth,
            self.pipe.bedding_radius(),
            t_soil,
        )
    }

    /// Fixed pipe temperature, or ambient if the pipe has none
    fn fixed_temperature(&self, t_soil: f64) -> f64 {
        self.pipe.fixed_temperature().map_or(t_soil, |t| *t)
    }
}

/// An affected pipe with its solved temperature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedPipe {
    pub pipe: Pipe,
    pub temperature: Celsius,
}

/// Precomputed scene for field sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalScene {
    sources: Vec<HeatSource>,
    affected: Vec<SolvedPipe>,
    soil_layers: Vec<SoilLayer>,
    soil_temperature: f64,
}

impl ThermalScene {
    /// Empty scene: every point reads `soil_temperature`
    pub fn new(soil_layers: Vec<SoilLayer>, soil_temperature: Celsius) -> Self {
        Self {
            sources: Vec::new(),
            affected: Vec::new(),
            soil_layers,
            soil_temperature: *soil_temperature,
        }
    }

    /// Scene built directly from heat-source pipes, solving each resistance network
    ///
    /// Pipes without a fixed temperature are skipped. Inputs are not validated; use
    /// [`crate::solver::solve`] for the checked path.
    pub fn from_sources<'a>(
        pipes: impl IntoIterator<Item = &'a Pipe>,
        soil_layers: Vec<SoilLayer>,
        soil_temperature: Celsius,
    ) -> Self {
        let mut scene = Self::new(soil_layers, soil_temperature);
        for pipe in pipes.into_iter().filter(|pipe| pipe.is_heat_source()) {
            let soil_k = effective_k_for_pipe(pipe, &scene.soil_layers);
            let result = solve_source(pipe, soil_k, soil_temperature);
            scene.push_source(pipe.clone(), result.heat_flow, soil_k);
        }
        scene
    }

    pub fn push_source(&mut self, pipe: Pipe, heat_flow: WattsPerMeter, soil_conductivity: f64) {
        self.sources.push(HeatSource {
            pipe,
            heat_flow,
            soil_conductivity,
        });
    }

    pub fn push_affected(&mut self, pipe: Pipe, temperature: Celsius) {
        self.affected.push(SolvedPipe { pipe, temperature });
    }

    pub fn sources(&self) -> &[HeatSource] {
        &self.sources
    }

    pub fn affected(&self) -> &[SolvedPipe] {
        &self.affected
    }

    pub fn soil_layers(&self) -> &[SoilLayer] {
        &self.soil_layers
    }

    pub fn soil_temperature(&self) -> f64 {
        self.soil_temperature
    }

    /// Every pipe in the scene, sources first
    pub fn pipes(&self) -> impl Iterator<Item = &Pipe> {
        self.sources
            .iter()
            .map(|source| &source.pipe)
            .chain(self.affected.iter().map(|solved| &solved.pipe))
    }

    /// Steady-state temperature at `position` (°C); always finite
    pub fn temperature_at(&self, position: &Position) -> f64 {
        if let Some(inside) = self.inside_pipe(position) {
            return inside;
        }

        let t_soil = self.soil_temperature;
        let total = t_soil + self.superposed_rise(position);
        if total.is_finite() {
            total
        } else {
            t_soil
        }
    }

    /// Temperature above ambient at `position`
    pub fn temperature_rise_at(&self, position: &Position) -> f64 {
        self.temperature_at(position) - self.soil_temperature
    }

    /// Short-circuit value when `position` lies inside a pipe envelope
    fn inside_pipe(&self, position: &Position) -> Option<f64> {
        let t_soil = self.soil_temperature;

        for source in &self.sources {
            let distance = source.pipe.radial_distance(position);
            if distance <= source.pipe.outer_radius() {
                return Some(source.fixed_temperature(t_soil));
            }
            if distance <= source.pipe.bedding_radius() {
                return Some(source.surface_temperature(t_soil));
            }
        }

        self.affected
            .iter()
            .find(|solved| solved.pipe.radial_distance(position) <= solved.pipe.outer_radius())
            .map(|solved| *solved.temperature)
    }

    fn superposed_rise(&self, position: &Position) -> f64 {
        self.sources
            .iter()
            .map(|source| {
                let geometry = ImageGeometry::for_point(&source.pipe, position);
                let k_path =
                    effective_k_for_path(geometry.path_from, geometry.path_to, &self.soil_layers);
                line_source_rise(*source.heat_flow, k_path, &geometry)
            })
            .sum()
    }
}

impl ScalarField for ThermalScene {
    fn value_at(&self, position: &Position) -> f64 {
        self.temperature_at(position)
    }
}
