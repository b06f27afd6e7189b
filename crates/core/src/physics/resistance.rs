//! Radial resistance network for a heat-source pipe
//!
//! Heat leaves the pipe through four shells in series, each with a per-length
//! resistance:
//! ```text
//! R_layer = ln(r_outer / r_inner) / (2π·k_layer)          wall, insulation, bedding
//! R_soil  = ln(2·z / r_bedding)   / (2π·k_soil_eff)        buried line source
//! Q       = (T_pipe − T_soil) / (R_pipe + R_ins + R_bed + R_soil)
//! ```
//! Absent or degenerate shells contribute zero instead of dividing by zero, and a
//! non-positive total yields `Q = 0`.

use crate::core_types::{
    Celsius, Pipe, PipeId, ThermalConductivity, ThermalResistance, WattsPerMeter,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::trace;

/// Per-length resistances and heat flow of one heat source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceResistanceResult {
    pub pipe_id: PipeId,
    /// Pipe wall
    pub pipe: ThermalResistance,
    pub insulation: ThermalResistance,
    pub bedding: ThermalResistance,
    /// Soil between the bedding and the ground surface
    pub soil: ThermalResistance,
    /// Sum of the four shells
    pub total: ThermalResistance,
    /// Heat flow per unit length `Q`
    pub heat_flow: WattsPerMeter,
    /// Soil conductivity the soil resistance was computed with
    pub soil_conductivity: ThermalConductivity,
    /// Analytic temperature at the outside of the bedding
    pub surface_temperature: Celsius,
}

/// Resistance of a cylindrical shell between `r_inner` and `r_outer`
///
/// Zero for zero conductivity, zero thickness, or any radius arrangement that would
/// not describe a real shell.
pub fn shell_resistance(r_inner: f64, r_outer: f64, k: f64) -> f64 {
    if k <= 0.0 || r_inner <= 0.0 || r_outer <= r_inner {
        return 0.0;
    }
    let r = (r_outer / r_inner).ln() / (TAU * k);
    if r.is_finite() {
        r
    } else {
        0.0
    }
}

/// Soil resistance of a buried line source at centreline depth `depth`
pub fn soil_resistance(depth: f64, r_bedding: f64, k_soil: f64) -> f64 {
    if k_soil <= 0.0 || r_bedding <= 0.0 {
        return 0.0;
    }
    let r = (2.0 * depth / r_bedding).ln() / (TAU * k_soil);
    if r.is_finite() {
        r
    } else {
        0.0
    }
}

/// Temperature at the outside of the bedding: `T_soil + Q/(2π·k)·ln(2z / r_bedding)`
///
/// Falls back to `t_soil` when the conductivity is not positive or the result is not finite.
pub fn bedding_surface_temperature(
    heat_flow: f64,
    k_soil: f64,
    depth: f64,
    r_bedding: f64,
    t_soil: f64,
) -> f64 {
    if k_soil <= 0.0 {
        return t_soil;
    }
    let t = t_soil + heat_flow / (TAU * k_soil) * (2.0 * depth / r_bedding).ln();
    if t.is_finite() {
        t
    } else {
        t_soil
    }
}

/// Solve the resistance network of one heat source
///
/// `soil_k` is the effective conductivity around the pipe
/// (see [`crate::physics::effective_k_for_pipe`]). A pipe without a fixed temperature
/// is treated as sitting at `t_soil` and therefore yields `Q = 0`.
pub fn solve_source(pipe: &Pipe, soil_k: f64, t_soil: Celsius) -> SourceResistanceResult {
    let r_outer = pipe.outer_radius();
    let r_insulation = pipe.insulation_radius();
    let r_bedding = pipe.bedding_radius();

    let r_pipe = shell_resistance(pipe.inner_radius(), r_outer, *pipe.wall.conductivity);
    let r_ins = shell_resistance(r_outer, r_insulation, *pipe.insulation.conductivity);
    let r_bed = shell_resistance(r_insulation, r_bedding, *pipe.bedding.conductivity);
    let r_soil = soil_resistance(*pipe.depth, r_bedding, soil_k);
    let total = r_pipe + r_ins + r_bed + r_soil;

    let t_pipe = pipe.fixed_temperature().unwrap_or(t_soil);
    let q = if total > 0.0 {
        (*t_pipe - *t_soil) / total
    } else {
        0.0
    };
    let q = if q.is_finite() { q } else { 0.0 };
    let surface = bedding_surface_temperature(q, soil_k, *pipe.depth, r_bedding, *t_soil);

    trace!(
        "Pipe {}: R_pipe={:.5}, R_ins={:.5}, R_bed={:.5}, R_soil={:.5}, Q={:.3} W/m",
        pipe.id,
        r_pipe,
        r_ins,
        r_bed,
        r_soil,
        q
    );

    SourceResistanceResult {
        pipe_id: pipe.id,
        pipe: ThermalResistance::new(r_pipe),
        insulation: ThermalResistance::new(r_ins),
        bedding: ThermalResistance::new(r_bed),
        soil: ThermalResistance::new(r_soil),
        total: ThermalResistance::new(total),
        heat_flow: WattsPerMeter::new(q),
        soil_conductivity: ThermalConductivity::from(soil_k),
        surface_temperature: Celsius::from(surface),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Meters;
    use std::f64::consts::PI;

    fn bare_source(depth: f64) -> Pipe {
        Pipe::heat_source(1, "hot", Celsius::new(232.0), Meters::new(0.2))
            .parallel_at(Meters::ZERO, Meters::new(depth))
    }

    #[test]
    fn test_bare_pipe_has_only_soil_resistance() {
        let result = solve_source(&bare_source(1.5), 1.5, Celsius::new(17.0));

        let expected_soil = (2.0_f64 * 1.5 / 0.1).ln() / (2.0 * PI * 1.5);
        assert_eq!(*result.pipe, 0.0);
        assert_eq!(*result.insulation, 0.0);
        assert_eq!(*result.bedding, 0.0);
        assert!((*result.soil - expected_soil).abs() < 1e-12);
        assert!((*result.total - expected_soil).abs() < 1e-12);
        assert!((*result.heat_flow - 215.0 / expected_soil).abs() < 1e-9);
    }

    #[test]
    fn test_layers_add_in_series() {
        let pipe = bare_source(2.0)
            .with_wall(Meters::new(0.01), ThermalConductivity::STEEL)
            .with_insulation(Meters::new(0.04), ThermalConductivity::POLYURETHANE_FOAM)
            .with_bedding(Meters::new(0.1), ThermalConductivity::SAND_DRY);
        let result = solve_source(&pipe, 1.2, Celsius::new(10.0));

        let r_pipe = (0.1_f64 / 0.09).ln() / (2.0 * PI * 45.0);
        let r_ins = (0.14_f64 / 0.1).ln() / (2.0 * PI * 0.025);
        let r_bed = (0.24_f64 / 0.14).ln() / (2.0 * PI * 0.3);
        let r_soil = (4.0_f64 / 0.24).ln() / (2.0 * PI * 1.2);

        assert!((*result.pipe - r_pipe).abs() < 1e-12);
        assert!((*result.insulation - r_ins).abs() < 1e-12);
        assert!((*result.bedding - r_bed).abs() < 1e-12);
        assert!((*result.soil - r_soil).abs() < 1e-12);

        let total = r_pipe + r_ins + r_bed + r_soil;
        assert!((*result.total - total).abs() < 1e-12);
        assert!((*result.heat_flow - 222.0 / total).abs() < 1e-9);
    }

    #[test]
    fn test_insulation_reduces_heat_flow() {
        let bare = solve_source(&bare_source(1.5), 1.5, Celsius::new(17.0));
        let insulated = solve_source(
            &bare_source(1.5).with_insulation(Meters::new(0.05), ThermalConductivity::MINERAL_WOOL),
            1.5,
            Celsius::new(17.0),
        );
        assert!(*insulated.heat_flow < *bare.heat_flow);
    }

    #[test]
    fn test_zero_conductivity_shell_contributes_nothing() {
        assert_eq!(shell_resistance(0.1, 0.2, 0.0), 0.0);
        assert_eq!(shell_resistance(0.1, 0.1, 1.0), 0.0);
        assert_eq!(shell_resistance(0.0, 0.1, 1.0), 0.0);
    }

    #[test]
    fn test_degenerate_network_has_no_flow() {
        let result = solve_source(&bare_source(1.5), 0.0, Celsius::new(17.0));
        assert_eq!(*result.total, 0.0);
        assert_eq!(*result.heat_flow, 0.0);
    }

    #[test]
    fn test_affected_pipe_has_no_flow() {
        let pipe = Pipe::affected(3, "cold", Meters::new(0.2))
            .parallel_at(Meters::ZERO, Meters::new(1.0));
        let result = solve_source(&pipe, 1.5, Celsius::new(17.0));
        assert_eq!(*result.heat_flow, 0.0);
    }

    #[test]
    fn test_surface_temperature_matches_soil_drop() {
        let result = solve_source(&bare_source(1.5), 1.5, Celsius::new(17.0));
        let surface = bedding_surface_temperature(*result.heat_flow, 1.5, 1.5, 0.1, 17.0);
        // Bare pipe: the whole drop is across the soil, so the surface is at pipe temperature
        assert!((surface - 232.0).abs() < 1e-9);

        assert_eq!(bedding_surface_temperature(100.0, 0.0, 1.5, 0.1, 17.0), 17.0);
    }
}
