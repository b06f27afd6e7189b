//! Buried pipe geometry
//!
//! A [`Pipe`] is a long cylinder lying horizontally in the soil. Parallel pipes run along
//! the `y` axis and are placed by `x` and depth; perpendicular pipes run along the `x`
//! axis and are placed by `y` and depth. Every pipe is a stack of concentric shells:
//! wall, optional insulation, optional bedding.

use crate::core_types::units::{Celsius, Meters, ThermalConductivity};
use crate::core_types::vec3::{PlanePoint, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a pipe within one scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PipeId(pub u32);

impl From<u32> for PipeId {
    fn from(id: u32) -> Self {
        PipeId(id)
    }
}

impl fmt::Display for PipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a pipe contributes to the solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PipeRole {
    /// Pipe held at a known temperature, injecting heat into the soil
    HeatSource {
        /// Fixed temperature next to the pipe surface
        temperature: Celsius,
    },
    /// Pipe whose temperature is an output of the solve
    Affected,
}

/// Direction a pipe runs relative to the cross-section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Runs along `y`, through the cross-section; positioned by `x` and depth
    Parallel,
    /// Runs along `x`, across the cross-section; positioned by `y` and depth
    Perpendicular,
}

impl Orientation {
    /// Project a 3D position into this orientation's plane as `(offset, depth)`.
    #[inline]
    pub fn project(self, position: &Position) -> PlanePoint {
        match self {
            Self::Parallel => PlanePoint::new(position.x, position.z),
            Self::Perpendicular => PlanePoint::new(position.y, position.z),
        }
    }
}

/// One concentric shell around the pipe bore
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sheath {
    /// Radial thickness; zero means the shell is absent
    pub thickness: Meters,
    /// Conductivity of the shell material
    pub conductivity: ThermalConductivity,
}

impl Sheath {
    /// Absent shell
    pub const NONE: Sheath = Sheath {
        thickness: Meters::ZERO,
        conductivity: ThermalConductivity::new(0.0),
    };

    pub fn new(thickness: Meters, conductivity: ThermalConductivity) -> Self {
        Self {
            thickness,
            conductivity,
        }
    }

    /// Whether the shell has any radial extent
    pub fn is_present(&self) -> bool {
        *self.thickness > 0.0
    }
}

impl Default for Sheath {
    fn default() -> Self {
        Self::NONE
    }
}

/// A buried pipe
///
/// Built once from external geometry right before a solve and never mutated during it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: PipeId,
    /// Display name for reports
    pub name: String,
    pub role: PipeRole,
    pub orientation: Orientation,
    /// `x` for parallel pipes, `y` for perpendicular pipes
    pub offset: Meters,
    /// Centreline depth below grade
    pub depth: Meters,
    pub outer_diameter: Meters,
    /// Pipe wall, measured inward from the outer diameter
    pub wall: Sheath,
    /// Insulation, measured outward from the outer diameter
    pub insulation: Sheath,
    /// Bedding / backfill envelope, measured outward from the insulation
    pub bedding: Sheath,
}

impl Pipe {
    /// Create a heat-source pipe held at `temperature`
    ///
    /// The pipe starts parallel at `x = 0`, 1 m deep, with no wall resistance;
    /// use the builder methods to place and clad it.
    pub fn heat_source(
        id: u32,
        name: impl Into<String>,
        temperature: Celsius,
        outer_diameter: Meters,
    ) -> Self {
        Self::with_role(
            id,
            name,
            PipeRole::HeatSource { temperature },
            outer_diameter,
        )
    }

    /// Create an affected pipe whose temperature will be solved for
    pub fn affected(id: u32, name: impl Into<String>, outer_diameter: Meters) -> Self {
        Self::with_role(id, name, PipeRole::Affected, outer_diameter)
    }

    fn with_role(id: u32, name: impl Into<String>, role: PipeRole, outer_diameter: Meters) -> Self {
        Self {
            id: PipeId(id),
            name: name.into(),
            role,
            orientation: Orientation::Parallel,
            offset: Meters::ZERO,
            depth: Meters::new(1.0),
            outer_diameter,
            wall: Sheath::NONE,
            insulation: Sheath::NONE,
            bedding: Sheath::NONE,
        }
    }

    /// Place as a parallel pipe at horizontal offset `x`
    pub fn parallel_at(mut self, x: Meters, depth: Meters) -> Self {
        self.orientation = Orientation::Parallel;
        self.offset = x;
        self.depth = depth;
        self
    }

    /// Place as a perpendicular pipe at lateral offset `y`
    pub fn perpendicular_at(mut self, y: Meters, depth: Meters) -> Self {
        self.orientation = Orientation::Perpendicular;
        self.offset = y;
        self.depth = depth;
        self
    }

    pub fn with_wall(mut self, thickness: Meters, conductivity: ThermalConductivity) -> Self {
        self.wall = Sheath::new(thickness, conductivity);
        self
    }

    pub fn with_insulation(mut self, thickness: Meters, conductivity: ThermalConductivity) -> Self {
        self.insulation = Sheath::new(thickness, conductivity);
        self
    }

    pub fn with_bedding(mut self, thickness: Meters, conductivity: ThermalConductivity) -> Self {
        self.bedding = Sheath::new(thickness, conductivity);
        self
    }

    /// Bare pipe radius (half the outer diameter)
    #[inline]
    pub fn outer_radius(&self) -> f64 {
        *self.outer_diameter * 0.5
    }

    /// Bore radius inside the wall
    #[inline]
    pub fn inner_radius(&self) -> f64 {
        self.outer_radius() - *self.wall.thickness
    }

    /// Radius at the outside of the insulation
    #[inline]
    pub fn insulation_radius(&self) -> f64 {
        self.outer_radius() + *self.insulation.thickness
    }

    /// Total outer radius, at the outside of the bedding
    #[inline]
    pub fn bedding_radius(&self) -> f64 {
        self.insulation_radius() + *self.bedding.thickness
    }

    /// Fixed temperature, present only for heat sources
    pub fn fixed_temperature(&self) -> Option<Celsius> {
        match self.role {
            PipeRole::HeatSource { temperature } => Some(temperature),
            PipeRole::Affected => None,
        }
    }

    pub fn is_heat_source(&self) -> bool {
        matches!(self.role, PipeRole::HeatSource { .. })
    }

    /// Pipe centre in its own plane as `(offset, depth)`
    #[inline]
    pub fn center(&self) -> PlanePoint {
        PlanePoint::new(*self.offset, *self.depth)
    }

    /// Project a 3D position into this pipe's cross-section plane
    #[inline]
    pub fn project(&self, position: &Position) -> PlanePoint {
        self.orientation.project(position)
    }

    /// Distance from the pipe centreline to a position, measured in the pipe's plane
    #[inline]
    pub fn radial_distance(&self, position: &Position) -> f64 {
        (self.project(position) - self.center()).norm()
    }
}

impl fmt::Display for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insulated_pipe() -> Pipe {
        Pipe::heat_source(1, "steam", Celsius::new(180.0), Meters::new(0.2))
            .parallel_at(Meters::new(2.0), Meters::new(1.5))
            .with_wall(Meters::new(0.01), ThermalConductivity::STEEL)
            .with_insulation(Meters::new(0.05), ThermalConductivity::POLYURETHANE_FOAM)
            .with_bedding(Meters::new(0.1), ThermalConductivity::SAND_DRY)
    }

    #[test]
    fn test_concentric_radii() {
        let pipe = insulated_pipe();
        assert!((pipe.outer_radius() - 0.1).abs() < 1e-12);
        assert!((pipe.inner_radius() - 0.09).abs() < 1e-12);
        assert!((pipe.insulation_radius() - 0.15).abs() < 1e-12);
        assert!((pipe.bedding_radius() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_bare_pipe_radii_collapse() {
        let pipe = Pipe::affected(2, "water", Meters::new(0.3));
        assert_eq!(pipe.outer_radius(), pipe.bedding_radius());
        assert_eq!(pipe.outer_radius(), pipe.inner_radius());
        assert!(!pipe.insulation.is_present());
        assert!(pipe.fixed_temperature().is_none());
    }

    #[test]
    fn test_projection_follows_orientation() {
        let position = Position::new(3.0, -4.0, 2.0);

        let parallel = insulated_pipe();
        assert_eq!(parallel.project(&position), PlanePoint::new(3.0, 2.0));
        assert!((parallel.radial_distance(&position) - (1.0f64 + 0.25).sqrt()).abs() < 1e-12);

        let perpendicular = insulated_pipe().perpendicular_at(Meters::new(-4.0), Meters::new(1.5));
        assert_eq!(perpendicular.project(&position), PlanePoint::new(-4.0, 2.0));
        assert!((perpendicular.radial_distance(&position) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_heat_source_role() {
        let pipe = insulated_pipe();
        assert!(pipe.is_heat_source());
        assert_eq!(pipe.fixed_temperature(), Some(Celsius::new(180.0)));
        assert_eq!(pipe.to_string(), "#1 'steam'");
    }
}
