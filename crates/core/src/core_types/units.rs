//! Semantic unit types for type-safe physical quantity handling
//!
//! Newtype wrappers keep temperatures, lengths, conductivities and per-length
//! resistances from being mixed up at API boundaries. The numeric kernels in
//! [`crate::physics`] work on raw `f64` internally and wrap results on the way out.
//!
//! # Design Philosophy
//! - Every quantity is `f64`; logarithms of radius ratios near 1 need the precision
//! - Implements common traits (Add, Sub, Mul, Div, Ord, Display, etc.)
//! - Serde support so scenario data can be persisted by the surrounding application
//! - Total ordering via Ord trait (NaN handled as greater than all values)
//!
//! # Usage
//! ```
//! use pipe_thermal_core::core_types::units::{Celsius, CelsiusDelta, Meters};
//!
//! let ambient = Celsius::new(17.0);
//! let pipe = Celsius::new(232.0);
//! assert_eq!(pipe - ambient, CelsiusDelta::new(215.0));
//!
//! let depth = Meters::new(1.5);
//! assert_eq!(*depth * 2.0, 3.0);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Deref, Div, Mul, Sub};

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// TEMPERATURE TYPES
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f64);

impl Eq for Celsius {}

impl PartialOrd for Celsius {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Celsius {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Celsius {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Celsius {
    /// Absolute zero in Celsius
    pub const ABSOLUTE_ZERO: Celsius = Celsius(-273.15);

    /// Create a new Celsius temperature. Asserts value >= absolute zero (-273.15°C).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= Self::ABSOLUTE_ZERO.0,
            "Celsius::new: value is below absolute zero (-273.15°C)"
        );
        Celsius(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Celsius {
    fn from(v: f64) -> Self {
        Celsius(v)
    }
}

impl From<Celsius> for f64 {
    fn from(c: Celsius) -> f64 {
        c.0
    }
}

/// Temperature difference in Celsius (equal in magnitude to a Kelvin difference)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct CelsiusDelta(f64);

impl Eq for CelsiusDelta {}

impl PartialOrd for CelsiusDelta {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CelsiusDelta {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl CelsiusDelta {
    /// Zero temperature difference
    pub const ZERO: CelsiusDelta = CelsiusDelta(0.0);

    /// Create a temperature delta (can be any value, positive or negative)
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        CelsiusDelta(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Deref for CelsiusDelta {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Add for CelsiusDelta {
    type Output = CelsiusDelta;
    fn add(self, rhs: CelsiusDelta) -> CelsiusDelta {
        CelsiusDelta(self.0 + rhs.0)
    }
}

impl AddAssign for CelsiusDelta {
    fn add_assign(&mut self, rhs: CelsiusDelta) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for CelsiusDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.2}°C", self.0)
    }
}

impl Add<CelsiusDelta> for Celsius {
    type Output = Celsius;
    fn add(self, rhs: CelsiusDelta) -> Celsius {
        Celsius(self.0 + rhs.0)
    }
}

impl Sub for Celsius {
    type Output = CelsiusDelta;
    fn sub(self, rhs: Celsius) -> CelsiusDelta {
        CelsiusDelta(self.0 - rhs.0)
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°C", self.0)
    }
}

// ============================================================================
// SPATIAL TYPES
// ============================================================================

/// Length, depth or offset in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

impl Eq for Meters {}

impl PartialOrd for Meters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meters {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Meters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Meters {
    /// Zero length
    pub const ZERO: Meters = Meters(0.0);

    /// Unbounded length, used for the bottom of the deepest soil layer
    pub const INFINITY: Meters = Meters(f64::INFINITY);

    /// Create a length. Offsets may be negative, so no sign check is made.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Meters(value)
    }

    /// Convert millimeters to meters
    #[inline]
    #[must_use]
    pub fn from_millimeters(mm: f64) -> Self {
        Meters(mm / 1000.0)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Meters {
    fn from(v: f64) -> Self {
        Meters(v)
    }
}

impl From<Meters> for f64 {
    fn from(m: Meters) -> f64 {
        m.0
    }
}

impl Add for Meters {
    type Output = Meters;
    fn add(self, rhs: Meters) -> Meters {
        Meters(self.0 + rhs.0)
    }
}

impl Sub for Meters {
    type Output = Meters;
    fn sub(self, rhs: Meters) -> Meters {
        Meters(self.0 - rhs.0)
    }
}

impl Mul<f64> for Meters {
    type Output = Meters;
    fn mul(self, rhs: f64) -> Meters {
        Meters(self.0 * rhs)
    }
}

impl Div<f64> for Meters {
    type Output = Meters;
    fn div(self, rhs: f64) -> Meters {
        Meters(self.0 / rhs)
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} m", self.0)
    }
}

// ============================================================================
// THERMAL PROPERTY TYPES
// ============================================================================

/// Thermal conductivity in W/(m·K)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ThermalConductivity(f64);

impl Eq for ThermalConductivity {}

impl PartialOrd for ThermalConductivity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ThermalConductivity {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for ThermalConductivity {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl ThermalConductivity {
    /// Carbon steel line pipe
    pub const STEEL: ThermalConductivity = ThermalConductivity(45.0);
    /// Ductile iron pipe
    pub const DUCTILE_IRON: ThermalConductivity = ThermalConductivity(50.0);
    /// High-density polyethylene pipe
    pub const HDPE: ThermalConductivity = ThermalConductivity(0.45);
    /// PVC pipe
    pub const PVC: ThermalConductivity = ThermalConductivity(0.19);
    /// Concrete encasement or pipe
    pub const CONCRETE: ThermalConductivity = ThermalConductivity(1.4);
    /// Rigid polyurethane foam insulation (pre-insulated district heating pipe)
    pub const POLYURETHANE_FOAM: ThermalConductivity = ThermalConductivity(0.025);
    /// Mineral wool insulation
    pub const MINERAL_WOOL: ThermalConductivity = ThermalConductivity(0.04);
    /// Dry sand bedding
    pub const SAND_DRY: ThermalConductivity = ThermalConductivity(0.3);
    /// Moist sand
    pub const SAND_MOIST: ThermalConductivity = ThermalConductivity(2.0);
    /// Clay
    pub const CLAY: ThermalConductivity = ThermalConductivity(1.3);
    /// Loam / topsoil
    pub const LOAM: ThermalConductivity = ThermalConductivity(1.0);
    /// Gravel backfill
    pub const GRAVEL: ThermalConductivity = ThermalConductivity(0.7);
    /// Typical moist soil, used when no layer data applies
    pub const SOIL_TYPICAL: ThermalConductivity = ThermalConductivity(1.5);

    /// Create a new thermal conductivity value. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= 0.0,
            "ThermalConductivity::new: negative thermal conductivity is invalid"
        );
        ThermalConductivity(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for ThermalConductivity {
    fn from(v: f64) -> Self {
        ThermalConductivity(v)
    }
}

impl From<ThermalConductivity> for f64 {
    fn from(k: ThermalConductivity) -> f64 {
        k.0
    }
}

impl fmt::Display for ThermalConductivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} W/(m·K)", self.0)
    }
}

/// Thermal resistance per unit pipe length in m·K/W
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ThermalResistance(f64);

impl ThermalResistance {
    /// No resistance (absent layer)
    pub const ZERO: ThermalResistance = ThermalResistance(0.0);

    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        ThermalResistance(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Deref for ThermalResistance {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Add for ThermalResistance {
    type Output = ThermalResistance;
    fn add(self, rhs: ThermalResistance) -> ThermalResistance {
        ThermalResistance(self.0 + rhs.0)
    }
}

impl fmt::Display for ThermalResistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} m·K/W", self.0)
    }
}

/// Heat flow per unit pipe length in W/m
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct WattsPerMeter(f64);

impl WattsPerMeter {
    /// No heat flow
    pub const ZERO: WattsPerMeter = WattsPerMeter(0.0);

    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        WattsPerMeter(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Deref for WattsPerMeter {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for WattsPerMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} W/m", self.0)
    }
}
