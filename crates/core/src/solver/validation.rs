//! Scenario validation
//!
//! Checks run in a fixed order and stop at the first failure:
//! soil presence, soil contiguity, soil properties, pipe properties, pipe depth,
//! pipe id uniqueness, ambient temperature.

use crate::core_types::{Pipe, Sheath, SoilLayer};
use crate::error::{ConfigError, ConfigResult};
use rustc_hash::FxHashSet;

/// Two layer boundaries closer than this are considered touching (m)
const CONTIGUITY_TOLERANCE: f64 = 1e-9;

/// Validate a full scenario before solving
pub fn validate(pipes: &[Pipe], layers: &[SoilLayer], soil_temperature: f64) -> ConfigResult<()> {
    validate_soil(layers)?;
    for pipe in pipes {
        validate_pipe(pipe)?;
    }
    for pipe in pipes {
        validate_clearance(pipe)?;
    }
    validate_unique_ids(pipes)?;

    if !soil_temperature.is_finite() {
        return Err(ConfigError::InvalidSoilTemperature(soil_temperature));
    }
    Ok(())
}

/// Soil column must be non-empty and contiguous from grade, with usable layers
pub fn validate_soil(layers: &[SoilLayer]) -> ConfigResult<()> {
    if layers.is_empty() {
        return Err(ConfigError::NoSoilLayers);
    }

    let mut expected_top = 0.0;
    for (index, layer) in layers.iter().enumerate() {
        let actual_top = *layer.depth_top;
        let touching = (actual_top - expected_top).abs() <= CONTIGUITY_TOLERANCE;
        if !touching {
            return Err(ConfigError::SoilLayerGap {
                index,
                expected_top,
                actual_top,
            });
        }
        expected_top = *layer.depth_bottom;
    }

    for (index, layer) in layers.iter().enumerate() {
        let k = *layer.conductivity;
        if !k.is_finite() || k < 0.0 {
            return Err(ConfigError::InvalidSoilLayer {
                index,
                reason: format!("conductivity {k} must be finite and non-negative"),
            });
        }
        let thickness = layer.thickness();
        if thickness.is_nan() || *thickness <= 0.0 {
            return Err(ConfigError::InvalidSoilLayer {
                index,
                reason: format!(
                    "bottom {} m must lie below top {} m",
                    *layer.depth_bottom, *layer.depth_top
                ),
            });
        }
    }
    Ok(())
}

fn validate_pipe(pipe: &Pipe) -> ConfigResult<()> {
    let invalid = |reason: String| ConfigError::InvalidPipe {
        id: pipe.id,
        reason,
    };

    for (label, value) in [
        ("offset", *pipe.offset),
        ("depth", *pipe.depth),
        ("outer diameter", *pipe.outer_diameter),
    ] {
        if !value.is_finite() {
            return Err(invalid(format!("{label} must be finite, got {value}")));
        }
    }
    if *pipe.outer_diameter <= 0.0 {
        return Err(invalid(format!(
            "outer diameter must be positive, got {}",
            pipe.outer_diameter
        )));
    }
    if let Some(temperature) = pipe.fixed_temperature() {
        if !temperature.is_finite() {
            return Err(invalid(format!(
                "temperature must be finite, got {}",
                *temperature
            )));
        }
    }

    for (label, sheath) in [
        ("wall", &pipe.wall),
        ("insulation", &pipe.insulation),
        ("bedding", &pipe.bedding),
    ] {
        check_sheath(sheath).map_err(|reason| invalid(format!("{label} {reason}")))?;
    }

    if *pipe.wall.thickness > pipe.outer_radius() {
        return Err(invalid(format!(
            "wall thickness {} exceeds outer radius {:.3} m",
            pipe.wall.thickness,
            pipe.outer_radius()
        )));
    }
    Ok(())
}

fn check_sheath(sheath: &Sheath) -> Result<(), String> {
    let thickness = *sheath.thickness;
    let k = *sheath.conductivity;
    if !thickness.is_finite() || thickness < 0.0 {
        return Err(format!("thickness must be finite and non-negative, got {thickness}"));
    }
    if !k.is_finite() || k < 0.0 {
        return Err(format!("conductivity must be finite and non-negative, got {k}"));
    }
    Ok(())
}

/// Centreline depth must exceed the total outer radius
fn validate_clearance(pipe: &Pipe) -> ConfigResult<()> {
    let outer_radius = pipe.bedding_radius();
    if *pipe.depth <= outer_radius {
        return Err(ConfigError::PipeAboveGrade {
            id: pipe.id,
            depth: *pipe.depth,
            outer_radius,
        });
    }
    Ok(())
}

fn validate_unique_ids(pipes: &[Pipe]) -> ConfigResult<()> {
    let mut seen = FxHashSet::default();
    for pipe in pipes {
        if !seen.insert(pipe.id) {
            return Err(ConfigError::DuplicatePipeId(pipe.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Celsius, Meters, PipeId, ThermalConductivity};

    fn soil() -> Vec<SoilLayer> {
        vec![SoilLayer::half_space(ThermalConductivity::SOIL_TYPICAL)]
    }

    fn pipe(id: u32) -> Pipe {
        Pipe::heat_source(id, "hot", Celsius::new(90.0), Meters::new(0.2))
            .parallel_at(Meters::ZERO, Meters::new(1.0))
    }

    #[test]
    fn test_valid_scenario_passes() {
        let pipes = [pipe(1), Pipe::affected(2, "cold", Meters::new(0.1))];
        assert_eq!(validate(&pipes, &soil(), 15.0), Ok(()));
    }

    #[test]
    fn test_missing_soil() {
        assert_eq!(validate(&[pipe(1)], &[], 15.0), Err(ConfigError::NoSoilLayers));
    }

    #[test]
    fn test_soil_gap_and_first_layer_below_grade() {
        let gap = vec![
            SoilLayer::new(Meters::ZERO, Meters::new(1.0), ThermalConductivity::CLAY),
            SoilLayer::new(Meters::new(1.5), Meters::INFINITY, ThermalConductivity::LOAM),
        ];
        assert!(matches!(
            validate_soil(&gap),
            Err(ConfigError::SoilLayerGap { index: 1, .. })
        ));

        let floating = vec![SoilLayer::new(
            Meters::new(0.5),
            Meters::INFINITY,
            ThermalConductivity::CLAY,
        )];
        assert!(matches!(
            validate_soil(&floating),
            Err(ConfigError::SoilLayerGap { index: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_soil_layer() {
        let inverted = vec![
            SoilLayer::new(Meters::ZERO, Meters::ZERO, ThermalConductivity::CLAY),
            SoilLayer::new(Meters::ZERO, Meters::INFINITY, ThermalConductivity::CLAY),
        ];
        assert!(matches!(
            validate_soil(&inverted),
            Err(ConfigError::InvalidSoilLayer { index: 0, .. })
        ));

        let nan_k = vec![SoilLayer::half_space(ThermalConductivity::from(f64::NAN))];
        assert!(matches!(
            validate_soil(&nan_k),
            Err(ConfigError::InvalidSoilLayer { index: 0, .. })
        ));
    }

    #[test]
    fn test_zero_conductivity_is_legal() {
        let dead = vec![SoilLayer::half_space(ThermalConductivity::new(0.0))];
        assert_eq!(validate_soil(&dead), Ok(()));
    }

    #[test]
    fn test_invalid_pipe() {
        let flat = Pipe::affected(4, "flat", Meters::new(0.0))
            .parallel_at(Meters::ZERO, Meters::new(1.0));
        assert!(matches!(
            validate(&[flat], &soil(), 15.0),
            Err(ConfigError::InvalidPipe { id: PipeId(4), .. })
        ));

        let negative =
            pipe(5).with_insulation(Meters::new(-0.1), ThermalConductivity::MINERAL_WOOL);
        assert!(matches!(
            validate(&[negative], &soil(), 15.0),
            Err(ConfigError::InvalidPipe { id: PipeId(5), .. })
        ));
    }

    #[test]
    fn test_pipe_above_grade() {
        let shallow = pipe(7)
            .parallel_at(Meters::ZERO, Meters::new(0.3))
            .with_bedding(Meters::new(0.2), ThermalConductivity::SAND_DRY);
        let error = validate(&[shallow], &soil(), 15.0).unwrap_err();
        match error {
            ConfigError::PipeAboveGrade {
                id,
                depth,
                outer_radius,
            } => {
                assert_eq!(id, PipeId(7));
                assert_eq!(depth, 0.3);
                assert!((outer_radius - 0.3).abs() < 1e-12);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_ids() {
        assert_eq!(
            validate(&[pipe(3), pipe(3)], &soil(), 15.0),
            Err(ConfigError::DuplicatePipeId(PipeId(3)))
        );
    }

    #[test]
    fn test_soil_temperature_must_be_finite() {
        assert_eq!(
            validate(&[pipe(1)], &soil(), f64::NAN).map_err(|e| e.to_string()),
            Err("soil temperature must be finite, got NaN".to_string())
        );
    }
}
