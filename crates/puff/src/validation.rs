//! Settings validation
//!
//! The geometry stages are total over well-formed input and do not guard
//! against NaN or negative sizes. Hosts call [`validate_settings`] before
//! handing settings to the engine.

use thiserror::Error;

use crate::types::PuffSettings;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("Gradient stop {index} has offset {offset} outside 0..=1")]
    InvalidStop { index: usize, offset: f32 },
}

fn finite(field: &'static str, value: f32) -> Result<f32, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ValidationError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}

fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ValidationError> {
    if (min..=max).contains(&finite(field, value)?) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Validate a settings object before building
pub fn validate_settings(settings: &PuffSettings) -> Result<(), ValidationError> {
    positive("height", settings.height)?;
    positive("size", settings.size)?;
    positive("aspectRatio", settings.aspect_ratio)?;
    in_range("softness", settings.softness, 0.0, 1.0)?;
    in_range("smoothness", settings.smoothness, 0.0, 1.0)?;
    in_range("opacity", settings.opacity, 0.0, 1.0)?;
    in_range("bevelAmount", settings.bevel_amount, 0.0, 100.0)?;
    in_range("taperAmount", settings.taper_amount, 0.0, 100.0)?;
    in_range("edgeWidth", settings.edge_width, 0.0, f32::MAX)?;

    if let Some(roughness) = settings.roughness {
        in_range("roughness", roughness, 0.0, 1.0)?;
    }
    if let Some(metalness) = settings.metalness {
        in_range("metalness", metalness, 0.0, 1.0)?;
    }

    // Hair fields are ignored entirely when hairs are off
    if settings.hairs {
        if let Some(ratio) = settings.hair_height {
            in_range("hairHeight", ratio, 0.0, f32::MAX)?;
        }
        in_range("hairDensity", settings.hair_density, 0.0, f32::MAX)?;
        in_range("hairThickness", settings.hair_thickness, 0.0, f32::MAX)?;
        in_range("hairVariation", settings.hair_variation, 0.0, 1.0)?;
    }

    if let Some(gradient) = &settings.gradient {
        finite("gradient.angle", gradient.angle)?;
        for (index, stop) in gradient.stops.iter().enumerate() {
            if !(0.0..=1.0).contains(&stop.offset) {
                return Err(ValidationError::InvalidStop {
                    index,
                    offset: stop.offset,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorStop, GradientSettings};

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_settings(&PuffSettings::default()).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let settings = PuffSettings {
            size: 0.0,
            ..Default::default()
        };
        assert_eq!(
            validate_settings(&settings),
            Err(ValidationError::NotPositive {
                field: "size",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_nan_height() {
        let settings = PuffSettings {
            height: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(ValidationError::NotFinite { field: "height", .. })
        ));
    }

    #[test]
    fn test_hair_fields_ignored_when_disabled() {
        let settings = PuffSettings {
            hairs: false,
            hair_variation: 7.0,
            ..Default::default()
        };
        assert!(validate_settings(&settings).is_ok());

        let settings = PuffSettings {
            hairs: true,
            ..settings
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(ValidationError::OutOfRange { field: "hairVariation", .. })
        ));
    }

    #[test]
    fn test_rejects_stop_outside_unit_range() {
        let settings = PuffSettings {
            gradient: Some(GradientSettings {
                stops: vec![ColorStop {
                    offset: 1.5,
                    color: [1.0; 4],
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            validate_settings(&settings),
            Err(ValidationError::InvalidStop {
                index: 0,
                offset: 1.5
            })
        );
    }
}
