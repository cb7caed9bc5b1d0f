//! Fabric lookup table

use crate::types::{FabricType, PuffSettings};

/// Surface response of a fabric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FabricProperties {
    pub roughness: f32,
    pub metalness: f32,
}

/// Base roughness/metalness per fabric family
pub fn fabric_properties(fabric: FabricType) -> FabricProperties {
    let (roughness, metalness) = match fabric {
        FabricType::Cotton => (0.8, 0.0),
        FabricType::Silk => (0.3, 0.1),
        FabricType::Wool => (0.95, 0.0),
        FabricType::Polyester => (0.6, 0.05),
        FabricType::Velvet => (0.9, 0.0),
        FabricType::Denim => (0.85, 0.0),
        FabricType::Leather => (0.5, 0.1),
        FabricType::Satin => (0.25, 0.15),
    };
    FabricProperties {
        roughness,
        metalness,
    }
}

/// Fabric response for a build: explicit overrides win, otherwise softness
/// pushes the fabric's roughness toward fully matte.
pub fn resolve_fabric(settings: &PuffSettings) -> FabricProperties {
    let base = fabric_properties(settings.fabric_type);
    let softened = base.roughness + (1.0 - base.roughness) * settings.softness.clamp(0.0, 1.0) * 0.5;
    FabricProperties {
        roughness: settings.roughness.unwrap_or(softened).clamp(0.0, 1.0),
        metalness: settings.metalness.unwrap_or(base.metalness).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_fabric_in_unit_range() {
        for fabric in FabricType::ALL {
            let p = fabric_properties(*fabric);
            assert!((0.0..=1.0).contains(&p.roughness));
            assert!((0.0..=1.0).contains(&p.metalness));
        }
    }

    #[test]
    fn test_overrides_win() {
        let settings = PuffSettings {
            fabric_type: FabricType::Silk,
            roughness: Some(0.1),
            metalness: Some(0.7),
            ..Default::default()
        };
        let p = resolve_fabric(&settings);
        assert_eq!(p.roughness, 0.1);
        assert_eq!(p.metalness, 0.7);
    }

    #[test]
    fn test_softness_mattes_surface() {
        let crisp = PuffSettings {
            fabric_type: FabricType::Satin,
            softness: 0.0,
            ..Default::default()
        };
        assert!((resolve_fabric(&crisp).roughness - 0.25).abs() < 1e-6);

        let soft = PuffSettings {
            softness: 1.0,
            ..crisp
        };
        assert!((resolve_fabric(&soft).roughness - 0.625).abs() < 1e-6);
    }
}
