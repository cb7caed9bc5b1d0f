use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Defines a settings enum that (de)serializes by camelCase name and falls
/// back to a default kind for names it does not know.
macro_rules! named_kind {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $label:literal, fallback = $fallback:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "&'static str")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every kind, in declaration order
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Wire name of this kind
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }

            /// Parse a wire name, falling back to the default kind
            pub fn from_name(name: &str) -> Self {
                match name {
                    $( $text => $name::$variant, )+
                    other => {
                        warn!(
                            "unknown {} '{}', using '{}'",
                            $label,
                            other,
                            $name::$fallback.as_str()
                        );
                        $name::$fallback
                    }
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$fallback
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self::from_name(&name)
            }
        }

        impl From<$name> for &'static str {
            fn from(kind: $name) -> Self {
                kind.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_kind! {
    /// Radius falloff from base to apex
    pub enum ProfileCurve: "profile curve", fallback = Cubic {
        Linear => "linear",
        Quadratic => "quadratic",
        /// Smoothstep followed by a cosine falloff
        Cubic => "cubic",
        Exponential => "exponential",
    }
}

named_kind! {
    /// 2D outline swept at every height ring
    pub enum CrossSection: "cross-section", fallback = Circle {
        Circle => "circle",
        Square => "square",
        RoundedSquare => "roundedSquare",
        Oval => "oval",
    }
}

named_kind! {
    pub enum TopShape: "top shape", fallback = Rounded {
        Flat => "flat",
        Rounded => "rounded",
        Pointed => "pointed",
        Beveled => "beveled",
    }
}

named_kind! {
    pub enum BottomShape: "bottom shape", fallback = Rounded {
        Square => "square",
        Rounded => "rounded",
        Beveled => "beveled",
        Tapered => "tapered",
    }
}

named_kind! {
    /// Tessellation density. `Auto` picks from the puff's size.
    pub enum DetailLevel: "detail level", fallback = Medium {
        Auto => "auto",
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

named_kind! {
    /// Fabric family, drives roughness/metalness
    pub enum FabricType: "fabric type", fallback = Cotton {
        Cotton => "cotton",
        Silk => "silk",
        Wool => "wool",
        Polyester => "polyester",
        Velvet => "velvet",
        Denim => "denim",
        Leather => "leather",
        Satin => "satin",
    }
}

named_kind! {
    /// Edge treatment band around the base
    pub enum EdgeType: "edge type", fallback = None {
        None => "none",
        Stitched => "stitched",
        Hemmed => "hemmed",
        Bound => "bound",
        Raw => "raw",
    }
}

named_kind! {
    /// Gradient layout. Angular and diamond render as linear.
    pub enum GradientKind: "gradient type", fallback = Linear {
        Linear => "linear",
        Radial => "radial",
        Angular => "angular",
        Diamond => "diamond",
    }
}

/// Identifier of a stroke, assigned by the painting tool
pub type StrokeId = u64;

/// A single surface sample produced by the painting tool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokePoint {
    /// Texture coordinate on the painted surface
    pub uv: Vec2,
    /// Position of the sample in world space
    pub world_position: Vec3,
    /// Unit surface normal at the sample
    pub normal: Vec3,
}

impl StrokePoint {
    /// Create a stroke point. The normal is normalized; a zero normal becomes +Y.
    pub fn new(uv: Vec2, world_position: Vec3, normal: Vec3) -> Self {
        Self {
            uv,
            world_position,
            normal: normal.try_normalize().unwrap_or(Vec3::Y),
        }
    }
}

/// One color stop of a gradient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position along the gradient, 0..=1
    pub offset: f32,
    /// Linear RGBA
    pub color: [f32; 4],
}

/// Gradient fill for the puff surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientSettings {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    /// Direction of a linear gradient in degrees
    pub angle: f32,
    pub stops: Vec<ColorStop>,
}

impl Default for GradientSettings {
    fn default() -> Self {
        Self {
            kind: GradientKind::Linear,
            angle: 0.0,
            stops: Vec::new(),
        }
    }
}

/// Per-build puff configuration
///
/// Values are configurable and should not be treated as magic numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PuffSettings {
    /// Height of the apex above the surface
    pub height: f32,
    /// Base radius
    pub size: f32,
    /// 0 = crisp sheen, 1 = matte (only used without a roughness override)
    pub softness: f32,
    pub cross_section: CrossSection,
    /// Tangent stretch for oval cross-sections
    pub aspect_ratio: f32,
    pub profile_curve: ProfileCurve,
    pub top_shape: TopShape,
    pub bottom_shape: BottomShape,
    /// Bevel strength in percent (0..=100)
    pub bevel_amount: f32,
    /// Taper strength in percent (0..=100)
    pub taper_amount: f32,
    pub detail_level: DetailLevel,
    /// Blend of geometric normals toward the dome's smooth normals (0..=1)
    pub smoothness: f32,
    /// Surface color, linear RGB
    pub color: [f32; 3],
    pub opacity: f32,
    pub fabric_type: FabricType,
    /// Overrides the fabric roughness
    pub roughness: Option<f32>,
    /// Overrides the fabric metalness
    pub metalness: Option<f32>,
    /// Bake a weave normal map
    pub normal_map: bool,
    pub edge_type: EdgeType,
    /// Width of the edge band in world units
    pub edge_width: f32,
    pub edge_color: [f32; 3],
    /// Hair toggle. Nothing else in the hair block matters when false.
    pub hairs: bool,
    /// Hair length as a fraction of puff height
    pub hair_height: Option<f32>,
    /// Strands per unit of base area
    pub hair_density: f32,
    /// Strand root radius as a fraction of base size
    pub hair_thickness: f32,
    /// Tilt and length jitter, 0..=1
    pub hair_variation: f32,
    pub gradient: Option<GradientSettings>,
}

impl Default for PuffSettings {
    fn default() -> Self {
        Self {
            height: 0.5,
            size: 0.3,
            softness: 0.5,
            cross_section: CrossSection::Circle,
            aspect_ratio: 1.5,
            profile_curve: ProfileCurve::Cubic,
            top_shape: TopShape::Rounded,
            bottom_shape: BottomShape::Rounded,
            bevel_amount: 20.0,
            taper_amount: 0.0,
            detail_level: DetailLevel::Auto,
            smoothness: 0.5,
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            fabric_type: FabricType::Cotton,
            roughness: None,
            metalness: None,
            normal_map: false,
            edge_type: EdgeType::None,
            edge_width: 0.02,
            edge_color: [0.1, 0.1, 0.1],
            hairs: false,
            hair_height: Some(0.3),
            hair_density: 2000.0,
            hair_thickness: 0.02,
            hair_variation: 0.3,
            gradient: None,
        }
    }
}

impl PuffSettings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Hair strand length in world units, if hair generation is possible
    pub fn hair_length(&self) -> Option<f32> {
        self.hair_height.map(|ratio| self.height * ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in CrossSection::ALL {
            assert_eq!(CrossSection::from_name(kind.as_str()), *kind);
        }
        assert_eq!(CrossSection::from_name("roundedSquare"), CrossSection::RoundedSquare);
    }

    #[test]
    fn test_unknown_names_fall_back() {
        assert_eq!(ProfileCurve::from_name("sigmoid"), ProfileCurve::Cubic);
        assert_eq!(TopShape::from_name("domed"), TopShape::Rounded);
        assert_eq!(BottomShape::from_name(""), BottomShape::Rounded);
        assert_eq!(CrossSection::from_name("hexagon"), CrossSection::Circle);
        assert_eq!(DetailLevel::from_name("ultra"), DetailLevel::Medium);
    }

    #[test]
    fn test_settings_from_partial_json() {
        let settings = PuffSettings::from_json_str(
            r#"{ "height": 0.8, "crossSection": "star", "profileCurve": "linear", "hairs": true }"#,
        )
        .unwrap();
        assert_eq!(settings.height, 0.8);
        assert_eq!(settings.cross_section, CrossSection::Circle);
        assert_eq!(settings.profile_curve, ProfileCurve::Linear);
        assert!(settings.hairs);
        assert_eq!(settings.size, PuffSettings::default().size);
    }

    #[test]
    fn test_gradient_json() {
        let settings = PuffSettings::from_json_str(
            r#"{ "gradient": { "type": "radial", "stops": [
                { "offset": 0.0, "color": [1.0, 0.0, 0.0, 1.0] },
                { "offset": 1.0, "color": [0.0, 0.0, 1.0, 1.0] }
            ] } }"#,
        )
        .unwrap();
        let gradient = settings.gradient.unwrap();
        assert_eq!(gradient.kind, GradientKind::Radial);
        assert_eq!(gradient.stops.len(), 2);
    }

    #[test]
    fn test_stroke_point_normalizes_normal() {
        let point = StrokePoint::new(Vec2::ZERO, Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        assert!((point.normal.length() - 1.0).abs() < 1e-6);

        let degenerate = StrokePoint::new(Vec2::ZERO, Vec3::ZERO, Vec3::ZERO);
        assert_eq!(degenerate.normal, Vec3::Y);
    }

    #[test]
    fn test_hair_length() {
        let settings = PuffSettings {
            height: 2.0,
            hair_height: Some(0.25),
            ..Default::default()
        };
        assert_eq!(settings.hair_length(), Some(0.5));

        let settings = PuffSettings {
            hair_height: None,
            ..Default::default()
        };
        assert_eq!(settings.hair_length(), None);
    }
}
