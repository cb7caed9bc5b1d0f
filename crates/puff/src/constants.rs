/// Height ratio above which top shape modifiers apply.
pub const TOP_SHAPE_START: f32 = 0.9;

/// Height ratio below which bottom shape modifiers apply.
pub const BOTTOM_SHAPE_END: f32 = 0.1;

/// Portion of the bottom band a bevel ramps over.
pub const BOTTOM_BEVEL_FRACTION: f32 = 0.3;

/// Smallest exponent a taper may produce (taper amount 95..100 clamps here).
pub const MIN_TAPER_POWER: f32 = 0.05;

/// Roughness shared by every hair strand.
pub const HAIR_ROUGHNESS: f32 = 0.9;

/// Hair opacity relative to the surface opacity.
pub const HAIR_OPACITY_FACTOR: f32 = 0.6;

/// Tip radius of a strand relative to its root radius.
pub const HAIR_TIP_RATIO: f32 = 0.3;

/// Maximum tilt (radians) at variation 1.0.
pub const HAIR_MAX_TILT: f32 = 0.6;

/// Low and high weave frequencies, in cycles across the normal map.
pub const WEAVE_FREQUENCIES: (f32, f32) = (8.0, 32.0);

/// Amplitudes of the two weave components.
pub const WEAVE_AMPLITUDES: (f32, f32) = (0.35, 0.15);
