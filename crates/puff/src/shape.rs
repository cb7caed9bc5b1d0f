//! Top and bottom shape modifiers
//!
//! Shape modifiers remap the height ratio fed into the profile curve. Only
//! the outer decile at either end is touched; everything in between passes
//! through unchanged.

use crate::constants::{BOTTOM_BEVEL_FRACTION, BOTTOM_SHAPE_END, MIN_TAPER_POWER, TOP_SHAPE_START};
use crate::types::{BottomShape, TopShape};

/// Parameters the modifiers read from the settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParams {
    pub top: TopShape,
    pub bottom: BottomShape,
    /// Percent, 0..=100
    pub bevel_amount: f32,
    /// Percent, 0..=100
    pub taper_amount: f32,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            top: TopShape::Rounded,
            bottom: BottomShape::Rounded,
            bevel_amount: 0.0,
            taper_amount: 0.0,
        }
    }
}

/// Remap `height_ratio` for the configured top and bottom shapes
pub fn apply_shape(params: &ShapeParams, height_ratio: f32) -> f32 {
    if height_ratio > TOP_SHAPE_START {
        apply_top(params, height_ratio)
    } else if height_ratio < BOTTOM_SHAPE_END {
        apply_bottom(params, height_ratio)
    } else {
        height_ratio
    }
}

fn apply_top(params: &ShapeParams, ratio: f32) -> f32 {
    let band = 1.0 - TOP_SHAPE_START;
    let t = (ratio - TOP_SHAPE_START) / band;
    match params.top {
        TopShape::Flat => TOP_SHAPE_START,
        TopShape::Rounded => ratio,
        // Lerp toward the apex so the radius collapses faster
        TopShape::Pointed => ratio + (1.0 - ratio) * t,
        TopShape::Beveled => {
            let bevel = (params.bevel_amount / 100.0).clamp(0.0, 1.0);
            TOP_SHAPE_START + band * (t * (1.0 + bevel)).min(1.0)
        }
    }
}

fn apply_bottom(params: &ShapeParams, ratio: f32) -> f32 {
    match params.bottom {
        BottomShape::Square => 0.0,
        BottomShape::Rounded => ratio,
        BottomShape::Beveled => {
            let edge = BOTTOM_SHAPE_END * BOTTOM_BEVEL_FRACTION;
            if ratio >= edge {
                return ratio;
            }
            let bevel = (params.bevel_amount / 100.0).clamp(0.0, 1.0);
            // Lifts the lowest rings, pulling the base ring inward
            edge * (bevel + (1.0 - bevel) * (ratio / edge))
        }
        BottomShape::Tapered => {
            let power = (1.0 - params.taper_amount / 100.0).max(MIN_TAPER_POWER);
            BOTTOM_SHAPE_END * (ratio / BOTTOM_SHAPE_END).powf(power)
        }
    }
}
