//! Profile curves: height ratio to radius multiplier

use std::f32::consts::FRAC_PI_2;

use crate::types::ProfileCurve;

/// Radius multiplier at `height_ratio` (0 = base, 1 = apex).
///
/// Every curve starts at 1 on the base. All but `Exponential` reach 0 at the apex.
pub fn profile_radius(curve: ProfileCurve, height_ratio: f32) -> f32 {
    let t = height_ratio;
    match curve {
        ProfileCurve::Linear => 1.0 - t,
        ProfileCurve::Quadratic => (t * FRAC_PI_2).cos(),
        ProfileCurve::Cubic => {
            // Smoothstep first so ring radii don't step visibly between rings
            let smoothed = t * t * (3.0 - 2.0 * t);
            (smoothed * FRAC_PI_2).cos()
        }
        ProfileCurve::Exponential => (-2.0 * t).exp(),
    }
}
