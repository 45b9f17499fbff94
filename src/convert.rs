//! Brightness unit conversions between nits, foot-lamberts, lumens and lux.
//!
//! All conversions use the fixed factor [`NITS_TO_FOOT_LAMBERTS`]. Lux is a
//! flat `nits * π` multiple, which is how the calculator reports it rather
//! than a photometrically exact illuminance.

use std::f64::consts::PI;

use crate::NITS_TO_FOOT_LAMBERTS;

/// Convert luminance in nits to foot-lamberts.
pub fn nits_to_foot_lamberts(nits: f64) -> f64 {
    nits * NITS_TO_FOOT_LAMBERTS
}

/// Convert luminance in foot-lamberts to nits.
pub fn foot_lamberts_to_nits(foot_lamberts: f64) -> f64 {
    foot_lamberts / NITS_TO_FOOT_LAMBERTS
}

/// Lumens a projector must deliver to reach `nits` on a screen.
///
/// # Example
///
/// ```
/// use laserpower::convert::{lumens_to_nits, nits_to_lumens};
///
/// let lumens = nits_to_lumens(100.0, 30.0, 1.0);
/// assert!((lumens_to_nits(lumens, 30.0, 1.0) - 100.0).abs() < 1e-9);
/// ```
pub fn nits_to_lumens(nits: f64, area_sq_feet: f64, gain: f64) -> f64 {
    nits_to_foot_lamberts(nits) * area_sq_feet / gain
}

/// Screen luminance in nits produced by `lumens` of projector output.
pub fn lumens_to_nits(lumens: f64, area_sq_feet: f64, gain: f64) -> f64 {
    foot_lamberts_to_nits(lumens * gain / area_sq_feet)
}

/// Flat nits to lux conversion.
pub fn nits_to_lux(nits: f64) -> f64 {
    nits * PI
}
