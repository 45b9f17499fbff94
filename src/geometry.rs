//! Screen geometry derived from diagonal size and aspect ratio.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, Result};

/// Square inches per square foot.
const SQ_INCHES_PER_SQ_FOOT: f64 = 144.0;

/// Width, height and area of a flat screen.
///
/// # Example
///
/// ```
/// use laserpower::ScreenGeometry;
///
/// let geometry = ScreenGeometry::compute(100.0, 16.0 / 9.0).unwrap();
/// assert!((geometry.width_inches - 87.2).abs() < 0.1);
/// assert!((geometry.height_inches - 49.0).abs() < 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    /// Visible width in inches
    pub width_inches: f64,

    /// Visible height in inches
    pub height_inches: f64,

    /// Visible area in square feet
    pub area_sq_feet: f64,
}

impl ScreenGeometry {
    /// Derive geometry from a diagonal (inches) and a width:height ratio.
    ///
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument)
    /// if either input is non-positive or not finite.
    pub fn compute(diagonal_inches: f64, aspect_ratio: f64) -> Result<Self> {
        let diagonal = require_positive("diagonal_inches", diagonal_inches)?;
        let aspect = require_positive("aspect_ratio", aspect_ratio)?;

        let width_inches = diagonal / (1.0 + (1.0 / aspect).powi(2)).sqrt();
        let height_inches = width_inches / aspect;
        let area_sq_feet = width_inches * height_inches / SQ_INCHES_PER_SQ_FOOT;

        Ok(Self {
            width_inches,
            height_inches,
            area_sq_feet,
        })
    }

    /// Diagonal reconstructed from width and height.
    pub fn diagonal_inches(&self) -> f64 {
        self.width_inches.hypot(self.height_inches)
    }
}
