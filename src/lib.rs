//! # laserpower
//!
//! Projector laser-power calculator for hitting screen brightness targets.
//!
//! Given a projector's lumen output and a screen's size, aspect ratio and
//! gain, this crate works out which laser setting reaches a target
//! brightness (for example 55 nits for SDR or 150 nits for HDR) and what the
//! screen will actually show.
//!
//! Many laser projectors cannot dim below a minimum output (often around
//! 70%). Their 0-100 laser setting is spread over that reduced range, so the
//! setting you enter is not the physical percentage. The
//! [`FloorClampedLaserModel`] accounts for this; the [`LinearLaserModel`]
//! treats the setting as the physical percentage.
//!
//! ## Quick Start
//!
//! ```
//! use laserpower::{CalculatorConfig, LaserCalculator};
//!
//! // 1680 lm projector, 100" 16:9 screen, unity gain, 70% laser floor
//! let calc = LaserCalculator::new(CalculatorConfig::new(1680, 100.0)).unwrap();
//!
//! let hdr = calc.laser_power_for_nits(150.0).unwrap();
//! println!(
//!     "Set laser to {:.1} for {:.1} nits",
//!     hdr.setting_value, hdr.actual_nits
//! );
//! ```
//!
//! ## Units
//!
//! | Quantity | Unit | Notes |
//! |----------|------|-------|
//! | Luminance | nits (cd/m²) | targets and results |
//! | Luminance | foot-lamberts | `nits * 0.292` |
//! | Illuminance | lux | reported as `nits * π` |
//! | Screen area | square feet | from diagonal and aspect ratio |
//!
//! ## Feature Flags
//!
//! - `yaml` - Load saved setups from YAML files
//! - `cli` - The `laserpower` command-line tool
//! - `full` - All features

pub mod calculator;
pub mod config;
pub mod convert;
mod error;
pub mod geometry;
pub mod interactive;
pub mod laser;
pub mod report;
pub mod targets;
mod types;

pub use calculator::LaserCalculator;
pub use config::{CalculatorConfig, ConfigOverrides};
pub use error::{Error, Result};
pub use geometry::ScreenGeometry;
pub use laser::{FloorClampedLaserModel, LaserDrive, LaserModel, LaserModelKind, LinearLaserModel};
pub use report::OutputFormat;
pub use targets::TargetList;
pub use types::{LaserPowerResult, ProjectorConfig, ScreenConfig, ScreenInfo};

/// Foot-lamberts per nit
pub const NITS_TO_FOOT_LAMBERTS: f64 = 0.292;

/// Default screen gain
pub const DEFAULT_GAIN: f64 = 1.0;

/// Default screen aspect ratio (16:9)
pub const DEFAULT_ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Default minimum laser output in percent
pub const DEFAULT_MIN_LASER_OUTPUT: f64 = 70.0;

/// Conventional SDR reference brightness in nits
pub const SDR_TARGET_NITS: f64 = 55.0;

/// Conventional HDR brightness target in nits
pub const HDR_TARGET_NITS: f64 = 150.0;

/// Convert a physical laser percentage to the projector's setting value.
///
/// The setting range 0-100 covers physical output from `min_laser_output`
/// to 100%. Anything below the floor maps to 0.
///
/// # Example
///
/// ```
/// use laserpower::setting_value;
///
/// assert_eq!(setting_value(100.0, 70.0), 100.0);
/// assert_eq!(setting_value(85.0, 70.0), 50.0);
/// assert_eq!(setting_value(28.3, 70.0), 0.0);
/// ```
pub fn setting_value(laser_percent: f64, min_laser_output: f64) -> f64 {
    FloorClampedLaserModel
        .drive(laser_percent, min_laser_output)
        .setting_value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_value() {
        assert_eq!(setting_value(100.0, 70.0), 100.0);
        assert_eq!(setting_value(70.0, 70.0), 0.0);
        assert_eq!(setting_value(69.9, 70.0), 0.0); // Clamp at floor
        assert_eq!(setting_value(0.0, 70.0), 0.0);
        assert_eq!(setting_value(50.0, 0.0), 50.0);
    }

    #[test]
    fn test_constants() {
        assert_eq!(NITS_TO_FOOT_LAMBERTS, 0.292);
        assert_eq!(DEFAULT_ASPECT_RATIO, 16.0 / 9.0);
        assert_eq!(DEFAULT_MIN_LASER_OUTPUT, 70.0);
        assert_eq!(SDR_TARGET_NITS, 55.0);
        assert_eq!(HDR_TARGET_NITS, 150.0);
    }
}
