//! Laser output models.
//!
//! A projector is asked for a *setting value* in the 0-100 range, but the
//! physical laser does not necessarily follow it all the way down. Two
//! models are provided:
//!
//! - [`LinearLaserModel`]: the setting is the physical percentage.
//! - [`FloorClampedLaserModel`]: the laser cannot go below a minimum output,
//!   so the setting range `0..=100` is spread over `floor..=100` physical
//!   percent. Requests below the floor are delivered at the floor.
//!
//! # Example
//!
//! ```
//! use laserpower::{FloorClampedLaserModel, LaserModel};
//!
//! let drive = FloorClampedLaserModel.drive(85.0, 70.0);
//! assert_eq!(drive.setting_value, 50.0);
//! assert_eq!(drive.delivered_percent, 85.0);
//!
//! // Below the floor the laser stays at 70%
//! let drive = FloorClampedLaserModel.drive(28.0, 70.0);
//! assert_eq!(drive.setting_value, 0.0);
//! assert_eq!(drive.delivered_percent, 70.0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Outcome of driving the laser toward a required output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaserDrive {
    /// Physical laser percent the projector actually delivers
    pub delivered_percent: f64,

    /// Control value to enter on the projector
    pub setting_value: f64,
}

/// Mapping between physical laser percent and the projector's setting value.
pub trait LaserModel {
    /// Map a required physical percent to the setting value and the percent
    /// that will really be delivered.
    fn drive(&self, required_percent: f64, min_laser_output: f64) -> LaserDrive;

    /// Physical percent delivered for a given setting value (clamped to 0-100).
    fn delivered_percent_for_setting(&self, setting_value: f64, min_laser_output: f64) -> f64;

    /// Lowest physical percent this model can deliver.
    fn floor_percent(&self, min_laser_output: f64) -> f64;
}

/// Setting value equals physical laser percent.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearLaserModel;

impl LaserModel for LinearLaserModel {
    fn drive(&self, required_percent: f64, _min_laser_output: f64) -> LaserDrive {
        LaserDrive {
            delivered_percent: required_percent,
            setting_value: required_percent,
        }
    }

    fn delivered_percent_for_setting(&self, setting_value: f64, _min_laser_output: f64) -> f64 {
        setting_value.clamp(0.0, 100.0)
    }

    fn floor_percent(&self, _min_laser_output: f64) -> f64 {
        0.0
    }
}

/// Setting range rescaled onto `[min_laser_output, 100]` physical percent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloorClampedLaserModel;

impl LaserModel for FloorClampedLaserModel {
    fn drive(&self, required_percent: f64, min_laser_output: f64) -> LaserDrive {
        if required_percent < min_laser_output {
            return LaserDrive {
                delivered_percent: min_laser_output,
                setting_value: 0.0,
            };
        }

        let span = 100.0 - min_laser_output;
        let setting_value = if span > 0.0 {
            (required_percent - min_laser_output) / span * 100.0
        } else {
            // Floor at 100%: the only reachable setting is full output
            100.0
        };

        LaserDrive {
            delivered_percent: required_percent,
            setting_value,
        }
    }

    fn delivered_percent_for_setting(&self, setting_value: f64, min_laser_output: f64) -> f64 {
        let setting = setting_value.clamp(0.0, 100.0);
        min_laser_output + setting / 100.0 * (100.0 - min_laser_output)
    }

    fn floor_percent(&self, min_laser_output: f64) -> f64 {
        min_laser_output
    }
}

/// Selects which [`LaserModel`] a calculator uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaserModelKind {
    /// [`LinearLaserModel`]
    Linear,

    /// [`FloorClampedLaserModel`] (default)
    #[default]
    FloorClamped,
}

impl LaserModelKind {
    /// Borrow the model implementation for this kind.
    pub fn model(self) -> &'static dyn LaserModel {
        match self {
            LaserModelKind::Linear => &LinearLaserModel,
            LaserModelKind::FloorClamped => &FloorClampedLaserModel,
        }
    }

    /// Name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            LaserModelKind::Linear => "linear",
            LaserModelKind::FloorClamped => "floor-clamped",
        }
    }
}

impl fmt::Display for LaserModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LaserModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(LaserModelKind::Linear),
            "floor-clamped" | "floor_clamped" | "floor" | "clamped" => {
                Ok(LaserModelKind::FloorClamped)
            }
            other => Err(Error::Parse(format!(
                "unknown laser model '{}' (expected 'linear' or 'floor-clamped')",
                other
            ))),
        }
    }
}
