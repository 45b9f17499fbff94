//! Value records produced and consumed by the calculator.
//!
//! Field names are what the JSON and CSV reports emit, in declaration order.

use serde::{Deserialize, Serialize};

use crate::geometry::ScreenGeometry;
use crate::laser::LaserModelKind;

/// Screen parameters plus the geometry derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Screen diagonal in inches
    pub diagonal_inches: f64,

    /// Width:height ratio as a decimal
    pub aspect_ratio: f64,

    /// Screen gain
    pub gain: f64,

    /// Derived width, height and area
    #[serde(flatten)]
    pub geometry: ScreenGeometry,
}

/// Projector capability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectorConfig {
    /// Output at 100% laser, in lumens
    pub max_lumens: u32,

    /// Lowest physical laser output in percent
    pub min_laser_output_percent: f64,

    /// Model mapping physical output to setting values
    pub laser_model: LaserModelKind,
}

/// Summary of the configured setup.
///
/// Echoes the configuration, the derived geometry and the brightness range
/// the projector can reach on this screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenInfo {
    /// Output at 100% laser, in lumens
    pub max_lumens: u32,

    /// Screen diagonal in inches
    pub diagonal_inches: f64,

    /// Width:height ratio as a decimal
    pub aspect_ratio: f64,

    /// Screen gain
    pub gain: f64,

    /// Lowest physical laser output in percent
    pub min_laser_output_percent: f64,

    /// Laser model in use
    pub laser_model: LaserModelKind,

    /// Screen width in inches
    pub width_inches: f64,

    /// Screen height in inches
    pub height_inches: f64,

    /// Screen area in square feet
    pub area_sq_feet: f64,

    /// Brightness at 100% laser
    pub max_achievable_nits: f64,

    /// Brightness at 100% laser, in foot-lamberts
    pub max_achievable_foot_lamberts: f64,

    /// Brightness at the lowest laser output
    pub min_achievable_nits: f64,
}

impl ScreenInfo {
    /// Copy with values rounded for display (1 decimal, lumens untouched).
    pub fn rounded(&self) -> Self {
        Self {
            diagonal_inches: round1(self.diagonal_inches),
            aspect_ratio: round_to(self.aspect_ratio, 3),
            gain: round_to(self.gain, 2),
            min_laser_output_percent: round1(self.min_laser_output_percent),
            width_inches: round1(self.width_inches),
            height_inches: round1(self.height_inches),
            area_sq_feet: round1(self.area_sq_feet),
            max_achievable_nits: round1(self.max_achievable_nits),
            max_achievable_foot_lamberts: round1(self.max_achievable_foot_lamberts),
            min_achievable_nits: round1(self.min_achievable_nits),
            ..*self
        }
    }
}

/// Laser power required for one brightness target.
///
/// Values are unrounded; use [`LaserPowerResult::rounded`] for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserPowerResult {
    /// Requested brightness in nits
    pub target_nits: f64,

    /// Lumens the projector must deliver for the target
    pub lumens_needed: f64,

    /// Laser percent the target requires, before any floor is applied
    pub required_laser_percent: f64,

    /// Laser percent the projector actually delivers
    pub actual_laser_percent: f64,

    /// Control value to enter on the projector (0-100 when achievable)
    pub setting_value: f64,

    /// Lumens actually delivered
    pub actual_lumens: f64,

    /// Brightness actually delivered, in nits
    pub actual_nits: f64,

    /// Brightness actually delivered, in lux
    pub actual_lux: f64,

    /// Whether the target fits within 100% laser output
    pub achievable: bool,
}

impl LaserPowerResult {
    /// CSV column names, in field order.
    pub const FIELD_NAMES: [&'static str; 9] = [
        "target_nits",
        "lumens_needed",
        "required_laser_percent",
        "actual_laser_percent",
        "setting_value",
        "actual_lumens",
        "actual_nits",
        "actual_lux",
        "achievable",
    ];

    /// Copy with the display rounding policy applied.
    ///
    /// Lumens round to whole numbers; percentages, nits and lux to one
    /// decimal place.
    pub fn rounded(&self) -> Self {
        Self {
            target_nits: round1(self.target_nits),
            lumens_needed: self.lumens_needed.round(),
            required_laser_percent: round1(self.required_laser_percent),
            actual_laser_percent: round1(self.actual_laser_percent),
            setting_value: round1(self.setting_value),
            actual_lumens: self.actual_lumens.round(),
            actual_nits: round1(self.actual_nits),
            actual_lux: round1(self.actual_lux),
            achievable: self.achievable,
        }
    }

    /// True when the laser had to stay above the requested output.
    pub fn is_floor_limited(&self) -> bool {
        self.actual_laser_percent > self.required_laser_percent
    }
}

fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
