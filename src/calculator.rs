//! The laser power calculator.

use crate::config::CalculatorConfig;
use crate::convert::{foot_lamberts_to_nits, lumens_to_nits, nits_to_lumens, nits_to_lux};
use crate::error::{require_positive, Result};
use crate::geometry::ScreenGeometry;
use crate::laser::LaserModel;
use crate::types::{LaserPowerResult, ProjectorConfig, ScreenConfig, ScreenInfo};

/// Computes laser settings for brightness targets on one projector/screen pair.
///
/// Built once from a [`CalculatorConfig`]; every query is an independent,
/// pure computation.
///
/// # Example
///
/// ```
/// use laserpower::{CalculatorConfig, LaserCalculator};
///
/// let calc = LaserCalculator::new(CalculatorConfig::new(1680, 100.0)).unwrap();
///
/// let hdr = calc.laser_power_for_nits(150.0).unwrap();
/// assert!(hdr.achievable);
/// assert!(hdr.setting_value > 20.0 && hdr.setting_value < 30.0);
///
/// // SDR sits below the 70% floor: setting 0, delivered at the floor
/// let sdr = calc.laser_power_for_nits(55.0).unwrap();
/// assert_eq!(sdr.setting_value, 0.0);
/// assert_eq!(sdr.actual_laser_percent, 70.0);
/// ```
#[derive(Debug, Clone)]
pub struct LaserCalculator {
    screen: ScreenConfig,
    projector: ProjectorConfig,
}

impl LaserCalculator {
    /// Validate `config` and derive the screen geometry.
    pub fn new(config: CalculatorConfig) -> Result<Self> {
        config.validate()?;
        let geometry = ScreenGeometry::compute(config.diagonal_inches, config.aspect_ratio)?;

        tracing::debug!(
            max_lumens = config.max_lumens,
            diagonal = config.diagonal_inches,
            area_sq_feet = geometry.area_sq_feet,
            model = %config.laser_model,
            "Calculator configured"
        );

        Ok(Self {
            screen: ScreenConfig {
                diagonal_inches: config.diagonal_inches,
                aspect_ratio: config.aspect_ratio,
                gain: config.gain,
                geometry,
            },
            projector: ProjectorConfig {
                max_lumens: config.max_lumens,
                min_laser_output_percent: config.min_laser_output_percent,
                laser_model: config.laser_model,
            },
        })
    }

    /// Screen parameters and derived geometry.
    pub fn screen(&self) -> &ScreenConfig {
        &self.screen
    }

    /// Projector parameters.
    pub fn projector(&self) -> &ProjectorConfig {
        &self.projector
    }

    fn model(&self) -> &'static dyn LaserModel {
        self.projector.laser_model.model()
    }

    fn max_lumens(&self) -> f64 {
        f64::from(self.projector.max_lumens)
    }

    fn nits_at_percent(&self, percent: f64) -> f64 {
        let lumens = percent / 100.0 * self.max_lumens();
        lumens_to_nits(lumens, self.screen.geometry.area_sq_feet, self.screen.gain)
    }

    /// Brightness at 100% laser output.
    pub fn max_achievable_nits(&self) -> f64 {
        foot_lamberts_to_nits(self.max_achievable_foot_lamberts())
    }

    /// Brightness at 100% laser output, in foot-lamberts.
    pub fn max_achievable_foot_lamberts(&self) -> f64 {
        self.max_lumens() * self.screen.gain / self.screen.geometry.area_sq_feet
    }

    /// Lowest brightness the laser model can deliver.
    pub fn min_achievable_nits(&self) -> f64 {
        let floor = self
            .model()
            .floor_percent(self.projector.min_laser_output_percent);
        self.nits_at_percent(floor)
    }

    /// Brightness delivered when the projector is set to `setting_value`.
    ///
    /// Settings outside 0-100 are clamped.
    pub fn brightness_for_setting(&self, setting_value: f64) -> f64 {
        let percent = self
            .model()
            .delivered_percent_for_setting(setting_value, self.projector.min_laser_output_percent);
        self.nits_at_percent(percent)
    }

    /// Summary of the configuration and reachable brightness range.
    pub fn screen_info(&self) -> ScreenInfo {
        ScreenInfo {
            max_lumens: self.projector.max_lumens,
            diagonal_inches: self.screen.diagonal_inches,
            aspect_ratio: self.screen.aspect_ratio,
            gain: self.screen.gain,
            min_laser_output_percent: self.projector.min_laser_output_percent,
            laser_model: self.projector.laser_model,
            width_inches: self.screen.geometry.width_inches,
            height_inches: self.screen.geometry.height_inches,
            area_sq_feet: self.screen.geometry.area_sq_feet,
            max_achievable_nits: self.max_achievable_nits(),
            max_achievable_foot_lamberts: self.max_achievable_foot_lamberts(),
            min_achievable_nits: self.min_achievable_nits(),
        }
    }

    /// Laser power needed for one brightness target.
    ///
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument)
    /// when `target_nits` is not a positive, finite number.
    pub fn laser_power_for_nits(&self, target_nits: f64) -> Result<LaserPowerResult> {
        let target_nits = require_positive("target_nits", target_nits)?;
        let area = self.screen.geometry.area_sq_feet;
        let gain = self.screen.gain;

        let lumens_needed = nits_to_lumens(target_nits, area, gain);
        let required_laser_percent = lumens_needed / self.max_lumens() * 100.0;

        let drive = self
            .model()
            .drive(required_laser_percent, self.projector.min_laser_output_percent);

        let actual_lumens = drive.delivered_percent / 100.0 * self.max_lumens();
        let actual_nits = lumens_to_nits(actual_lumens, area, gain);

        let result = LaserPowerResult {
            target_nits,
            lumens_needed,
            required_laser_percent,
            actual_laser_percent: drive.delivered_percent,
            setting_value: drive.setting_value,
            actual_lumens,
            actual_nits,
            actual_lux: nits_to_lux(actual_nits),
            achievable: required_laser_percent <= 100.0,
        };

        tracing::debug!(
            target_nits,
            required = result.required_laser_percent,
            delivered = result.actual_laser_percent,
            setting = result.setting_value,
            achievable = result.achievable,
            "Evaluated target"
        );
        if !result.achievable {
            tracing::debug!(
                target_nits,
                max_nits = self.max_achievable_nits(),
                "Target exceeds projector output"
            );
        }

        Ok(result)
    }

    /// Evaluate several targets independently, preserving order.
    ///
    /// Stops at the first invalid target.
    pub fn calculate_multiple_targets(&self, targets: &[f64]) -> Result<Vec<LaserPowerResult>> {
        targets
            .iter()
            .map(|&nits| self.laser_power_for_nits(nits))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::laser::LaserModelKind;
    use crate::Error;
    use approx::assert_relative_eq;

    fn living_room() -> LaserCalculator {
        LaserCalculator::new(CalculatorConfig::new(1680, 100.0)).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(matches!(
            LaserCalculator::new(CalculatorConfig::new(0, 100.0)),
            Err(Error::InvalidArgument(_))
        ));
        let config = CalculatorConfig::new(1680, 100.0).with_gain(-1.0);
        assert!(LaserCalculator::new(config).is_err());
    }

    #[test]
    fn test_sdr_below_floor() {
        let r = living_room().laser_power_for_nits(55.0).unwrap();
        assert_relative_eq!(r.lumens_needed, 476.56, epsilon = 0.01);
        assert_relative_eq!(r.required_laser_percent, 28.37, epsilon = 0.01);
        assert_eq!(r.setting_value, 0.0);
        assert_eq!(r.actual_laser_percent, 70.0);
        assert_relative_eq!(r.actual_lumens, 1176.0, epsilon = 1e-9);
        assert!(r.achievable);
        assert!(r.actual_nits > 55.0);
    }

    #[test]
    fn test_hdr_above_floor() {
        let r = living_room().laser_power_for_nits(150.0).unwrap();
        assert_relative_eq!(r.lumens_needed, 1299.7, epsilon = 0.1);
        assert_relative_eq!(r.required_laser_percent, 77.363, epsilon = 1e-3);
        assert_relative_eq!(r.setting_value, 24.544, epsilon = 1e-3);
        assert_eq!(r.actual_laser_percent, r.required_laser_percent);
        assert_relative_eq!(r.actual_nits, 150.0, max_relative = 1e-12);
        let lux = 150.0 * std::f64::consts::PI;
        assert_relative_eq!(r.actual_lux, lux, max_relative = 1e-12);
        assert!(r.achievable);
    }

    #[test]
    fn test_unachievable_target() {
        let calc = living_room();
        let r = calc.laser_power_for_nits(400.0).unwrap();
        assert!(r.lumens_needed > 1680.0);
        assert!(!r.achievable);
        assert_relative_eq!(calc.max_achievable_nits(), 193.89, epsilon = 0.01);
    }

    #[test]
    fn test_rejects_non_positive_target() {
        let calc = living_room();
        assert!(matches!(
            calc.laser_power_for_nits(0.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(calc.laser_power_for_nits(-10.0).is_err());
        assert!(calc.laser_power_for_nits(f64::NAN).is_err());
    }

    #[test]
    fn test_linear_model_has_no_floor() {
        let calc = LaserCalculator::new(
            CalculatorConfig::new(1680, 100.0).with_laser_model(LaserModelKind::Linear),
        )
        .unwrap();
        let r = calc.laser_power_for_nits(55.0).unwrap();
        assert_eq!(r.actual_laser_percent, r.required_laser_percent);
        assert_eq!(r.setting_value, r.required_laser_percent);
        assert_relative_eq!(r.actual_nits, 55.0, max_relative = 1e-12);
        assert_eq!(calc.min_achievable_nits(), 0.0);
    }

    #[test]
    fn test_brightness_range() {
        let calc = living_room();
        let max = calc.max_achievable_nits();
        assert_relative_eq!(calc.min_achievable_nits(), max * 0.7, max_relative = 1e-12);
        assert_relative_eq!(calc.brightness_for_setting(0.0), calc.min_achievable_nits());
        assert_relative_eq!(calc.brightness_for_setting(100.0), max, max_relative = 1e-12);
        assert_relative_eq!(
            calc.brightness_for_setting(50.0),
            max * 0.85,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_setting_round_trip() {
        let calc = living_room();
        let r = calc.laser_power_for_nits(170.0).unwrap();
        let nits = calc.brightness_for_setting(r.setting_value);
        assert_relative_eq!(nits, 170.0, max_relative = 1e-9);
    }

    #[test]
    fn test_screen_info() {
        let calc = living_room();
        let info = calc.screen_info();
        assert_eq!(info.max_lumens, 1680);
        assert_eq!(info.laser_model, LaserModelKind::FloorClamped);
        assert_relative_eq!(info.area_sq_feet, 29.674, epsilon = 1e-3);
        assert_relative_eq!(info.max_achievable_foot_lamberts, 56.616, epsilon = 1e-3);
        assert_eq!(info.max_achievable_nits, calc.max_achievable_nits());
    }

    #[test]
    fn test_calculate_multiple_targets_preserves_order() {
        let calc = living_room();
        let results = calc.calculate_multiple_targets(&[150.0, 55.0, 400.0]).unwrap();
        let targets: Vec<f64> = results.iter().map(|r| r.target_nits).collect();
        assert_eq!(targets, vec![150.0, 55.0, 400.0]);
        assert_eq!(results[1], calc.laser_power_for_nits(55.0).unwrap());

        assert!(calc.calculate_multiple_targets(&[]).unwrap().is_empty());
        assert!(calc.calculate_multiple_targets(&[55.0, 0.0]).is_err());
    }
}
