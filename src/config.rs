//! Calculator configuration.
//!
//! [`CalculatorConfig`] is the complete, validated set of inputs a
//! [`LaserCalculator`](crate::LaserCalculator) is built from. It is assembled
//! from layers of [`ConfigOverrides`]: built-in defaults, an optional setup
//! file, then command-line flags.
//!
//! # Example Setup File (YAML)
//!
//! ```yaml
//! # Living room: 1680 lm laser projector on a 100" 16:9 screen
//! max_lumens: 1680
//! diagonal_inches: 100
//! aspect_ratio: "16:9"
//! gain: 1.0
//! min_laser_output_percent: 70
//! laser_model: floor-clamped
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use laserpower::ConfigOverrides;
//!
//! let config = ConfigOverrides::load("living-room.yaml")?
//!     .merge(ConfigOverrides::default().with_gain(1.3))
//!     .into_config()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, Error, Result};
use crate::laser::LaserModelKind;
use crate::targets::parse_aspect_ratio;
use crate::{DEFAULT_ASPECT_RATIO, DEFAULT_GAIN, DEFAULT_MIN_LASER_OUTPUT};

/// Complete calculator configuration.
///
/// Fields not supplied to [`CalculatorConfig::new`] take the documented
/// defaults. The config is validated when the calculator is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Projector output at 100% laser, in lumens
    pub max_lumens: u32,

    /// Screen diagonal in inches
    pub diagonal_inches: f64,

    /// Screen width:height ratio (default: 16/9)
    pub aspect_ratio: f64,

    /// Screen gain (default: 1.0)
    pub gain: f64,

    /// Lowest physical laser output in percent (default: 70.0)
    pub min_laser_output_percent: f64,

    /// Laser output model (default: floor-clamped)
    pub laser_model: LaserModelKind,
}

impl CalculatorConfig {
    /// Create a config for a projector and screen diagonal, with defaults for
    /// everything else.
    pub fn new(max_lumens: u32, diagonal_inches: f64) -> Self {
        Self {
            max_lumens,
            diagonal_inches,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            gain: DEFAULT_GAIN,
            min_laser_output_percent: DEFAULT_MIN_LASER_OUTPUT,
            laser_model: LaserModelKind::default(),
        }
    }

    /// Set screen aspect ratio.
    #[must_use]
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set screen gain.
    #[must_use]
    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    /// Set minimum laser output percent.
    #[must_use]
    pub fn with_min_laser_output(mut self, percent: f64) -> Self {
        self.min_laser_output_percent = percent;
        self
    }

    /// Set laser model.
    #[must_use]
    pub fn with_laser_model(mut self, model: LaserModelKind) -> Self {
        self.laser_model = model;
        self
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<()> {
        if self.max_lumens == 0 {
            return Err(Error::InvalidArgument(
                "max_lumens must be greater than 0".to_string(),
            ));
        }
        require_positive("diagonal_inches", self.diagonal_inches)?;
        require_positive("aspect_ratio", self.aspect_ratio)?;
        require_positive("gain", self.gain)?;

        let floor = self.min_laser_output_percent;
        if !floor.is_finite() || !(0.0..=100.0).contains(&floor) {
            return Err(Error::InvalidArgument(format!(
                "min_laser_output_percent must be between 0 and 100, got {}",
                floor
            )));
        }
        Ok(())
    }
}

/// Aspect ratio as written in a setup file: `1.78` or `"16:9"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AspectRatioValue {
    Number(f64),
    Text(String),
}

fn deserialize_aspect_ratio<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<AspectRatioValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(AspectRatioValue::Number(n)) => Ok(Some(n)),
        Some(AspectRatioValue::Text(s)) => parse_aspect_ratio(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// A partial configuration layer.
///
/// Every field is optional; [`merge`](Self::merge) stacks layers and
/// [`into_config`](Self::into_config) resolves them against the defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    /// Projector output at 100% laser, in lumens
    #[serde(default)]
    pub max_lumens: Option<u32>,

    /// Screen diagonal in inches
    #[serde(default)]
    pub diagonal_inches: Option<f64>,

    /// Screen width:height ratio
    #[serde(default, deserialize_with = "deserialize_aspect_ratio")]
    pub aspect_ratio: Option<f64>,

    /// Screen gain
    #[serde(default)]
    pub gain: Option<f64>,

    /// Lowest physical laser output in percent
    #[serde(default)]
    pub min_laser_output_percent: Option<f64>,

    /// Laser output model
    #[serde(default)]
    pub laser_model: Option<LaserModelKind>,
}

impl ConfigOverrides {
    /// Set projector lumens.
    #[must_use]
    pub fn with_max_lumens(mut self, lumens: u32) -> Self {
        self.max_lumens = Some(lumens);
        self
    }

    /// Set screen diagonal.
    #[must_use]
    pub fn with_diagonal(mut self, inches: f64) -> Self {
        self.diagonal_inches = Some(inches);
        self
    }

    /// Set screen aspect ratio.
    #[must_use]
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self
    }

    /// Set screen gain.
    #[must_use]
    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = Some(gain);
        self
    }

    /// Set minimum laser output percent.
    #[must_use]
    pub fn with_min_laser_output(mut self, percent: f64) -> Self {
        self.min_laser_output_percent = Some(percent);
        self
    }

    /// Set laser model.
    #[must_use]
    pub fn with_laser_model(mut self, model: LaserModelKind) -> Self {
        self.laser_model = Some(model);
        self
    }

    /// Stack `other` on top of `self`; values present in `other` win.
    #[must_use]
    pub fn merge(self, other: ConfigOverrides) -> Self {
        Self {
            max_lumens: other.max_lumens.or(self.max_lumens),
            diagonal_inches: other.diagonal_inches.or(self.diagonal_inches),
            aspect_ratio: other.aspect_ratio.or(self.aspect_ratio),
            gain: other.gain.or(self.gain),
            min_laser_output_percent: other
                .min_laser_output_percent
                .or(self.min_laser_output_percent),
            laser_model: other.laser_model.or(self.laser_model),
        }
    }

    /// Resolve into a validated [`CalculatorConfig`].
    ///
    /// Fails if `max_lumens` or `diagonal_inches` was never supplied, or if
    /// any value is out of range.
    pub fn into_config(self) -> Result<CalculatorConfig> {
        let max_lumens = self.max_lumens.ok_or_else(|| {
            Error::InvalidArgument("max_lumens is required (projector lumens)".to_string())
        })?;
        let diagonal = self.diagonal_inches.ok_or_else(|| {
            Error::InvalidArgument("diagonal_inches is required (screen size)".to_string())
        })?;

        let mut config = CalculatorConfig::new(max_lumens, diagonal);
        if let Some(aspect_ratio) = self.aspect_ratio {
            config = config.with_aspect_ratio(aspect_ratio);
        }
        if let Some(gain) = self.gain {
            config = config.with_gain(gain);
        }
        if let Some(percent) = self.min_laser_output_percent {
            config = config.with_min_laser_output(percent);
        }
        if let Some(model) = self.laser_model {
            config = config.with_laser_model(model);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "yaml")]
impl ConfigOverrides {
    /// Load a setup from a YAML file.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let overrides = ConfigOverrides::load("config/living-room.yaml")?;
    /// ```
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read setup file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let overrides = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.as_ref().display(), ?overrides, "Loaded setup file");
        Ok(overrides)
    }

    /// Parse a setup from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document is an empty layer
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(format!("Invalid setup YAML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = CalculatorConfig::new(1680, 100.0);
        assert_eq!(config.max_lumens, 1680);
        assert_eq!(config.diagonal_inches, 100.0);
        assert_eq!(config.aspect_ratio, 16.0 / 9.0);
        assert_eq!(config.gain, 1.0);
        assert_eq!(config.min_laser_output_percent, 70.0);
        assert_eq!(config.laser_model, LaserModelKind::FloorClamped);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let base = CalculatorConfig::new(1680, 100.0);
        assert!(CalculatorConfig::new(0, 100.0).validate().is_err());
        assert!(CalculatorConfig::new(1680, 0.0).validate().is_err());
        assert!(base.with_aspect_ratio(-1.0).validate().is_err());
        assert!(base.with_gain(0.0).validate().is_err());
        assert!(base.with_min_laser_output(-0.1).validate().is_err());
        assert!(base.with_min_laser_output(100.1).validate().is_err());
        assert!(base.with_min_laser_output(f64::NAN).validate().is_err());
        assert!(base.with_min_laser_output(0.0).validate().is_ok());
        assert!(base.with_min_laser_output(100.0).validate().is_ok());
    }

    #[test]
    fn test_merge_later_layer_wins() {
        let file = ConfigOverrides::default()
            .with_max_lumens(1680)
            .with_diagonal(100.0)
            .with_gain(1.0);
        let flags = ConfigOverrides::default().with_gain(1.3);

        let merged = file.merge(flags);
        assert_eq!(merged.max_lumens, Some(1680));
        assert_eq!(merged.diagonal_inches, Some(100.0));
        assert_eq!(merged.gain, Some(1.3));
        assert_eq!(merged.aspect_ratio, None);
    }

    #[test]
    fn test_into_config_requires_lumens_and_diagonal() {
        let err = ConfigOverrides::default()
            .with_diagonal(100.0)
            .into_config()
            .unwrap_err();
        assert!(err.to_string().contains("max_lumens"));

        let err = ConfigOverrides::default()
            .with_max_lumens(1680)
            .into_config()
            .unwrap_err();
        assert!(err.to_string().contains("diagonal_inches"));
    }

    #[test]
    fn test_into_config_applies_overrides() {
        let config = ConfigOverrides::default()
            .with_max_lumens(2200)
            .with_diagonal(120.0)
            .with_aspect_ratio(2.39)
            .with_min_laser_output(50.0)
            .with_laser_model(LaserModelKind::Linear)
            .into_config()
            .unwrap();
        assert_eq!(config.max_lumens, 2200);
        assert_eq!(config.aspect_ratio, 2.39);
        assert_eq!(config.gain, 1.0);
        assert_eq!(config.min_laser_output_percent, 50.0);
        assert_eq!(config.laser_model, LaserModelKind::Linear);
    }

    #[test]
    fn test_overrides_from_json() {
        let overrides: ConfigOverrides =
            serde_json::from_str(r#"{"max_lumens": 1680, "aspect_ratio": "2.39:1"}"#).unwrap();
        assert_eq!(overrides.max_lumens, Some(1680));
        assert_eq!(overrides.aspect_ratio, Some(2.39));

        assert!(serde_json::from_str::<ConfigOverrides>(r#"{"lumens": 1680}"#).is_err());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_from_yaml() {
        let yaml = r#"
max_lumens: 1680
diagonal_inches: 100
aspect_ratio: "16:9"
gain: 1.3
min_laser_output_percent: 65
laser_model: linear
"#;
        let overrides = ConfigOverrides::from_yaml(yaml).unwrap();
        assert_eq!(overrides.max_lumens, Some(1680));
        assert_eq!(overrides.diagonal_inches, Some(100.0));
        assert_eq!(overrides.aspect_ratio, Some(16.0 / 9.0));
        assert_eq!(overrides.gain, Some(1.3));
        assert_eq!(overrides.min_laser_output_percent, Some(65.0));
        assert_eq!(overrides.laser_model, Some(LaserModelKind::Linear));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_from_yaml_numeric_aspect_and_empty() {
        let overrides = ConfigOverrides::from_yaml("aspect_ratio: 1.85\n").unwrap();
        assert_eq!(overrides.aspect_ratio, Some(1.85));

        assert_eq!(ConfigOverrides::from_yaml("").unwrap(), ConfigOverrides::default());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_from_yaml_invalid() {
        assert!(matches!(
            ConfigOverrides::from_yaml("max_lumens: [1, 2"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ConfigOverrides::from_yaml("aspect_ratio: \"wide\"\n"),
            Err(Error::Config(_))
        ));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_load_missing_file() {
        let err = ConfigOverrides::load("/nonexistent/laserpower-setup.yaml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("laserpower-setup.yaml"));
    }
}
