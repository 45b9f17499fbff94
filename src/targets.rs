//! Parsing of user-supplied brightness targets and screen ratios.
//!
//! Targets arrive as free-form text (command-line tokens or interactive
//! input). Malformed tokens are reported, never fatal: callers decide whether
//! to skip them or re-prompt.

use crate::error::{Error, Result};
use crate::{HDR_TARGET_NITS, SDR_TARGET_NITS};

/// Parse one target brightness token in nits.
///
/// Accepts plain numbers plus the keywords `sdr` and `hdr` (any case).
/// A trailing `nits` unit is tolerated (`"120nits"`, `"120 nits"`). Zero and
/// negative values are rejected.
///
/// # Example
///
/// ```
/// use laserpower::targets::parse_target;
///
/// assert_eq!(parse_target("55").unwrap(), 55.0);
/// assert_eq!(parse_target("HDR").unwrap(), 150.0);
/// assert!(parse_target("bright").is_err());
/// ```
pub fn parse_target(token: &str) -> Result<f64> {
    let trimmed = token.trim();
    let lower = trimmed.to_lowercase();
    match lower.as_str() {
        "sdr" => return Ok(SDR_TARGET_NITS),
        "hdr" => return Ok(HDR_TARGET_NITS),
        _ => {}
    }

    let number = lower.strip_suffix("nits").unwrap_or(&lower).trim_end();
    match number.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        Ok(value) if value.is_finite() => Err(Error::Parse(format!(
            "'{}' is not a valid brightness target: must be greater than 0 nits",
            trimmed
        ))),
        _ => Err(Error::Parse(format!(
            "'{}' is not a valid brightness target",
            trimmed
        ))),
    }
}

/// Parse an aspect ratio as `W:H` (`"16:9"`, `"2.39:1"`) or a decimal (`"1.78"`).
///
/// # Example
///
/// ```
/// use laserpower::targets::parse_aspect_ratio;
///
/// assert_eq!(parse_aspect_ratio("16:9").unwrap(), 16.0 / 9.0);
/// assert_eq!(parse_aspect_ratio("2.39").unwrap(), 2.39);
/// ```
pub fn parse_aspect_ratio(s: &str) -> Result<f64> {
    let invalid = || Error::Parse(format!("'{}' is not a valid aspect ratio", s.trim()));

    let ratio = match s.trim().split_once(':') {
        Some((w, h)) => {
            let w: f64 = w.trim().parse().map_err(|_| invalid())?;
            let h: f64 = h.trim().parse().map_err(|_| invalid())?;
            if h == 0.0 {
                return Err(invalid());
            }
            w / h
        }
        None => s.trim().parse().map_err(|_| invalid())?,
    };

    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(invalid());
    }
    Ok(ratio)
}

/// Targets gathered from a batch source, plus the tokens that were rejected.
#[derive(Debug, Default)]
pub struct TargetList {
    /// Valid targets, in request order
    pub targets: Vec<f64>,

    /// Parse errors for discarded tokens
    pub rejected: Vec<Error>,
}

impl TargetList {
    /// Build the target list for a batch run.
    ///
    /// Order: the SDR shortcut, the HDR shortcut, then `tokens` as given.
    /// Malformed tokens are logged and skipped.
    pub fn collect<I, S>(sdr: bool, hdr: bool, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        if sdr {
            list.targets.push(SDR_TARGET_NITS);
        }
        if hdr {
            list.targets.push(HDR_TARGET_NITS);
        }

        for token in tokens {
            match parse_target(token.as_ref()) {
                Ok(nits) => list.targets.push(nits),
                Err(e) => {
                    tracing::warn!("Skipping target: {}", e);
                    list.rejected.push(e);
                }
            }
        }
        list
    }

    /// True when no valid target was collected.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_numbers() {
        assert_eq!(parse_target("55").unwrap(), 55.0);
        assert_eq!(parse_target(" 150.5 ").unwrap(), 150.5);
        assert_eq!(parse_target("120nits").unwrap(), 120.0);
        assert_eq!(parse_target("120 NITS").unwrap(), 120.0);
    }

    #[test]
    fn test_parse_target_non_positive() {
        let err = parse_target("-5").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("greater than 0"));
        assert!(parse_target("0").is_err());
    }

    #[test]
    fn test_parse_target_keywords() {
        assert_eq!(parse_target("sdr").unwrap(), SDR_TARGET_NITS);
        assert_eq!(parse_target("SDR").unwrap(), 55.0);
        assert_eq!(parse_target("Hdr").unwrap(), 150.0);
    }

    #[test]
    fn test_parse_target_invalid() {
        assert!(matches!(parse_target("abc"), Err(Error::Parse(_))));
        assert!(parse_target("").is_err());
        assert!(parse_target("nits").is_err());
        assert!(parse_target("inf").is_err());
        assert!(parse_target("NaN").is_err());
        assert!(parse_target("5 0").is_err());
    }

    #[test]
    fn test_parse_aspect_ratio() {
        assert_eq!(parse_aspect_ratio("16:9").unwrap(), 16.0 / 9.0);
        assert_eq!(parse_aspect_ratio("2.39:1").unwrap(), 2.39);
        assert_eq!(parse_aspect_ratio(" 4 : 3 ").unwrap(), 4.0 / 3.0);
        assert_eq!(parse_aspect_ratio("1.78").unwrap(), 1.78);

        assert!(parse_aspect_ratio("16:0").is_err());
        assert!(parse_aspect_ratio("0").is_err());
        assert!(parse_aspect_ratio("-1.78").is_err());
        assert!(parse_aspect_ratio("wide").is_err());
        assert!(parse_aspect_ratio("16:nine").is_err());
    }

    #[test]
    fn test_collect_order_and_rejects() {
        let list = TargetList::collect(true, true, ["100", "oops", "200", "0"]);
        assert_eq!(list.targets, vec![55.0, 150.0, 100.0, 200.0]);
        assert_eq!(list.rejected.len(), 2);
        assert!(list.rejected[0].to_string().contains("oops"));
    }

    #[test]
    fn test_collect_empty() {
        let list = TargetList::collect(false, false, Vec::<String>::new());
        assert!(list.is_empty());
        assert!(list.rejected.is_empty());

        let list = TargetList::collect(false, false, ["x"]);
        assert!(list.is_empty());
        assert_eq!(list.rejected.len(), 1);
    }
}
