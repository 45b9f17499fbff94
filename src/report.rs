//! Rendering of calculator output as a table, JSON or CSV.
//!
//! All formats apply the display rounding policy of
//! [`LaserPowerResult::rounded`]; the calculator itself never rounds.
//!
//! # Example
//!
//! ```
//! use laserpower::{CalculatorConfig, LaserCalculator, OutputFormat};
//!
//! let calc = LaserCalculator::new(CalculatorConfig::new(1680, 100.0)).unwrap();
//! let results = calc.calculate_multiple_targets(&[55.0, 150.0]).unwrap();
//!
//! let csv = OutputFormat::Csv.render(&calc.screen_info(), &results).unwrap();
//! assert_eq!(csv.lines().count(), 3);
//! ```

use std::fmt::{self, Write as _};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::{LaserPowerResult, ScreenInfo};

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable summary and aligned table
    #[default]
    Table,

    /// Pretty-printed JSON document
    Json,

    /// Comma-separated rows with a header line
    Csv,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(Error::Parse(format!(
                "unknown output format '{}' (expected table, json or csv)",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        })
    }
}

/// JSON document layout.
#[derive(Debug, Serialize)]
struct Report<'a> {
    screen: ScreenInfo,
    results: &'a [LaserPowerResult],
}

impl OutputFormat {
    /// Render the screen summary followed by all results.
    pub fn render(&self, info: &ScreenInfo, results: &[LaserPowerResult]) -> Result<String> {
        match self {
            OutputFormat::Table => {
                let mut out = format_screen_summary(info);
                out.push('\n');
                out.push_str(&format_table(results));
                Ok(out)
            }
            OutputFormat::Json => format_json(info, results),
            OutputFormat::Csv => Ok(format_csv(results)),
        }
    }

    /// Render a single result, as printed after each interactive query.
    ///
    /// CSV output omits the header; see [`csv_header`].
    pub fn render_result(&self, result: &LaserPowerResult) -> Result<String> {
        match self {
            OutputFormat::Table => Ok(format_result_block(result)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.rounded())?),
            OutputFormat::Csv => Ok(csv_row(result)),
        }
    }
}

/// Multi-line description of the configured setup.
pub fn format_screen_summary(info: &ScreenInfo) -> String {
    let info = info.rounded();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Screen:     {}\" diagonal, {}:1 aspect, gain {}",
        info.diagonal_inches, info.aspect_ratio, info.gain
    );
    let _ = writeln!(
        out,
        "            {}\" x {}\" ({} sq ft)",
        info.width_inches, info.height_inches, info.area_sq_feet
    );
    let _ = writeln!(
        out,
        "Projector:  {} lumens, laser floor {}% ({} model)",
        info.max_lumens, info.min_laser_output_percent, info.laser_model
    );
    let _ = writeln!(
        out,
        "Brightness: {} - {} nits (max {} fL)",
        info.min_achievable_nits, info.max_achievable_nits, info.max_achievable_foot_lamberts
    );
    out
}

const TABLE_HEADERS: [&str; 8] = [
    "Target",
    "Lumens",
    "Required %",
    "Laser %",
    "Setting",
    "Actual lm",
    "Actual nits",
    "Achievable",
];

fn table_cells(result: &LaserPowerResult) -> [String; 8] {
    let r = result.rounded();
    [
        format!("{:.1}", r.target_nits),
        format!("{:.0}", r.lumens_needed),
        format!("{:.1}", r.required_laser_percent),
        format!("{:.1}", r.actual_laser_percent),
        format!("{:.1}", r.setting_value),
        format!("{:.0}", r.actual_lumens),
        format!("{:.1}", r.actual_nits),
        if r.achievable { "yes" } else { "NO" }.to_string(),
    ]
}

/// Aligned table with one row per result.
pub fn format_table(results: &[LaserPowerResult]) -> String {
    let rows: Vec<[String; 8]> = results.iter().map(table_cells).collect();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = TABLE_HEADERS
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| format!("{:>w$}", h, w = *w))
        .collect();
    let _ = writeln!(out, "{}", header.join("  "));

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| format!("{:>w$}", c, w = *w))
            .collect();
        let _ = writeln!(out, "{}", cells.join("  "));
    }
    out
}

/// Short description of one result for interactive use.
pub fn format_result_block(result: &LaserPowerResult) -> String {
    let r = result.rounded();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} nits: {} lumens needed ({}% laser)",
        r.target_nits, r.lumens_needed, r.required_laser_percent
    );
    let _ = writeln!(
        out,
        "  setting {} -> {}% laser, {} lm, {} nits ({} lux)",
        r.setting_value, r.actual_laser_percent, r.actual_lumens, r.actual_nits, r.actual_lux
    );
    if !r.achievable {
        let _ = writeln!(out, "  NOT achievable: exceeds 100% laser output");
    } else if r.is_floor_limited() {
        let _ = writeln!(
            out,
            "  below laser floor: screen will be brighter than requested"
        );
    }
    out
}

/// Pretty-printed JSON document `{ "screen": ..., "results": [...] }`.
pub fn format_json(info: &ScreenInfo, results: &[LaserPowerResult]) -> Result<String> {
    let rounded: Vec<LaserPowerResult> = results.iter().map(LaserPowerResult::rounded).collect();
    let report = Report {
        screen: info.rounded(),
        results: &rounded,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// CSV header line, in [`LaserPowerResult`] field order.
pub fn csv_header() -> String {
    LaserPowerResult::FIELD_NAMES.join(",")
}

/// One CSV data line for a result.
pub fn csv_row(result: &LaserPowerResult) -> String {
    let r = result.rounded();
    format!(
        "{},{},{},{},{},{},{},{},{}",
        r.target_nits,
        r.lumens_needed,
        r.required_laser_percent,
        r.actual_laser_percent,
        r.setting_value,
        r.actual_lumens,
        r.actual_nits,
        r.actual_lux,
        r.achievable
    )
}

/// Header plus one line per result.
pub fn format_csv(results: &[LaserPowerResult]) -> String {
    let mut out = csv_header();
    out.push('\n');
    for result in results {
        out.push_str(&csv_row(result));
        out.push('\n');
    }
    out
}
