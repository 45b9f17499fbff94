//! Interactive prompt loop.
//!
//! Reads one target per line and prints its result until the user types
//! `quit` (any case) or input ends. Bad input never ends the session: the
//! user is told what was wrong and prompted again.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use laserpower::{interactive, CalculatorConfig, LaserCalculator, OutputFormat};
//!
//! let calc = LaserCalculator::new(CalculatorConfig::new(1680, 100.0)).unwrap();
//! let mut output = Vec::new();
//!
//! let input = Cursor::new("150\nquit\n");
//! let count = interactive::run(&calc, OutputFormat::Table, input, &mut output).unwrap();
//! assert_eq!(count, 1);
//! ```

use std::io::{self, BufRead, Write};

use crate::calculator::LaserCalculator;
use crate::report::{csv_header, format_screen_summary, OutputFormat};
use crate::targets::parse_target;

/// Prompt shown before each target.
pub const PROMPT: &str = "Target nits (or 'quit'): ";

/// Command that ends the session.
pub const QUIT_COMMAND: &str = "quit";

/// Run the prompt loop over `input`/`output`.
///
/// Returns the number of targets evaluated.
pub fn run<R, W>(
    calc: &LaserCalculator,
    format: OutputFormat,
    mut input: R,
    mut output: W,
) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
{
    match format {
        OutputFormat::Table => {
            writeln!(output, "{}", format_screen_summary(&calc.screen_info()))?
        }
        OutputFormat::Csv => writeln!(output, "{}", csv_header())?,
        OutputFormat::Json => {}
    }

    let mut evaluated = 0;
    let mut line = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // EOF
            writeln!(output)?;
            break;
        }

        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }
        if entry.eq_ignore_ascii_case(QUIT_COMMAND) {
            break;
        }

        let result = parse_target(entry).and_then(|nits| calc.laser_power_for_nits(nits));
        match result {
            Ok(result) => {
                let rendered = format
                    .render_result(&result)
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                writeln!(output, "{}", rendered.trim_end())?;
                evaluated += 1;
            }
            Err(e) => {
                tracing::debug!("Rejected interactive input {:?}: {}", entry, e);
                writeln!(output, "{}. Please try again.", e)?;
            }
        }
    }

    tracing::debug!(evaluated, "Interactive session ended");
    Ok(evaluated)
}
