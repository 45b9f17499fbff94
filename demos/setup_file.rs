//! Load a saved setup from YAML and print a CSV report.
//!
//! Run with:
//! ```sh
//! cargo run --example setup_file --features yaml -- demos/living-room.yaml
//! ```

use laserpower::{ConfigOverrides, LaserCalculator, OutputFormat, TargetList};

fn main() -> Result<(), laserpower::Error> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/living-room.yaml".to_string());

    let config = ConfigOverrides::load(&path)?.into_config()?;
    let calc = LaserCalculator::new(config)?;

    let targets = TargetList::collect(true, true, ["100", "200"]);
    let results = calc.calculate_multiple_targets(&targets.targets)?;

    print!("{}", OutputFormat::Csv.render(&calc.screen_info(), &results)?);
    Ok(())
}
