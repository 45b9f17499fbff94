//! Plan laser settings for a home theater.
//!
//! Run with:
//! ```sh
//! cargo run --example home_theater
//! ```

use laserpower::{CalculatorConfig, LaserCalculator, LaserModelKind, OutputFormat};

fn main() -> Result<(), laserpower::Error> {
    // 1680 lm laser projector on a 110" 2.35:1 screen with a gray 0.8 gain surface
    let config = CalculatorConfig::new(1680, 110.0)
        .with_aspect_ratio(2.35)
        .with_gain(0.8)
        .with_min_laser_output(70.0);
    let calc = LaserCalculator::new(config)?;

    let results = calc.calculate_multiple_targets(&[48.0, 55.0, 100.0, 150.0])?;
    print!("{}", OutputFormat::Table.render(&calc.screen_info(), &results)?);

    // What does the projector do across its setting range?
    println!();
    for setting in [0.0, 25.0, 50.0, 75.0, 100.0] {
        println!(
            "setting {:>5.1} -> {:>6.1} nits",
            setting,
            calc.brightness_for_setting(setting)
        );
    }

    // Same screen, assuming the laser dims all the way down
    let linear = LaserCalculator::new(config.with_laser_model(LaserModelKind::Linear))?;
    let sdr = linear.laser_power_for_nits(55.0)?;
    println!(
        "\nWithout a laser floor, SDR would need setting {:.1}",
        sdr.setting_value
    );

    Ok(())
}
