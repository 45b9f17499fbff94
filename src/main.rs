use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use laserpower::targets::parse_aspect_ratio;
use laserpower::{
    interactive, ConfigOverrides, LaserCalculator, LaserModelKind, OutputFormat, TargetList,
};

#[derive(Debug, Parser)]
#[command(name = "laserpower", version)]
#[command(about = "Calculate projector laser settings for target screen brightness")]
struct Cli {
    /// Target brightness values in nits (e.g. 55 120 150)
    targets: Vec<String>,

    /// Projector output at 100% laser, in lumens
    #[arg(short, long, value_name = "LUMENS")]
    lumens: Option<u32>,

    /// Screen diagonal in inches
    #[arg(short, long, value_name = "INCHES")]
    diagonal: Option<f64>,

    /// Screen gain [default: 1.0]
    #[arg(short, long)]
    gain: Option<f64>,

    /// Screen aspect ratio, as W:H or decimal [default: 16:9]
    #[arg(short, long, value_name = "RATIO", value_parser = parse_aspect_ratio)]
    aspect_ratio: Option<f64>,

    /// Minimum physical laser output in percent [default: 70]
    #[arg(short, long, value_name = "PERCENT")]
    min_laser: Option<f64>,

    /// Laser model: linear or floor-clamped [default: floor-clamped]
    #[arg(long, value_name = "MODEL")]
    model: Option<LaserModelKind>,

    /// Load projector and screen settings from a YAML file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Include the SDR reference target (55 nits)
    #[arg(long)]
    sdr: bool,

    /// Include the HDR target (150 nits)
    #[arg(long)]
    hdr: bool,

    /// Output format: table, json or csv
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,

    /// Prompt for targets interactively
    #[arg(short, long)]
    interactive: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            max_lumens: self.lumens,
            diagonal_inches: self.diagonal,
            aspect_ratio: self.aspect_ratio,
            gain: self.gain,
            min_laser_output_percent: self.min_laser,
            laser_model: self.model,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON/CSV on stdout stay machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "laserpower=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    let file_layer = match &cli.config {
        Some(path) => ConfigOverrides::load(path)?,
        None => ConfigOverrides::default(),
    };
    let config = file_layer
        .merge(cli.overrides())
        .into_config()
        .context("Incomplete or invalid projector/screen settings (see --help)")?;
    let calc = LaserCalculator::new(config)?;

    let list = TargetList::collect(cli.sdr, cli.hdr, &cli.targets);
    let stdout = io::stdout();

    if cli.interactive || (list.is_empty() && list.rejected.is_empty()) {
        let stdin = io::stdin();
        interactive::run(&calc, cli.format, stdin.lock(), stdout.lock())?;
        return Ok(());
    }

    if list.is_empty() {
        anyhow::bail!("No valid brightness targets given");
    }

    let results = calc.calculate_multiple_targets(&list.targets)?;
    let rendered = cli.format.render(&calc.screen_info(), &results)?;

    let mut out = stdout.lock();
    write!(out, "{}", rendered)?;
    if !rendered.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}
