//! Satin command-line interface.
//!
//! Sweep every configured device over every input power:
//! ```sh
//! satin run
//! satin run --concurrent false --pin pin.dat --devices laser.dat
//! satin run --config job.toml
//! satin validate --config job.toml
//! satin sweep
//! ```

mod config;
mod runner;

use std::path::PathBuf;
use std::time::Instant;

use clap::{ArgAction, Args, Parser, Subcommand};

use runner::{Overrides, ResolvedJob};

#[derive(Parser)]
#[command(name = "satin")]
#[command(about = "Satin: gaussian-beam saturation sweep for CO2 lasers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Input selection shared by `run` and `validate`.
#[derive(Args)]
struct InputArgs {
    /// Optional TOML job configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Input-power file (overrides config file setting).
    #[arg(long)]
    pin: Option<PathBuf>,
    /// Device file (overrides config file setting).
    #[arg(long)]
    devices: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sweep and write one report per device.
    Run {
        #[command(flatten)]
        inputs: InputArgs,
        /// Run devices and sweep points concurrently (`--concurrent false` for a serial run).
        #[arg(long, action = ArgAction::Set)]
        concurrent: Option<bool>,
        /// Worker threads (0 = one per core).
        #[arg(short, long)]
        threads: Option<usize>,
    },
    /// Check configuration and record files without computing anything.
    Validate {
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Print the saturation-intensity sweep and beam constants.
    Sweep,
}

fn resolve(inputs: InputArgs, concurrent: Option<bool>, threads: Option<usize>) -> anyhow::Result<ResolvedJob> {
    let job = config::load_or_default(inputs.config.as_deref())?;
    Ok(ResolvedJob::new(
        job,
        Overrides {
            concurrent,
            input_powers: inputs.pin,
            devices: inputs.devices,
            threads,
        },
    ))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            inputs,
            concurrent,
            threads,
        } => {
            println!("Satin Gaussian Beam Sweep");
            println!("=========================");
            let job = resolve(inputs, concurrent, threads)?;

            let start = Instant::now();
            let outcome = runner::run_job(&job)?;
            println!("The time was {:?}.", start.elapsed());

            if !outcome.is_success() {
                anyhow::bail!(
                    "Failed to complete: {} of {} device/input-power units processed",
                    outcome.completed,
                    outcome.expected
                );
            }
            println!("Sweep complete.");
            Ok(())
        }
        Commands::Validate { inputs } => {
            let job = resolve(inputs, None, None)?;
            let records = runner::load_records(&job)?;
            println!(
                "Configuration is valid: {} device(s), {} input power(s)",
                records.devices.len(),
                records.input_powers.len()
            );
            Ok(())
        }
        Commands::Sweep => {
            use satin_core::constants::*;

            println!("Saturation intensities (W/cm2):");
            for value in satin_core::SATURATION_INTENSITIES {
                println!("  {}", value);
            }
            println!();
            println!("Beam constants:");
            println!("  radius        = {} cm", RADIUS);
            println!("  waist         = {} cm", W1);
            println!("  wavelength    = {} cm", LAMBDA);
            println!("  Rayleigh z1   = {:.4} cm", Z1);
            println!("  dr, dz        = {} cm, {} cm", DR, DZ);
            println!("  axial samples = {}", AXIAL_SAMPLES);
            Ok(())
        }
    }
}
