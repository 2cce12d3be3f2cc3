//! Reflectivity command-line interface.
//!
//! Compute reflectivity curves from TOML job files:
//! ```sh
//! reflectivity run job.toml
//! reflectivity validate job.toml
//! reflectivity materials
//! ```

mod config;
mod runner;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "reflectivity")]
#[command(about = "Specular reflectivity of layered thin films")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a reflectivity curve from a TOML job file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a job file without computing anything.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// List the built-in materials and their scattering-length densities.
    Materials,
}

/// Install the global fmt subscriber, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);
    Registry::default().with(filter).with(fmt_layer).init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            let job = config::load_config(&config)?;
            info!(config = %config.display(), "loaded job");

            let base_dir = config.parent().unwrap_or(Path::new("."));
            let result = runner::run_job(&job, base_dir)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            runner::write_outputs(&result, &job, &out_dir)?;

            info!("run complete");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            job.validate()?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Materials => {
            println!("{:<24} {:<8} {:>12}", "name", "formula", "SLD (1e-6/A^2)");
            for m in reflectivity::materials::materials() {
                println!(
                    "{:<24} {:<8} {:>12.3}",
                    m.name,
                    m.formula,
                    m.scattering_length * 1e6
                );
            }
            Ok(())
        }
    }
}
