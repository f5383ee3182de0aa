mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "phasor", about = "Band-passed phase correlation spectra")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print or save the default combiner configuration
    Config(commands::config::ConfigArgs),
    /// Derive the output geometry of a fixed/moving spectrum pair
    Geometry(commands::geometry::GeometryArgs),
    /// Tabulate the band-pass factor against radius
    Profile(commands::profile::ProfileArgs),
    /// Render the band-pass mask of a 2-D output spectrum as a PNG
    Mask(commands::mask::MaskArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Config(args) => commands::config::run(args),
        Commands::Geometry(args) => commands::geometry::run(args),
        Commands::Profile(args) => commands::profile::run(args),
        Commands::Mask(args) => commands::mask::run(args),
    }
}
