use anyhow::Result;
use clap::Args;
use phasor_core::{derive_output_geometry, Geometry};

use super::parse_list;

#[derive(Args)]
pub struct GeometryArgs {
    /// Fixed spectrum size per axis (e.g. 33,64)
    #[arg(long)]
    pub fixed_size: String,

    /// Moving spectrum size per axis
    #[arg(long)]
    pub moving_size: String,

    /// Fixed spectrum spacing per axis (default: all 1)
    #[arg(long)]
    pub fixed_spacing: Option<String>,

    /// Moving spectrum spacing per axis (default: all 1)
    #[arg(long)]
    pub moving_spacing: Option<String>,

    /// Fixed spectrum start index per axis (default: all 0)
    #[arg(long)]
    pub fixed_start: Option<String>,

    /// Moving spectrum start index per axis (default: all 0)
    #[arg(long)]
    pub moving_start: Option<String>,

    /// Un-padded spatial extent recorded for the fixed spectrum
    #[arg(long)]
    pub fixed_real_size: Option<usize>,

    /// Un-padded spatial extent recorded for the moving spectrum
    #[arg(long)]
    pub moving_real_size: Option<usize>,
}

pub fn run(args: &GeometryArgs) -> Result<()> {
    let fixed = build(
        &args.fixed_size,
        args.fixed_spacing.as_deref(),
        args.fixed_start.as_deref(),
        args.fixed_real_size,
    )?;
    let moving = build(
        &args.moving_size,
        args.moving_spacing.as_deref(),
        args.moving_start.as_deref(),
        args.moving_real_size,
    )?;

    let output = derive_output_geometry(&fixed, &moving)?;

    crate::summary::print_geometry("Fixed", &fixed);
    crate::summary::print_geometry("Moving", &moving);
    crate::summary::print_geometry("Output", &output);
    println!();

    Ok(())
}

fn build(
    size: &str,
    spacing: Option<&str>,
    start: Option<&str>,
    actual_real_size: Option<usize>,
) -> Result<Geometry> {
    let size: Vec<usize> = parse_list(size, "size")?;
    let n = size.len();
    let spacing = match spacing {
        Some(text) => parse_list(text, "spacing")?,
        None => vec![1.0; n],
    };
    let start = match start {
        Some(text) => parse_list(text, "start index")?,
        None => vec![0; n],
    };
    Ok(Geometry::new(size, spacing, start)?.with_actual_real_size(actual_real_size))
}
