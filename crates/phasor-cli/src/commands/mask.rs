use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use image::{GrayImage, Luma};
use ndarray::{ArrayD, IxDyn};
use num_complex::Complex;
use phasor_core::bandpass::max_radius;
use phasor_core::config::CombinerConfig;
use phasor_core::{Spectrum, SpectrumCombiner};
use tracing::info;

use super::{parse_list, parse_points};

#[derive(Args)]
pub struct MaskArgs {
    /// Output spectrum size as rows,cols (axis 0 is the half-spectrum axis)
    #[arg(long)]
    pub size: String,

    /// TOML combiner config (see `phasor config`)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Comma-separated control points c0,c1,c2,c3, overriding the config
    #[arg(long)]
    pub points: Option<String>,

    /// Output file path
    #[arg(short, long, default_value = "bandpass_mask.png")]
    pub output: PathBuf,
}

/// Combine a unit spectrum with itself, which leaves exactly the band-pass
/// factor in the real part, and save it as an 8-bit image.
pub fn run(args: &MaskArgs) -> Result<()> {
    let size: Vec<usize> = parse_list(&args.size, "size")?;
    if size.len() != 2 {
        bail!("Mask rendering needs a 2-D size, got {} axes", size.len());
    }

    let mut config = match args.config {
        Some(ref path) => super::config::load(path)?,
        None => CombinerConfig::default(),
    };
    if let Some(ref text) = args.points {
        config.band_pass = parse_points(text)?;
    }

    crate::summary::print_combiner(&config, max_radius(&size));

    let unit = ArrayD::from_elem(IxDyn(&size), Complex::new(1.0f64, 0.0));
    let spectrum = Spectrum::new(unit);
    let combiner = SpectrumCombiner::<f64>::with_config(config)?;
    let combined = combiner.combine(&spectrum, &spectrum)?;

    info!(
        size = ?combined.size(),
        generation = combiner.generation(),
        "band-pass mask computed"
    );

    let (rows, cols) = (size[0], size[1]);
    let img = GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        let v = combined.data[[y as usize, x as usize]].re.clamp(0.0, 1.0);
        Luma([(v * 255.0).round() as u8])
    });
    img.save(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    println!("Saved to {}", args.output.display());

    Ok(())
}
