use anyhow::Result;
use clap::Args;
use phasor_core::bandpass::{max_radius, BandPassControlPoints};

use super::{parse_list, parse_points};

#[derive(Args)]
pub struct ProfileArgs {
    /// Output spectrum size per axis (e.g. 33,64)
    #[arg(long)]
    pub size: String,

    /// Comma-separated control points c0,c1,c2,c3
    #[arg(long)]
    pub points: Option<String>,

    /// Number of radius steps between 0 and the maximum radius
    #[arg(long, default_value = "20")]
    pub steps: usize,
}

pub fn run(args: &ProfileArgs) -> Result<()> {
    let size: Vec<usize> = parse_list(&args.size, "size")?;
    let points = match args.points.as_deref() {
        Some(text) => parse_points(text)?,
        None => BandPassControlPoints::default(),
    };
    let steps = args.steps.max(1);

    let max_dist: f64 = max_radius(&size);
    let band = points.scaled(max_dist);

    println!("{:>10} {:>10} {:>8}", "fraction", "radius", "factor");
    for i in 0..=steps {
        let fraction = i as f64 / steps as f64;
        let r = fraction * max_dist;
        println!("{:>10.3} {:>10.3} {:>8.4}", fraction, r, band.factor(r));
    }

    Ok(())
}
