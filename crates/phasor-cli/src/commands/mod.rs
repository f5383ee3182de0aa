pub mod config;
pub mod geometry;
pub mod mask;
pub mod profile;

use std::str::FromStr;

use anyhow::{Context, Result};
use phasor_core::bandpass::BandPassControlPoints;

/// Parse a comma-separated list such as `64,64` or `0.05,0.1,0.5,0.9`.
pub fn parse_list<V>(text: &str, what: &str) -> Result<Vec<V>>
where
    V: FromStr,
    V::Err: std::error::Error + Send + Sync + 'static,
{
    text.split(',')
        .map(|s| s.trim().parse::<V>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid {what} format: '{text}'"))
}

/// Parse four comma-separated band-pass control points.
pub fn parse_points(text: &str) -> Result<BandPassControlPoints> {
    let values: Vec<f64> = parse_list(text, "control point")?;
    let points: [f64; 4] = values
        .try_into()
        .map_err(|v: Vec<f64>| anyhow::anyhow!("Expected 4 control points, got {}", v.len()))?;
    Ok(BandPassControlPoints::from_array(points)?)
}
