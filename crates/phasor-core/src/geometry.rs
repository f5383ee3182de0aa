use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PhasorError, Result};
use crate::region::Region;

/// Size, spacing and start index of a (possibly cropped) spectrum.
///
/// All three vectors share one length, the dimensionality. Axis 0 is the
/// half-spectrum axis of a real-input transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub size: Vec<usize>,
    pub spacing: Vec<f64>,
    pub start_index: Vec<i64>,
    /// Un-padded spatial extent the transform was computed from, if known.
    #[serde(default)]
    pub actual_real_size: Option<usize>,
}

impl Geometry {
    pub fn new(size: Vec<usize>, spacing: Vec<f64>, start_index: Vec<i64>) -> Result<Self> {
        let geometry = Self {
            size,
            spacing,
            start_index,
            actual_real_size: None,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Unit spacing and a zero start index.
    pub fn from_size(size: Vec<usize>) -> Result<Self> {
        let n = size.len();
        Self::new(size, vec![1.0; n], vec![0; n])
    }

    pub fn with_actual_real_size(mut self, actual_real_size: Option<usize>) -> Self {
        self.actual_real_size = actual_real_size;
        self
    }

    pub fn ndim(&self) -> usize {
        self.size.len()
    }

    pub fn num_samples(&self) -> usize {
        self.size.iter().product()
    }

    /// The full region spanned by this geometry.
    pub fn region(&self) -> Region {
        Region::new(self.start_index.clone(), self.size.clone())
    }

    pub fn validate(&self) -> Result<()> {
        let n = self.size.len();
        if self.spacing.len() != n || self.start_index.len() != n {
            return Err(PhasorError::DimensionMismatch(format!(
                "size has {} axes, spacing {}, start index {}",
                n,
                self.spacing.len(),
                self.start_index.len()
            )));
        }
        if n == 0 {
            return Err(PhasorError::InvalidGeometry(
                "geometry must have at least one axis".into(),
            ));
        }
        if let Some(axis) = self.size.iter().position(|&s| s == 0) {
            return Err(PhasorError::InvalidGeometry(format!(
                "size along axis {axis} is zero"
            )));
        }
        if let Some(axis) = self
            .spacing
            .iter()
            .position(|&s| !s.is_finite() || s <= 0.0)
        {
            return Err(PhasorError::InvalidGeometry(format!(
                "spacing along axis {axis} must be finite and positive, got {}",
                self.spacing[axis]
            )));
        }
        for (axis, (&start, &size)) in self.start_index.iter().zip(&self.size).enumerate() {
            let end = i64::try_from(size).ok().and_then(|s| start.checked_add(s));
            if end.is_none() {
                return Err(PhasorError::InvalidGeometry(format!(
                    "start index {start} plus size {size} overflows along axis {axis}"
                )));
            }
        }
        Ok(())
    }
}

/// Derive the output geometry of a fixed/moving spectrum pair.
///
/// The output takes the smaller size and the coarser spacing on every axis,
/// and sits at the fixed spectrum's start index. `actual_real_size` survives
/// only when both inputs carry it, as the smaller of the two.
pub fn derive_output_geometry(fixed: &Geometry, moving: &Geometry) -> Result<Geometry> {
    if fixed.ndim() != moving.ndim() {
        return Err(PhasorError::DimensionMismatch(format!(
            "fixed spectrum has {} axes, moving spectrum has {}",
            fixed.ndim(),
            moving.ndim()
        )));
    }
    fixed.validate()?;
    moving.validate()?;

    debug!("adjusting size of output spectrum");

    let spacing = fixed
        .spacing
        .iter()
        .zip(&moving.spacing)
        .map(|(&f, &m)| f.max(m))
        .collect();
    let size = fixed
        .size
        .iter()
        .zip(&moving.size)
        .map(|(&f, &m)| f.min(m))
        .collect();

    let actual_real_size = match (fixed.actual_real_size, moving.actual_real_size) {
        (Some(f), Some(m)) => Some(f.min(m)),
        _ => None,
    };

    Ok(Geometry {
        size,
        spacing,
        start_index: fixed.start_index.clone(),
        actual_real_size,
    })
}
