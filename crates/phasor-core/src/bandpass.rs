use num_traits::{Float, NumCast};
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_BAND_PASS_POINTS;
use crate::error::{PhasorError, Result};

/// Four fractional radii `(c0, c1, c2, c3)` describing a trapezoidal pass-band.
///
/// Radii are fractions of the output's maximum radius. Frequencies below `c0`
/// and above `c3` are removed, `c1..=c2` pass unchanged, and the two ramps in
/// between are linear. Always satisfies `0 <= c0 < c1 < c2 < c3 <= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct BandPassControlPoints {
    points: [f64; 4],
}

impl BandPassControlPoints {
    pub fn new(c0: f64, c1: f64, c2: f64, c3: f64) -> Result<Self> {
        Self::from_array([c0, c1, c2, c3])
    }

    pub fn from_array(points: [f64; 4]) -> Result<Self> {
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(PhasorError::InvalidConfiguration(format!(
                "control point {i} must be finite, got {}",
                points[i]
            )));
        }
        if points[0] < 0.0 {
            return Err(PhasorError::InvalidConfiguration(
                "control point 0 must be greater than or equal to 0.0".into(),
            ));
        }
        if points[3] > 1.0 {
            return Err(PhasorError::InvalidConfiguration(
                "control point 3 must be less than or equal to 1.0".into(),
            ));
        }
        for i in 0..3 {
            if points[i] >= points[i + 1] {
                return Err(PhasorError::InvalidConfiguration(format!(
                    "control point {i} must be strictly less than control point {}",
                    i + 1
                )));
            }
        }
        Ok(Self { points })
    }

    pub fn as_array(&self) -> [f64; 4] {
        self.points
    }

    /// Scale the fractional radii to absolute radii for a given maximum radius.
    pub fn scaled<T: Float>(&self, max_dist: T) -> ScaledBandPass<T> {
        let [c0, c1, c2, c3] = self.points.map(|p| to_float::<T>(p) * max_dist);
        ScaledBandPass { c0, c1, c2, c3 }
    }
}

impl Default for BandPassControlPoints {
    fn default() -> Self {
        Self {
            points: DEFAULT_BAND_PASS_POINTS,
        }
    }
}

impl TryFrom<[f64; 4]> for BandPassControlPoints {
    type Error = PhasorError;

    fn try_from(points: [f64; 4]) -> Result<Self> {
        Self::from_array(points)
    }
}

impl From<BandPassControlPoints> for [f64; 4] {
    fn from(points: BandPassControlPoints) -> Self {
        points.points
    }
}

impl std::fmt::Display for BandPassControlPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [c0, c1, c2, c3] = self.points;
        write!(f, "({c0}, {c1}, {c2}, {c3})")
    }
}

/// Band-pass radii in absolute sample units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaledBandPass<T> {
    pub c0: T,
    pub c1: T,
    pub c2: T,
    pub c3: T,
}

impl<T: Float> ScaledBandPass<T> {
    /// Attenuation in `[0, 1]` at radius `r`.
    ///
    /// Ramps are half-open (`c0 <= r < c1`, `c2 < r <= c3`), the pass-band is
    /// closed (`c1 <= r <= c2`).
    #[inline]
    pub fn factor(&self, r: T) -> T {
        if r < self.c0 {
            T::zero()
        } else if r < self.c1 {
            (r - self.c0) / (self.c1 - self.c0)
        } else if r <= self.c2 {
            T::one()
        } else if r <= self.c3 {
            (self.c3 - r) / (self.c3 - self.c2)
        } else {
            T::zero()
        }
    }
}

/// Reference radius the control points are scaled by.
///
/// Axis 0 is stored at half length, so it counts in full while the wrapped
/// axes count at a quarter of their squared extent.
pub fn max_radius<T: Float>(size: &[usize]) -> T {
    let four = to_float::<T>(4.0);
    let mut sum = T::zero();
    for (k, &s) in size.iter().enumerate() {
        let s = to_float::<T>(s as f64);
        sum = if k == 0 { sum + s * s } else { sum + s * s / four };
    }
    sum.sqrt()
}

#[inline]
pub(crate) fn to_float<T: Float>(v: f64) -> T {
    <T as NumCast>::from(v).unwrap_or_else(T::nan)
}
