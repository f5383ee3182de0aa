use ndarray::{ArrayViewD, ArrayViewMutD};
use num_complex::Complex;
use num_traits::Float;

use crate::bandpass::{max_radius, to_float, BandPassControlPoints, ScaledBandPass};
use crate::consts::HALF_SPECTRUM_AXIS;
use crate::error::{PhasorError, Result};
use crate::geometry::Geometry;
use crate::region::Region;

/// Fold an index offset on a periodic axis onto its distance from DC.
///
/// Offsets at or above the Nyquist midpoint `size / 2` mirror back towards
/// zero, so `raw` and `size - raw` give the same distance.
#[inline]
pub fn folded_offset(raw: i64, size: usize) -> i64 {
    if raw >= (size / 2) as i64 {
        size as i64 - raw
    } else {
        raw
    }
}

/// Squared distance of `index` from the DC sample at `start`.
///
/// Axis 0 is the half-spectrum axis and is not folded.
#[inline]
fn folded_distance_sq(index: impl Fn(usize) -> i64, size: &[usize], start: &[i64]) -> i64 {
    let mut dist = 0i64;
    for k in 0..size.len() {
        let raw = index(k) - start[k];
        let d = if k == HALF_SPECTRUM_AXIS {
            raw
        } else {
            folded_offset(raw, size[k])
        };
        dist += d * d;
    }
    dist
}

/// Band-passed, magnitude-normalized cross-power term `F * conj(M)`.
///
/// Returns exactly zero when the cross term has zero magnitude.
#[inline]
pub fn cross_power<T: Float>(f: Complex<T>, m: Complex<T>, factor: T) -> Complex<T> {
    let real = f.re * m.re + f.im * m.im;
    let imag = f.im * m.re - f.re * m.im;
    let magn = (real * real + imag * imag).sqrt();
    if magn != T::zero() {
        Complex::new(factor * real / magn, factor * imag / magn)
    } else {
        Complex::new(T::zero(), T::zero())
    }
}

/// Everything the per-sample kernel needs, derived once per evaluation from
/// the full output geometry.
#[derive(Clone, Debug)]
pub struct Kernel<T> {
    size: Vec<usize>,
    start: Vec<i64>,
    max_dist: T,
    band: ScaledBandPass<T>,
}

impl<T: Float> Kernel<T> {
    pub fn new(output: &Geometry, points: &BandPassControlPoints) -> Self {
        let max_dist = max_radius::<T>(&output.size);
        Self {
            size: output.size.clone(),
            start: output.start_index.clone(),
            max_dist,
            band: points.scaled(max_dist),
        }
    }

    pub fn max_dist(&self) -> T {
        self.max_dist
    }

    pub fn band(&self) -> &ScaledBandPass<T> {
        &self.band
    }

    /// Radial distance of an absolute index from DC, or `None` if `index`
    /// does not have one entry per axis.
    pub fn radius(&self, index: &[i64]) -> Option<T> {
        if index.len() != self.size.len() {
            return None;
        }
        let dist = folded_distance_sq(|k| index[k], &self.size, &self.start);
        Some(to_float::<T>(dist as f64).sqrt())
    }

    /// Output sample at an absolute index from the co-located inputs.
    #[inline]
    pub fn evaluate(&self, index: &[i64], f: Complex<T>, m: Complex<T>) -> Option<Complex<T>> {
        let r = self.radius(index)?;
        Some(cross_power(f, m, self.band.factor(r)))
    }

    /// Evaluate every sample of `region`.
    ///
    /// `fixed`, `moving` and `out` must all be views of exactly the region's
    /// shape, positioned at the region's absolute index.
    pub fn evaluate_region(
        &self,
        fixed: ArrayViewD<'_, Complex<T>>,
        moving: ArrayViewD<'_, Complex<T>>,
        region: &Region,
        mut out: ArrayViewMutD<'_, Complex<T>>,
    ) -> Result<()> {
        if region.ndim() != self.size.len() {
            return Err(PhasorError::DimensionMismatch(format!(
                "region has {} axes, output has {}",
                region.ndim(),
                self.size.len()
            )));
        }
        for (name, shape) in [
            ("fixed", fixed.shape()),
            ("moving", moving.shape()),
            ("output", out.shape()),
        ] {
            if shape != region.size.as_slice() {
                return Err(PhasorError::DimensionMismatch(format!(
                    "{name} view has shape {:?}, region has {:?}",
                    shape, region.size
                )));
            }
        }

        // All three views share one shape, so their logical orders line up.
        let samples = out.indexed_iter_mut().zip(fixed.iter()).zip(moving.iter());
        for (((idx, o), &f), &m) in samples {
            let dist = folded_distance_sq(
                |k| region.index[k] + idx[k] as i64,
                &self.size,
                &self.start,
            );
            let r = to_float::<T>(dist as f64).sqrt();
            *o = cross_power(f, m, self.band.factor(r));
        }
        Ok(())
    }
}
