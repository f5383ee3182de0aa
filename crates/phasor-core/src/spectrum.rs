use ndarray::{ArrayD, IxDyn};
use num_complex::Complex;
use num_traits::Float;

use crate::error::{PhasorError, Result};
use crate::geometry::Geometry;

/// An N-dimensional array of complex frequency samples with its geometry.
///
/// The size is always the shape of `data`. Axis 0 holds the half-spectrum of
/// a real-input transform; the remaining axes are full and periodic with DC
/// at their first sample.
#[derive(Clone, Debug)]
pub struct Spectrum<T> {
    pub data: ArrayD<Complex<T>>,
    spacing: Vec<f64>,
    start_index: Vec<i64>,
    actual_real_size: Option<usize>,
}

impl<T: Float> Spectrum<T> {
    /// Wrap `data` with unit spacing, a zero start index and no metadata.
    pub fn new(data: ArrayD<Complex<T>>) -> Self {
        let n = data.ndim();
        Self {
            data,
            spacing: vec![1.0; n],
            start_index: vec![0; n],
            actual_real_size: None,
        }
    }

    /// An all-zero spectrum laid out according to `geometry`.
    pub fn zeros(geometry: &Geometry) -> Result<Self> {
        geometry.validate()?;
        let data = ArrayD::from_elem(IxDyn(&geometry.size), Complex::new(T::zero(), T::zero()));
        Ok(Self {
            data,
            spacing: geometry.spacing.clone(),
            start_index: geometry.start_index.clone(),
            actual_real_size: geometry.actual_real_size,
        })
    }

    pub fn with_spacing(mut self, spacing: Vec<f64>) -> Result<Self> {
        self.check_axes("spacing", spacing.len())?;
        self.spacing = spacing;
        self.geometry().validate()?;
        Ok(self)
    }

    pub fn with_start_index(mut self, start_index: Vec<i64>) -> Result<Self> {
        self.check_axes("start index", start_index.len())?;
        self.start_index = start_index;
        Ok(self)
    }

    pub fn with_actual_real_size(mut self, actual_real_size: usize) -> Self {
        self.actual_real_size = Some(actual_real_size);
        self
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn size(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }

    pub fn start_index(&self) -> &[i64] {
        &self.start_index
    }

    pub fn actual_real_size(&self) -> Option<usize> {
        self.actual_real_size
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            size: self.size().to_vec(),
            spacing: self.spacing.clone(),
            start_index: self.start_index.clone(),
            actual_real_size: self.actual_real_size,
        }
    }

    /// Sample at an absolute index, or `None` outside the spectrum.
    pub fn sample(&self, index: &[i64]) -> Option<Complex<T>> {
        if index.len() != self.ndim() {
            return None;
        }
        let mut local = Vec::with_capacity(index.len());
        for (k, (&i, &start)) in index.iter().zip(&self.start_index).enumerate() {
            let offset = i - start;
            if offset < 0 || offset as usize >= self.size()[k] {
                return None;
            }
            local.push(offset as usize);
        }
        self.data.get(IxDyn(&local)).copied()
    }

    fn check_axes(&self, what: &str, len: usize) -> Result<()> {
        if len != self.ndim() {
            return Err(PhasorError::DimensionMismatch(format!(
                "{what} has {len} axes, spectrum has {}",
                self.ndim()
            )));
        }
        Ok(())
    }
}
