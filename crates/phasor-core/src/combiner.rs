use std::sync::Arc;

use ndarray::ArrayViewMutD;
use num_complex::Complex;
use num_traits::Float;
use rayon::prelude::*;
use tracing::debug;

use crate::bandpass::BandPassControlPoints;
use crate::config::{CombinerConfig, ParallelConfig};
use crate::error::{PhasorError, Result};
use crate::geometry::{derive_output_geometry, Geometry};
use crate::kernel::Kernel;
use crate::region::{carve_views_mut, region_view, validate_partition, Region, RegionSplitter};
use crate::spectrum::Spectrum;

/// Combines a fixed and a moving spectrum into a band-passed, normalized
/// cross-power spectrum.
///
/// The inverse transform of the result peaks at the translation aligning the
/// two spatial images. The combiner holds the band-pass configuration and
/// optional input slots; every evaluation reads the inputs and writes a fresh
/// output spectrum.
pub struct SpectrumCombiner<T> {
    config: CombinerConfig,
    generation: u64,
    fixed: Option<Arc<Spectrum<T>>>,
    moving: Option<Arc<Spectrum<T>>>,
}

impl<T> Default for SpectrumCombiner<T> {
    fn default() -> Self {
        Self {
            config: CombinerConfig::default(),
            generation: 0,
            fixed: None,
            moving: None,
        }
    }
}

impl<T> SpectrumCombiner<T>
where
    T: Float + Send + Sync,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CombinerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &CombinerConfig {
        &self.config
    }

    /// Counter bumped on every change that invalidates a previous output.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn band_pass_control_points(&self) -> BandPassControlPoints {
        self.config.band_pass
    }

    /// Replace the band-pass control points.
    ///
    /// On error the previous points stay active. Setting the current points
    /// again is a no-op.
    pub fn set_band_pass_control_points(&mut self, points: [f64; 4]) -> Result<()> {
        if self.config.band_pass.as_array() == points {
            return Ok(());
        }
        let points = BandPassControlPoints::from_array(points)?;
        self.config.band_pass = points;
        self.generation += 1;
        debug!(points = %points, "band-pass control points updated");
        Ok(())
    }

    pub fn set_parallel(&mut self, parallel: ParallelConfig) -> Result<()> {
        if parallel.max_pieces == Some(0) {
            return Err(PhasorError::InvalidConfiguration(
                "max_pieces must be at least 1".into(),
            ));
        }
        self.config.parallel = parallel;
        Ok(())
    }

    pub fn set_fixed(&mut self, fixed: Arc<Spectrum<T>>) {
        self.fixed = Some(fixed);
        self.generation += 1;
    }

    pub fn set_moving(&mut self, moving: Arc<Spectrum<T>>) {
        self.moving = Some(moving);
        self.generation += 1;
    }

    pub fn fixed(&self) -> Option<&Arc<Spectrum<T>>> {
        self.fixed.as_ref()
    }

    pub fn moving(&self) -> Option<&Arc<Spectrum<T>>> {
        self.moving.as_ref()
    }

    /// Exchange which input plays the fixed and the moving role.
    pub fn swap_roles(&mut self) {
        std::mem::swap(&mut self.fixed, &mut self.moving);
        self.generation += 1;
    }

    /// Combine the spectra held in the fixed and moving slots.
    pub fn update(&self) -> Result<Spectrum<T>> {
        let (Some(fixed), Some(moving)) = (&self.fixed, &self.moving) else {
            return Err(PhasorError::DimensionMismatch(format!(
                "both inputs are required (fixed: {}, moving: {})",
                presence(&self.fixed),
                presence(&self.moving)
            )));
        };
        self.combine(fixed, moving)
    }

    /// Combine two spectra using the configured splitter.
    pub fn combine(&self, fixed: &Spectrum<T>, moving: &Spectrum<T>) -> Result<Spectrum<T>> {
        let splitter = self.config.parallel.splitter.splitter();
        self.combine_with_splitter(fixed, moving, splitter.as_ref())
    }

    /// Combine two spectra, partitioning the output with `splitter` when it is
    /// large enough to be worth spreading across Rayon workers.
    pub fn combine_with_splitter(
        &self,
        fixed: &Spectrum<T>,
        moving: &Spectrum<T>,
        splitter: &dyn RegionSplitter,
    ) -> Result<Spectrum<T>> {
        let output_geometry = derive_output_geometry(&fixed.geometry(), &moving.geometry())?;
        let full = output_geometry.region();
        let kernel = Kernel::<T>::new(&output_geometry, &self.config.band_pass);

        // Both inputs must hold every output index before any work starts.
        let fixed_view = region_view(fixed.data.view(), &fixed.geometry().region(), &full)?;
        let moving_view = region_view(moving.data.view(), &moving.geometry().region(), &full)?;

        let mut output = Spectrum::zeros(&output_geometry)?;
        let total = output_geometry.num_samples();

        debug!(
            size = ?output_geometry.size,
            max_dist = ?kernel.max_dist().to_f64(),
            "computing correlation surface"
        );

        if total < self.config.parallel.threshold {
            kernel.evaluate_region(fixed_view, moving_view, &full, output.data.view_mut())?;
            return Ok(output);
        }

        let pieces = splitter.split(&full, self.config.parallel.pieces());
        validate_partition(&full, &pieces)?;
        debug!(
            splitter = splitter.name(),
            pieces = pieces.len(),
            "evaluating sub-regions in parallel"
        );

        // Each worker writes its own disjoint slice of the output buffer.
        let views = carve_views_mut(output.data.view_mut(), &full, pieces)?;
        views
            .into_par_iter()
            .try_for_each(|(region, out)| -> Result<()> {
                kernel.evaluate_region(
                    region_view(fixed_view.view(), &full, &region)?,
                    region_view(moving_view.view(), &full, &region)?,
                    &region,
                    out,
                )
            })?;

        Ok(output)
    }

    /// Evaluate one sub-region of the output into `out`.
    ///
    /// `output` is the geometry from [`derive_output_geometry`] for these
    /// inputs, and `out` must have exactly the shape of `region`. Any
    /// scheduler can drive disjoint regions through this concurrently.
    pub fn evaluate_region(
        &self,
        fixed: &Spectrum<T>,
        moving: &Spectrum<T>,
        output: &Geometry,
        region: &Region,
        out: ArrayViewMutD<'_, Complex<T>>,
    ) -> Result<()> {
        output.validate()?;
        for (name, ndim) in [
            ("fixed spectrum", fixed.ndim()),
            ("moving spectrum", moving.ndim()),
            ("region", region.ndim()),
        ] {
            if ndim != output.ndim() {
                return Err(PhasorError::DimensionMismatch(format!(
                    "{name} has {ndim} axes, output has {}",
                    output.ndim()
                )));
            }
        }
        let full = output.region();
        full.offset_of(region)?;
        let kernel = Kernel::<T>::new(output, &self.config.band_pass);
        kernel.evaluate_region(
            region_view(fixed.data.view(), &fixed.geometry().region(), region)?,
            region_view(moving.data.view(), &moving.geometry().region(), region)?,
            region,
            out,
        )
    }
}

fn presence<T>(slot: &Option<T>) -> &'static str {
    if slot.is_some() {
        "set"
    } else {
        "missing"
    }
}
