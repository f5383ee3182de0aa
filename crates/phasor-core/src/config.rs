use serde::{Deserialize, Serialize};

use crate::bandpass::BandPassControlPoints;
use crate::consts::PARALLEL_SAMPLE_THRESHOLD;
use crate::error::{PhasorError, Result};
use crate::region::SplitterKind;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinerConfig {
    #[serde(default)]
    pub band_pass: BandPassControlPoints,
    #[serde(default)]
    pub parallel: ParallelConfig,
}

impl CombinerConfig {
    /// Check settings that deserialization alone cannot enforce.
    pub fn validate(&self) -> Result<()> {
        if self.parallel.max_pieces == Some(0) {
            return Err(PhasorError::InvalidConfiguration(
                "max_pieces must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Minimum output sample count to evaluate sub-regions on Rayon workers.
    #[serde(default = "default_threshold")]
    pub threshold: usize,
    /// Upper bound on sub-regions per evaluation. Defaults to the Rayon
    /// thread count.
    #[serde(default)]
    pub max_pieces: Option<usize>,
    #[serde(default)]
    pub splitter: SplitterKind,
}

fn default_threshold() -> usize {
    PARALLEL_SAMPLE_THRESHOLD
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            threshold: PARALLEL_SAMPLE_THRESHOLD,
            max_pieces: None,
            splitter: SplitterKind::default(),
        }
    }
}

impl ParallelConfig {
    pub fn pieces(&self) -> usize {
        self.max_pieces
            .unwrap_or_else(rayon::current_num_threads)
            .max(1)
    }
}
