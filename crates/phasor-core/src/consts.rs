/// Minimum output sample count to split evaluation across Rayon workers.
pub const PARALLEL_SAMPLE_THRESHOLD: usize = 65_536;

/// Default band-pass control points as fractions of the maximum radius.
pub const DEFAULT_BAND_PASS_POINTS: [f64; 4] = [0.05, 0.1, 0.5, 0.9];

/// Index of the half-spectrum axis. This axis is never folded.
pub const HALF_SPECTRUM_AXIS: usize = 0;
