pub mod bandpass;
pub mod combiner;
pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod region;
pub mod spectrum;

pub use combiner::SpectrumCombiner;
pub use error::{PhasorError, Result};
pub use geometry::{derive_output_geometry, Geometry};
pub use spectrum::Spectrum;
