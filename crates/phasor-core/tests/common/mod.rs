#![allow(dead_code)]

use ndarray::{Array2, ArrayD, IxDyn};
use num_complex::Complex;
use phasor_core::config::{CombinerConfig, ParallelConfig};
use phasor_core::region::SplitterKind;
use phasor_core::Spectrum;
use rustfft::FftPlanner;

/// A spectrum of the given size filled with `(1, 0)`.
pub fn unit_spectrum(size: &[usize]) -> Spectrum<f64> {
    Spectrum::new(ArrayD::from_elem(IxDyn(size), Complex::new(1.0, 0.0)))
}

/// A deterministic spectrum with varying phase and magnitude per sample.
pub fn patterned_spectrum(size: &[usize], seed: u64) -> Spectrum<f64> {
    let data = ArrayD::from_shape_fn(IxDyn(size), |idx| {
        let mut h = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        for k in 0..size.len() {
            h = h.rotate_left(13) ^ (idx[k] as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            h = h.wrapping_mul(0x94D0_49BB_1331_11EB);
        }
        let re = ((h >> 11) % 1000) as f64 / 500.0 - 1.0;
        let im = ((h >> 31) % 1000) as f64 / 500.0 - 1.0;
        Complex::new(re, im)
    });
    Spectrum::new(data)
}

/// A config that always splits the output, regardless of its size.
pub fn parallel_config(splitter: SplitterKind, max_pieces: usize) -> CombinerConfig {
    CombinerConfig {
        parallel: ParallelConfig {
            threshold: 0,
            max_pieces: Some(max_pieces),
            splitter,
        },
        ..CombinerConfig::default()
    }
}

/// Smooth-ish test image with no symmetry, so no spectrum bin vanishes.
pub fn make_test_image(h: usize, w: usize) -> Array2<f64> {
    Array2::from_shape_fn((h, w), |(r, c)| {
        let x = r as f64 * 0.37 + c as f64 * 0.11;
        let y = r as f64 * 0.05 - c as f64 * 0.29;
        x.sin() + 0.5 * (2.0 * y).cos() + ((r * 7 + c * 13) % 11) as f64 / 11.0
    })
}

/// Circularly shift an image by `(dy, dx)`.
pub fn circular_shift(data: &Array2<f64>, dy: usize, dx: usize) -> Array2<f64> {
    let (h, w) = data.dim();
    Array2::from_shape_fn((h, w), |(r, c)| data[[(r + h - dy) % h, (c + w - dx) % w]])
}

/// Full complex 2D forward FFT (rows, then columns).
pub fn fft2d(data: &Array2<f64>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft_forward(w);
    let fft_col = planner.plan_fft_forward(h);

    let mut result = data.mapv(|v| Complex::new(v, 0.0));
    for row in 0..h {
        let mut row_data: Vec<Complex<f64>> = (0..w).map(|c| result[[row, c]]).collect();
        fft_row.process(&mut row_data);
        for col in 0..w {
            result[[row, col]] = row_data[col];
        }
    }
    for col in 0..w {
        let mut col_data: Vec<Complex<f64>> = (0..h).map(|r| result[[r, col]]).collect();
        fft_col.process(&mut col_data);
        for row in 0..h {
            result[[row, col]] = col_data[row];
        }
    }
    result
}

/// Real part of the inverse 2D FFT, normalized by `1/(h*w)`.
pub fn ifft2d_real(data: &Array2<Complex<f64>>) -> Array2<f64> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let ifft_row = planner.plan_fft_inverse(w);
    let ifft_col = planner.plan_fft_inverse(h);

    let mut work = data.clone();
    for col in 0..w {
        let mut col_data: Vec<Complex<f64>> = (0..h).map(|r| work[[r, col]]).collect();
        ifft_col.process(&mut col_data);
        for row in 0..h {
            work[[row, col]] = col_data[row];
        }
    }
    for row in 0..h {
        let mut row_data: Vec<Complex<f64>> = (0..w).map(|c| work[[row, c]]).collect();
        ifft_row.process(&mut row_data);
        for col in 0..w {
            work[[row, col]] = row_data[col];
        }
    }
    let scale = 1.0 / (h * w) as f64;
    work.mapv(|v| v.re * scale)
}

/// Row and column of the largest value.
pub fn argmax(data: &Array2<f64>) -> (usize, usize) {
    let mut best = (0, 0);
    let mut best_val = f64::NEG_INFINITY;
    for ((r, c), &v) in data.indexed_iter() {
        if v > best_val {
            best_val = v;
            best = (r, c);
        }
    }
    best
}
