mod common;

use std::f64::consts::TAU;

use approx::assert_abs_diff_eq;
use ndarray::{s, Array2};
use num_complex::Complex;
use phasor_core::{Spectrum, SpectrumCombiner};

use common::{argmax, circular_shift, fft2d, ifft2d_real, make_test_image, unit_spectrum};

fn spectrum_2d(data: Array2<Complex<f64>>) -> Spectrum<f64> {
    Spectrum::new(data.into_dyn())
}

#[test]
fn test_half_spectrum_phase_encodes_shift() {
    let (h, w) = (32usize, 24usize);
    let (dy, dx) = (3usize, 5usize);
    let reference = make_test_image(h, w);
    let target = circular_shift(&reference, dy, dx);

    // Keep rows 0..=h/2 along axis 0, as a real-input transform would.
    let half = h / 2 + 1;
    let fixed = fft2d(&reference).slice(s![..half, ..]).to_owned();
    let moving = fft2d(&target).slice(s![..half, ..]).to_owned();
    let fixed = spectrum_2d(fixed).with_actual_real_size(h);
    let moving = spectrum_2d(moving).with_actual_real_size(h);

    let combiner = SpectrumCombiner::<f64>::new();
    let out = combiner.combine(&fixed, &moving).unwrap();
    let mask = combiner
        .combine(&unit_spectrum(&[half, w]), &unit_spectrum(&[half, w]))
        .unwrap();
    assert_eq!(out.actual_real_size(), Some(h));

    let mut checked = 0;
    for k0 in 0..half {
        for k1 in 0..w {
            if fixed.data[[k0, k1]].norm_sqr() < 1e-6 {
                continue;
            }
            let factor = mask.data[[k0, k1]].re;
            let phase = TAU * (k0 * dy) as f64 / h as f64 + TAU * (k1 * dx) as f64 / w as f64;
            let expected = Complex::from_polar(factor, phase);
            let got = out.data[[k0, k1]];
            assert_abs_diff_eq!(got.re, expected.re, epsilon = 1e-6);
            assert_abs_diff_eq!(got.im, expected.im, epsilon = 1e-6);
            if factor > 0.0 {
                checked += 1;
            }
        }
    }
    assert!(checked > half * w / 4, "only {checked} bins in the pass-band");
}

#[test]
fn test_correlation_surface_peaks_at_shift() {
    let n = 32usize;
    let (dy, dx) = (6usize, 3usize);
    let reference = make_test_image(n, n);
    let target = circular_shift(&reference, dy, dx);

    let fixed = spectrum_2d(fft2d(&reference));
    let moving = spectrum_2d(fft2d(&target));
    let out = SpectrumCombiner::<f64>::new()
        .combine(&fixed, &moving)
        .unwrap();

    let surface = ifft2d_real(
        &out.data
            .into_dimensionality::<ndarray::Ix2>()
            .unwrap(),
    );
    // F * conj(M) peaks at the negated shift.
    let (row, col) = argmax(&surface);
    assert_eq!((row, col), ((n - dy) % n, (n - dx) % n));
}

#[test]
fn test_identical_images_peak_at_origin() {
    let reference = make_test_image(16, 16);
    let spectrum = spectrum_2d(fft2d(&reference));
    let out = SpectrumCombiner::<f64>::new()
        .combine(&spectrum, &spectrum)
        .unwrap();

    let surface = ifft2d_real(&out.data.into_dimensionality::<ndarray::Ix2>().unwrap());
    assert_eq!(argmax(&surface), (0, 0));
}
