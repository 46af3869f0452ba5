//! Test data generators for synthetic geomagnetic model series.
//!
//! Values follow simple closed-form patterns so expected means and
//! dispersions can be written down by hand.

use ndarray::{array, Array1, Array2, Array3};

/// Epochs `start, start + step, ...` in decimal years.
pub fn decimal_years(n: usize, start: f64, step: f64) -> Array1<f64> {
    Array1::from_iter((0..n).map(|i| start + i as f64 * step))
}

/// A `(times, coeffs)` series where each cell holds
/// `base + t * coeffs + c`.
///
/// # Example
///
/// ```
/// use test_utils::create_series;
///
/// let series = create_series(3, 4, 100.0);
/// assert_eq!(series.shape(), &[3, 4]);
/// assert_eq!(series[[0, 0]], 100.0);
/// assert_eq!(series[[1, 2]], 106.0); // 100 + 1 * 4 + 2
/// ```
pub fn create_series(times: usize, coeffs: usize, base: f64) -> Array2<f64> {
    Array2::from_shape_fn((times, coeffs), |(t, c)| base + (t * coeffs + c) as f64)
}

/// A `(realizations, times, coeffs)` ensemble where realization `r` is
/// [`create_series`] shifted by `r`.
///
/// The mean over realizations is `create_series(..) + (R - 1) / 2` and the
/// population standard deviation is the same everywhere; see
/// [`ensemble_std`].
pub fn create_ensemble(realizations: usize, times: usize, coeffs: usize, base: f64) -> Array3<f64> {
    Array3::from_shape_fn((realizations, times, coeffs), |(r, t, c)| {
        base + (t * coeffs + c) as f64 + r as f64
    })
}

/// Expected mean of [`create_ensemble`].
pub fn ensemble_mean(realizations: usize, times: usize, coeffs: usize, base: f64) -> Array2<f64> {
    let shift = realizations.saturating_sub(1) as f64 / 2.0;
    create_series(times, coeffs, base + shift)
}

/// Population standard deviation of `0, 1, ..., R - 1`, which is the
/// dispersion of every cell of [`create_ensemble`].
pub fn ensemble_std(realizations: usize) -> f64 {
    let n = realizations as f64;
    ((n * n - 1.0) / 12.0).sqrt()
}

/// Three realizations of four coefficients with hand-computed statistics,
/// returned as `(samples, mean, population_std)`.
pub fn known_ensemble_3x4() -> (Array2<f64>, Array1<f64>, Array1<f64>) {
    let samples = array![
        [1.0, -2.0, 0.5, 10.0],
        [3.0, -2.0, 1.5, 20.0],
        [5.0, -2.0, 4.0, 60.0],
    ];
    let mean = array![3.0, -2.0, 2.0, 30.0];
    // Squared deviations summed over realizations, divided by 3.
    let std = array![
        (8.0f64 / 3.0).sqrt(),
        0.0,
        (6.5f64 / 3.0).sqrt(),
        (1400.0f64 / 3.0).sqrt(),
    ];
    (samples, mean, std)
}
