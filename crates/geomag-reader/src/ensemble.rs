//! Reduction of stochastic ensembles to a mean and a dispersion.
//!
//! Ensemble datasets store independent realizations along axis 0. Reducing
//! collapses that axis into a mean and a population standard deviation
//! (divisor N), matching how the ensembles were produced. A single
//! realization has zero dispersion; an empty ensemble yields NaN for both.

use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn, Zip};

/// Mean and standard deviation of an ensemble, over its realization axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Ensemble {
    pub mean: ArrayD<f64>,
    pub std: ArrayD<f64>,
    /// Number of realizations reduced.
    pub realizations: usize,
}

/// Collapse axis 0 of `samples`.
///
/// Uses Welford's single-pass update so large ensembles of similar values
/// do not lose precision to cancellation. Returns `None` for a 0-d array,
/// which has no realization axis.
pub fn reduce(samples: ArrayViewD<'_, f64>) -> Option<Ensemble> {
    if samples.ndim() == 0 {
        return None;
    }

    let realizations = samples.len_of(Axis(0));
    let shape = IxDyn(&samples.shape()[1..]);
    let mut mean = ArrayD::<f64>::zeros(shape.clone());
    let mut m2 = ArrayD::<f64>::zeros(shape);

    for (i, sample) in samples.axis_iter(Axis(0)).enumerate() {
        let count = (i + 1) as f64;
        Zip::from(&mut mean)
            .and(&mut m2)
            .and(&sample)
            .for_each(|mean, m2, &x| {
                let delta = x - *mean;
                *mean += delta / count;
                *m2 += delta * (x - *mean);
            });
    }

    let std = if realizations == 0 {
        mean.fill(f64::NAN);
        m2.mapv(|_| f64::NAN)
    } else {
        let n = realizations as f64;
        m2.mapv(|s| (s / n).sqrt())
    };

    Some(Ensemble {
        mean,
        std,
        realizations,
    })
}
