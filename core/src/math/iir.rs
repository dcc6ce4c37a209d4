use crate::math::butterworth::BandpassDesign;
use crate::math::matrix::MatrixHelper;
use crate::prelude::{PipelineError, PipelineResult};
use ndarray::{Array1, Array2};

/// Direct-form-II-transposed IIR filter pass. `b` and `a` must be the same
/// length (the bandpass design guarantees this) and `zi` one shorter.
pub fn lfilter(b: &[f64], a: &[f64], x: &[f64], zi: &[f64]) -> Vec<f64> {
    let n = a.len().max(b.len());
    debug_assert_eq!(zi.len(), n - 1);
    let mut state = zi.to_vec();
    let mut y = Vec::with_capacity(x.len());
    for &xn in x {
        let yn = b[0] * xn + state[0];
        for i in 0..n - 2 {
            state[i] = b[i + 1] * xn + state[i + 1] - a[i + 1] * yn;
        }
        state[n - 2] = b[n - 1] * xn - a[n - 1] * yn;
        y.push(yn);
    }
    y
}

/// Steady-state initial filter conditions: the state vector that makes the
/// step response start settled. Solves `(I - A^T) zi = B` where `A` is the
/// companion matrix of `a`.
pub fn lfilter_zi(b: &[f64], a: &[f64]) -> PipelineResult<Vec<f64>> {
    let n = a.len().max(b.len());
    let m = n - 1;
    let mut system = Array2::<f64>::zeros((m, m));
    for i in 0..m {
        for j in 0..m {
            let companion_ji = if j == 0 {
                -a[i + 1] / a[0]
            } else if j == i + 1 {
                1.0
            } else {
                0.0
            };
            let identity = if i == j { 1.0 } else { 0.0 };
            system[[i, j]] = identity - companion_ji;
        }
    }
    let mut rhs = Array1::<f64>::zeros(m);
    for i in 0..m {
        rhs[i] = b[i + 1] - a[i + 1] * b[0];
    }
    MatrixHelper::solve(system, rhs)
        .map(|zi| zi.to_vec())
        .ok_or_else(|| {
            PipelineError::Internal("singular system while solving filter initial conditions".into())
        })
}

/// Zero-phase filtering: odd-reflection padding, a forward pass, a reversed
/// backward pass, then the padding is stripped. Cancels the phase delay a
/// single IIR pass would introduce.
pub fn filtfilt(design: &BandpassDesign, x: &[f64]) -> PipelineResult<Vec<f64>> {
    let pad = design.pad_len();
    if x.len() <= pad {
        return Err(PipelineError::InsufficientData(format!(
            "{} samples is too short for the zero-phase filter; at least {} are needed to settle",
            x.len(),
            pad + 1
        )));
    }
    let b = &design.b;
    let a = &design.a;
    let zi = lfilter_zi(b, a)?;

    let mut extended = Vec::with_capacity(x.len() + 2 * pad);
    let first = x[0];
    for i in (1..=pad).rev() {
        extended.push(2.0 * first - x[i]);
    }
    extended.extend_from_slice(x);
    let last = x[x.len() - 1];
    for i in 0..pad {
        extended.push(2.0 * last - x[x.len() - 2 - i]);
    }

    let scaled: Vec<f64> = zi.iter().map(|z| z * extended[0]).collect();
    let mut forward = lfilter(b, a, &extended, &scaled);
    forward.reverse();
    let scaled_back: Vec<f64> = zi.iter().map(|z| z * forward[0]).collect();
    let mut backward = lfilter(b, a, &forward, &scaled_back);
    backward.reverse();
    Ok(backward[pad..backward.len() - pad].to_vec())
}
