use crate::prelude::{PipelineError, PipelineResult};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Digital bandpass transfer-function coefficients with `a[0]` normalized to 1.
#[derive(Debug, Clone)]
pub struct BandpassDesign {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}

impl BandpassDesign {
    /// Reflection padding applied on each side by the zero-phase filter.
    pub fn pad_len(&self) -> usize {
        3 * self.a.len().max(self.b.len())
    }
}

/// Designs an order-`order` Butterworth bandpass filter via the bilinear
/// transform, reproducing the coefficients the classifier was trained
/// against: analog prototype poles, frequency pre-warp, lowpass-to-bandpass
/// pole transform, bilinear mapping, polynomial expansion.
pub fn butter_bandpass(
    order: usize,
    low_hz: f64,
    high_hz: f64,
    fs_hz: f64,
) -> PipelineResult<BandpassDesign> {
    if order == 0 {
        return Err(PipelineError::FilterDesign(
            "filter order must be at least 1".into(),
        ));
    }
    if !fs_hz.is_finite() || fs_hz <= 0.0 {
        return Err(PipelineError::FilterDesign(format!(
            "sampling rate {} Hz is not a positive frequency",
            fs_hz
        )));
    }
    let nyquist = fs_hz / 2.0;
    if !(low_hz > 0.0 && high_hz > low_hz) {
        return Err(PipelineError::FilterDesign(format!(
            "corner frequencies {}-{} Hz must satisfy 0 < low < high",
            low_hz, high_hz
        )));
    }
    if high_hz >= nyquist {
        return Err(PipelineError::FilterDesign(format!(
            "upper corner {} Hz must stay below the Nyquist frequency {} Hz",
            high_hz, nyquist
        )));
    }

    // Pre-warp the normalized corners for the bilinear transform (design
    // sampling rate fixed at 2, matching the classic formulation).
    let warped_low = 4.0 * (PI * (low_hz / nyquist) / 2.0).tan();
    let warped_high = 4.0 * (PI * (high_hz / nyquist) / 2.0).tan();
    let bandwidth = warped_high - warped_low;
    let center_sq = warped_low * warped_high;

    // Analog lowpass prototype: poles evenly spaced on the left unit
    // semicircle, no finite zeros, unit gain.
    let n = order as i32;
    let mut prototype = Vec::with_capacity(order);
    for k in 0..n {
        let theta = PI * f64::from(2 * k + n + 1) / f64::from(2 * n);
        prototype.push(Complex64::from_polar(1.0, theta));
    }

    // Lowpass-to-bandpass: each prototype pole splits into a conjugate pair
    // around the warped center frequency.
    let mut analog_poles = Vec::with_capacity(2 * order);
    for &pole in &prototype {
        let scaled = pole * (bandwidth / 2.0);
        let offset = (scaled * scaled - Complex64::new(center_sq, 0.0)).sqrt();
        analog_poles.push(scaled + offset);
    }
    for &pole in &prototype {
        let scaled = pole * (bandwidth / 2.0);
        let offset = (scaled * scaled - Complex64::new(center_sq, 0.0)).sqrt();
        analog_poles.push(scaled - offset);
    }

    // Bilinear transform at twice the design rate. The `order` analog zeros
    // at the origin map to z = 1; degree padding adds `order` zeros at z = -1.
    let fs2 = Complex64::new(4.0, 0.0);
    let digital_poles: Vec<Complex64> = analog_poles.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();
    let mut digital_zeros = vec![Complex64::new(1.0, 0.0); order];
    digital_zeros.extend(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(order));

    let mut numerator = Complex64::new(1.0, 0.0);
    for _ in 0..order {
        numerator *= fs2;
    }
    let mut denominator = Complex64::new(1.0, 0.0);
    for &pole in &analog_poles {
        denominator *= fs2 - pole;
    }
    let gain = bandwidth.powi(n) * (numerator / denominator).re;

    let b = expand_roots(&digital_zeros)
        .iter()
        .map(|c| gain * c.re)
        .collect();
    let a = expand_roots(&digital_poles).iter().map(|c| c.re).collect();

    Ok(BandpassDesign { b, a })
}

/// Expands `(z - r_0)(z - r_1)...` into monic polynomial coefficients.
fn expand_roots(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * root;
        }
        coeffs = next;
    }
    coeffs
}
