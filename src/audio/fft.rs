//! In-place radix-2 decimation-in-time FFT.
//!
//! The transform takes its buffers by value and hands them back, so a
//! caller that still needs the time-domain data has to clone it first.

use std::f64::consts::PI;

use super::error::{invalid, Result};

/// Real and imaginary parts of a block, kept as two parallel arrays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComplexSpectrum {
    pub re: Vec<f64>,
    pub im: Vec<f64>,
}

impl ComplexSpectrum {
    /// Wraps a real signal with a zeroed imaginary part.
    pub fn from_real(re: Vec<f64>) -> Self {
        let im = vec![0.0; re.len()];
        Self { re, im }
    }

    pub fn len(&self) -> usize {
        self.re.len()
    }

    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }
}

/// Forward DFT of `spectrum`, computed in place on its own buffers.
pub fn forward(mut spectrum: ComplexSpectrum) -> Result<ComplexSpectrum> {
    let n = spectrum.re.len();
    if spectrum.im.len() != n {
        return Err(invalid(format!(
            "real/imaginary length mismatch: {} vs {}",
            n,
            spectrum.im.len()
        )));
    }
    if n == 0 || !n.is_power_of_two() {
        return Err(invalid(format!("FFT length must be a power of two, got {}", n)));
    }

    bit_reverse_permute(&mut spectrum.re, &mut spectrum.im);
    combine_stages(&mut spectrum.re, &mut spectrum.im);
    Ok(spectrum)
}

/// Reorders both arrays into bit-reversed index order.
///
/// `j` tracks the mirror of `i` without a lookup table: adding one to a
/// reversed index is a carry that runs from the top bit downwards.
fn bit_reverse_permute(re: &mut [f64], im: &mut [f64]) {
    let n = re.len();
    let mut j = 0usize;
    for i in 0..n.saturating_sub(1) {
        if i < j {
            re.swap(i, j);
            im.swap(i, j);
        }
        let mut m = n >> 1;
        while m > 0 && j >= m {
            j -= m;
            m >>= 1;
        }
        j += m;
    }
}

/// Danielson–Lanczos butterflies for stage sizes 2, 4, ..., n.
fn combine_stages(re: &mut [f64], im: &mut [f64]) {
    let n = re.len();
    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let stride = n / size;
        for start in (0..n).step_by(size) {
            for k in 0..half {
                let angle = -2.0 * PI * (k * stride) as f64 / n as f64;
                let (w_im, w_re) = angle.sin_cos();

                let upper = start + k;
                let lower = upper + half;

                let b_re = re[lower] * w_re - im[lower] * w_im;
                let b_im = re[lower] * w_im + im[lower] * w_re;
                let a_re = re[upper];
                let a_im = im[upper];

                re[upper] = a_re + b_re;
                im[upper] = a_im + b_im;
                re[lower] = a_re - b_re;
                im[lower] = a_im - b_im;
            }
        }
        size <<= 1;
    }
}
