use super::error::{invalid, Result};

/// Hann coefficients `0.5 * (1 - cos(2πi / (size - 1)))`.
///
/// The denominator is `size - 1`, so both ends are exactly zero. Sizes
/// below 2 have no defined window.
pub fn hann_window(size: usize) -> Result<Vec<f64>> {
    if size < 2 {
        return Err(invalid(format!(
            "Hann window needs at least 2 samples, got {}",
            size
        )));
    }
    let denom = (size - 1) as f64;
    Ok((0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / denom).cos()))
        .collect())
}

/// Returns a windowed copy of `block`; the input is left untouched.
pub fn apply_hann(block: &[f64]) -> Result<Vec<f64>> {
    let hann = hann_window(block.len())?;
    Ok(block.iter().zip(hann.iter()).map(|(s, w)| s * w).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blocks_shorter_than_two() {
        assert!(matches!(apply_hann(&[]), Err(crate::AnalysisError::InvalidInput(_))));
        assert!(matches!(apply_hann(&[1.0]), Err(crate::AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn all_ones_block_forms_symmetric_bump() {
        let n = 2048;
        let windowed = apply_hann(&vec![1.0; n]).unwrap();

        assert_eq!(windowed.len(), n);
        assert!(windowed[0].abs() < 1e-12);
        assert!(windowed[n - 1].abs() < 1e-12);
        assert!((windowed[n / 2] - 1.0).abs() < 1e-5);
        for i in 0..n / 2 {
            assert!((windowed[i] - windowed[n - 1 - i]).abs() < 1e-12, "asymmetric at {}", i);
        }
    }

    #[test]
    fn matches_formula_at_every_index() {
        let n = 16;
        let block: Vec<f64> = (0..n).map(|i| i as f64 - 7.5).collect();
        let windowed = apply_hann(&block).unwrap();
        for (i, (&w, &s)) in windowed.iter().zip(block.iter()).enumerate() {
            let coeff = 0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / 15.0).cos());
            assert!((w - s * coeff).abs() < 1e-12);
        }
    }

    #[test]
    fn two_sample_window_zeroes_both_ends() {
        let w = hann_window(2).unwrap();
        assert_eq!(w.len(), 2);
        assert!(w.iter().all(|c| c.abs() < 1e-12));
    }
}
