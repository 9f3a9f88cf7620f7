use serde::Serialize;

use super::error::{invalid, Result};
use super::features::{self, Aggregation};
use super::fft::{self, ComplexSpectrum};
use super::fingerprint::{self, HashAlgorithm};
use super::spectrum;
use super::window;

pub const DEFAULT_BLOCK_SIZE: usize = 2048;
pub const DEFAULT_BINS: usize = 64;

/// Parameters for one pipeline run. Passed explicitly to every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PipelineConfig {
    /// FFT block size N; must be a power of two.
    pub block_size: usize,
    /// Feature bin count B; at most N/2.
    pub bins: usize,
    pub window: bool,
    pub aggregation: Aggregation,
    pub hash: HashAlgorithm,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            bins: DEFAULT_BINS,
            window: true,
            aggregation: Aggregation::Average,
            hash: HashAlgorithm::Sha256,
        }
    }
}

impl PipelineConfig {
    /// Checks every size constraint before any samples are touched.
    pub fn validate(&self) -> Result<()> {
        let n = self.block_size;
        if n == 0 || !n.is_power_of_two() {
            return Err(invalid(format!("block size must be a power of two, got {}", n)));
        }
        if self.window && n < 2 {
            return Err(invalid("windowing needs a block of at least 2 samples"));
        }
        if self.bins == 0 {
            return Err(invalid("feature bin count must be positive"));
        }
        if self.bins > n / 2 {
            return Err(invalid(format!(
                "{} feature bins exceed the {} spectrum bins of a {}-sample block",
                self.bins,
                n / 2,
                n
            )));
        }
        Ok(())
    }
}

/// Everything one pipeline run produces.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analysis {
    /// Magnitude spectrum, N/2 bins, for display.
    pub spectrum: Vec<f64>,
    /// Aggregated features, B values.
    pub features: Vec<f64>,
    /// Hex digest of the features.
    pub fingerprint: String,
}

/// Runs the full chain on the first `block_size` samples of `samples`.
///
/// Inputs shorter than one block are rejected, not zero-padded. The
/// caller's buffer is only read; all work happens on a private copy.
pub fn analyze(samples: &[f32], config: &PipelineConfig) -> Result<Analysis> {
    config.validate()?;

    let n = config.block_size;
    if samples.len() < n {
        return Err(invalid(format!(
            "need {} samples for one block, got {}",
            n,
            samples.len()
        )));
    }

    let mut block: Vec<f64> = samples[..n].iter().map(|&s| s as f64).collect();
    if config.window {
        block = window::apply_hann(&block)?;
    }

    let transformed = fft::forward(ComplexSpectrum::from_real(block))?;
    let magnitudes = spectrum::magnitudes(&transformed);
    let features = features::extract(&magnitudes, config.bins, config.aggregation)?;
    let fingerprint = fingerprint::fingerprint(&features, config.hash);

    log::debug!(
        "Analyzed {}-sample block: {} spectrum bins, {} features ({}), window={}",
        n,
        magnitudes.len(),
        features.len(),
        config.aggregation,
        config.window
    );

    Ok(Analysis {
        spectrum: magnitudes,
        features,
        fingerprint,
    })
}
