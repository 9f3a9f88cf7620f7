use serde::Deserialize;
use std::path::Path;

use crate::audio::error::Result;
use crate::audio::pipeline::{PipelineConfig, DEFAULT_BINS, DEFAULT_BLOCK_SIZE};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    #[serde(default = "default_bins")]
    pub bins: usize,
    #[serde(default = "default_window")]
    pub window: bool,
    #[serde(default = "default_aggregation")]
    pub aggregation: String,
    #[serde(default = "default_hash")]
    pub hash: String,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_waveform_columns")]
    pub waveform_columns: usize,
    #[serde(default)]
    pub spectrum: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            bins: default_bins(),
            window: default_window(),
            aggregation: default_aggregation(),
            hash: default_hash(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            waveform_columns: default_waveform_columns(),
            spectrum: false,
        }
    }
}

impl AnalysisConfig {
    /// Resolves the string-typed fields; unknown names are unsupported.
    pub fn to_pipeline(&self) -> Result<PipelineConfig> {
        Ok(PipelineConfig {
            block_size: self.block_size,
            bins: self.bins,
            window: self.window,
            aggregation: self.aggregation.parse()?,
            hash: self.hash.parse()?,
        })
    }
}

pub fn default_block_size() -> usize { DEFAULT_BLOCK_SIZE }
pub fn default_bins() -> usize { DEFAULT_BINS }
fn default_window() -> bool { true }
pub fn default_aggregation() -> String { "average".into() }
pub fn default_hash() -> String { "sha256".into() }
pub fn default_waveform_columns() -> usize { 800 }

pub fn load_config(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            log::debug!("Config parse error in {}: {}", path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Aggregation, AnalysisError, HashAlgorithm};
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.analysis.to_pipeline().unwrap(), PipelineConfig::default());
        assert_eq!(cfg.output.waveform_columns, 800);
        assert!(!cfg.output.spectrum);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [analysis]
            bins = 32
            aggregation = "max"
            hash = "sha512-256"

            [output]
            spectrum = true
            "#,
        )
        .unwrap();
        let pipeline = cfg.analysis.to_pipeline().unwrap();
        assert_eq!(pipeline.block_size, 2048);
        assert_eq!(pipeline.bins, 32);
        assert!(pipeline.window);
        assert_eq!(pipeline.aggregation, Aggregation::Max);
        assert_eq!(pipeline.hash, HashAlgorithm::Sha512_256);
        assert!(cfg.output.spectrum);
    }

    #[test]
    fn unknown_hash_is_unsupported() {
        let cfg: Config = toml::from_str("[analysis]\nhash = \"crc32\"").unwrap();
        assert!(matches!(
            cfg.analysis.to_pipeline(),
            Err(AnalysisError::UnsupportedConfiguration(_))
        ));
    }

    #[test]
    fn loads_from_disk_and_ignores_garbage() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("sonoprint.toml");
        let mut file = std::fs::File::create(&good).unwrap();
        writeln!(file, "[analysis]\nblock_size = 4096\nwindow = false").unwrap();
        let cfg = load_config(&good).unwrap();
        assert_eq!(cfg.analysis.block_size, 4096);
        assert!(!cfg.analysis.window);

        let bad = dir.path().join("broken.toml");
        std::fs::write(&bad, "[analysis\nbins = ").unwrap();
        assert!(load_config(&bad).is_none());
        assert!(load_config(&dir.path().join("missing.toml")).is_none());
    }
}
