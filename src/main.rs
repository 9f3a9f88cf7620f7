mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use cli::Cli;
use sonoprint::audio::decode::decode_audio;
use sonoprint::audio::waveform::{envelope, WaveformColumn};
use sonoprint::config::{self, Config};
use sonoprint::{analyze, PipelineConfig};

#[derive(Debug, Serialize)]
struct FileReport {
    path: PathBuf,
    sample_rate: u32,
    channels: usize,
    samples: usize,
    config: PipelineConfig,
    fingerprint: String,
    features: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spectrum: Option<Vec<f64>>,
    waveform: Vec<WaveformColumn>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect sonoprint.toml / global config
    let config_path = cli.config.clone().or_else(find_config);
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            merge_config(&mut cli, cfg);
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    let pipeline = PipelineConfig {
        block_size: cli.block_size,
        bins: cli.bins,
        window: !cli.no_window,
        aggregation: cli.aggregation.parse()?,
        hash: cli.hash.parse()?,
    };
    pipeline.validate()?;

    log::info!(
        "Block size {}, {} bins ({}), window {}, hash {}",
        pipeline.block_size,
        pipeline.bins,
        pipeline.aggregation,
        if pipeline.window { "hann" } else { "off" },
        pipeline.hash
    );

    let pb = ProgressBar::new(cli.inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Each file gets its own decode buffer and pipeline run; nothing is shared.
    let results: Vec<Result<FileReport>> = cli
        .inputs
        .par_iter()
        .map(|path| {
            let report = analyze_file(path, &pipeline, &cli);
            pb.inc(1);
            report
        })
        .collect();
    pb.finish_and_clear();

    let mut reports = Vec::with_capacity(results.len());
    let mut failures = 0;
    for (path, result) in cli.inputs.iter().zip(results) {
        match result {
            Ok(report) => {
                println!("{}  {}", report.fingerprint, path.display());
                reports.push(report);
            }
            Err(err) => {
                log::error!("{}: {:#}", path.display(), err);
                failures += 1;
            }
        }
    }

    if let Some(ref json_path) = cli.json {
        write_json(json_path, &reports)?;
    }

    if failures > 0 {
        anyhow::bail!("{} of {} file(s) failed", failures, cli.inputs.len());
    }
    Ok(())
}

fn find_config() -> Option<PathBuf> {
    let local = PathBuf::from("sonoprint.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("sonoprint").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("sonoprint").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}

/// Config values apply only where the CLI is still at its default.
fn merge_config(cli: &mut Cli, cfg: Config) {
    if cli.block_size == config::default_block_size() { cli.block_size = cfg.analysis.block_size; }
    if cli.bins == config::default_bins() { cli.bins = cfg.analysis.bins; }
    if !cli.no_window { cli.no_window = !cfg.analysis.window; }
    if cli.aggregation == config::default_aggregation() { cli.aggregation = cfg.analysis.aggregation; }
    if cli.hash == config::default_hash() { cli.hash = cfg.analysis.hash; }
    if cli.waveform_columns == config::default_waveform_columns() {
        cli.waveform_columns = cfg.output.waveform_columns;
    }
    if !cli.spectrum { cli.spectrum = cfg.output.spectrum; }
}

fn analyze_file(path: &Path, pipeline: &PipelineConfig, cli: &Cli) -> Result<FileReport> {
    let audio = decode_audio(path)?;
    let analysis = analyze(&audio.samples, pipeline)
        .with_context(|| format!("Failed to analyze {}", path.display()))?;
    let waveform = envelope(&audio.samples, cli.waveform_columns)?;

    log::info!("{}: fingerprint {}", path.display(), analysis.fingerprint);

    Ok(FileReport {
        path: path.to_path_buf(),
        sample_rate: audio.sample_rate,
        channels: audio.channels,
        samples: audio.samples.len(),
        config: *pipeline,
        fingerprint: analysis.fingerprint,
        features: analysis.features,
        spectrum: cli.spectrum.then_some(analysis.spectrum),
        waveform,
    })
}

fn write_json(path: &Path, reports: &[FileReport]) -> Result<()> {
    if path.as_os_str() == "-" {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        serde_json::to_writer_pretty(&mut lock, reports)?;
        writeln!(lock)?;
    } else {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create report: {}", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), reports)?;
        log::info!("Wrote report for {} file(s) to {}", reports.len(), path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_sine_wav(path: &Path, frames: usize) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for t in 0..frames {
            let s = (2.0 * std::f64::consts::PI * 100.0 * t as f64 / 2048.0).sin() * 0.5;
            writer.write_sample((s * 32767.0) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn read_report(path: &Path) -> Vec<serde_json::Value> {
        let text = std::fs::read_to_string(path).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn analyze_file_matches_library_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("tone.wav");
        write_sine_wav(&wav, 4096);

        let cli = Cli::parse_from(["sonoprint", "--waveform-columns", "64", "tone.wav"]);
        let pipeline = PipelineConfig::default();
        let report = analyze_file(&wav, &pipeline, &cli).unwrap();

        let audio = decode_audio(&wav).unwrap();
        let expected = analyze(&audio.samples, &pipeline).unwrap();
        assert_eq!(report.fingerprint, expected.fingerprint);
        assert_eq!(report.features, expected.features);
        assert_eq!(report.samples, 4096);
        assert_eq!(report.waveform.len(), 64);
        assert!(report.spectrum.is_none());
    }

    #[test]
    fn analyze_file_rejects_audio_shorter_than_a_block() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("short.wav");
        write_sine_wav(&wav, 1000);

        let cli = Cli::parse_from(["sonoprint", "short.wav"]);
        let err = analyze_file(&wav, &PipelineConfig::default(), &cli).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<sonoprint::AnalysisError>(),
            Some(sonoprint::AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn json_report_omits_spectrum_unless_requested() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("tone.wav");
        write_sine_wav(&wav, 2048);
        let pipeline = PipelineConfig::default();

        let plain = Cli::parse_from(["sonoprint", "tone.wav"]);
        let report = analyze_file(&wav, &pipeline, &plain).unwrap();
        let fingerprint = report.fingerprint.clone();
        let out = dir.path().join("plain.json");
        write_json(&out, &[report]).unwrap();

        let entries = read_report(&out);
        assert_eq!(entries.len(), 1);
        let entry = entries[0].as_object().unwrap();
        assert!(!entry.contains_key("spectrum"));
        assert_eq!(entry["fingerprint"], fingerprint.as_str());
        assert_eq!(entry["features"].as_array().unwrap().len(), 64);
        assert_eq!(entry["config"]["aggregation"], "average");
        assert_eq!(entry["config"]["hash"], "sha256");

        let with_spectrum = Cli::parse_from(["sonoprint", "--spectrum", "tone.wav"]);
        let report = analyze_file(&wav, &pipeline, &with_spectrum).unwrap();
        let out = dir.path().join("spectrum.json");
        write_json(&out, &[report]).unwrap();

        let entries = read_report(&out);
        assert_eq!(entries[0]["spectrum"].as_array().unwrap().len(), 1024);
    }

    #[test]
    fn config_fills_only_default_flags() {
        let mut cli = Cli::parse_from(["sonoprint", "--bins", "16", "a.wav"]);
        let cfg: Config = toml::from_str(
            r#"
            [analysis]
            bins = 32
            block_size = 4096
            window = false
            [output]
            spectrum = true
            "#,
        )
        .unwrap();
        merge_config(&mut cli, cfg);

        assert_eq!(cli.bins, 16);
        assert_eq!(cli.block_size, 4096);
        assert!(cli.no_window);
        assert!(cli.spectrum);
        assert_eq!(cli.hash, "sha256");
    }
}
