use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sonoprint", about = "Spectral fingerprints for audio files")]
pub struct Cli {
    /// Input audio files (WAV, MP3, FLAC, OGG)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// FFT block size (power of two)
    #[arg(short = 'n', long, default_value_t = 2048)]
    pub block_size: usize,

    /// Number of feature bins hashed into the fingerprint
    #[arg(short, long, default_value_t = 64)]
    pub bins: usize,

    /// Skip the Hann window before the FFT
    #[arg(long)]
    pub no_window: bool,

    /// Feature aggregation per bin: average or max
    #[arg(short, long, default_value = "average")]
    pub aggregation: String,

    /// Digest algorithm: sha256 or sha512-256
    #[arg(long, default_value = "sha256")]
    pub hash: String,

    /// Write a JSON report to this path ("-" for stdout)
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Include the magnitude spectrum in the JSON report
    #[arg(long)]
    pub spectrum: bool,

    /// Waveform envelope columns in the JSON report
    #[arg(long, default_value_t = 800)]
    pub waveform_columns: usize,

    /// Config file (defaults to sonoprint.toml or the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
