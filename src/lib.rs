//! Offline spectral fingerprinting of a single audio channel.
//!
//! A block of samples is windowed, transformed with an in-place radix-2
//! FFT, reduced to a magnitude spectrum, downsampled into feature bins and
//! hashed into a hex fingerprint. See [`audio::pipeline::analyze`].

pub mod audio;
pub mod config;

pub use audio::error::AnalysisError;
pub use audio::features::Aggregation;
pub use audio::fingerprint::HashAlgorithm;
pub use audio::pipeline::{analyze, Analysis, PipelineConfig};
