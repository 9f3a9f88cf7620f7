pub mod decode;
pub mod error;
pub mod features;
pub mod fft;
pub mod fingerprint;
pub mod pipeline;
pub mod spectrum;
pub mod waveform;
pub mod window;
