use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::{AudioBuffer, Signal};
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// First channel of a decoded file.
#[derive(Debug)]
pub struct AudioData {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    /// Channel count of the source; only channel 0 is kept in `samples`.
    pub channels: usize,
}

/// Decodes `path` and keeps channel 0 only.
pub fn decode_audio(path: &Path) -> Result<AudioData> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open audio file: {}", path.display()))?;
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let stream = MediaSourceStream::new(Box::new(file), Default::default());
    let mut format = symphonia::default::get_probe()
        .format(&hint, stream, &FormatOptions::default(), &MetadataOptions::default())
        .with_context(|| format!("Failed to probe audio format of {}", path.display()))?
        .format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No audio tracks found")?;
    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate.context("Unknown sample rate")?;
    let declared_channels = track.codec_params.channels.map(|c| c.count());
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create audio decoder")?;

    let (samples, decoded_channels) = read_first_channel(format.as_mut(), decoder.as_mut(), track_id)?;
    let channels = decoded_channels.or(declared_channels).unwrap_or(1);

    log::info!(
        "Decoded {}: {} samples, {}Hz, {} channel(s), {:.1}s",
        path.display(),
        samples.len(),
        sample_rate,
        channels,
        samples.len() as f32 / sample_rate as f32
    );

    Ok(AudioData {
        samples,
        sample_rate,
        channels,
    })
}

/// Pulls every packet of `track_id` through the decoder into a planar
/// buffer and appends its channel 0.
///
/// The channel layout is taken from each decoded packet, never from the
/// container header, which may leave it unset.
fn read_first_channel(
    format: &mut dyn FormatReader,
    decoder: &mut dyn Decoder,
    track_id: u32,
) -> Result<(Vec<f32>, Option<usize>)> {
    let mut samples = Vec::new();
    let mut planar: Option<AudioBuffer<f32>> = None;
    let mut channels = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => return Err(e.into()),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(msg)) => {
                log::debug!("Skipping undecodable packet: {}", msg);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        let capacity = decoded.capacity() as u64;
        let reusable = planar
            .as_ref()
            .is_some_and(|buf| *buf.spec() == spec && buf.capacity() as u64 >= capacity);
        if !reusable {
            planar = Some(AudioBuffer::new(capacity, spec));
        }
        let Some(buf) = planar.as_mut() else { continue };
        decoded.convert(buf);

        if channels.is_none() {
            channels = Some(spec.channels.count());
        }
        if spec.channels.count() > 0 {
            samples.extend_from_slice(buf.chan(0));
        }
    }

    Ok((samples, channels))
}
