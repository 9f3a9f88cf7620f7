use serde::Serialize;

use super::error::{invalid, Result};

/// Lowest and highest sample inside one display column.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WaveformColumn {
    pub min: f32,
    pub max: f32,
}

/// Min/max envelope of the whole channel, `columns` slices wide.
///
/// Each column spans `ceil(len / columns)` samples, so the last few columns
/// can run past the data; those are left out rather than reported empty.
pub fn envelope(samples: &[f32], columns: usize) -> Result<Vec<WaveformColumn>> {
    if columns == 0 {
        return Err(invalid("waveform envelope needs at least one column"));
    }
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let step = samples.len().div_ceil(columns);
    Ok(samples
        .chunks(step)
        .map(|slice| {
            let (min, max) = slice
                .iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &s| (lo.min(s), hi.max(s)));
            WaveformColumn { min, max }
        })
        .collect())
}
