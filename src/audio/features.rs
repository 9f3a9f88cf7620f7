use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{invalid, unsupported, AnalysisError, Result};

/// How a chunk of magnitude bins collapses into one feature value.
///
/// The two policies are not interchangeable: the same audio produces
/// different fingerprints under each.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Average,
    Max,
}

impl FromStr for Aggregation {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "average" | "avg" | "mean" => Ok(Aggregation::Average),
            "max" | "maximum" => Ok(Aggregation::Max),
            other => Err(unsupported(format!("unknown aggregation '{}'", other))),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregation::Average => f.write_str("average"),
            Aggregation::Max => f.write_str("max"),
        }
    }
}

/// Downsamples `spectrum` into `bins` feature values.
///
/// Chunk width is `spectrum.len() / bins`; bins left over at the top of the
/// spectrum belong to no chunk.
pub fn extract(spectrum: &[f64], bins: usize, aggregation: Aggregation) -> Result<Vec<f64>> {
    if bins == 0 {
        return Err(invalid("feature bin count must be positive"));
    }
    let chunk = spectrum.len() / bins;
    if chunk == 0 {
        return Err(invalid(format!(
            "{} feature bins exceed spectrum length {}",
            bins,
            spectrum.len()
        )));
    }

    Ok(spectrum
        .chunks_exact(chunk)
        .take(bins)
        .map(|values| match aggregation {
            Aggregation::Average => values.iter().sum::<f64>() / chunk as f64,
            Aggregation::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
        .collect())
}
