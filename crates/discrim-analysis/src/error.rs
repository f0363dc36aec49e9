use std::{io, path::PathBuf};

use discrim_metrics::MetricsError;
use discrim_stats::HistogramError;

/// Error returned by the analysis layer.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AnalysisError {
    #[display("failed to access {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to parse {kind} JSON file {}: {source}", path.display())]
    Json {
        kind: &'static str,
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("invalid histogram: {_0}")]
    #[from]
    Histogram(HistogramError),
    #[display("{_0}")]
    #[from]
    Metrics(MetricsError),
    #[display("signal sample {name:?} is not available")]
    MissingSignal { name: String },
    #[display("sample manifest is empty")]
    EmptyManifest,
    #[display("histogram {histogram:?} not found for sample {sample:?}")]
    MissingHistogram { sample: String, histogram: String },
    #[display("train fraction must be in [0, 1], got {_0}")]
    InvalidFraction(#[error(not(source))] f64),
    #[display("invalid configuration: {_0}")]
    InvalidConfig(#[error(not(source))] String),
    #[display("at least two samples are required, got {_0}")]
    NotEnoughSamples(#[error(not(source))] usize),
}

impl AnalysisError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
