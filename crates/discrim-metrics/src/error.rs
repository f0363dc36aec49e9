use std::fmt;

/// Error returned by the discrimination-metrics engine.
///
/// Every failure is a precondition violation of the caller; computations fail
/// atomically and never return partial curves.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum MetricsError {
    #[display("invalid input: {_0}")]
    InvalidInput(InvalidInput),
}

/// The reason an input was rejected.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidInput {
    #[display("signal histogram is empty")]
    EmptySignal,
    #[display("at least one background sample is required")]
    NoBackgrounds,
    #[display("all background histograms are empty")]
    EmptyBackgrounds,
    #[display("background #{index} has {found} bins, signal has {expected}")]
    BinningMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[display("background #{index} has the signal's bin count but shifted bin centers")]
    ShiftedBinning { index: usize },
    #[display("{sample} has a negative count in bin {bin}")]
    NegativeCount { sample: SampleRole, bin: usize },
    #[display("{sample} has a non-finite count in bin {bin}")]
    NonFiniteCount { sample: SampleRole, bin: usize },
    #[display("ROC curve needs at least one efficiency bin")]
    ZeroRocBins,
    #[display("exactly one cut direction must be selected")]
    AmbiguousDirection,
}

/// Identifies a histogram inside a [`SampleSet`](crate::sample_set::SampleSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleRole {
    Signal,
    /// Background at the given position (0-based).
    Background(usize),
}

impl fmt::Display for SampleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleRole::Signal => write!(f, "signal"),
            SampleRole::Background(index) => write!(f, "background #{index}"),
        }
    }
}
