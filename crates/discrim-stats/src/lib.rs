//! Binned histogram primitives for signal/background studies.
//!
//! This crate provides the immutable histogram value type consumed by the
//! discrimination-metrics engine and the analysis layer:
//!
//! - **Bin axes**: Uniform or variable-width bin edges with ROOT-style bin numbering
//! - **Histograms**: Bin counts plus underflow/overflow, with integrals, scaling,
//!   normalization, rebinning and filling from raw values
//!
//! # Bin Numbering
//!
//! Bins are numbered the way binned-histogram tools conventionally do:
//!
//! ```text
//! bin 0       : underflow  (x < min)
//! bin 1..=n   : in-range bins
//! bin n + 1   : overflow   (x >= max)
//! ```
//!
//! # Modules
//!
//! - [`axis`]: Bin edges, centers and bin lookup
//! - [`histogram`]: The histogram value type
//!
//! # Examples
//!
//! ## Building a histogram from bin counts
//!
//! ```
//! use discrim_stats::{axis::BinAxis, histogram::Histogram};
//!
//! let axis = BinAxis::uniform(3, 0.5, 3.5).unwrap();
//! let hist = Histogram::new(axis, vec![10.0, 20.0, 30.0]).unwrap();
//!
//! assert_eq!(hist.bin_center(2), 2.0);
//! assert_eq!(hist.total(), 60.0);
//! assert_eq!(hist.integral(2, 3), 50.0);
//! ```
//!
//! ## Filling from raw values
//!
//! ```
//! use discrim_stats::{axis::BinAxis, histogram::Histogram};
//!
//! let axis = BinAxis::uniform(4, -1.0, 1.0).unwrap();
//! let hist = Histogram::from_values(axis, [-0.9, -0.1, 0.2, 0.7, 1.5]);
//!
//! assert_eq!(hist.counts(), &[1.0, 1.0, 1.0, 1.0]);
//! assert_eq!(hist.overflow(), 1.0);
//! ```

pub mod axis;
pub mod histogram;

/// Errors raised while constructing or transforming histograms.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum HistogramError {
    #[display("axis must have at least one bin")]
    NoBins,
    #[display("invalid axis range [{min}, {max})")]
    InvalidRange { min: f64, max: f64 },
    #[display("bin edges must be finite and strictly increasing (edge #{index})")]
    UnorderedEdges { index: usize },
    #[display("expected {expected} bin counts, found {found}")]
    CountLengthMismatch { expected: usize, found: usize },
    #[display("bin {bin} has a non-finite count")]
    NonFiniteCount { bin: usize },
    #[display("cannot merge {n_bins} bins in groups of {group}")]
    InvalidRebin { group: usize, n_bins: usize },
    #[display("histograms do not share the same binning")]
    BinningMismatch,
}
