//! Signal/background discrimination metrics for cut-based selections
//!
//! Given binned discriminant histograms for one signal sample and any number
//! of background samples, this crate evaluates a cut placed at every bin of
//! the discriminant and reports how well it separates signal from background.
//!
//! # Overview
//!
//! 1. **Collect Samples** ([`sample_set::SampleSet`]): One signal and zero or more
//!    background histograms sharing the same binning
//! 2. **Choose a Direction** ([`direction::CutDirection`]): Keep events below or
//!    above the cut
//! 3. **Compute Curves** ([`engine::DiscriminationMetrics`]):
//!    - [`curve::SignificanceCurve`]: `S / sqrt(S + B)` per bin
//!    - [`curve::MetricsCurve`]: efficiencies, rejection, purity and significance per bin
//!    - [`roc::RocCurve`]: background rejection over binned signal efficiency
//! 4. **Compare Train/Test** ([`overtraining::OvertrainingCheck`]): Detect
//!    overtraining from diverging ROC curves
//!
//! # Metrics
//!
//! For a cut at bin `b`, with `S` and `B` the selected signal and the summed
//! selected background:
//!
//! ```text
//! signal efficiency     = S / total signal
//! background efficiency = B / total background
//! background rejection  = 1 - background efficiency
//! signal purity         = S / (S + B)
//! significance          = S / sqrt(S + B)
//! ```
//!
//! Bins whose selection is empty are skipped according to a
//! [`direction::SkipPolicy`].
//!
//! # Examples
//!
//! ```
//! use discrim_metrics::{
//!     direction::CutDirection, engine::DiscriminationMetrics, sample_set::SampleSet,
//! };
//! use discrim_stats::{axis::BinAxis, histogram::Histogram};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let axis = BinAxis::uniform(3, 0.5, 3.5)?;
//! let signal = Histogram::new(axis.clone(), vec![10.0, 20.0, 30.0])?;
//! let background = Histogram::new(axis, vec![5.0, 5.0, 5.0])?;
//! let samples = SampleSet::new(signal, vec![background])?;
//!
//! let metrics = DiscriminationMetrics::new(CutDirection::FromBinToMax);
//! let curve = metrics.compute_significance_curve(&samples)?;
//!
//! // Cutting at the first bin keeps everything: 60 / sqrt(75)
//! let best = curve.best().unwrap();
//! assert_eq!(best.bin, 1);
//! assert!((best.significance - 6.9282).abs() < 1e-4);
//! # Ok(())
//! # }
//! ```

pub mod curve;
pub mod direction;
pub mod engine;
pub mod error;
pub mod overtraining;
pub mod roc;
pub mod sample_set;

pub use self::{
    engine::DiscriminationMetrics,
    error::{InvalidInput, MetricsError},
};
