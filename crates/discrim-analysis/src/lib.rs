//! Sample handling and analysis pipelines around the discrimination metrics
//!
//! This crate connects on-disk sample histograms to the
//! [`discrim_metrics`] engine and produces plot-ready comparisons.
//!
//! # Overview
//!
//! 1. **List Samples** ([`manifest::SampleManifest`]): Signal first, then backgrounds
//! 2. **Load Histograms** ([`source::HistogramSource`]): From per-sample JSON files
//!    ([`source::JsonHistogramDir`]) or memory ([`source::MemorySource`])
//! 3. **Build Sample Sets** ([`samples::load_samples`]): Rebin and validate;
//!    unavailable backgrounds are skipped
//! 4. **Run a Pipeline** ([`pipeline`]): ROC, significance, stacked or
//!    normalized comparisons, configured by [`config::AnalysisConfig`]
//! 5. **Report** ([`report`]): Fixed-width cut table and CSV output
//!
//! For classifier studies, [`split::split_events`] divides events into training
//! and testing partitions, and [`overtraining::check_overtraining`] compares the
//! ROC curves of classifier responses on both.
//!
//! # Logging
//!
//! Progress is reported through [`tracing`]; installing a subscriber is up to
//! the application.
//!
//! # Examples
//!
//! ```
//! use discrim_analysis::{
//!     config::AnalysisConfig, manifest::SampleManifest, pipeline::make_roc,
//!     source::MemorySource,
//! };
//! use discrim_stats::{axis::BinAxis, histogram::Histogram};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let axis = BinAxis::uniform(3, 0.5, 3.5)?;
//! let mut source = MemorySource::new();
//! source.insert("ttH", "bdt", Histogram::new(axis.clone(), vec![10.0, 20.0, 30.0])?);
//! source.insert("ttbar", "bdt", Histogram::new(axis, vec![5.0, 5.0, 5.0])?);
//!
//! let manifest = SampleManifest::parse("ttH\nttbar\n");
//! let report = make_roc(&AnalysisConfig::new("bdt"), &manifest, &source)?;
//!
//! println!("{}", report.table());
//! assert_eq!(report.curve.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod comparison;
pub mod config;
pub mod error;
pub mod manifest;
pub mod overtraining;
pub mod pipeline;
pub mod report;
pub mod samples;
pub mod schema;
pub mod source;
pub mod split;
mod util;

pub use self::error::AnalysisError;
