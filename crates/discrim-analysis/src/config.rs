use std::path::Path;

use discrim_metrics::{
    DiscriminationMetrics,
    direction::{CutDirection, SkipPolicy},
};
use serde::{Deserialize, Serialize};

use crate::{error::AnalysisError, split::DEFAULT_TRAIN_FRACTION, util};

/// Settings shared by the analysis pipelines.
///
/// Only `histogram` is required in the JSON form:
///
/// ```json
/// {
///   "histogram": "mva_response",
///   "direction": "from_bin_to_max",
///   "rebin": 2,
///   "signal_amplification": 50.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Name of the discriminant histogram inside each sample file
    pub histogram: String,
    /// Axis title for reports; defaults to the histogram name
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_direction")]
    pub direction: CutDirection,
    /// Overrides the per-operation default skip policies
    #[serde(default)]
    pub skip_policy: Option<SkipPolicy>,
    /// Number of consecutive bins merged before any computation
    #[serde(default = "default_rebin")]
    pub rebin: usize,
    /// Scale factor of the signal overlay in stacked comparisons
    #[serde(default = "default_signal_amplification")]
    pub signal_amplification: f64,
    /// Efficiency bins of the ROC curve; defaults to the discriminant bin count
    #[serde(default)]
    pub roc_bins: Option<usize>,
    #[serde(default = "default_train_fraction")]
    pub train_fraction: f64,
}

fn default_direction() -> CutDirection {
    CutDirection::FromBinToMax
}

fn default_rebin() -> usize {
    1
}

fn default_signal_amplification() -> f64 {
    1.0
}

fn default_train_fraction() -> f64 {
    DEFAULT_TRAIN_FRACTION
}

impl AnalysisConfig {
    /// Creates a configuration with every optional field at its default.
    #[must_use]
    pub fn new(histogram: impl Into<String>) -> Self {
        Self {
            histogram: histogram.into(),
            label: None,
            direction: default_direction(),
            skip_policy: None,
            rebin: default_rebin(),
            signal_amplification: default_signal_amplification(),
            roc_bins: None,
            train_fraction: default_train_fraction(),
        }
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_json_file<P>(path: P) -> Result<Self, AnalysisError>
    where
        P: AsRef<Path>,
    {
        let config: Self = util::read_json_file("analysis config", path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.histogram.is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "histogram name is empty".to_owned(),
            ));
        }
        if self.rebin == 0 {
            return Err(AnalysisError::InvalidConfig(
                "rebin must be at least 1".to_owned(),
            ));
        }
        if !(self.signal_amplification.is_finite() && self.signal_amplification > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "signal amplification must be finite and positive, got {}",
                self.signal_amplification
            )));
        }
        if self.roc_bins == Some(0) {
            return Err(AnalysisError::InvalidConfig(
                "roc_bins must be at least 1".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&self.train_fraction) {
            return Err(AnalysisError::InvalidFraction(self.train_fraction));
        }
        Ok(())
    }

    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.histogram)
    }

    /// The metrics engine these settings describe.
    #[must_use]
    pub fn metrics(&self) -> DiscriminationMetrics {
        let mut metrics = DiscriminationMetrics::new(self.direction);
        if let Some(policy) = self.skip_policy {
            metrics = metrics.with_skip_policy(policy);
        }
        if let Some(n_bins) = self.roc_bins {
            metrics = metrics.with_roc_bins(n_bins);
        }
        metrics
    }
}
