use serde::Serialize;

use crate::{
    curve::MetricsCurve, engine::DiscriminationMetrics, error::MetricsError, roc::RocCurve,
    sample_set::SampleSet,
};

/// Train-versus-test comparison of the ROC curves of one selection.
///
/// A classifier that memorized its training events shows a better ROC curve on
/// them than on independent testing events. Both curves share the efficiency
/// binning, so they can be compared bin by bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OvertrainingCheck {
    pub train: MetricsCurve,
    pub test: MetricsCurve,
    pub train_roc: RocCurve,
    pub test_roc: RocCurve,
}

impl OvertrainingCheck {
    /// Runs `metrics` on both sample sets.
    ///
    /// Unless `metrics` fixes the ROC binning, both ROC curves use the
    /// training set's bin count.
    pub fn compare(
        metrics: &DiscriminationMetrics,
        train: &SampleSet,
        test: &SampleSet,
    ) -> Result<Self, MetricsError> {
        let metrics = metrics.with_roc_bins(metrics.roc_bins().unwrap_or(train.n_bins()));
        let (train, train_roc) = metrics.compute_full_curve(train)?;
        let (test, test_roc) = metrics.compute_full_curve(test)?;

        let check = Self {
            train,
            test,
            train_roc,
            test_roc,
        };
        tracing::debug!(
            max_rejection_gap = ?check.max_rejection_gap(),
            area_gap = ?check.area_gap(),
            "overtraining comparison computed"
        );
        Ok(check)
    }

    /// `(efficiency, train - test)` for every efficiency bin filled in both
    /// curves, in ascending efficiency order.
    pub fn rejection_gaps(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        (1..=self.train_roc.n_bins()).filter_map(|bin| {
            let train = self.train_roc.get(bin)?;
            let test = self.test_roc.get(bin)?;
            Some((self.train_roc.bin_center(bin), train - test))
        })
    }

    /// Largest absolute rejection gap, or `None` when no bin is filled in both.
    #[must_use]
    pub fn max_rejection_gap(&self) -> Option<f64> {
        self.rejection_gaps().map(|(_, gap)| gap.abs()).reduce(f64::max)
    }

    /// Difference of the areas under the training and testing ROC curves.
    #[must_use]
    pub fn area_gap(&self) -> Option<f64> {
        Some(self.train_roc.area()? - self.test_roc.area()?)
    }

    /// Whether no efficiency bin differs by more than `tolerance`.
    ///
    /// Vacuously true when the curves share no filled bin.
    #[must_use]
    pub fn is_compatible(&self, tolerance: f64) -> bool {
        self.max_rejection_gap().is_none_or(|gap| gap <= tolerance)
    }
}
