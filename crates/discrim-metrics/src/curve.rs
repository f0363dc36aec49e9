use serde::Serialize;

use crate::{
    direction::CutDirection,
    error::InvalidInput,
    roc::{RocCurve, RocPoint},
};

/// Discrimination metrics for a cut placed at one discriminant bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsRecord {
    /// Discriminant bin (1-based) the cut is placed at
    pub bin: usize,
    pub bin_center: f64,
    /// Axis coordinate of the cut (see [`CutDirection::cut_value`])
    pub cut_value: f64,
    /// Selected signal, `S`
    pub signal_count: f64,
    /// Selected background summed over all background samples, `B`
    pub background_count: f64,
    pub signal_efficiency: f64,
    pub background_efficiency: f64,
    /// `1 - background_efficiency`
    pub background_rejection: f64,
    /// `S / (S + B)`
    pub signal_purity: f64,
    pub purity_times_efficiency: f64,
    /// `S / sqrt(S + B)`
    pub significance: f64,
}

/// Per-bin metrics in ascending bin order, with empty-tail bins left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsCurve {
    direction: CutDirection,
    records: Vec<MetricsRecord>,
}

impl MetricsCurve {
    pub(crate) fn new(direction: CutDirection, records: Vec<MetricsRecord>) -> Self {
        Self { direction, records }
    }

    #[must_use]
    pub fn direction(&self) -> CutDirection {
        self.direction
    }

    #[must_use]
    pub fn records(&self) -> &[MetricsRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricsRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for discriminant bin `bin`, if it was not skipped.
    #[must_use]
    pub fn record_for_bin(&self, bin: usize) -> Option<&MetricsRecord> {
        self.records.iter().find(|record| record.bin == bin)
    }

    /// The record with the largest significance (the earliest one on ties).
    #[must_use]
    pub fn best_significance(&self) -> Option<&MetricsRecord> {
        self.records.iter().reduce(|best, record| {
            if record.significance > best.significance {
                record
            } else {
                best
            }
        })
    }

    /// Rebuilds the ROC curve of these records on `n_bins` efficiency bins.
    pub fn roc_curve(&self, n_bins: usize) -> Result<RocCurve, InvalidInput> {
        RocCurve::from_points(
            n_bins,
            self.records.iter().map(|record| RocPoint {
                signal_efficiency: record.signal_efficiency,
                background_rejection: record.background_rejection,
            }),
        )
    }
}

impl<'a> IntoIterator for &'a MetricsCurve {
    type Item = &'a MetricsRecord;
    type IntoIter = std::slice::Iter<'a, MetricsRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Significance of a cut placed at one discriminant bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignificancePoint {
    pub bin: usize,
    pub bin_center: f64,
    pub cut_value: f64,
    pub significance: f64,
}

/// Significance-only counterpart of [`MetricsCurve`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignificanceCurve {
    direction: CutDirection,
    points: Vec<SignificancePoint>,
}

impl SignificanceCurve {
    pub(crate) fn new(direction: CutDirection, points: Vec<SignificancePoint>) -> Self {
        Self { direction, points }
    }

    #[must_use]
    pub fn direction(&self) -> CutDirection {
        self.direction
    }

    #[must_use]
    pub fn points(&self) -> &[SignificancePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point with the largest significance (the earliest one on ties).
    #[must_use]
    pub fn best(&self) -> Option<&SignificancePoint> {
        self.points.iter().reduce(|best, point| {
            if point.significance > best.significance {
                point
            } else {
                best
            }
        })
    }
}
