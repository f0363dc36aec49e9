use discrim_stats::histogram::Histogram;

use crate::{
    curve::{MetricsCurve, MetricsRecord, SignificanceCurve, SignificancePoint},
    direction::{CutDirection, SkipPolicy},
    error::{InvalidInput, MetricsError},
    roc::RocCurve,
    sample_set::SampleSet,
};

/// Computes signal/background discrimination curves from binned histograms.
///
/// The engine is a small immutable configuration; every computation reads a
/// [`SampleSet`] and allocates fresh outputs, so one engine can be shared
/// across threads freely.
///
/// # Skip Policies
///
/// A bin whose selection is an empty tail is left out of the output. What
/// counts as empty depends on the [`SkipPolicy`]:
///
/// - [`compute_significance_curve`](Self::compute_significance_curve) defaults
///   to [`SkipPolicy::ZeroBackground`]
/// - [`compute_full_curve`](Self::compute_full_curve) defaults to
///   [`SkipPolicy::ZeroTotal`]
///
/// [`with_skip_policy`](Self::with_skip_policy) forces one policy for both.
///
/// # Examples
///
/// ```
/// use discrim_metrics::{
///     direction::CutDirection, engine::DiscriminationMetrics, sample_set::SampleSet,
/// };
/// use discrim_stats::{axis::BinAxis, histogram::Histogram};
///
/// let axis = BinAxis::uniform(3, 0.5, 3.5).unwrap();
/// let signal = Histogram::new(axis.clone(), vec![10.0, 20.0, 30.0]).unwrap();
/// let background = Histogram::new(axis, vec![5.0, 5.0, 5.0]).unwrap();
/// let samples = SampleSet::new(signal, vec![background]).unwrap();
///
/// let metrics = DiscriminationMetrics::new(CutDirection::FromBinToMax);
/// let (curve, roc) = metrics.compute_full_curve(&samples).unwrap();
///
/// let last = curve.record_for_bin(3).unwrap();
/// assert_eq!(last.signal_count, 30.0);
/// assert_eq!(last.background_count, 5.0);
/// assert_eq!(last.signal_efficiency, 0.5);
/// assert_eq!(roc.rejection_at(0.5), Some(last.background_rejection));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscriminationMetrics {
    direction: CutDirection,
    skip_policy: Option<SkipPolicy>,
    roc_bins: Option<usize>,
}

impl DiscriminationMetrics {
    #[must_use]
    pub fn new(direction: CutDirection) -> Self {
        Self {
            direction,
            skip_policy: None,
            roc_bins: None,
        }
    }

    /// Uses `policy` for both computations instead of their defaults.
    #[must_use]
    pub fn with_skip_policy(mut self, policy: SkipPolicy) -> Self {
        self.skip_policy = Some(policy);
        self
    }

    /// Sets the number of efficiency bins of the ROC curve.
    ///
    /// Defaults to the number of discriminant bins.
    #[must_use]
    pub fn with_roc_bins(mut self, n_bins: usize) -> Self {
        self.roc_bins = Some(n_bins);
        self
    }

    #[must_use]
    pub fn direction(&self) -> CutDirection {
        self.direction
    }

    #[must_use]
    pub fn skip_policy(&self) -> Option<SkipPolicy> {
        self.skip_policy
    }

    #[must_use]
    pub fn roc_bins(&self) -> Option<usize> {
        self.roc_bins
    }

    /// Computes `S / sqrt(S + B)` for a cut at every discriminant bin.
    ///
    /// Backgrounds may be absent; with the default policy every bin is then
    /// skipped and the curve is empty.
    pub fn compute_significance_curve(
        &self,
        samples: &SampleSet,
    ) -> Result<SignificanceCurve, MetricsError> {
        ensure_signal(samples)?;
        let policy = self.skip_policy.unwrap_or(SkipPolicy::ZeroBackground);
        let tails = Tails::new(self.direction, samples);
        let axis = samples.signal().axis();

        let points = tails
            .iter()
            .filter(|&(bin, s, b)| !skipped(policy, bin, s, b))
            .map(|(bin, s, b)| SignificancePoint {
                bin,
                bin_center: axis.center(bin),
                cut_value: self.direction.cut_value(axis, bin),
                significance: significance(s, b),
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            direction = ?self.direction,
            ?policy,
            bins = samples.n_bins(),
            emitted = points.len(),
            "significance curve computed"
        );
        Ok(SignificanceCurve::new(self.direction, points))
    }

    /// Computes efficiencies, rejection, purity and significance for a cut at
    /// every discriminant bin, together with the ROC curve they trace.
    ///
    /// Requires at least one non-empty background. The ROC curve is filled in
    /// ascending discriminant-bin order, so when several bins share an
    /// efficiency bin the highest discriminant bin wins.
    pub fn compute_full_curve(
        &self,
        samples: &SampleSet,
    ) -> Result<(MetricsCurve, RocCurve), MetricsError> {
        ensure_signal(samples)?;
        if samples.backgrounds().is_empty() {
            return Err(InvalidInput::NoBackgrounds.into());
        }
        let signal_total = samples.signal().total();
        let background_total = samples.background_total();
        if background_total == 0.0 {
            return Err(InvalidInput::EmptyBackgrounds.into());
        }

        let policy = self.skip_policy.unwrap_or(SkipPolicy::ZeroTotal);
        let mut roc = RocCurve::new(self.roc_bins.unwrap_or(samples.n_bins()))?;
        let tails = Tails::new(self.direction, samples);
        let axis = samples.signal().axis();

        let mut records = vec![];
        for (bin, s, b) in tails.iter() {
            if skipped(policy, bin, s, b) {
                continue;
            }
            let signal_efficiency = s / signal_total;
            let background_efficiency = b / background_total;
            let background_rejection = 1.0 - background_efficiency;
            let signal_purity = s / (s + b);
            let record = MetricsRecord {
                bin,
                bin_center: axis.center(bin),
                cut_value: self.direction.cut_value(axis, bin),
                signal_count: s,
                background_count: b,
                signal_efficiency,
                background_efficiency,
                background_rejection,
                signal_purity,
                purity_times_efficiency: signal_purity * signal_efficiency,
                significance: significance(s, b),
            };
            roc.set(signal_efficiency, background_rejection);
            records.push(record);
        }

        tracing::debug!(
            direction = ?self.direction,
            ?policy,
            bins = samples.n_bins(),
            emitted = records.len(),
            roc_points = roc.points().count(),
            "metrics curve computed"
        );
        Ok((MetricsCurve::new(self.direction, records), roc))
    }
}

/// Selected signal and summed background for every discriminant bin.
struct Tails {
    signal: Vec<f64>,
    background: Vec<f64>,
}

impl Tails {
    fn new(direction: CutDirection, samples: &SampleSet) -> Self {
        let signal = direction.tail_integrals(samples.signal());
        let mut background = vec![0.0; signal.len()];
        for hist in samples.backgrounds() {
            for (sum, tail) in background.iter_mut().zip(direction.tail_integrals(hist)) {
                *sum += tail;
            }
        }
        Self { signal, background }
    }

    /// Yields `(bin, S, B)` with 1-based bins in ascending order.
    fn iter(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        self.signal
            .iter()
            .zip(&self.background)
            .enumerate()
            .map(|(i, (&s, &b))| (i + 1, s, b))
    }
}

fn ensure_signal(samples: &SampleSet) -> Result<(), MetricsError> {
    if is_empty(samples.signal()) {
        return Err(InvalidInput::EmptySignal.into());
    }
    Ok(())
}

fn is_empty(hist: &Histogram) -> bool {
    hist.total() == 0.0
}

fn skipped(policy: SkipPolicy, bin: usize, signal: f64, background: f64) -> bool {
    let skip = policy.skips(signal, background);
    if skip {
        tracing::trace!(bin, signal, background, "empty tail, bin skipped");
    }
    skip
}

// Inputs are non-negative (checked by `SampleSet`) and empty tails are
// skipped before this is reached, so `s + b > 0`.
fn significance(s: f64, b: f64) -> f64 {
    s / (s + b).sqrt()
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use discrim_stats::axis::BinAxis;

    use super::*;

    fn hist(counts: &[f64]) -> Histogram {
        #[expect(clippy::cast_precision_loss)]
        let axis = BinAxis::uniform(counts.len(), 0.5, counts.len() as f64 + 0.5).unwrap();
        Histogram::new(axis, counts.to_vec()).unwrap()
    }

    fn samples(signal: &[f64], backgrounds: &[&[f64]]) -> SampleSet {
        SampleSet::new(hist(signal), backgrounds.iter().map(|b| hist(b)).collect()).unwrap()
    }

    #[test]
    fn test_uniform_signal_without_backgrounds_gives_empty_significance_curve() {
        let samples = samples(&[1.0; 8], &[]);
        let curve = DiscriminationMetrics::new(CutDirection::FromBinToMax)
            .compute_significance_curve(&samples)
            .unwrap();
        assert!(curve.is_empty());
    }

    #[test]
    fn test_signal_efficiency_non_increasing_towards_max() {
        let samples = samples(
            &[0.0, 3.0, 1.0, 0.0, 7.0, 2.0, 0.5, 0.0],
            &[&[4.0, 1.0, 0.0, 2.0, 1.0, 0.0, 0.0, 3.0]],
        );
        let (curve, _) = DiscriminationMetrics::new(CutDirection::FromBinToMax)
            .compute_full_curve(&samples)
            .unwrap();
        assert!(!curve.is_empty());
        for pair in curve.records().windows(2) {
            assert!(pair[1].signal_efficiency <= pair[0].signal_efficiency);
        }
    }

    #[test]
    fn test_rejection_is_one_minus_efficiency() {
        let samples = samples(
            &[0.3, 1.7, 4.1, 2.2, 0.9],
            &[&[5.5, 2.1, 0.7, 0.2, 0.0], &[1.0, 1.0, 1.0, 1.0, 1.0]],
        );
        for direction in [CutDirection::FromMinToBin, CutDirection::FromBinToMax] {
            let (curve, _) = DiscriminationMetrics::new(direction)
                .compute_full_curve(&samples)
                .unwrap();
            for record in &curve {
                assert_abs_diff_eq!(
                    record.background_rejection,
                    1.0 - record.background_efficiency,
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_worked_example_from_bin_to_max() {
        let samples = samples(&[10.0, 20.0, 30.0], &[&[5.0, 5.0, 5.0]]);
        let (curve, roc) = DiscriminationMetrics::new(CutDirection::FromBinToMax)
            .compute_full_curve(&samples)
            .unwrap();
        assert_eq!(curve.len(), 3);

        let first = curve.record_for_bin(1).unwrap();
        assert_relative_eq!(first.bin_center, 1.0);
        assert_relative_eq!(first.cut_value, 0.5);
        assert_relative_eq!(first.signal_count, 60.0);
        assert_relative_eq!(first.background_count, 15.0);
        assert_relative_eq!(first.signal_efficiency, 1.0);
        assert_relative_eq!(first.background_efficiency, 1.0);
        assert_abs_diff_eq!(first.background_rejection, 0.0);
        assert_relative_eq!(first.signal_purity, 0.8);
        assert_relative_eq!(first.purity_times_efficiency, 0.8);
        assert_abs_diff_eq!(first.significance, 6.9282, epsilon = 1e-4);

        let last = curve.record_for_bin(3).unwrap();
        assert_relative_eq!(last.bin_center, 3.0);
        assert_relative_eq!(last.signal_count, 30.0);
        assert_relative_eq!(last.background_count, 5.0);
        assert_relative_eq!(last.signal_efficiency, 0.5);
        assert_relative_eq!(last.background_efficiency, 1.0 / 3.0);
        assert_abs_diff_eq!(last.background_rejection, 0.6667, epsilon = 1e-4);
        assert_abs_diff_eq!(last.significance, 5.0710, epsilon = 1e-4);

        // Bins 1 and 2 (efficiencies 1.0 and 5/6) share the last ROC bin, bin 2 written last
        let second = curve.record_for_bin(2).unwrap();
        assert_eq!(roc.n_bins(), 3);
        assert_eq!(roc.get(1), None);
        assert_eq!(roc.get(2), Some(last.background_rejection));
        assert_eq!(roc.get(3), Some(second.background_rejection));
    }

    #[test]
    fn test_worked_example_from_min_to_bin() {
        let samples = samples(&[10.0, 20.0, 30.0], &[&[5.0, 5.0, 5.0]]);
        let (curve, _) = DiscriminationMetrics::new(CutDirection::FromMinToBin)
            .compute_full_curve(&samples)
            .unwrap();
        let first = curve.record_for_bin(1).unwrap();
        assert_relative_eq!(first.cut_value, 1.5);
        assert_relative_eq!(first.signal_count, 10.0);
        assert_relative_eq!(first.background_count, 5.0);
        assert_relative_eq!(first.signal_efficiency, 1.0 / 6.0);
        let last = curve.record_for_bin(3).unwrap();
        assert_relative_eq!(last.signal_efficiency, 1.0);
        assert_abs_diff_eq!(last.background_rejection, 0.0);
    }

    #[test]
    fn test_roc_round_trip_matches_records() {
        let samples = samples(
            &[0.0, 1.0, 2.0, 4.0, 8.0, 4.0, 2.0, 1.0, 0.0, 0.0],
            &[&[9.0, 6.0, 4.0, 3.0, 2.0, 1.0, 1.0, 0.0, 0.0, 0.0]],
        );
        let metrics = DiscriminationMetrics::new(CutDirection::FromBinToMax).with_roc_bins(4);
        let (curve, roc) = metrics.compute_full_curve(&samples).unwrap();
        assert_eq!(curve.roc_curve(4).unwrap(), roc);

        // Every record is visible unless a later record shares its bin
        for (i, record) in curve.records().iter().enumerate() {
            let bin = roc.find_bin(record.signal_efficiency);
            let overwritten = curve.records()[i + 1..]
                .iter()
                .any(|later| roc.find_bin(later.signal_efficiency) == bin);
            if !overwritten {
                assert_eq!(roc.get(bin), Some(record.background_rejection));
            }
        }
    }

    #[test]
    fn test_full_curve_requires_backgrounds() {
        let samples = samples(&[1.0, 2.0, 3.0], &[]);
        let err = DiscriminationMetrics::new(CutDirection::FromBinToMax)
            .compute_full_curve(&samples)
            .unwrap_err();
        assert_eq!(err, MetricsError::InvalidInput(InvalidInput::NoBackgrounds));
    }

    #[test]
    fn test_full_curve_rejects_empty_backgrounds() {
        let samples = samples(&[1.0, 2.0], &[&[0.0, 0.0]]);
        let err = DiscriminationMetrics::new(CutDirection::FromBinToMax)
            .compute_full_curve(&samples)
            .unwrap_err();
        assert_eq!(err, MetricsError::InvalidInput(InvalidInput::EmptyBackgrounds));
    }

    #[test]
    fn test_empty_signal_is_rejected_by_both_computations() {
        let samples = samples(&[0.0, 0.0], &[&[1.0, 1.0]]);
        let metrics = DiscriminationMetrics::new(CutDirection::FromMinToBin);
        let expected = MetricsError::InvalidInput(InvalidInput::EmptySignal);
        assert_eq!(metrics.compute_significance_curve(&samples), Err(expected.clone()));
        assert_eq!(metrics.compute_full_curve(&samples), Err(expected));
    }

    #[test]
    fn test_zero_roc_bins_is_rejected() {
        let samples = samples(&[1.0, 2.0], &[&[1.0, 1.0]]);
        let err = DiscriminationMetrics::new(CutDirection::FromBinToMax)
            .with_roc_bins(0)
            .compute_full_curve(&samples)
            .unwrap_err();
        assert_eq!(err, MetricsError::InvalidInput(InvalidInput::ZeroRocBins));
    }

    #[test]
    fn test_overflowing_scale_never_reaches_the_curves() {
        let signal = hist(&[10.0, 20.0, 30.0]);
        let background = hist(&[5.0, 5.0, 5.0]);
        for factor in [f64::MAX, f64::NAN] {
            let err = SampleSet::new(signal.scaled(factor), vec![background.clone()]).unwrap_err();
            assert!(matches!(
                err,
                MetricsError::InvalidInput(InvalidInput::NonFiniteCount { .. })
            ));
        }

        let samples = SampleSet::new(signal.scaled(1e300), vec![background]).unwrap();
        let (curve, _) = DiscriminationMetrics::new(CutDirection::FromBinToMax)
            .compute_full_curve(&samples)
            .unwrap();
        assert!(curve.iter().all(|r| r.significance.is_finite()));
    }

    #[test]
    fn test_engine_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiscriminationMetrics>();
        assert_send_sync::<SampleSet>();
        assert_send_sync::<MetricsCurve>();
        assert_send_sync::<SignificanceCurve>();
        assert_send_sync::<RocCurve>();
    }

    #[test]
    fn test_default_skip_thresholds_differ() {
        // Background only populates the first bin: tails beyond it have B == 0
        let samples = samples(&[1.0, 1.0, 1.0], &[&[4.0, 0.0, 0.0]]);
        let metrics = DiscriminationMetrics::new(CutDirection::FromBinToMax);

        let significance = metrics.compute_significance_curve(&samples).unwrap();
        assert_eq!(significance.len(), 1);
        assert_eq!(significance.points()[0].bin, 1);

        let (full, _) = metrics.compute_full_curve(&samples).unwrap();
        assert_eq!(full.len(), 3);
        assert_relative_eq!(full.record_for_bin(3).unwrap().significance, 1.0);
        assert_relative_eq!(full.record_for_bin(3).unwrap().background_rejection, 1.0);
    }

    #[test]
    fn test_explicit_skip_policy_applies_to_both() {
        let samples = samples(&[1.0, 1.0, 1.0], &[&[4.0, 0.0, 0.0]]);
        let metrics = DiscriminationMetrics::new(CutDirection::FromBinToMax)
            .with_skip_policy(SkipPolicy::ZeroBackground);
        let (full, _) = metrics.compute_full_curve(&samples).unwrap();
        assert_eq!(full.len(), 1);

        let metrics = metrics.with_skip_policy(SkipPolicy::ZeroTotal);
        let significance = metrics.compute_significance_curve(&samples).unwrap();
        assert_eq!(significance.len(), 3);
    }

    #[test]
    fn test_significance_curve_matches_full_curve() {
        let samples = samples(&[2.0, 5.0, 9.0, 4.0], &[&[8.0, 3.0, 1.0, 1.0], &[2.0, 2.0, 2.0, 2.0]]);
        let metrics = DiscriminationMetrics::new(CutDirection::FromMinToBin);
        let significance = metrics.compute_significance_curve(&samples).unwrap();
        let (full, _) = metrics.compute_full_curve(&samples).unwrap();
        assert_eq!(significance.len(), full.len());
        for (point, record) in significance.points().iter().zip(&full) {
            assert_eq!(point.bin, record.bin);
            assert_relative_eq!(point.significance, record.significance);
        }
        let best = significance.best().unwrap();
        assert_eq!(Some(best.bin), full.best_significance().map(|r| r.bin));
    }

    #[test]
    fn test_min_side_counts_underflow() {
        let axis = BinAxis::uniform(2, 0.0, 2.0).unwrap();
        let signal = Histogram::with_flows(axis.clone(), vec![1.0, 1.0], 2.0, 0.0).unwrap();
        let background = Histogram::new(axis, vec![1.0, 1.0]).unwrap();
        let samples = SampleSet::new(signal, vec![background]).unwrap();
        let (curve, _) = DiscriminationMetrics::new(CutDirection::FromMinToBin)
            .compute_full_curve(&samples)
            .unwrap();
        // Underflow enters the selection but not the total
        assert_relative_eq!(curve.record_for_bin(1).unwrap().signal_efficiency, 1.5);
    }
}
