use discrim_metrics::{
    DiscriminationMetrics, overtraining::OvertrainingCheck, sample_set::SampleSet,
};
use discrim_stats::{HistogramError, axis::BinAxis, histogram::Histogram};

use crate::error::AnalysisError;

/// Classifier responses of one sample on its training and testing events.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleResponses {
    pub name: String,
    pub train: Vec<f64>,
    pub test: Vec<f64>,
}

/// Binning of classifier responses: 1000 bins on `[-1, 1]`.
pub fn default_response_axis() -> Result<BinAxis, HistogramError> {
    BinAxis::uniform(1000, -1.0, 1.0)
}

/// Histograms the responses of every sample on `axis` and compares the ROC
/// curves of the training and testing events.
///
/// The first sample is the signal; every other sample is a background.
///
/// # Errors
///
/// Returns [`AnalysisError::NotEnoughSamples`] with fewer than two samples and
/// any error of the metrics engine.
pub fn check_overtraining(
    responses: &[SampleResponses],
    axis: &BinAxis,
    metrics: &DiscriminationMetrics,
) -> Result<OvertrainingCheck, AnalysisError> {
    let [signal, backgrounds @ ..] = responses else {
        return Err(AnalysisError::NotEnoughSamples(0));
    };
    if backgrounds.is_empty() {
        return Err(AnalysisError::NotEnoughSamples(responses.len()));
    }

    let fill = |values: &[f64]| Histogram::from_values(axis.clone(), values.iter().copied());
    let train = SampleSet::new(
        fill(&signal.train),
        backgrounds.iter().map(|s| fill(&s.train)).collect(),
    )?;
    let test = SampleSet::new(
        fill(&signal.test),
        backgrounds.iter().map(|s| fill(&s.test)).collect(),
    )?;

    for sample in responses {
        tracing::info!(
            sample = %sample.name,
            train = sample.train.len(),
            test = sample.test.len(),
            "filled response histograms"
        );
    }
    let check = OvertrainingCheck::compare(metrics, &train, &test)?;
    tracing::info!(
        max_rejection_gap = ?check.max_rejection_gap(),
        "overtraining check done"
    );
    Ok(check)
}

#[cfg(test)]
mod tests {
    use discrim_metrics::direction::CutDirection;

    use super::*;

    fn responses(name: &str, train: &[f64], test: &[f64]) -> SampleResponses {
        SampleResponses {
            name: name.to_owned(),
            train: train.to_vec(),
            test: test.to_vec(),
        }
    }

    #[test]
    fn test_default_response_axis() {
        let axis = default_response_axis().unwrap();
        assert_eq!(axis.n_bins(), 1000);
        assert_eq!(axis.min(), -1.0);
        assert_eq!(axis.max(), 1.0);
    }

    #[test]
    fn test_same_responses_are_compatible() {
        let signal = [0.5, 0.6, 0.7, 0.8, 0.2];
        let background = [-0.5, -0.6, -0.1, 0.3, -0.9];
        let samples = [
            responses("sig", &signal, &signal),
            responses("bkg", &background, &background),
        ];
        let axis = BinAxis::uniform(20, -1.0, 1.0).unwrap();
        let metrics = DiscriminationMetrics::new(CutDirection::FromBinToMax);
        let check = check_overtraining(&samples, &axis, &metrics).unwrap();
        assert_eq!(check.train_roc.n_bins(), 20);
        assert!(check.is_compatible(1e-12));
    }

    #[test]
    fn test_overtrained_responses_show_gap() {
        let samples = [
            responses("sig", &[0.9, 0.95, 0.85, 0.9], &[0.1, 0.4, -0.2, 0.6]),
            responses("bkg", &[-0.9, -0.8, -0.95, -0.85], &[0.2, -0.3, 0.5, -0.1]),
        ];
        let axis = BinAxis::uniform(10, -1.0, 1.0).unwrap();
        let metrics = DiscriminationMetrics::new(CutDirection::FromBinToMax);
        let check = check_overtraining(&samples, &axis, &metrics).unwrap();
        assert!(check.max_rejection_gap().unwrap() > 0.0);
        assert!(!check.is_compatible(0.1));
    }

    #[test]
    fn test_requires_two_samples() {
        let axis = BinAxis::uniform(10, -1.0, 1.0).unwrap();
        let metrics = DiscriminationMetrics::new(CutDirection::FromBinToMax);
        assert!(matches!(
            check_overtraining(&[], &axis, &metrics),
            Err(AnalysisError::NotEnoughSamples(0))
        ));
        assert!(matches!(
            check_overtraining(&[responses("sig", &[0.5], &[0.5])], &axis, &metrics),
            Err(AnalysisError::NotEnoughSamples(1))
        ));
    }
}
