use discrim_stats::histogram::Histogram;

use crate::error::{InvalidInput, MetricsError, SampleRole};

/// One signal histogram and an ordered list of background histograms.
///
/// All histograms share the signal's binning and hold only finite,
/// non-negative counts; both are checked on construction.
///
/// # Examples
///
/// ```
/// use discrim_metrics::sample_set::SampleSet;
/// use discrim_stats::{axis::BinAxis, histogram::Histogram};
///
/// let axis = BinAxis::uniform(3, 0.5, 3.5).unwrap();
/// let signal = Histogram::new(axis.clone(), vec![10.0, 20.0, 30.0]).unwrap();
/// let background = Histogram::new(axis, vec![5.0, 5.0, 5.0]).unwrap();
///
/// let samples = SampleSet::new(signal, vec![background]).unwrap();
/// assert_eq!(samples.n_bins(), 3);
/// assert_eq!(samples.background_total(), 15.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    signal: Histogram,
    backgrounds: Vec<Histogram>,
}

impl SampleSet {
    pub fn new(signal: Histogram, backgrounds: Vec<Histogram>) -> Result<Self, MetricsError> {
        check_counts(&signal, SampleRole::Signal)?;
        for (index, background) in backgrounds.iter().enumerate() {
            if background.n_bins() != signal.n_bins() {
                return Err(InvalidInput::BinningMismatch {
                    index,
                    expected: signal.n_bins(),
                    found: background.n_bins(),
                }
                .into());
            }
            if !background.axis().same_binning(signal.axis()) {
                return Err(InvalidInput::ShiftedBinning { index }.into());
            }
            check_counts(background, SampleRole::Background(index))?;
        }
        Ok(Self {
            signal,
            backgrounds,
        })
    }

    #[must_use]
    pub fn signal(&self) -> &Histogram {
        &self.signal
    }

    #[must_use]
    pub fn backgrounds(&self) -> &[Histogram] {
        &self.backgrounds
    }

    #[must_use]
    pub fn n_bins(&self) -> usize {
        self.signal.n_bins()
    }

    /// Sum of the unconditional totals of every background.
    #[must_use]
    pub fn background_total(&self) -> f64 {
        self.backgrounds.iter().map(Histogram::total).sum()
    }

    #[must_use]
    pub fn into_parts(self) -> (Histogram, Vec<Histogram>) {
        (self.signal, self.backgrounds)
    }
}

// Histograms derived through `scaled` or `added` may carry non-finite counts.
fn check_counts(hist: &Histogram, sample: SampleRole) -> Result<(), MetricsError> {
    if let Some(bin) = hist.first_non_finite_bin() {
        return Err(InvalidInput::NonFiniteCount { sample, bin }.into());
    }
    if let Some(bin) = hist.first_negative_bin() {
        return Err(InvalidInput::NegativeCount { sample, bin }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use discrim_stats::axis::BinAxis;

    use super::*;

    fn hist(n_bins: usize, counts: &[f64]) -> Histogram {
        let axis = BinAxis::uniform(n_bins, 0.0, 1.0).unwrap();
        Histogram::new(axis, counts.to_vec()).unwrap()
    }

    #[test]
    fn test_accepts_no_backgrounds() {
        let samples = SampleSet::new(hist(2, &[1.0, 1.0]), vec![]).unwrap();
        assert!(samples.backgrounds().is_empty());
        assert_eq!(samples.background_total(), 0.0);
    }

    #[test]
    fn test_rejects_mismatched_binning() {
        let err = SampleSet::new(
            hist(2, &[1.0, 1.0]),
            vec![hist(2, &[1.0, 1.0]), hist(3, &[1.0, 1.0, 1.0])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            MetricsError::InvalidInput(InvalidInput::BinningMismatch {
                index: 1,
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_rejects_shifted_binning() {
        let shifted = Histogram::new(BinAxis::uniform(2, 0.5, 1.5).unwrap(), vec![1.0, 1.0]).unwrap();
        let err = SampleSet::new(hist(2, &[1.0, 1.0]), vec![shifted]).unwrap_err();
        assert_eq!(
            err,
            MetricsError::InvalidInput(InvalidInput::ShiftedBinning { index: 0 })
        );
        assert_eq!(
            err.to_string(),
            "invalid input: background #0 has the signal's bin count but shifted bin centers"
        );
    }

    #[test]
    fn test_rejects_negative_counts() {
        let err = SampleSet::new(hist(2, &[1.0, -1.0]), vec![]).unwrap_err();
        assert_eq!(
            err,
            MetricsError::InvalidInput(InvalidInput::NegativeCount {
                sample: SampleRole::Signal,
                bin: 2
            })
        );

        let err = SampleSet::new(hist(2, &[1.0, 1.0]), vec![hist(2, &[-3.0, 1.0])]).unwrap_err();
        assert_eq!(
            err,
            MetricsError::InvalidInput(InvalidInput::NegativeCount {
                sample: SampleRole::Background(0),
                bin: 1
            })
        );
    }

    #[test]
    fn test_rejects_non_finite_counts() {
        let signal = hist(2, &[1.0, 2.0]);
        let err = SampleSet::new(signal.scaled(f64::MAX), vec![]).unwrap_err();
        assert_eq!(
            err,
            MetricsError::InvalidInput(InvalidInput::NonFiniteCount {
                sample: SampleRole::Signal,
                bin: 2
            })
        );

        let err = SampleSet::new(signal.clone(), vec![signal.scaled(f64::NAN)]).unwrap_err();
        assert_eq!(
            err,
            MetricsError::InvalidInput(InvalidInput::NonFiniteCount {
                sample: SampleRole::Background(0),
                bin: 0
            })
        );
    }
}
