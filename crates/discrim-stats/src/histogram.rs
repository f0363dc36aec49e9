use std::ops::RangeInclusive;

use crate::{HistogramError, axis::BinAxis};

/// An immutable one-dimensional binned histogram.
///
/// Holds one count per in-range bin plus the underflow and overflow counts.
/// Counts are real-valued so that weighted and scaled histograms share the
/// same representation. Every transformation returns a new histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    axis: BinAxis,
    counts: Vec<f64>,
    underflow: f64,
    overflow: f64,
}

impl Histogram {
    /// Creates a histogram with empty underflow and overflow bins.
    ///
    /// # Examples
    ///
    /// ```
    /// # use discrim_stats::{axis::BinAxis, histogram::Histogram};
    /// let axis = BinAxis::uniform(2, 0.0, 2.0).unwrap();
    /// assert!(Histogram::new(axis.clone(), vec![1.0, 2.0]).is_ok());
    /// assert!(Histogram::new(axis, vec![1.0]).is_err());
    /// ```
    pub fn new(axis: BinAxis, counts: Vec<f64>) -> Result<Self, HistogramError> {
        Self::with_flows(axis, counts, 0.0, 0.0)
    }

    /// Creates a histogram with explicit underflow and overflow counts.
    pub fn with_flows(
        axis: BinAxis,
        counts: Vec<f64>,
        underflow: f64,
        overflow: f64,
    ) -> Result<Self, HistogramError> {
        if counts.len() != axis.n_bins() {
            return Err(HistogramError::CountLengthMismatch {
                expected: axis.n_bins(),
                found: counts.len(),
            });
        }
        let this = Self {
            axis,
            counts,
            underflow,
            overflow,
        };
        if let Some(bin) = this.all_bins().find(|&bin| !this.bin_content(bin).is_finite()) {
            return Err(HistogramError::NonFiniteCount { bin });
        }
        Ok(this)
    }

    /// Fills a histogram with unit weight for every value.
    ///
    /// Values outside the axis range are counted in the underflow/overflow bins.
    #[must_use]
    pub fn from_values<I>(axis: BinAxis, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut slots = vec![0.0; axis.n_bins() + 2];
        for value in values {
            slots[axis.find_bin(value)] += 1.0;
        }
        let overflow = slots.pop().unwrap_or_default();
        let underflow = slots.remove(0);
        Self {
            axis,
            counts: slots,
            underflow,
            overflow,
        }
    }

    #[must_use]
    pub fn axis(&self) -> &BinAxis {
        &self.axis
    }

    #[must_use]
    pub fn n_bins(&self) -> usize {
        self.axis.n_bins()
    }

    /// In-range bin counts, index `0` holding bin `1`.
    #[must_use]
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    #[must_use]
    pub fn underflow(&self) -> f64 {
        self.underflow
    }

    #[must_use]
    pub fn overflow(&self) -> f64 {
        self.overflow
    }

    /// Center of in-range bin `bin` (1-based).
    #[must_use]
    pub fn bin_center(&self, bin: usize) -> f64 {
        self.axis.center(bin)
    }

    /// Content of bin `bin`, where `0` is underflow and `n_bins + 1` is overflow.
    ///
    /// Bins past the overflow slot are empty.
    #[must_use]
    pub fn bin_content(&self, bin: usize) -> f64 {
        let n_bins = self.n_bins();
        match bin {
            0 => self.underflow,
            b if b <= n_bins => self.counts[b - 1],
            b if b == n_bins + 1 => self.overflow,
            _ => 0.0,
        }
    }

    /// Sum of bins `first..=last`, both inclusive.
    ///
    /// `last` is clamped to the overflow bin; an empty range sums to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use discrim_stats::{axis::BinAxis, histogram::Histogram};
    /// let axis = BinAxis::uniform(3, 0.0, 3.0).unwrap();
    /// let hist = Histogram::with_flows(axis, vec![1.0, 2.0, 3.0], 4.0, 5.0).unwrap();
    /// assert_eq!(hist.integral(0, 1), 5.0);
    /// assert_eq!(hist.integral(2, 3), 5.0);
    /// assert_eq!(hist.integral(3, 100), 8.0);
    /// assert_eq!(hist.integral(3, 2), 0.0);
    /// ```
    #[must_use]
    pub fn integral(&self, first: usize, last: usize) -> f64 {
        let last = last.min(self.n_bins() + 1);
        if first > last {
            return 0.0;
        }
        (first..=last).map(|bin| self.bin_content(bin)).sum()
    }

    /// Sum of all in-range bins, excluding underflow and overflow.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Largest in-range bin content.
    #[must_use]
    pub fn max_content(&self) -> f64 {
        self.counts.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Whether every bin, including underflow and overflow, is non-negative.
    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        self.first_negative_bin().is_none()
    }

    /// First bin (in `0..=n_bins + 1` numbering) holding a negative count.
    #[must_use]
    pub fn first_negative_bin(&self) -> Option<usize> {
        self.all_bins().find(|&bin| self.bin_content(bin) < 0.0)
    }

    /// First bin (in `0..=n_bins + 1` numbering) holding an infinite or NaN count.
    #[must_use]
    pub fn first_non_finite_bin(&self) -> Option<usize> {
        self.all_bins().find(|&bin| !self.bin_content(bin).is_finite())
    }

    /// Returns a copy with every bin multiplied by `factor`.
    ///
    /// The result is not validated: a non-finite `factor` or an overflowing
    /// product yields non-finite counts (see
    /// [`first_non_finite_bin`](Self::first_non_finite_bin)).
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            axis: self.axis.clone(),
            counts: self.counts.iter().map(|c| c * factor).collect(),
            underflow: self.underflow * factor,
            overflow: self.overflow * factor,
        }
    }

    /// Returns a copy scaled to unit [`total`](Self::total).
    ///
    /// Returns `None` when the total is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use discrim_stats::{axis::BinAxis, histogram::Histogram};
    /// let axis = BinAxis::uniform(2, 0.0, 2.0).unwrap();
    /// let hist = Histogram::new(axis.clone(), vec![1.0, 3.0]).unwrap();
    /// assert_eq!(hist.normalized().unwrap().counts(), &[0.25, 0.75]);
    ///
    /// let empty = Histogram::new(axis, vec![0.0, 0.0]).unwrap();
    /// assert!(empty.normalized().is_none());
    /// ```
    #[must_use]
    pub fn normalized(&self) -> Option<Self> {
        let total = self.total();
        (total != 0.0).then(|| self.scaled(1.0 / total))
    }

    /// Merges every `group` consecutive bins into one.
    ///
    /// When the bin count is not a multiple of `group`, the trailing bins are
    /// folded into the overflow bin.
    ///
    /// # Examples
    ///
    /// ```
    /// # use discrim_stats::{axis::BinAxis, histogram::Histogram};
    /// let axis = BinAxis::uniform(5, 0.0, 5.0).unwrap();
    /// let hist = Histogram::new(axis, vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    /// let rebinned = hist.rebinned(2).unwrap();
    /// assert_eq!(rebinned.counts(), &[3.0, 7.0]);
    /// assert_eq!(rebinned.overflow(), 5.0);
    /// ```
    pub fn rebinned(&self, group: usize) -> Result<Self, HistogramError> {
        let axis = self.axis.merged(group)?;
        let kept = axis.n_bins();
        let counts = self
            .counts
            .chunks(group)
            .take(kept)
            .map(|chunk| chunk.iter().sum())
            .collect();
        let folded = self.counts[kept * group..].iter().sum::<f64>();
        Ok(Self {
            axis,
            counts,
            underflow: self.underflow,
            overflow: self.overflow + folded,
        })
    }

    /// Bin-by-bin sum of two histograms with the same binning.
    ///
    /// Like [`scaled`](Self::scaled), sums that overflow are kept as infinite
    /// counts.
    pub fn added(&self, other: &Self) -> Result<Self, HistogramError> {
        if !self.axis.same_binning(&other.axis) {
            return Err(HistogramError::BinningMismatch);
        }
        Ok(Self {
            axis: self.axis.clone(),
            counts: self
                .counts
                .iter()
                .zip(&other.counts)
                .map(|(a, b)| a + b)
                .collect(),
            underflow: self.underflow + other.underflow,
            overflow: self.overflow + other.overflow,
        })
    }

    fn all_bins(&self) -> RangeInclusive<usize> {
        0..=self.n_bins() + 1
    }
}
