use crate::HistogramError;

/// Relative tolerance used when comparing bin centers of two axes.
const CENTER_TOLERANCE: f64 = 1e-9;

/// The binning of a one-dimensional histogram.
///
/// Stores `n_bins + 1` finite, strictly increasing edges. In-range bins are
/// numbered `1..=n_bins`; bin `0` is the underflow slot and bin `n_bins + 1`
/// is the overflow slot.
#[derive(Debug, Clone, PartialEq)]
pub struct BinAxis {
    edges: Vec<f64>,
}

impl BinAxis {
    /// Creates an axis with `n_bins` equal-width bins spanning `[min, max)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use discrim_stats::axis::BinAxis;
    /// let axis = BinAxis::uniform(4, 0.0, 1.0).unwrap();
    /// assert_eq!(axis.n_bins(), 4);
    /// assert_eq!(axis.low_edge(2), 0.25);
    /// assert_eq!(axis.center(4), 0.875);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn uniform(n_bins: usize, min: f64, max: f64) -> Result<Self, HistogramError> {
        if n_bins == 0 {
            return Err(HistogramError::NoBins);
        }
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(HistogramError::InvalidRange { min, max });
        }
        let width = (max - min) / n_bins as f64;
        // Pin the last edge to `max` so that accumulated rounding never moves it
        let edges = (0..=n_bins)
            .map(|i| if i == n_bins { max } else { min + i as f64 * width })
            .collect();
        Ok(Self { edges })
    }

    /// Creates an axis from explicit bin edges.
    ///
    /// # Examples
    ///
    /// ```
    /// # use discrim_stats::axis::BinAxis;
    /// let axis = BinAxis::from_edges(vec![0.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(axis.center(2), 2.0);
    /// assert!(BinAxis::from_edges(vec![0.0, 0.0]).is_err());
    /// ```
    pub fn from_edges(edges: Vec<f64>) -> Result<Self, HistogramError> {
        if edges.len() < 2 {
            return Err(HistogramError::NoBins);
        }
        if let Some(index) = edges
            .windows(2)
            .position(|w| !(w[0].is_finite() && w[1].is_finite() && w[0] < w[1]))
        {
            return Err(HistogramError::UnorderedEdges { index });
        }
        Ok(Self { edges })
    }

    /// Number of in-range bins.
    #[must_use]
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Lower edge of the first bin.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.edges[0]
    }

    /// Upper edge of the last bin.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.edges[self.n_bins()]
    }

    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Lower edge of in-range bin `bin` (1-based).
    ///
    /// # Panics
    ///
    /// Panics if `bin` is not in `1..=n_bins`.
    #[must_use]
    pub fn low_edge(&self, bin: usize) -> f64 {
        self.check_bin(bin);
        self.edges[bin - 1]
    }

    /// Upper edge of in-range bin `bin` (1-based).
    ///
    /// # Panics
    ///
    /// Panics if `bin` is not in `1..=n_bins`.
    #[must_use]
    pub fn up_edge(&self, bin: usize) -> f64 {
        self.check_bin(bin);
        self.edges[bin]
    }

    /// Center of in-range bin `bin` (1-based).
    ///
    /// # Panics
    ///
    /// Panics if `bin` is not in `1..=n_bins`.
    #[must_use]
    pub fn center(&self, bin: usize) -> f64 {
        0.5 * (self.low_edge(bin) + self.up_edge(bin))
    }

    /// Returns the bin containing `x`.
    ///
    /// Values below the axis map to the underflow bin `0`, values at or above
    /// the upper edge (and NaN) map to the overflow bin `n_bins + 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use discrim_stats::axis::BinAxis;
    /// let axis = BinAxis::uniform(2, 0.0, 2.0).unwrap();
    /// assert_eq!(axis.find_bin(-0.5), 0);
    /// assert_eq!(axis.find_bin(0.0), 1);
    /// assert_eq!(axis.find_bin(1.0), 2);
    /// assert_eq!(axis.find_bin(2.0), 3);
    /// ```
    #[must_use]
    pub fn find_bin(&self, x: f64) -> usize {
        if x < self.min() {
            0
        } else if x.is_nan() || x >= self.max() {
            self.n_bins() + 1
        } else {
            self.edges.partition_point(|&edge| edge <= x)
        }
    }

    /// Returns a coarser axis where every `group` consecutive bins are merged.
    ///
    /// Trailing bins that do not fill a whole group are dropped from the axis.
    pub fn merged(&self, group: usize) -> Result<Self, HistogramError> {
        let n_bins = self.n_bins();
        if group == 0 || group > n_bins {
            return Err(HistogramError::InvalidRebin { group, n_bins });
        }
        let edges = self.edges.iter().copied().step_by(group).collect::<Vec<_>>();
        let kept = n_bins / group;
        Ok(Self {
            edges: edges[..=kept].to_vec(),
        })
    }

    /// Whether both axes have the same number of bins at the same centers.
    #[must_use]
    pub fn same_binning(&self, other: &Self) -> bool {
        self.n_bins() == other.n_bins()
            && (1..=self.n_bins()).all(|bin| {
                let (a, b) = (self.center(bin), other.center(bin));
                (a - b).abs() <= CENTER_TOLERANCE * f64::max(1.0, a.abs().max(b.abs()))
            })
    }

    fn check_bin(&self, bin: usize) {
        assert!(
            (1..=self.n_bins()).contains(&bin),
            "bin {bin} out of range 1..={}",
            self.n_bins()
        );
    }
}
