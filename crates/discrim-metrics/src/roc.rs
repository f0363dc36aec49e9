//! ROC curves on a fixed signal-efficiency axis
//!
//! A [`RocCurve`] maps signal-efficiency bins over `[0, 1]` to background
//! rejection values. The efficiency axis is independent from the discriminant
//! axis the curve was computed from: many discriminant bins can collapse into
//! one efficiency bin, in which case the last write wins.
//!
//! ```text
//! rejection
//!   1 |*  *
//!     |      *
//!     |         *
//!   0 +-----------*-> signal efficiency
//!     0            1
//! ```

use discrim_stats::axis::BinAxis;
use serde::{Serialize, Serializer, ser::SerializeStruct as _};

use crate::error::InvalidInput;

/// A single filled point of a ROC curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocPoint {
    /// Center of the efficiency bin.
    pub signal_efficiency: f64,
    pub background_rejection: f64,
}

/// Background rejection as a function of binned signal efficiency.
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    axis: BinAxis,
    rejection: Vec<Option<f64>>,
}

impl RocCurve {
    /// Creates an empty curve with `n_bins` efficiency bins over `[0, 1]`.
    pub fn new(n_bins: usize) -> Result<Self, InvalidInput> {
        let axis = BinAxis::uniform(n_bins, 0.0, 1.0).map_err(|_| InvalidInput::ZeroRocBins)?;
        Ok(Self {
            axis,
            rejection: vec![None; n_bins],
        })
    }

    /// Builds a curve by writing `points` in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use discrim_metrics::roc::{RocCurve, RocPoint};
    ///
    /// let points = [
    ///     RocPoint { signal_efficiency: 0.52, background_rejection: 0.4 },
    ///     RocPoint { signal_efficiency: 0.58, background_rejection: 0.6 },
    /// ];
    /// let roc = RocCurve::from_points(10, points).unwrap();
    ///
    /// // Both points fall into the same efficiency bin; the later one wins.
    /// assert_eq!(roc.rejection_at(0.55), Some(0.6));
    /// assert_eq!(roc.points().count(), 1);
    /// ```
    pub fn from_points<I>(n_bins: usize, points: I) -> Result<Self, InvalidInput>
    where
        I: IntoIterator<Item = RocPoint>,
    {
        let mut curve = Self::new(n_bins)?;
        for point in points {
            curve.set(point.signal_efficiency, point.background_rejection);
        }
        Ok(curve)
    }

    #[must_use]
    pub fn n_bins(&self) -> usize {
        self.rejection.len()
    }

    /// The efficiency bin (1-based) that holds `efficiency`.
    ///
    /// This is the bin whose center is nearest to `efficiency`. Values outside
    /// `[0, 1)` are clamped into the first or last bin, so a full efficiency
    /// of `1.0` lands in the last bin.
    #[must_use]
    pub fn find_bin(&self, efficiency: f64) -> usize {
        self.axis.find_bin(efficiency).clamp(1, self.n_bins())
    }

    /// Center of efficiency bin `bin` (1-based).
    #[must_use]
    pub fn bin_center(&self, bin: usize) -> f64 {
        self.axis.center(bin)
    }

    /// Writes `rejection` into the bin of `efficiency`, replacing any earlier
    /// value, and returns that bin.
    pub fn set(&mut self, efficiency: f64, rejection: f64) -> usize {
        let bin = self.find_bin(efficiency);
        self.rejection[bin - 1] = Some(rejection);
        bin
    }

    /// Rejection stored in efficiency bin `bin` (1-based).
    #[must_use]
    pub fn get(&self, bin: usize) -> Option<f64> {
        bin.checked_sub(1)
            .and_then(|i| self.rejection.get(i).copied().flatten())
    }

    #[must_use]
    pub fn rejection_at(&self, efficiency: f64) -> Option<f64> {
        self.get(self.find_bin(efficiency))
    }

    /// Filled bins in ascending efficiency order.
    pub fn points(&self) -> impl Iterator<Item = RocPoint> + '_ {
        self.rejection
            .iter()
            .enumerate()
            .filter_map(|(i, rejection)| {
                rejection.map(|background_rejection| RocPoint {
                    signal_efficiency: self.axis.center(i + 1),
                    background_rejection,
                })
            })
    }

    /// Trapezoidal area under the filled points.
    ///
    /// Returns `None` when fewer than two bins are filled.
    #[must_use]
    pub fn area(&self) -> Option<f64> {
        let points = self.points().collect::<Vec<_>>();
        if points.len() < 2 {
            return None;
        }
        let area = points
            .windows(2)
            .map(|w| {
                let width = w[1].signal_efficiency - w[0].signal_efficiency;
                0.5 * width * (w[0].background_rejection + w[1].background_rejection)
            })
            .sum();
        Some(area)
    }
}

impl Serialize for RocCurve {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("RocCurve", 2)?;
        state.serialize_field("n_bins", &self.n_bins())?;
        state.serialize_field("points", &self.points().collect::<Vec<_>>())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_rejects_zero_bins() {
        assert_eq!(RocCurve::new(0), Err(InvalidInput::ZeroRocBins));
    }

    #[test]
    fn test_find_bin_clamps_edges() {
        let roc = RocCurve::new(4).unwrap();
        assert_eq!(roc.find_bin(0.0), 1);
        assert_eq!(roc.find_bin(-0.1), 1);
        assert_eq!(roc.find_bin(0.3), 2);
        assert_eq!(roc.find_bin(0.99), 4);
        assert_eq!(roc.find_bin(1.0), 4);
    }

    #[test]
    fn test_find_bin_is_nearest_center() {
        let roc = RocCurve::new(10).unwrap();
        for efficiency in [0.01, 0.149, 0.151, 0.52, 0.77, 0.999] {
            let bin = roc.find_bin(efficiency);
            let nearest = (1..=10)
                .min_by(|&a, &b| {
                    let da = (roc.bin_center(a) - efficiency).abs();
                    let db = (roc.bin_center(b) - efficiency).abs();
                    da.total_cmp(&db)
                })
                .unwrap();
            assert_eq!(bin, nearest, "efficiency {efficiency}");
        }
    }

    #[test]
    fn test_set_last_write_wins() {
        let mut roc = RocCurve::new(2).unwrap();
        assert_eq!(roc.set(0.1, 0.9), 1);
        assert_eq!(roc.set(0.2, 0.8), 1);
        assert_eq!(roc.get(1), Some(0.8));
        assert_eq!(roc.get(2), None);
        assert_eq!(roc.get(0), None);
        assert_eq!(roc.get(3), None);
    }

    #[test]
    fn test_points_are_ascending_centers() {
        let mut roc = RocCurve::new(4).unwrap();
        roc.set(0.9, 0.1);
        roc.set(0.1, 0.9);
        let points = roc.points().collect::<Vec<_>>();
        assert_eq!(points.len(), 2);
        assert_relative_eq!(points[0].signal_efficiency, 0.125);
        assert_relative_eq!(points[1].signal_efficiency, 0.875);
        assert_relative_eq!(points[0].background_rejection, 0.9);
    }

    #[test]
    fn test_area_trapezoid() {
        let mut roc = RocCurve::new(2).unwrap();
        assert_eq!(roc.area(), None);
        roc.set(0.25, 1.0);
        roc.set(0.75, 0.0);
        // Points at 0.25 and 0.75: 0.5 * 0.5 * (1.0 + 0.0)
        assert_relative_eq!(roc.area().unwrap(), 0.25);
    }

    #[test]
    fn test_serializes_filled_points() {
        let mut roc = RocCurve::new(2).unwrap();
        roc.set(0.75, 0.5);
        let json = serde_json::to_value(&roc).unwrap();
        assert_eq!(json["n_bins"], 2);
        assert_eq!(json["points"][0]["signal_efficiency"], 0.75);
        assert_eq!(json["points"][0]["background_rejection"], 0.5);
    }
}
