//! Cut direction and empty-tail policy
//!
//! A cut at bin `b` selects either everything up to and including `b`
//! ([`CutDirection::FromMinToBin`]) or everything from `b` onwards
//! ([`CutDirection::FromBinToMax`]). The *tail integral* of a histogram at `b`
//! is the number of events the cut selects.

use discrim_stats::{axis::BinAxis, histogram::Histogram};
use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Which side of the discriminant a cut keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutDirection {
    /// Keep bins `0..=b` (the underflow slot included).
    FromMinToBin,
    /// Keep bins `b..=n` (the overflow slot excluded).
    FromBinToMax,
}

impl CutDirection {
    /// Maps the pair of boolean switches used by older analysis scripts.
    ///
    /// Exactly one of the two must be set.
    ///
    /// # Examples
    ///
    /// ```
    /// use discrim_metrics::direction::CutDirection;
    ///
    /// assert_eq!(CutDirection::from_flags(false, true), Ok(CutDirection::FromBinToMax));
    /// assert!(CutDirection::from_flags(true, true).is_err());
    /// assert!(CutDirection::from_flags(false, false).is_err());
    /// ```
    pub fn from_flags(min_to_x: bool, x_to_max: bool) -> Result<Self, InvalidInput> {
        match (min_to_x, x_to_max) {
            (true, false) => Ok(Self::FromMinToBin),
            (false, true) => Ok(Self::FromBinToMax),
            _ => Err(InvalidInput::AmbiguousDirection),
        }
    }

    /// Events selected by a cut at in-range bin `bin`.
    #[must_use]
    pub fn tail_integral(self, hist: &Histogram, bin: usize) -> f64 {
        match self {
            Self::FromMinToBin => hist.integral(0, bin),
            Self::FromBinToMax => hist.integral(bin, hist.n_bins()),
        }
    }

    /// Tail integrals for every in-range bin, index `0` holding bin `1`.
    ///
    /// Equivalent to calling [`tail_integral`](Self::tail_integral) for each
    /// bin, in a single pass.
    #[must_use]
    pub fn tail_integrals(self, hist: &Histogram) -> Vec<f64> {
        let counts = hist.counts();
        match self {
            Self::FromMinToBin => counts
                .iter()
                .scan(hist.underflow(), |acc, count| {
                    *acc += count;
                    Some(*acc)
                })
                .collect(),
            Self::FromBinToMax => {
                let mut tails = counts
                    .iter()
                    .rev()
                    .scan(0.0, |acc, count| {
                        *acc += count;
                        Some(*acc)
                    })
                    .collect::<Vec<_>>();
                tails.reverse();
                tails
            }
        }
    }

    /// The axis coordinate at which a cut at `bin` is placed.
    ///
    /// This is the upper edge of `bin` for [`FromMinToBin`](Self::FromMinToBin)
    /// and its lower edge for [`FromBinToMax`](Self::FromBinToMax).
    #[must_use]
    pub fn cut_value(self, axis: &BinAxis, bin: usize) -> f64 {
        match self {
            Self::FromMinToBin => axis.up_edge(bin),
            Self::FromBinToMax => axis.low_edge(bin),
        }
    }
}

/// When a bin's selection counts as an empty tail and is left out of a curve.
///
/// Skipping is a policy outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipPolicy {
    /// Skip bins where the selected background is zero.
    ZeroBackground,
    /// Skip bins where the selected signal plus background is zero.
    ZeroTotal,
}

impl SkipPolicy {
    #[must_use]
    pub fn skips(self, signal: f64, background: f64) -> bool {
        match self {
            Self::ZeroBackground => background == 0.0,
            Self::ZeroTotal => signal + background == 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn hist() -> Histogram {
        let axis = BinAxis::uniform(4, 0.0, 4.0).unwrap();
        Histogram::with_flows(axis, vec![1.0, 2.0, 3.0, 4.0], 0.5, 8.0).unwrap()
    }

    #[test]
    fn test_tail_integral_min_side_includes_underflow() {
        let h = hist();
        assert_relative_eq!(CutDirection::FromMinToBin.tail_integral(&h, 1), 1.5);
        assert_relative_eq!(CutDirection::FromMinToBin.tail_integral(&h, 4), 10.5);
    }

    #[test]
    fn test_tail_integral_max_side_excludes_overflow() {
        let h = hist();
        assert_relative_eq!(CutDirection::FromBinToMax.tail_integral(&h, 1), 10.0);
        assert_relative_eq!(CutDirection::FromBinToMax.tail_integral(&h, 4), 4.0);
    }

    #[test]
    fn test_tail_integrals_match_single_bin_integrals() {
        let h = hist();
        for direction in [CutDirection::FromMinToBin, CutDirection::FromBinToMax] {
            let tails = direction.tail_integrals(&h);
            assert_eq!(tails.len(), 4);
            for (i, tail) in tails.iter().enumerate() {
                assert_relative_eq!(*tail, direction.tail_integral(&h, i + 1));
            }
        }
    }

    #[test]
    fn test_cut_value() {
        let axis = BinAxis::uniform(4, 0.0, 4.0).unwrap();
        assert_relative_eq!(CutDirection::FromMinToBin.cut_value(&axis, 2), 2.0);
        assert_relative_eq!(CutDirection::FromBinToMax.cut_value(&axis, 2), 1.0);
    }

    #[test]
    fn test_skip_policies() {
        assert!(SkipPolicy::ZeroBackground.skips(5.0, 0.0));
        assert!(!SkipPolicy::ZeroTotal.skips(5.0, 0.0));
        assert!(SkipPolicy::ZeroTotal.skips(0.0, 0.0));
        assert!(!SkipPolicy::ZeroBackground.skips(0.0, 1.0));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&CutDirection::FromBinToMax).unwrap();
        assert_eq!(json, "\"from_bin_to_max\"");
        let policy: SkipPolicy = serde_json::from_str("\"zero_total\"").unwrap();
        assert_eq!(policy, SkipPolicy::ZeroTotal);
    }
}
