use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;

use crate::error::AnalysisError;

/// Share of events assigned to training when nothing else is configured.
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.7;

/// How events are ordered before the split boundary is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitStrategy {
    /// Keep the input order.
    #[default]
    Sequential,
    /// Permute the events with a PCG generator seeded by `seed`.
    Shuffled { seed: u64 },
}

/// Events divided into a training and a testing partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit<T> {
    pub train: Vec<T>,
    pub test: Vec<T>,
}

/// Splits `events` into training and testing partitions.
///
/// With `n` events and `n_train = floor(n * train_fraction)`, the event at
/// position `i` goes to training when `i <= n_train`, so training receives
/// `min(n, n_train + 1)` events.
///
/// # Examples
///
/// ```
/// use discrim_analysis::split::{SplitStrategy, split_events};
///
/// let split = split_events((0..10).collect(), 0.7, SplitStrategy::Sequential).unwrap();
/// assert_eq!(split.train, [0, 1, 2, 3, 4, 5, 6, 7]);
/// assert_eq!(split.test, [8, 9]);
/// ```
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidFraction`] unless `train_fraction` is in `[0, 1]`.
pub fn split_events<T>(
    mut events: Vec<T>,
    train_fraction: f64,
    strategy: SplitStrategy,
) -> Result<TrainTestSplit<T>, AnalysisError> {
    if !(0.0..=1.0).contains(&train_fraction) {
        return Err(AnalysisError::InvalidFraction(train_fraction));
    }
    if let SplitStrategy::Shuffled { seed } = strategy {
        let mut rng = Pcg32::seed_from_u64(seed);
        events.shuffle(&mut rng);
    }

    let n_events = events.len();
    #[expect(clippy::cast_precision_loss)]
    let n_train = (n_events as f64 * train_fraction).floor();
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n_train = n_train as usize;

    let test = events.split_off(n_events.min(n_train + 1));
    tracing::debug!(
        events = n_events,
        train = events.len(),
        test = test.len(),
        ?strategy,
        "split events"
    );
    Ok(TrainTestSplit {
        train: events,
        test,
    })
}
