use discrim_metrics::sample_set::SampleSet;
use discrim_stats::histogram::Histogram;

use crate::{error::AnalysisError, manifest::SampleManifest, source::HistogramSource};

/// The samples of a manifest that could be loaded, as a [`SampleSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSamples {
    pub signal_name: String,
    /// Names of the loaded backgrounds, in the order of `samples.backgrounds()`
    pub background_names: Vec<String>,
    pub samples: SampleSet,
}

impl LoadedSamples {
    /// `(name, histogram)` of every background, in manifest order.
    pub fn backgrounds(&self) -> impl Iterator<Item = (&str, &Histogram)> {
        self.background_names
            .iter()
            .map(String::as_str)
            .zip(self.samples.backgrounds())
    }
}

/// Loads histogram `histogram` of every manifest sample and merges `rebin`
/// consecutive bins of each.
///
/// The signal sample must be available. Unavailable background samples are
/// skipped with a warning.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyManifest`] for an empty manifest,
/// [`AnalysisError::MissingSignal`] if the signal sample is unavailable, and
/// any error of the source, the rebinning or the sample-set validation.
pub fn load_samples<S>(
    manifest: &SampleManifest,
    source: &S,
    histogram: &str,
    rebin: usize,
) -> Result<LoadedSamples, AnalysisError>
where
    S: HistogramSource + ?Sized,
{
    let signal_name = manifest.signal()?;
    let signal = source
        .load(signal_name, histogram)?
        .ok_or_else(|| AnalysisError::MissingSignal {
            name: signal_name.to_owned(),
        })?
        .rebinned(rebin)?;
    tracing::info!(sample = signal_name, histogram, total = signal.total(), "loaded signal");

    let mut background_names = vec![];
    let mut backgrounds = vec![];
    for name in manifest.backgrounds() {
        let Some(hist) = source.load(name, histogram)? else {
            tracing::warn!(sample = %name, histogram, "background sample unavailable, skipped");
            continue;
        };
        let hist = hist.rebinned(rebin)?;
        tracing::info!(sample = %name, histogram, total = hist.total(), "loaded background");
        background_names.push(name.clone());
        backgrounds.push(hist);
    }

    Ok(LoadedSamples {
        signal_name: signal_name.to_owned(),
        background_names,
        samples: SampleSet::new(signal, backgrounds)?,
    })
}
