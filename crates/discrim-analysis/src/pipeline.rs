//! End-to-end analysis steps
//!
//! Each pipeline loads the configured histogram of every manifest sample
//! (see [`load_samples`]) and turns the result into one product:
//!
//! | pipeline | product |
//! |---|---|
//! | [`make_roc`] | full metrics curve and ROC curve |
//! | [`make_significance`] | significance curve |
//! | [`make_stack`] | stacked backgrounds with signal overlay |
//! | [`make_normalized`] | unit-area shapes |

use discrim_metrics::{
    curve::{MetricsCurve, SignificanceCurve},
    roc::RocCurve,
};

use crate::{
    comparison::{NormalizedComparison, StackedComparison},
    config::AnalysisConfig,
    error::AnalysisError,
    manifest::SampleManifest,
    report::CutTable,
    samples::{LoadedSamples, load_samples},
    source::HistogramSource,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RocReport {
    pub samples: LoadedSamples,
    pub curve: MetricsCurve,
    pub roc: RocCurve,
}

impl RocReport {
    #[must_use]
    pub fn table(&self) -> CutTable<'_> {
        CutTable::new(&self.curve)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignificanceReport {
    pub samples: LoadedSamples,
    pub curve: SignificanceCurve,
}

/// Computes the full metrics curve and the ROC curve of the manifest samples.
pub fn make_roc<S>(
    config: &AnalysisConfig,
    manifest: &SampleManifest,
    source: &S,
) -> Result<RocReport, AnalysisError>
where
    S: HistogramSource + ?Sized,
{
    let samples = load(config, manifest, source)?;
    let (curve, roc) = config.metrics().compute_full_curve(&samples.samples)?;
    if let Some(best) = curve.best_significance() {
        tracing::info!(
            label = config.label(),
            cut = best.cut_value,
            significance = best.significance,
            signal_efficiency = best.signal_efficiency,
            background_rejection = best.background_rejection,
            "best cut"
        );
    }
    tracing::info!(
        label = config.label(),
        cuts = curve.len(),
        roc_points = roc.points().count(),
        "ROC computed"
    );
    Ok(RocReport {
        samples,
        curve,
        roc,
    })
}

/// Computes the significance curve of the manifest samples.
pub fn make_significance<S>(
    config: &AnalysisConfig,
    manifest: &SampleManifest,
    source: &S,
) -> Result<SignificanceReport, AnalysisError>
where
    S: HistogramSource + ?Sized,
{
    let samples = load(config, manifest, source)?;
    let curve = config.metrics().compute_significance_curve(&samples.samples)?;
    match curve.best() {
        Some(best) => tracing::info!(
            label = config.label(),
            cut = best.cut_value,
            significance = best.significance,
            "best cut"
        ),
        None => tracing::info!(label = config.label(), "no cut with a non-empty background tail"),
    }
    Ok(SignificanceReport { samples, curve })
}

/// Stacks the manifest backgrounds and overlays the amplified signal.
pub fn make_stack<S>(
    config: &AnalysisConfig,
    manifest: &SampleManifest,
    source: &S,
) -> Result<StackedComparison, AnalysisError>
where
    S: HistogramSource + ?Sized,
{
    let samples = load(config, manifest, source)?;
    let stack = StackedComparison::build(&samples, config.signal_amplification)?;
    tracing::info!(
        label = config.label(),
        layers = stack.layers.len(),
        amplification = config.signal_amplification,
        "stack built"
    );
    Ok(stack)
}

/// Scales every manifest sample to unit area, then rebins the shapes.
pub fn make_normalized<S>(
    config: &AnalysisConfig,
    manifest: &SampleManifest,
    source: &S,
) -> Result<NormalizedComparison, AnalysisError>
where
    S: HistogramSource + ?Sized,
{
    let samples = load_with_rebin(config, manifest, source, 1)?;
    let comparison = NormalizedComparison::from_loaded(&samples).rebinned(config.rebin)?;
    tracing::info!(
        label = config.label(),
        shapes = comparison.shapes.len(),
        "normalized shapes built"
    );
    Ok(comparison)
}

fn load<S>(
    config: &AnalysisConfig,
    manifest: &SampleManifest,
    source: &S,
) -> Result<LoadedSamples, AnalysisError>
where
    S: HistogramSource + ?Sized,
{
    load_with_rebin(config, manifest, source, config.rebin)
}

fn load_with_rebin<S>(
    config: &AnalysisConfig,
    manifest: &SampleManifest,
    source: &S,
    rebin: usize,
) -> Result<LoadedSamples, AnalysisError>
where
    S: HistogramSource + ?Sized,
{
    config.validate()?;
    tracing::info!(
        histogram = %config.histogram,
        samples = manifest.len(),
        rebin,
        "loading samples"
    );
    load_samples(manifest, source, &config.histogram, rebin)
}
