//! Plot-ready sample comparisons
//!
//! These are plain values: a renderer draws them however it likes.
//!
//! - [`StackedComparison`]: backgrounds stacked on top of each other with the
//!   (optionally amplified) signal overlaid
//! - [`NormalizedComparison`]: every sample scaled to unit area to compare shapes

use discrim_stats::{HistogramError, histogram::Histogram};
use serde::Serialize;

use crate::{error::AnalysisError, samples::LoadedSamples};

/// One background in a stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "LayerRecord")]
pub struct StackLayer {
    pub name: String,
    /// This background alone
    pub histogram: Histogram,
    /// Sum of this background and every layer below it
    pub cumulative: Histogram,
}

/// Backgrounds stacked in manifest order with the signal overlaid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedComparison {
    pub layers: Vec<StackLayer>,
    pub signal_name: String,
    #[serde(serialize_with = "serialize_histogram")]
    pub signal: Histogram,
    /// Factor applied to the signal overlay
    pub signal_amplification: f64,
}

impl StackedComparison {
    /// Stacks the backgrounds of `samples` and scales the signal by
    /// `signal_amplification`.
    pub fn build(
        samples: &LoadedSamples,
        signal_amplification: f64,
    ) -> Result<Self, AnalysisError> {
        let mut layers: Vec<StackLayer> = vec![];
        for (name, hist) in samples.backgrounds() {
            let cumulative = match layers.last() {
                Some(below) => below.cumulative.added(hist)?,
                None => hist.clone(),
            };
            layers.push(StackLayer {
                name: name.to_owned(),
                histogram: hist.clone(),
                cumulative,
            });
        }
        Ok(Self {
            layers,
            signal_name: samples.signal_name.clone(),
            signal: samples.samples.signal().scaled(signal_amplification),
            signal_amplification,
        })
    }

    /// Sum of all backgrounds, or `None` without backgrounds.
    #[must_use]
    pub fn stack_total(&self) -> Option<&Histogram> {
        self.layers.last().map(|layer| &layer.cumulative)
    }
}

/// One sample's shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "ShapeRecord")]
pub struct NormalizedShape {
    pub name: String,
    pub histogram: Histogram,
}

/// Samples scaled to unit total, signal first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedComparison {
    pub shapes: Vec<NormalizedShape>,
}

impl NormalizedComparison {
    /// Normalizes every `(name, histogram)` pair, skipping empty ones.
    pub fn build<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Histogram)>,
    {
        let shapes = samples
            .into_iter()
            .filter_map(|(name, hist)| {
                let Some(histogram) = hist.normalized() else {
                    tracing::warn!(sample = name, "sample has zero total, shape skipped");
                    return None;
                };
                Some(NormalizedShape {
                    name: name.to_owned(),
                    histogram,
                })
            })
            .collect();
        Self { shapes }
    }

    #[must_use]
    pub fn from_loaded(samples: &LoadedSamples) -> Self {
        let signal = (samples.signal_name.as_str(), samples.samples.signal());
        Self::build(std::iter::once(signal).chain(samples.backgrounds()))
    }

    /// Merges every `group` consecutive bins of each shape.
    ///
    /// Shapes keep their unit total, but bins folded into the overflow leave
    /// the in-range part below 1.
    pub fn rebinned(&self, group: usize) -> Result<Self, HistogramError> {
        let shapes = self
            .shapes
            .iter()
            .map(|shape| {
                Ok(NormalizedShape {
                    name: shape.name.clone(),
                    histogram: shape.histogram.rebinned(group)?,
                })
            })
            .collect::<Result<_, HistogramError>>()?;
        Ok(Self { shapes })
    }

    /// Largest in-range bin over all shapes, or `None` without shapes.
    #[must_use]
    pub fn max_content(&self) -> Option<f64> {
        self.shapes
            .iter()
            .map(|shape| shape.histogram.max_content())
            .reduce(f64::max)
    }
}

#[derive(Serialize)]
struct LayerRecord {
    name: String,
    edges: Vec<f64>,
    counts: Vec<f64>,
    cumulative: Vec<f64>,
}

impl From<StackLayer> for LayerRecord {
    fn from(layer: StackLayer) -> Self {
        Self {
            name: layer.name,
            edges: layer.histogram.axis().edges().to_vec(),
            counts: layer.histogram.counts().to_vec(),
            cumulative: layer.cumulative.counts().to_vec(),
        }
    }
}

#[derive(Serialize)]
struct ShapeRecord {
    name: String,
    edges: Vec<f64>,
    counts: Vec<f64>,
}

impl From<NormalizedShape> for ShapeRecord {
    fn from(shape: NormalizedShape) -> Self {
        Self {
            name: shape.name,
            edges: shape.histogram.axis().edges().to_vec(),
            counts: shape.histogram.counts().to_vec(),
        }
    }
}

fn serialize_histogram<S>(hist: &Histogram, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    crate::schema::HistogramRecord::from(hist).serialize(serializer)
}
