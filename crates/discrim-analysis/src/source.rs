use std::{
    collections::{BTreeMap, HashMap},
    io,
    path::{Path, PathBuf},
};

use discrim_stats::histogram::Histogram;

use crate::{
    error::AnalysisError,
    schema::{HistogramFile, HistogramRecord},
    util,
};

/// Where per-sample histograms come from.
pub trait HistogramSource {
    /// Loads histogram `histogram` of sample `sample`.
    ///
    /// Returns `Ok(None)` when the sample as a whole is unavailable. A sample
    /// that exists but lacks the histogram is an error.
    fn load(&self, sample: &str, histogram: &str) -> Result<Option<Histogram>, AnalysisError>;
}

/// A directory holding one JSON histogram file per sample.
#[derive(Debug, Clone)]
pub struct JsonHistogramDir {
    dir: PathBuf,
    suffix: String,
}

impl JsonHistogramDir {
    pub const DEFAULT_SUFFIX: &str = "_hist.json";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            suffix: Self::DEFAULT_SUFFIX.to_owned(),
        }
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Path of the file that holds `sample`'s histograms.
    #[must_use]
    pub fn sample_path(&self, sample: &str) -> PathBuf {
        self.dir.join(format!("{sample}{}", self.suffix))
    }
}

impl HistogramSource for JsonHistogramDir {
    fn load(&self, sample: &str, histogram: &str) -> Result<Option<Histogram>, AnalysisError> {
        let path = self.sample_path(sample);
        let mut file: HistogramFile = match util::read_json_file("histogram", &path) {
            Ok(file) => file,
            Err(AnalysisError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(sample, path = %path.display(), "histogram file not found");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        let record = file
            .histograms
            .remove(histogram)
            .ok_or_else(|| AnalysisError::MissingHistogram {
                sample: sample.to_owned(),
                histogram: histogram.to_owned(),
            })?;
        Ok(Some(Histogram::try_from(record)?))
    }
}

/// In-process histograms keyed by `(sample, histogram)`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    histograms: HashMap<(String, String), Histogram>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        sample: impl Into<String>,
        histogram: impl Into<String>,
        hist: Histogram,
    ) -> Option<Histogram> {
        self.histograms.insert((sample.into(), histogram.into()), hist)
    }

    fn has_sample(&self, sample: &str) -> bool {
        self.histograms.keys().any(|(s, _)| s == sample)
    }
}

impl HistogramSource for MemorySource {
    fn load(&self, sample: &str, histogram: &str) -> Result<Option<Histogram>, AnalysisError> {
        if !self.has_sample(sample) {
            return Ok(None);
        }
        self.histograms
            .get(&(sample.to_owned(), histogram.to_owned()))
            .cloned()
            .map(Some)
            .ok_or_else(|| AnalysisError::MissingHistogram {
                sample: sample.to_owned(),
                histogram: histogram.to_owned(),
            })
    }
}

/// Writes `histograms` as one sample's histogram file.
pub fn save_histogram_file<'a, P, I>(path: P, histograms: I) -> Result<(), AnalysisError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (&'a str, &'a Histogram)>,
{
    let file = HistogramFile {
        histograms: histograms
            .into_iter()
            .map(|(name, hist)| (name.to_owned(), HistogramRecord::from(hist)))
            .collect::<BTreeMap<_, _>>(),
    };
    util::write_json_file(path, &file)
}
