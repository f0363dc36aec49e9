//! On-disk JSON form of per-sample histogram files
//!
//! ```json
//! {
//!   "histograms": {
//!     "mva_response": { "bins": 4, "min": -1.0, "max": 1.0, "counts": [3, 5, 8, 2] },
//!     "jet_pt": { "edges": [0, 20, 50, 100], "counts": [10, 4, 1], "overflow": 2 }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use discrim_stats::{HistogramError, axis::BinAxis, histogram::Histogram};
use serde::{Deserialize, Serialize};

/// Every histogram stored for one sample, keyed by histogram name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistogramFile {
    pub histograms: BTreeMap<String, HistogramRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramRecord {
    #[serde(flatten)]
    pub axis: AxisRecord,
    pub counts: Vec<f64>,
    #[serde(default)]
    pub underflow: f64,
    #[serde(default)]
    pub overflow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisRecord {
    Uniform { bins: usize, min: f64, max: f64 },
    Edges { edges: Vec<f64> },
}

impl TryFrom<HistogramRecord> for Histogram {
    type Error = HistogramError;

    fn try_from(record: HistogramRecord) -> Result<Self, Self::Error> {
        let axis = match record.axis {
            AxisRecord::Uniform { bins, min, max } => BinAxis::uniform(bins, min, max)?,
            AxisRecord::Edges { edges } => BinAxis::from_edges(edges)?,
        };
        Histogram::with_flows(axis, record.counts, record.underflow, record.overflow)
    }
}

impl From<&Histogram> for HistogramRecord {
    fn from(hist: &Histogram) -> Self {
        Self {
            axis: AxisRecord::Edges {
                edges: hist.axis().edges().to_vec(),
            },
            counts: hist.counts().to_vec(),
            underflow: hist.underflow(),
            overflow: hist.overflow(),
        }
    }
}
