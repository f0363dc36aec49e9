//! Tabular output of metric curves
//!
//! [`CutTable`] renders a fixed-width table for terminals and logs; the
//! `write_*_csv` functions emit comma-separated rows with a header line.

use std::{fmt, io};

use discrim_metrics::{
    curve::{MetricsCurve, SignificanceCurve},
    roc::RocCurve,
};

const COLUMN_WIDTH: usize = 16;
const PRECISION: usize = 5;

/// Fixed-width table of a [`MetricsCurve`], one row per cut.
///
/// ```text
/// Cut       nSignalEvt          SigEff         nBkgEvt          BkgEff          BkgRej    Significance
/// 1.00000     60.00000         1.00000        15.00000         1.00000         0.00000         6.92820
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CutTable<'a> {
    curve: &'a MetricsCurve,
}

impl<'a> CutTable<'a> {
    #[must_use]
    pub fn new(curve: &'a MetricsCurve) -> Self {
        Self { curve }
    }
}

impl fmt::Display for CutTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = COLUMN_WIDTH;
        let p = PRECISION;
        writeln!(
            f,
            "{:<w$}{:>w$}{:>w$}{:>w$}{:>w$}{:>w$}{:>w$}",
            "Cut", "nSignalEvt", "SigEff", "nBkgEvt", "BkgEff", "BkgRej", "Significance"
        )?;
        for r in self.curve {
            writeln!(
                f,
                "{:<w$.p$}{:>w$.p$}{:>w$.p$}{:>w$.p$}{:>w$.p$}{:>w$.p$}{:>w$.p$}",
                r.bin_center,
                r.signal_count,
                r.signal_efficiency,
                r.background_count,
                r.background_efficiency,
                r.background_rejection,
                r.significance,
            )?;
        }
        Ok(())
    }
}

/// Writes every record of `curve` as a CSV row.
pub fn write_metrics_csv<W>(curve: &MetricsCurve, mut writer: W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        writer,
        "bin,bin_center,cut_value,signal_count,background_count,signal_efficiency,\
         background_efficiency,background_rejection,signal_purity,purity_times_efficiency,\
         significance"
    )?;
    for r in curve {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{},{}",
            r.bin,
            r.bin_center,
            r.cut_value,
            r.signal_count,
            r.background_count,
            r.signal_efficiency,
            r.background_efficiency,
            r.background_rejection,
            r.signal_purity,
            r.purity_times_efficiency,
            r.significance,
        )?;
    }
    writer.flush()
}

pub fn write_significance_csv<W>(curve: &SignificanceCurve, mut writer: W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(writer, "bin,bin_center,cut_value,significance")?;
    for p in curve.points() {
        writeln!(writer, "{},{},{},{}", p.bin, p.bin_center, p.cut_value, p.significance)?;
    }
    writer.flush()
}

/// Writes the filled bins of `roc` as `signal_efficiency,background_rejection` rows.
pub fn write_roc_csv<W>(roc: &RocCurve, mut writer: W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(writer, "signal_efficiency,background_rejection")?;
    for p in roc.points() {
        writeln!(writer, "{},{}", p.signal_efficiency, p.background_rejection)?;
    }
    writer.flush()
}
