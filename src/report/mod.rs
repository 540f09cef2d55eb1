//! Post-run latency reporting: a percentile summary followed by a
//! horizontal bar chart of the sub-P99.9 distribution.
//!
//! Everything here runs after the pipeline has been joined; cost does not
//! matter, readability of the output does.

use crate::consts::{CHART_BANDS, CHART_BAR_WIDTH, CHART_LABEL_WIDTH};
use hdrhistogram::Histogram;
use std::io::{self, Write};

/// Latency percentiles in nanoseconds, extracted from an HDR histogram at
/// three significant figures. `p0`/`p100` are the recorded extremes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencySummary {
    /// Fastest sample.
    pub p0: u64,
    /// Median.
    pub p50: u64,
    /// 75th percentile.
    pub p75: u64,
    /// 90th percentile.
    pub p90: u64,
    /// 95th percentile.
    pub p95: u64,
    /// 99th percentile.
    pub p99: u64,
    /// 99.9th percentile.
    pub p999: u64,
    /// Slowest sample.
    pub p100: u64,
}

impl LatencySummary {
    /// Summarise a set of latency samples, or `None` when there are none.
    pub fn from_samples(samples: &[u64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut histogram =
            Histogram::<u64>::new(3).expect("3 significant figures is a valid configuration");

        for &sample in samples {
            histogram.saturating_record(sample);
        }

        Some(Self {
            p0: histogram.min(),
            p50: histogram.value_at_quantile(0.50),
            p75: histogram.value_at_quantile(0.75),
            p90: histogram.value_at_quantile(0.90),
            p95: histogram.value_at_quantile(0.95),
            p99: histogram.value_at_quantile(0.99),
            p999: histogram.value_at_quantile(0.999),
            p100: histogram.max(),
        })
    }
}

/// Using the latency data the pipeline collected, print the percentile
/// summary and a chart of the latency distribution.
///
/// The chart covers the samples at or below P99.9, binned into
/// [`CHART_BANDS`] equal-width bands across that range, with bars scaled so
/// the fullest band spans [`CHART_BAR_WIDTH`] characters. Samples beyond
/// P99.9 are excluded from the chart; a handful of extreme outliers would
/// otherwise flatten every interesting band to nothing.
///
/// # Errors
/// Propagates write failures on `out`.
pub fn render_latency_report(out: &mut impl Write, samples: &[u64]) -> io::Result<()> {
    let Some(summary) = LatencySummary::from_samples(samples) else {
        return writeln!(out, "No latency samples were recorded.");
    };

    writeln!(out)?;
    writeln!(out, "P0: {}ns", summary.p0)?;
    writeln!(out, "P50: {}ns", summary.p50)?;
    writeln!(out, "P75: {}ns", summary.p75)?;
    writeln!(out, "P90: {}ns", summary.p90)?;
    writeln!(out, "P95: {}ns", summary.p95)?;
    writeln!(out, "P99: {}ns", summary.p99)?;
    writeln!(out, "P99.9: {}ns", summary.p999)?;
    writeln!(out, "P100: {}ns", summary.p100)?;
    writeln!(out)?;

    writeln!(out, "===== P99.9 latency distribution =====")?;

    let frequencies = band_frequencies(samples, summary.p0, summary.p999);
    let width = band_width(summary.p0, summary.p999);
    let highest = frequencies.iter().copied().max().unwrap_or(0).max(1);

    for (i, &frequency) in frequencies.iter().enumerate() {
        let label = format!("{}ns", summary.p0 + i as u64 * width);
        let bar_length =
            ((frequency as f64 / highest as f64) * CHART_BAR_WIDTH as f64).round() as usize;

        writeln!(
            out,
            "{label:>label_width$} | {bar:<bar_width$} | ({frequency})",
            label_width = CHART_LABEL_WIDTH,
            bar = "|".repeat(bar_length),
            bar_width = CHART_BAR_WIDTH,
        )?;
    }

    Ok(())
}

/// Width of one chart band over `[low, high]`, never zero.
fn band_width(low: u64, high: u64) -> u64 {
    (high.saturating_sub(low) / CHART_BANDS as u64).max(1)
}

/// Count the samples in `[low, high]` into equal-width bands. Samples above
/// `high` (the far tail) are excluded; the last band absorbs the rounding
/// remainder of the range.
fn band_frequencies(samples: &[u64], low: u64, high: u64) -> [u64; CHART_BANDS] {
    let width = band_width(low, high);
    let mut bands = [0u64; CHART_BANDS];

    for &sample in samples {
        if sample > high {
            continue;
        }

        let band = (sample.saturating_sub(low) / width).min(CHART_BANDS as u64 - 1);
        bands[band as usize] += 1;
    }

    bands
}
