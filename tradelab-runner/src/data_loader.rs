//! CSV bar loading.
//!
//! Expects a header row of `timestamp,open,high,low,close,volume` with
//! RFC 3339 timestamps. The engine requires strictly increasing timestamps
//! and sane OHLC rows, so both are validated here, at the boundary.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

use tradelab_core::domain::Bar;

#[derive(Debug, Deserialize)]
struct BarRecord {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Load an ordered bar series from a CSV file.
pub fn load_bars_csv(path: &Path) -> Result<Vec<Bar>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening bar file {}", path.display()))?;

    let mut bars: Vec<Bar> = Vec::new();
    for (row, record) in reader.deserialize::<BarRecord>().enumerate() {
        let record = record.with_context(|| format!("parsing bar row {}", row + 1))?;
        let bar = Bar::new(
            record.timestamp,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
        );

        if !bar.is_sane() {
            bail!(
                "insane OHLC at row {} ({}): open {} high {} low {} close {}",
                row + 1,
                bar.timestamp,
                bar.open,
                bar.high,
                bar.low,
                bar.close
            );
        }
        if let Some(prev) = bars.last() {
            if bar.timestamp <= prev.timestamp {
                bail!(
                    "timestamps not strictly increasing at row {}: {} follows {}",
                    row + 1,
                    bar.timestamp,
                    prev.timestamp
                );
            }
        }
        bars.push(bar);
    }

    if bars.is_empty() {
        bail!("no bars in {}", path.display());
    }
    Ok(bars)
}
