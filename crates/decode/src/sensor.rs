//! Sensor file decoding — tab-separated timestamped rows.
//!
//! A sensor file is UTF-8 text, one row per line, fields separated by tabs.
//! The first field of each data row is the timestamp in the file's local time
//! base (seconds); the remaining fields are channel values. An optional first
//! line whose leading field does not parse as a number is treated as a header
//! naming the channels.
//!
//! Rows are expected in ascending time order; the local bounds are taken from
//! the first and last rows.

use std::path::Path;

use al_common::TimeRange;
use tracing::debug;

use crate::error::{DecodeError, DecodeResult};

/// One data row of a sensor file.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorRow {
    /// Timestamp in the file's local time base (seconds).
    pub time: f64,
    /// All original fields of the row, including the timestamp field.
    pub fields: Vec<String>,
}

/// One named value channel extracted from the row columns.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorChannel {
    pub name: String,
    /// One value per row; non-numeric fields decode as NaN.
    pub values: Vec<f64>,
}

/// Decoded contents of a sensor file.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorData {
    /// All data rows in file order.
    pub rows: Vec<SensorRow>,
    /// Parallel value channels, one per non-timestamp column.
    pub channels: Vec<SensorChannel>,
}

impl SensorData {
    /// Local time bounds of the content (first row time → last row time).
    pub fn local_range(&self) -> TimeRange {
        let start = self.rows.first().map(|r| r.time).unwrap_or(0.0);
        let end = self.rows.last().map(|r| r.time).unwrap_or(0.0);
        TimeRange { start, end }
    }
}

/// Decode a sensor `.tsv` file from disk.
pub fn decode_sensor_file(path: &Path) -> DecodeResult<SensorData> {
    let text = std::fs::read_to_string(path).map_err(|e| DecodeError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let data = decode_sensor_text(&text, &path.display().to_string())?;
    debug!(
        path = %path.display(),
        rows = data.rows.len(),
        channels = data.channels.len(),
        "Decoded sensor file"
    );
    Ok(data)
}

/// Decode sensor rows from text. `origin` names the source in errors.
pub fn decode_sensor_text(text: &str, origin: &str) -> DecodeResult<SensorData> {
    let mut rows: Vec<SensorRow> = Vec::new();
    let mut header: Option<Vec<String>> = None;

    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<String> = line.split('\t').map(|f| f.to_string()).collect();
        match fields[0].trim().parse::<f64>() {
            Ok(time) => rows.push(SensorRow { time, fields }),
            Err(_) if rows.is_empty() && header.is_none() => {
                // First non-numeric line: column header naming the channels.
                header = Some(fields.iter().skip(1).map(|f| f.trim().to_string()).collect());
            }
            Err(_) => {
                return Err(DecodeError::Parse {
                    path: origin.to_string(),
                    line: line_no + 1,
                    reason: format!("timestamp field {:?} is not a number", fields[0]),
                });
            }
        }
    }

    if rows.is_empty() {
        return Err(DecodeError::Empty {
            path: origin.to_string(),
        });
    }

    // Every row after the first must have the same column count as the first.
    let column_count = rows[0].fields.len();
    let channel_count = column_count.saturating_sub(1);

    let mut channels: Vec<SensorChannel> = (0..channel_count)
        .map(|i| SensorChannel {
            name: header
                .as_ref()
                .and_then(|h| h.get(i).cloned())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("channel-{i}")),
            values: Vec::with_capacity(rows.len()),
        })
        .collect();

    for row in &rows {
        for (i, channel) in channels.iter_mut().enumerate() {
            let value = row
                .fields
                .get(i + 1)
                .and_then(|f| f.trim().parse::<f64>().ok())
                .unwrap_or(f64::NAN);
            channel.values.push(value);
        }
    }

    Ok(SensorData { rows, channels })
}
