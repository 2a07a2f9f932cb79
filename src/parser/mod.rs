// LogSeries: Time Series Extraction and Plotting for QUIC and TCP Experiment Logs
// Copyright (C) 2024-2025 Roland Schmid <roschmi@ethz.ch> and Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Turn raw experiment logs into sequences of timestamped observations.
//!
//! There are two deliberately different code paths:
//!
//! - [`log_parser`] applies a regular expression to free-text log lines. Lines that do not match
//!   are skipped, since these logs interleave the interesting lines with unrelated output.
//! - [`tabular`] loads CSV files into typed records. Any malformed row aborts the whole file.

use std::path::PathBuf;

pub mod cpu_log_parser;
pub mod cwnd_log_parser;
pub mod log_parser;
pub mod tabular;

pub use cpu_log_parser::CpuUtilLogParser;
pub use cwnd_log_parser::CwndLogParser;
pub use log_parser::{parse_log_file, LogParser, LogRecords};
pub use tabular::{read_records, TabularRecord};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing column {column:?} in {path:?}")]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("Cannot parse timestamp {0:?}")]
    Timestamp(String),
    #[error("Malformed field {field:?}: {reason}")]
    CompoundField { field: String, reason: String },
}

/// A single measurement: the time it was taken and the measured value(s).
///
/// `time` is given in seconds, either since the epoch (as parsed) or elapsed since the start of
/// the series (after normalization).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation<V = f64> {
    pub time: f64,
    pub value: V,
}

impl<V> Observation<V> {
    pub fn new(time: f64, value: V) -> Self {
        Self { time, value }
    }

    /// Apply `f` to the value, keeping the timestamp.
    pub fn map<W>(self, f: impl FnOnce(V) -> W) -> Observation<W> {
        Observation {
            time: self.time,
            value: f(self.value),
        }
    }
}

/// Parse a timestamp into seconds since the epoch.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.ffffff]` (interpreted as UTC), and plain (fractional)
/// epoch seconds.
pub fn parse_time(time: impl AsRef<str>) -> Option<f64> {
    let time = time.as_ref().trim();
    if let Ok(t) = chrono::DateTime::parse_from_rfc3339(time) {
        Some(t.timestamp() as f64 + t.timestamp_subsec_nanos() as f64 * 1e-9)
    } else if let Ok(t) = chrono::NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M:%S%.f")
        .map(|x| x.and_utc())
    {
        Some(t.timestamp() as f64 + t.timestamp_subsec_nanos() as f64 * 1e-9)
    } else {
        time.parse::<f64>().ok().filter(|t| t.is_finite())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn log_timestamp_to_f64() {
        assert_eq!(
            parse_time("2025-01-01 00:00:01.500000").unwrap(),
            1735689601.5
        );
    }

    #[test]
    fn rfc3339_to_f64() {
        assert_eq!(
            parse_time("2024-11-12T18:00:44.142341000+00:00").unwrap(),
            1731434444.142341
        );
    }

    #[test]
    fn whole_seconds() {
        assert_eq!(parse_time("2025-01-01 00:00:00").unwrap(), 1735689600.0);
    }

    #[test]
    fn epoch_seconds() {
        assert_eq!(parse_time("1735689600.25").unwrap(), 1735689600.25);
        assert_eq!(parse_time("not a time"), None);
        assert_eq!(parse_time("NaN"), None);
    }
}
