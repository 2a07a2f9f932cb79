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
//! Loading of CSV logs into typed records.
//!
//! Each record type declares the columns it needs. These are checked against the header once,
//! before any row is read, and every row must then deserialize. The first malformed row aborts
//! loading of the whole file.
use std::{fs::File, path::Path};

use serde::de::DeserializeOwned;

use super::{Observation, ParseError};

pub trait TabularRecord: DeserializeOwned {
    type Value;

    /// Columns that must be present in the header.
    const COLUMNS: &'static [&'static str];

    /// Return a description of the record, used in log messages.
    fn description() -> &'static str;

    /// Convert the row into an observation.
    fn observation(self) -> Result<Observation<Self::Value>, ParseError>;
}

/// Load all rows of the CSV file at `path` as observations. The file is closed before returning.
pub fn read_records<R: TabularRecord>(
    path: impl AsRef<Path>,
) -> Result<Vec<Observation<R::Value>>, ParseError> {
    let path = path.as_ref();
    log::info!("Loading {} records: {path:?}", R::description());
    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = csv.headers()?.clone();
    if headers.is_empty() {
        log::debug!("[{}] {path:?} is empty", R::description());
        return Ok(Vec::new());
    }
    if let Some(column) = R::COLUMNS
        .iter()
        .copied()
        .find(|c| !headers.iter().any(|h| h == *c))
    {
        return Err(ParseError::MissingColumn {
            path: path.to_path_buf(),
            column,
        });
    }

    let mut observations = Vec::new();
    for record in csv.deserialize() {
        let record: R = record?;
        observations.push(record.observation()?);
    }
    log::debug!(
        "[{}] loaded {} records",
        R::description(),
        observations.len()
    );

    Ok(observations)
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;
    use crate::records::TcpCwndRecord;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn load_rows() {
        let f = csv_file("timestamp,snd_wnd,rtt\n72,1000,3\n72,3000,4\n73,2000,3\n");
        let got: Vec<_> = read_records::<TcpCwndRecord>(f.path())
            .unwrap()
            .into_iter()
            .map(|o| (o.time, o.value))
            .collect();
        assert_eq!(got, vec![(72.0, 1000.0), (72.0, 3000.0), (73.0, 2000.0)]);
    }

    #[test]
    fn header_only() {
        let f = csv_file("timestamp,snd_wnd\n");
        assert!(read_records::<TcpCwndRecord>(f.path()).unwrap().is_empty());
    }

    #[test]
    fn empty_file() {
        let f = csv_file("");
        assert!(read_records::<TcpCwndRecord>(f.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_column_fails_before_reading_rows() {
        let f = csv_file("timestamp,snd_cwnd\n72,1000\n");
        let err = read_records::<TcpCwndRecord>(f.path()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingColumn {
                column: "snd_wnd",
                ..
            }
        ));
    }

    #[test]
    fn malformed_row_fails_the_file() {
        let f = csv_file("timestamp,snd_wnd\n72,1000\n73,lots\n74,1000\n");
        let err = read_records::<TcpCwndRecord>(f.path()).unwrap_err();
        assert!(matches!(err, ParseError::Csv(_)));
    }
}
