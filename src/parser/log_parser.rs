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
//! Regex-based extraction of observations from free-text log lines.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use regex::{Captures, Regex};

use super::{Observation, ParseError};

pub trait LogParser {
    type Value;

    /// Return a description of the parser, used in log messages.
    fn description() -> &'static str;

    /// Regular expression that is searched for in every line.
    fn re() -> &'static Regex;

    /// Turn the captures of a matching line into an observation. Returning `None` skips the line
    /// just like a line that does not match at all.
    fn observe(&mut self, captures: &Captures<'_>) -> Option<Observation<Self::Value>>;

    /// Parse a single line.
    fn parse_line(&mut self, line: &str) -> Option<Observation<Self::Value>> {
        let captures = Self::re().captures(line)?;
        self.observe(&captures)
    }
}

/// Lazy sequence of observations extracted from lines. Lines without a match are skipped and
/// counted.
pub struct LogRecords<P, I> {
    parser: P,
    lines: I,
    skipped: usize,
}

impl<P, I> LogRecords<P, I> {
    pub fn new(parser: P, lines: I) -> Self {
        Self {
            parser,
            lines,
            skipped: 0,
        }
    }

    /// Number of lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<P, I, S> Iterator for LogRecords<P, I>
where
    P: LogParser,
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Observation<P::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            match self.parser.parse_line(line.as_ref()) {
                Some(o) => return Some(o),
                None => self.skipped += 1,
            }
        }
        None
    }
}

/// Read all lines of the file at `path` and extract the observations of `parser`.
///
/// Only failing to open or read the file is an error. The file is closed before returning.
pub fn parse_log_file<P: LogParser>(
    path: impl AsRef<Path>,
    parser: P,
) -> Result<Vec<Observation<P::Value>>, ParseError> {
    let path = path.as_ref();
    let io_err = |source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    };
    log::info!("Loading {} log: {path:?}", P::description());

    let file = File::open(path).map_err(io_err)?;
    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        lines.push(line.map_err(io_err)?);
    }

    let mut records = LogRecords::new(parser, lines.iter());
    let observations: Vec<_> = records.by_ref().collect();
    log::debug!(
        "[{}] extracted {} observations, skipped {} of {} lines",
        P::description(),
        observations.len(),
        records.skipped(),
        lines.len(),
    );

    Ok(observations)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::CwndLogParser;

    #[test]
    fn lazy_records_count_skipped_lines() {
        let lines = [
            "2025-01-01 00:00:00.000000 cwnd: 10",
            "garbage",
            "",
            "2025-01-01 00:00:01.000000 cwnd: 20",
        ];
        let mut records = LogRecords::new(CwndLogParser, lines.iter());
        assert_eq!(records.next().map(|o| o.value), Some(10.0));
        assert_eq!(records.skipped(), 0);
        assert_eq!(records.next().map(|o| o.value), Some(20.0));
        assert_eq!(records.skipped(), 2);
        assert_eq!(records.next(), None);
    }

    #[test]
    fn missing_file() {
        let err = parse_log_file("/this/path/does/not/exist.log", CwndLogParser).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
