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
//! Congestion window samples logged by the QUIC endpoint.
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::{log_parser::LogParser, parse_time, Observation};

lazy_static! {
    static ref CWND_RE: Regex =
        Regex::new(r"(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{6}).*cwnd: (\d+)").unwrap();
}

/// Extracts `(timestamp, cwnd)` from lines such as
/// `[INFO] 2025-01-01 00:00:01.500000 recovery: cwnd: 14520`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CwndLogParser;

impl LogParser for CwndLogParser {
    type Value = f64;

    fn description() -> &'static str {
        "cwnd"
    }

    fn re() -> &'static Regex {
        &CWND_RE
    }

    fn observe(&mut self, captures: &Captures<'_>) -> Option<Observation> {
        let time = parse_time(captures.get(1)?.as_str())?;
        let cwnd = captures.get(2)?.as_str().parse::<u64>().ok()?;
        Some(Observation::new(time, cwnd as f64))
    }
}
