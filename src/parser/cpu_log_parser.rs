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
//! Total CPU utilization printed once per second by the host monitor.
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::{log_parser::LogParser, Observation};

lazy_static! {
    static ref CPU_UTIL_RE: Regex = Regex::new(r"Total CPU Utilization:\s*([\d.]+)%").unwrap();
}

/// Extracts the total CPU utilization in `[%]`.
///
/// The monitor does not print timestamps. It writes one line per second, so the n-th matching line
/// (counting from zero) is assigned the time `n * interval`.
#[derive(Debug, Clone, Copy)]
pub struct CpuUtilLogParser {
    interval: f64,
    next: usize,
}

impl CpuUtilLogParser {
    pub fn new(interval: f64) -> Self {
        Self { interval, next: 0 }
    }
}

impl Default for CpuUtilLogParser {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl LogParser for CpuUtilLogParser {
    type Value = f64;

    fn description() -> &'static str {
        "CPU utilization"
    }

    fn re() -> &'static Regex {
        &CPU_UTIL_RE
    }

    fn observe(&mut self, captures: &Captures<'_>) -> Option<Observation> {
        let util = captures.get(1)?.as_str().parse::<f64>().ok()?;
        let time = self.next as f64 * self.interval;
        self.next += 1;
        Some(Observation::new(time, util))
    }
}
