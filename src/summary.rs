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
//! Mean and median of the primary metric of a tool, printed after plotting.
use itertools::Itertools;

use crate::binning::Reduction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
}

impl Summary {
    /// Summarize `values`. Returns `None` if there are none.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let values = values.into_iter().collect_vec();
        if values.is_empty() {
            return None;
        }
        Some(Self {
            count: values.len(),
            mean: Reduction::Mean.apply(&values, 1.0),
            median: Reduction::Median.apply(&values, 1.0),
        })
    }

    /// Print the summary of `metric` to stdout, e.g.
    ///
    /// ```text
    /// Average QoE across all bins: 1234.50
    /// Median QoE across all bins:  1200.00
    /// ```
    pub fn print(&self, metric: &str, over: &str) {
        println!("Average {metric} across all {over}: {:.2}", self.mean);
        println!("Median {metric} across all {over}:  {:.2}", self.median);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn summary() {
        let s = Summary::of([3.0, 1.0, 2.0, 10.0]).unwrap();
        assert_eq!(s.count, 4);
        assert_eq!(s.median, 2.5);
        assert!((s.mean - 4.0).abs() < 1e-12);
    }

    #[test]
    fn empty() {
        assert_eq!(Summary::of(Vec::new()), None);
    }
}
