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
//! Rebase the timestamps of a series to elapsed seconds.
use crate::parser::Observation;

/// The point in time that becomes zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Reference {
    /// Timestamp of the first observation in source order.
    #[default]
    First,
    /// Smallest timestamp of the series.
    Min,
    /// A fixed, externally supplied point in time.
    Origin(f64),
}

/// Computes `elapsed = time - reference + offset` for every observation.
///
/// The `offset` shifts the whole series, e.g., to align measurement streams that were started
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeNormalizer {
    pub reference: Reference,
    pub offset: f64,
}

impl TimeNormalizer {
    pub fn new(reference: Reference) -> Self {
        Self {
            reference,
            offset: 0.0,
        }
    }

    pub fn with_offset(self, offset: f64) -> Self {
        Self { offset, ..self }
    }

    /// The reference time of `series`. `None` if the reference depends on the series and the
    /// series is empty.
    pub fn reference_time<V>(&self, series: &[Observation<V>]) -> Option<f64> {
        match self.reference {
            Reference::First => series.first().map(|o| o.time),
            Reference::Min => series.iter().map(|o| o.time).min_by(f64::total_cmp),
            Reference::Origin(t) => Some(t),
        }
    }

    /// Normalize all timestamps of `series`. The order of the observations is kept.
    pub fn normalize<V>(&self, series: Vec<Observation<V>>) -> Vec<Observation<V>> {
        let Some(reference) = self.reference_time(&series) else {
            return series;
        };
        log::trace!(
            "normalizing {} observations to reference {reference} with offset {}",
            series.len(),
            self.offset
        );
        series
            .into_iter()
            .map(|o| Observation {
                time: o.time - reference + self.offset,
                value: o.value,
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn series(times: &[f64]) -> Vec<Observation<()>> {
        times.iter().map(|t| Observation::new(*t, ())).collect()
    }

    fn times(series: &[Observation<()>]) -> Vec<f64> {
        series.iter().map(|o| o.time).collect()
    }

    #[test]
    fn first() {
        let n = TimeNormalizer::new(Reference::First);
        assert_eq!(times(&n.normalize(series(&[100.0, 101.5, 101.5, 103.0]))), vec![0.0, 1.5, 1.5, 3.0]);
    }

    #[test]
    fn min_is_not_first() {
        let n = TimeNormalizer::new(Reference::Min);
        assert_eq!(times(&n.normalize(series(&[12.0, 10.0, 15.0]))), vec![2.0, 0.0, 5.0]);
    }

    #[test]
    fn min_with_offset_starts_at_offset() {
        let n = TimeNormalizer::new(Reference::Min).with_offset(1.0);
        let got = times(&n.normalize(series(&[50.0, 51.0, 53.0])));
        assert_eq!(got, vec![1.0, 2.0, 4.0]);
        assert_eq!(got.iter().copied().min_by(f64::total_cmp), Some(1.0));
    }

    #[test]
    fn origin_with_negative_offset() {
        let n = TimeNormalizer::new(Reference::Origin(0.0)).with_offset(-72.0);
        assert_eq!(times(&n.normalize(series(&[72.0, 80.0]))), vec![0.0, 8.0]);
    }

    #[test]
    fn translation_invariant() {
        let n = TimeNormalizer::new(Reference::Min);
        let base = [3.0, 4.25, 4.25, 9.5];
        let shifted: Vec<f64> = base.iter().map(|t| t + 1_700_000_000.0).collect();
        assert_eq!(
            times(&n.normalize(series(&base))),
            times(&n.normalize(series(&shifted)))
        );
    }

    #[test]
    fn empty() {
        let n = TimeNormalizer::new(Reference::Min).with_offset(1.0);
        assert!(n.normalize(series(&[])).is_empty());
        assert_eq!(n.reference_time(&series(&[])), None);
    }
}
