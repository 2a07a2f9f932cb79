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
//! Group normalized observations into fixed-width time bins and reduce every bin.
use std::collections::BTreeMap;

use itertools::Itertools;
use statrs::statistics::{Data, OrderStatistics, Statistics};

use crate::{parser::Observation, records::DashSample};

/// How the values of one bin are reduced to a single number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reduction {
    Median,
    Mean,
    /// Fraction of values at or below the threshold, multiplied by the bin width. For buffer
    /// levels this is the time spent stalling within the bin.
    RatioAtOrBelow(f64),
    /// Sum of absolute differences between consecutive values (in source order).
    SumAbsDiff,
}

impl Reduction {
    /// Reduce `values` of a bin with the given `width`. Must not be called on an empty bin.
    pub fn apply(&self, values: &[f64], width: f64) -> f64 {
        debug_assert!(!values.is_empty());
        match self {
            Self::Median => Data::new(values.to_vec()).median(),
            Self::Mean => values.iter().mean(),
            Self::RatioAtOrBelow(threshold) => {
                let below = values.iter().filter(|v| **v <= *threshold).count();
                below as f64 / values.len() as f64 * width
            }
            Self::SumAbsDiff => values
                .iter()
                .tuple_windows()
                .map(|(a, b)| (b - a).abs())
                .sum(),
        }
    }
}

/// Assigns observations to bins of `width` seconds: `index = floor(elapsed / width)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binner {
    pub width: f64,
    /// Drop all bins starting at or after this elapsed time.
    pub cutoff: Option<f64>,
}

impl Default for Binner {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Binner {
    /// # Panics
    /// Panics if `width` is not a positive, finite number.
    pub fn new(width: f64) -> Self {
        assert!(
            width.is_finite() && width > 0.0,
            "bin width must be positive, got {width}"
        );
        Self {
            width,
            cutoff: None,
        }
    }

    pub fn with_cutoff(self, cutoff: f64) -> Self {
        Self {
            cutoff: Some(cutoff),
            ..self
        }
    }

    /// Index of the bin that contains `elapsed`, or `None` if the observation is filtered out
    /// (negative or non-finite elapsed time, or beyond the cutoff).
    pub fn index(&self, elapsed: f64) -> Option<u64> {
        if !elapsed.is_finite() || elapsed < 0.0 {
            return None;
        }
        let index = (elapsed / self.width).floor() as u64;
        match self.cutoff {
            Some(cutoff) if index as f64 * self.width >= cutoff => None,
            _ => Some(index),
        }
    }

    /// Group the (normalized) `series`. Observations within a bin keep their source order.
    pub fn bin<V>(&self, series: impl IntoIterator<Item = Observation<V>>) -> Bins<V> {
        let mut bins: BTreeMap<u64, Vec<V>> = BTreeMap::new();
        let mut dropped = 0;
        for o in series {
            match self.index(o.time) {
                Some(i) => bins.entry(i).or_default().push(o.value),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            log::debug!("dropped {dropped} observations outside of the binning range");
        }
        Bins {
            width: self.width,
            bins,
            dropped,
        }
    }
}

/// Non-empty bins, ordered by their index.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins<V> {
    width: f64,
    bins: BTreeMap<u64, Vec<V>>,
    dropped: usize,
}

/// The reduced value of a single bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedPoint {
    pub bin: u64,
    pub value: f64,
}

impl AggregatedPoint {
    /// Start time of the bin in elapsed seconds.
    pub fn time(&self, width: f64) -> f64 {
        self.bin as f64 * width
    }
}

impl<V> Bins<V> {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Number of observations removed by the filters of the [`Binner`].
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &[V])> {
        self.bins.iter().map(|(i, v)| (*i, v.as_slice()))
    }

    /// Reduce the projection `f` of every bin with `reduction`.
    pub fn reduce_by(&self, reduction: Reduction, f: impl Fn(&V) -> f64) -> Vec<AggregatedPoint> {
        self.iter()
            .map(|(bin, values)| {
                let values = values.iter().map(&f).collect_vec();
                AggregatedPoint {
                    bin,
                    value: reduction.apply(&values, self.width),
                }
            })
            .collect()
    }
}

impl Bins<f64> {
    pub fn reduce(&self, reduction: Reduction) -> Vec<AggregatedPoint> {
        self.reduce_by(reduction, |v| *v)
    }
}

/// Penalty weights of the QoE score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QoeWeights {
    /// Weight of the stall time. Defaults to the highest bitrate of the video.
    pub stall_penalty: f64,
    /// Weight of the bitrate switches.
    pub switch_penalty: f64,
}

impl Default for QoeWeights {
    fn default() -> Self {
        Self {
            stall_penalty: 698_834.0,
            switch_penalty: 1.0,
        }
    }
}

impl QoeWeights {
    pub fn score(&self, average_bitrate: f64, stall_time: f64, quality_switches: f64) -> f64 {
        average_bitrate - self.stall_penalty * stall_time - self.switch_penalty * quality_switches
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QoeConfig {
    pub bin_width: f64,
    /// The player is considered stalled while its buffer is at or below this level `[s]`.
    pub stall_threshold: f64,
    pub weights: QoeWeights,
}

impl Default for QoeConfig {
    fn default() -> Self {
        Self {
            bin_width: 1.0,
            stall_threshold: 1.0,
            weights: QoeWeights::default(),
        }
    }
}

/// QoE metrics of a single bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QoePoint {
    pub bin: u64,
    pub total_stall_time: f64,
    pub average_bitrate: f64,
    pub quality_switches: f64,
    pub qoe: f64,
}

impl Bins<DashSample> {
    /// Compute the QoE metrics of every bin.
    pub fn qoe(&self, stall_threshold: f64, weights: &QoeWeights) -> Vec<QoePoint> {
        self.iter()
            .map(|(bin, samples)| {
                let buffer = samples.iter().map(|s| s.buffer_length).collect_vec();
                let bitrate = samples.iter().map(|s| s.bitrate).collect_vec();
                let total_stall_time =
                    Reduction::RatioAtOrBelow(stall_threshold).apply(&buffer, self.width);
                let average_bitrate = Reduction::Mean.apply(&bitrate, self.width);
                let quality_switches = Reduction::SumAbsDiff.apply(&bitrate, self.width);
                QoePoint {
                    bin,
                    total_stall_time,
                    average_bitrate,
                    quality_switches,
                    qoe: weights.score(average_bitrate, total_stall_time, quality_switches),
                }
            })
            .collect()
    }
}
