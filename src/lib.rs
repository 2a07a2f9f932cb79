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
//! Library for extracting time series from QUIC and TCP experiment logs, aggregating them into
//! fixed-width time bins, and plotting the result.
//!
//! Every tool shares the same linear pipeline:
//!
//! 1. [`tagger`] derives the protocol tag from the input path (output name and color only),
//! 2. [`parser`] turns log lines or CSV rows into [`parser::Observation`]s,
//! 3. [`normalize`] rebases the timestamps to elapsed seconds,
//! 4. [`binning`] groups the observations into bins and reduces each bin,
//! 5. [`render`] writes the resulting series to an image.

pub mod binning;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod records;
pub mod render;
pub mod summary;
pub mod tagger;
pub mod util;

#[cfg(test)]
mod test;

pub mod prelude {
    pub use super::{
        binning::{AggregatedPoint, Binner, Bins, QoeConfig, QoePoint, QoeWeights, Reduction},
        normalize::{Reference, TimeNormalizer},
        parser::{Observation, ParseError},
        render::{Figure, PlotColor, Series, SeriesRenderer},
        summary::Summary,
        tagger::{Protocol, SeriesTag},
        util::{JobError, Outcome},
    };
}
