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
//! The complete pipelines of the individual tools: parse, normalize, bin, and plot.
//!
//! Each tool is split into a function extracting the numbers (`*_series` / `*_points`) and a
//! `run_*` function that tags the input, renders the figures and prints the summary.
use std::path::Path;

use crate::{
    binning::{AggregatedPoint, Binner, QoeConfig, QoePoint, Reduction},
    normalize::{Reference, TimeNormalizer},
    parser::{parse_log_file, read_records, CpuUtilLogParser, CwndLogParser, Observation, ParseError},
    records::{DashRecord, PressureRecord, PressureSample, TcpCwndRecord},
    render::{render_all, Figure, Series, SeriesRenderer},
    summary::Summary,
    tagger::SeriesTag,
    util::{ensure_input, JobError, Outcome},
};

/// Reduced bins together with the bin width, ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedSeries {
    pub width: f64,
    pub points: Vec<AggregatedPoint>,
}

impl BinnedSeries {
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }
}

fn tag_input(input: &Path) -> SeriesTag {
    let tag = SeriesTag::from_path(input.to_string_lossy());
    log::debug!("Detected tag {tag} for {input:?}");
    tag
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuUtilConfig {
    /// Samples before this time `[s]` are not plotted.
    pub start_time: f64,
}

impl Default for CpuUtilConfig {
    fn default() -> Self {
        Self { start_time: 2.0 }
    }
}

/// CPU utilization samples at or after the configured start time.
pub fn cpu_util_series(input: &Path, config: &CpuUtilConfig) -> Result<Vec<Observation>, ParseError> {
    let series = parse_log_file(input, CpuUtilLogParser::default())?;
    Ok(series
        .into_iter()
        .filter(|o| o.time >= config.start_time)
        .collect())
}

pub fn run_cpu_util(
    input: &Path,
    config: &CpuUtilConfig,
    renderer: &SeriesRenderer,
) -> Result<Outcome, JobError> {
    ensure_input(input)?;
    let tag = tag_input(input);
    let series = cpu_util_series(input, config)?;
    if series.is_empty() {
        return Ok(Outcome::NoData);
    }

    let figure = Figure::new(
        format!(
            "CPU {tag} Utilization Over Time (Starting from {} seconds)",
            config.start_time
        ),
        "Time (seconds)",
        "CPU Utilization (%)",
    )
    .with_series(Series::from_observations("CPU Utilization", &series).with_color(tag.color()))
    .with_markers();

    let written = renderer.render(&tag.stem("cpu_util"), &figure)?;
    if let Some(s) = Summary::of(series.iter().map(|o| o.value)) {
        s.print("CPU utilization", "samples");
    }
    Ok(Outcome::Saved(written))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureConfig {
    /// Elapsed time assigned to the first sample `[s]`.
    pub offset: f64,
}

impl Default for PressureConfig {
    fn default() -> Self {
        Self { offset: 1.0 }
    }
}

/// Pressure samples with timestamps relative to the earliest one.
pub fn pressure_series(
    input: &Path,
    config: &PressureConfig,
) -> Result<Vec<Observation<PressureSample>>, ParseError> {
    let series = read_records::<PressureRecord>(input)?;
    Ok(TimeNormalizer::new(Reference::Min)
        .with_offset(config.offset)
        .normalize(series))
}

fn pressure_trace(
    label: &str,
    series: &[Observation<PressureSample>],
    f: impl Fn(&PressureSample) -> f64,
) -> Series {
    Series::new(label, series.iter().map(|o| (o.time, f(&o.value))).collect())
}

pub fn run_pressure(
    input: &Path,
    config: &PressureConfig,
    renderer: &SeriesRenderer,
) -> Result<Outcome, JobError> {
    ensure_input(input)?;
    let tag = tag_input(input);
    let series = pressure_series(input, config)?;
    if series.is_empty() {
        return Ok(Outcome::NoData);
    }

    let cpu = Figure::new("CPU avg10 and avg60 Over Time", "Time (seconds)", "CPU Average")
        .with_series(pressure_trace("CPU avg10", &series, |s| s.cpu.avg10))
        .with_series(pressure_trace("CPU avg60", &series, |s| s.cpu.avg60));
    let memory = Figure::new(
        "Memory avg10 and avg60 Over Time",
        "Time (seconds)",
        "Memory Average",
    )
    .with_series(pressure_trace("Memory some avg10", &series, |s| s.memory_some.avg10))
    .with_series(pressure_trace("Memory some avg60", &series, |s| s.memory_some.avg60))
    .with_series(pressure_trace("Memory full avg10", &series, |s| s.memory_full.avg10))
    .with_series(pressure_trace("Memory full avg60", &series, |s| s.memory_full.avg60));

    let cpu_stem = format!("{}_cpu_pressure{}", tag.protocol, tag.id);
    let memory_stem = format!("{}_mem_pressure{}", tag.protocol, tag.id);
    let written = render_all(renderer, [(cpu_stem.as_str(), &cpu), (memory_stem.as_str(), &memory)])?;

    if let Some(s) = Summary::of(series.iter().map(|o| o.value.cpu.avg10)) {
        s.print("CPU avg10", "samples");
    }
    if let Some(s) = Summary::of(series.iter().map(|o| o.value.memory_some.avg10)) {
        s.print("Memory some avg10", "samples");
    }
    Ok(Outcome::Saved(written))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CwndQuicConfig {
    pub bin_width: f64,
    /// Bins starting at or after this elapsed time `[s]` are dropped.
    pub cutoff: f64,
}

impl Default for CwndQuicConfig {
    fn default() -> Self {
        Self {
            bin_width: 1.0,
            cutoff: 85.0,
        }
    }
}

/// Median congestion window per bin, relative to the first logged sample.
pub fn cwnd_quic_series(input: &Path, config: &CwndQuicConfig) -> Result<BinnedSeries, ParseError> {
    let series = parse_log_file(input, CwndLogParser)?;
    let series = TimeNormalizer::new(Reference::First).normalize(series);
    let bins = Binner::new(config.bin_width)
        .with_cutoff(config.cutoff)
        .bin(series);
    Ok(BinnedSeries {
        width: bins.width(),
        points: bins.reduce(Reduction::Median),
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CwndTcpConfig {
    pub bin_width: f64,
    /// Seconds subtracted from the recorded timestamps to align the series with the QUIC run.
    pub offset: f64,
}

impl Default for CwndTcpConfig {
    fn default() -> Self {
        Self {
            bin_width: 1.0,
            offset: 72.0,
        }
    }
}

/// Median send window per bin. Timestamps are kept as recorded and shifted by `-offset`.
pub fn cwnd_tcp_series(input: &Path, config: &CwndTcpConfig) -> Result<BinnedSeries, ParseError> {
    let series = read_records::<TcpCwndRecord>(input)?;
    let series = TimeNormalizer::new(Reference::Origin(0.0))
        .with_offset(-config.offset)
        .normalize(series);
    let bins = Binner::new(config.bin_width).bin(series);
    Ok(BinnedSeries {
        width: bins.width(),
        points: bins.reduce(Reduction::Median),
    })
}

/// Plot a binned congestion window series. Shared by the QUIC and the TCP tool.
pub fn run_cwnd(
    input: &Path,
    series: impl FnOnce(&Path) -> Result<BinnedSeries, ParseError>,
    labels: CwndLabels,
    renderer: &SeriesRenderer,
) -> Result<Outcome, JobError> {
    ensure_input(input)?;
    let tag = tag_input(input);
    let binned = series(input)?;
    if binned.points.is_empty() {
        return Ok(Outcome::NoData);
    }

    let protocol = tag.protocol.to_string().to_uppercase();
    let figure = Figure::new(
        format!("{protocol} {}", labels.title),
        labels.x_label,
        labels.y_label,
    )
    .with_series(
        Series::from_bins(labels.series, &binned.points, binned.width).with_color(tag.color()),
    );

    let written = renderer.render(&tag.stem("cwnd"), &figure)?;
    if let Some(s) = Summary::of(binned.values()) {
        s.print("cwnd", "bins");
    }
    Ok(Outcome::Saved(written))
}

/// Texts of a congestion window plot.
#[derive(Debug, Clone, Copy)]
pub struct CwndLabels {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: &'static str,
}

impl CwndLabels {
    pub const QUIC: Self = Self {
        title: "Congestion Window (cwnd) Over Time",
        x_label: "Time (seconds)",
        y_label: "Median cwnd",
        series: "Median Congestion Window",
    };
    pub const TCP: Self = Self {
        title: "Congestion Window Over Time",
        x_label: "Timestamp (seconds)",
        y_label: "snd_wnd (bytes)",
        series: "Congestion Window",
    };
}

/// QoE metrics per bin of a DASH log, relative to its earliest sample.
pub fn qoe_points(input: &Path, config: &QoeConfig) -> Result<Vec<QoePoint>, ParseError> {
    let series = read_records::<DashRecord>(input)?;
    let series = TimeNormalizer::new(Reference::Min).normalize(series);
    Ok(Binner::new(config.bin_width)
        .bin(series)
        .qoe(config.stall_threshold, &config.weights))
}

pub fn run_qoe(
    input: &Path,
    config: &QoeConfig,
    renderer: &SeriesRenderer,
) -> Result<Outcome, JobError> {
    ensure_input(input)?;
    let tag = tag_input(input);
    if !tag.is_known() {
        log::warn!("Could not detect protocol type from {input:?}. Using default naming.");
    }
    let points = qoe_points(input, config)?;
    if points.is_empty() {
        return Ok(Outcome::NoData);
    }

    if let Some(s) = Summary::of(points.iter().map(|p| p.qoe)) {
        s.print("QoE", "bins");
    }

    let figure = Figure::new(
        format!("QoE Over Time ({} sec)({tag})", config.bin_width),
        "Time (seconds)",
        "QoE",
    )
    .with_series(
        Series::new(
            "QoE",
            points
                .iter()
                .map(|p| (p.bin as f64 * config.bin_width, p.qoe))
                .collect(),
        )
        .with_color(tag.color()),
    )
    .with_markers();

    let written = renderer.render(&tag.stem("qoe"), &figure)?;
    Ok(Outcome::Saved(written))
}
