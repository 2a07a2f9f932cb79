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
//! Module defining record data types to deserialize the CSV logs of the experiments.
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::parser::{parse_time, Observation, ParseError, TabularRecord};

/// One row of the DASH player log.
#[derive(Debug, Clone, Deserialize)]
pub struct DashRecord {
    /// Time of the sample in seconds.
    pub ts: f64,
    /// Bitrate of the currently played representation in `[bit/s]`.
    #[serde(rename = "videoBitrate")]
    pub video_bitrate: f64,
    /// Buffered video in `[s]`.
    #[serde(rename = "videoBufferLength")]
    pub video_buffer_length: f64,
}

/// Player state of a single DASH sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashSample {
    pub bitrate: f64,
    pub buffer_length: f64,
}

impl TabularRecord for DashRecord {
    type Value = DashSample;
    const COLUMNS: &'static [&'static str] = &["ts", "videoBitrate", "videoBufferLength"];

    fn description() -> &'static str {
        "DASH"
    }

    fn observation(self) -> Result<Observation<DashSample>, ParseError> {
        Ok(Observation::new(
            self.ts,
            DashSample {
                bitrate: self.video_bitrate,
                buffer_length: self.video_buffer_length,
            },
        ))
    }
}

/// One row of the TCP socket statistics log. There are multiple rows per timestamp (one per
/// socket or per poll).
#[derive(Debug, Clone, Deserialize)]
pub struct TcpCwndRecord {
    /// Time of the sample in seconds.
    pub timestamp: f64,
    /// Send window in `[bytes]`.
    pub snd_wnd: f64,
}

impl TabularRecord for TcpCwndRecord {
    type Value = f64;
    const COLUMNS: &'static [&'static str] = &["timestamp", "snd_wnd"];

    fn description() -> &'static str {
        "TCP cwnd"
    }

    fn observation(self) -> Result<Observation, ParseError> {
        Ok(Observation::new(self.timestamp, self.snd_wnd))
    }
}

/// One row of the pressure stall information (PSI) log, e.g.:
///
/// ```text
/// Timestamp,CPU,Memory
/// 2025-01-01 00:00:00,some avg10=1.00 avg60=0.50 avg300=0.10,some avg10=0.00 avg60=0.00 avg300=0.00 full avg10=0.00 avg60=0.00 avg300=0.00
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PressureRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "CPU", deserialize_with = "deserialize_pressure")]
    pub cpu: PressureLine,
    #[serde(rename = "Memory", deserialize_with = "deserialize_pressure")]
    pub memory: PressureLine,
}

/// CPU and memory pressure at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureSample {
    pub cpu: PressureStats,
    pub memory_some: PressureStats,
    pub memory_full: PressureStats,
}

impl TabularRecord for PressureRecord {
    type Value = PressureSample;
    const COLUMNS: &'static [&'static str] = &["Timestamp", "CPU", "Memory"];

    fn description() -> &'static str {
        "pressure"
    }

    fn observation(self) -> Result<Observation<PressureSample>, ParseError> {
        let time = parse_time(&self.timestamp).ok_or(ParseError::Timestamp(self.timestamp))?;
        let memory_full = self.memory.full.ok_or_else(|| ParseError::CompoundField {
            field: "Memory".to_string(),
            reason: "missing `full` section".to_string(),
        })?;
        Ok(Observation::new(
            time,
            PressureSample {
                cpu: self.cpu.some,
                memory_some: self.memory.some,
                memory_full,
            },
        ))
    }
}

/// Averages of one PSI section, in `[%]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureStats {
    pub avg10: f64,
    pub avg60: f64,
    pub avg300: Option<f64>,
    /// Total stall time in `[us]`.
    pub total: Option<f64>,
}

/// A PSI line: `some avg10=.. avg60=.. avg300=.. [total=..] [full avg10=.. ...]`.
///
/// The words `some` and `full` open a section. Every other token must be `key=value` with a
/// numeric value. Tokens before the first section header belong to `some`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureLine {
    pub some: PressureStats,
    pub full: Option<PressureStats>,
}

#[derive(Default)]
struct SectionBuilder {
    avg10: Option<f64>,
    avg60: Option<f64>,
    avg300: Option<f64>,
    total: Option<f64>,
}

impl SectionBuilder {
    fn build(self, name: &str) -> Result<PressureStats, String> {
        Ok(PressureStats {
            avg10: self.avg10.ok_or(format!("missing avg10 in `{name}`"))?,
            avg60: self.avg60.ok_or(format!("missing avg60 in `{name}`"))?,
            avg300: self.avg300,
            total: self.total,
        })
    }
}

fn parse_pressure(s: &str) -> Result<PressureLine, String> {
    let mut some: Option<SectionBuilder> = None;
    let mut full: Option<SectionBuilder> = None;
    let mut in_full = false;

    for token in s.split_whitespace() {
        match token {
            "some" | "full" => {
                let section = if token == "some" { &mut some } else { &mut full };
                if section.is_some() {
                    return Err(format!("duplicate section `{token}`"));
                }
                *section = Some(SectionBuilder::default());
                in_full = token == "full";
                continue;
            }
            _ => {}
        }

        let (key, value) = token
            .split_once('=')
            .ok_or(format!("token {token:?} is not of the form key=value"))?;
        let value = value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(format!("value of {key:?} is not a number: {value:?}"))?;

        let section = if in_full { &mut full } else { &mut some };
        let section = section.get_or_insert_with(SectionBuilder::default);
        match key {
            "avg10" => section.avg10 = Some(value),
            "avg60" => section.avg60 = Some(value),
            "avg300" => section.avg300 = Some(value),
            "total" => section.total = Some(value),
            _ => log::trace!("ignoring unknown PSI key {key:?}"),
        }
    }

    Ok(PressureLine {
        some: some.ok_or("missing `some` section")?.build("some")?,
        full: full.map(|f| f.build("full")).transpose()?,
    })
}

impl FromStr for PressureLine {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pressure(s).map_err(|reason| ParseError::CompoundField {
            field: s.to_string(),
            reason,
        })
    }
}

fn deserialize_pressure<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PressureLine, D::Error> {
    let buf = String::deserialize(deserializer)?;
    buf.parse().map_err(serde::de::Error::custom)
}
