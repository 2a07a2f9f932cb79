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
//! Derive the protocol tag of a measurement from the path of its log file.
//!
//! The tag only decides how outputs are named and colored. It never influences any computed value.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::render::PlotColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, strum::Display)]
#[strum(serialize_all = "lowercase")]
/// Transport protocol a measurement was taken with.
pub enum Protocol {
    Quic,
    Tcp,
    #[default]
    Unknown,
}

impl Protocol {
    /// Fixed plot color of the protocol.
    pub fn color(&self) -> PlotColor {
        match self {
            Self::Quic => PlotColor::Red,
            Self::Tcp => PlotColor::Blue,
            Self::Unknown => PlotColor::Green,
        }
    }
}

/// Protocol and (optional) run number detected in a path, e.g., `quic4` or `tcp38`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SeriesTag {
    pub protocol: Protocol,
    /// Digits immediately following the protocol name. Empty if there are none.
    pub id: String,
}

lazy_static! {
    static ref QUIC_ID: Regex = Regex::new(r"quic(\d+)").unwrap();
    static ref TCP_ID: Regex = Regex::new(r"tcp(\d+)").unwrap();
}

impl SeriesTag {
    /// Scan the segments of `path` (split on both `/` and `\`) for the first one mentioning `quic`
    /// or `tcp` (case-insensitive). Within a segment, `quic` takes precedence over `tcp`.
    pub fn from_path(path: impl AsRef<str>) -> Self {
        for segment in path.as_ref().split(['/', '\\']) {
            let segment = segment.to_lowercase();
            let (protocol, re) = if segment.contains("quic") {
                (Protocol::Quic, &*QUIC_ID)
            } else if segment.contains("tcp") {
                (Protocol::Tcp, &*TCP_ID)
            } else {
                continue;
            };
            let id = re
                .captures(&segment)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            return Self { protocol, id };
        }
        Self::default()
    }

    /// Whether a protocol was found in the path.
    pub fn is_known(&self) -> bool {
        self.protocol != Protocol::Unknown
    }

    pub fn color(&self) -> PlotColor {
        self.protocol.color()
    }

    /// Output filename stem `{prefix}_{protocol}{id}`, e.g. `cpu_util_quic4`.
    pub fn stem(&self, prefix: &str) -> String {
        format!("{prefix}_{self}")
    }
}

impl fmt::Display for SeriesTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.protocol, self.id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tcp_with_id() {
        let tag = SeriesTag::from_path("/data/runs/tcp38_cwnd.csv");
        assert_eq!(tag.protocol, Protocol::Tcp);
        assert_eq!(tag.id, "38");
        assert_eq!(tag.to_string(), "tcp38");
    }

    #[test]
    fn quic_in_directory() {
        let tag = SeriesTag::from_path("/data/QUIC4/dash_log.csv");
        assert_eq!(tag.protocol, Protocol::Quic);
        assert_eq!(tag.id, "4");
        assert_eq!(tag.stem("qoe"), "qoe_quic4");
    }

    #[test]
    fn windows_separators() {
        let tag = SeriesTag::from_path(r"C:\measurements\tcp2\dash.csv");
        assert_eq!(tag.protocol, Protocol::Tcp);
        assert_eq!(tag.id, "2");
    }

    #[test]
    fn first_segment_wins() {
        let tag = SeriesTag::from_path("quic7/tcp3.log");
        assert_eq!(tag.protocol, Protocol::Quic);
        assert_eq!(tag.id, "7");
    }

    #[test]
    fn quic_before_tcp_within_segment() {
        let tag = SeriesTag::from_path("tcp1_vs_quic2.log");
        assert_eq!(tag.protocol, Protocol::Quic);
        assert_eq!(tag.id, "2");
    }

    #[test]
    fn protocol_without_id() {
        let tag = SeriesTag::from_path("logs/tcp_pressure.csv");
        assert_eq!(tag.protocol, Protocol::Tcp);
        assert_eq!(tag.id, "");
        assert_eq!(tag.stem("cpu_util"), "cpu_util_tcp");
    }

    #[test]
    fn unknown() {
        let tag = SeriesTag::from_path("logs/run1.log");
        assert!(!tag.is_known());
        assert_eq!(tag.to_string(), "unknown");
        assert_eq!(tag.color(), PlotColor::Green);
    }

    #[test]
    fn palette() {
        assert_eq!(Protocol::Quic.color(), PlotColor::Red);
        assert_eq!(Protocol::Tcp.color(), PlotColor::Blue);
    }
}
