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
use crate::{
    binning::{QoeConfig, QoeWeights},
    pipeline::{qoe_points, run_qoe},
    render::SeriesRenderer,
    util::{JobError, Outcome},
};

use super::{assert_no_output, fixture};

/// Two bins of one second. In the first one, two out of five buffer readings are at or below one
/// second.
const CSV: &str = "ts,videoBitrate,videoBufferLength,videoIndex\n\
    100.0,1000,0.0,0\n\
    100.2,1000,1.0,0\n\
    100.4,2000,2.5,1\n\
    100.6,2000,3.0,1\n\
    100.8,1000,4.0,0\n\
    101.0,3000,5.0,2\n\
    101.5,3000,5.5,2\n";

#[test]
fn stall_time_bitrate_and_switches() {
    let (_dir, path) = fixture("dash_quic4.csv", CSV);
    let points = qoe_points(&path, &QoeConfig::default()).unwrap();
    assert_eq!(points.len(), 2);

    let first = points[0];
    assert_eq!(first.bin, 0);
    assert!((first.total_stall_time - 0.4).abs() < 1e-12);
    assert!((first.average_bitrate - 1400.0).abs() < 1e-9);
    assert_eq!(first.quality_switches, 2000.0);
    let expected = 1400.0 - 698_834.0 * 0.4 - 2000.0;
    assert!((first.qoe - expected).abs() < 1e-6);

    let second = points[1];
    assert_eq!(second.bin, 1);
    assert_eq!(second.total_stall_time, 0.0);
    assert_eq!(second.quality_switches, 0.0);
    assert_eq!(second.qoe, 3000.0);
}

#[test]
fn stall_time_scales_with_bin_size() {
    let (_dir, path) = fixture("dash_tcp2.csv", CSV);
    let config = QoeConfig {
        bin_width: 2.0,
        weights: QoeWeights {
            stall_penalty: 0.0,
            switch_penalty: 0.0,
        },
        ..Default::default()
    };
    let points = qoe_points(&path, &config).unwrap();
    assert_eq!(points.len(), 1);
    // 2 of 7 readings stalled, scaled by the bin size
    assert!((points[0].total_stall_time - 2.0 / 7.0 * 2.0).abs() < 1e-12);
    // without penalties, the QoE is the average bitrate
    assert_eq!(points[0].qoe, points[0].average_bitrate);
}

#[test]
fn missing_column() {
    let (dir, path) = fixture("dash_quic4.csv", "ts,videoBitrate\n1,1000\n");
    let err = run_qoe(&path, &QoeConfig::default(), &SeriesRenderer::new(dir.path())).unwrap_err();
    assert!(matches!(err, JobError::Parse(_)));
    assert_no_output(dir.path(), "png");
}

#[test]
fn empty_file_has_no_data() {
    let (dir, path) = fixture("dash_quic4.csv", "");
    let outcome = run_qoe(&path, &QoeConfig::default(), &SeriesRenderer::new(dir.path())).unwrap();
    assert_eq!(outcome, Outcome::NoData);
    assert_no_output(dir.path(), "png");
}
