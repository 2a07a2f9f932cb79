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
    pipeline::{cpu_util_series, run_cpu_util, CpuUtilConfig},
    render::SeriesRenderer,
    util::Outcome,
};

use super::{assert_no_output, fixture};

const LOG: &str = "Monitoring started\n\
    Total CPU Utilization: 3.5%\n\
    Total CPU Utilization: 4.0%\n\
    core0: 10% core1: 2%\n\
    Total CPU Utilization: 55.25%\n\
    Total CPU Utilization: 60%\n";

#[test]
fn samples_from_start_time() {
    let (_dir, path) = fixture("cpu_quic4.log", LOG);
    let got: Vec<_> = cpu_util_series(&path, &CpuUtilConfig::default())
        .unwrap()
        .into_iter()
        .map(|o| (o.time, o.value))
        .collect();
    assert_eq!(got, vec![(2.0, 55.25), (3.0, 60.0)]);
}

#[test]
fn start_at_zero() {
    let (_dir, path) = fixture("cpu_quic4.log", LOG);
    let series = cpu_util_series(&path, &CpuUtilConfig { start_time: 0.0 }).unwrap();
    assert_eq!(series.len(), 4);
    assert_eq!(series[0].value, 3.5);
}

#[test]
fn start_after_last_sample_has_no_data() {
    let (dir, path) = fixture("cpu_tcp2.log", LOG);
    let outcome = run_cpu_util(
        &path,
        &CpuUtilConfig { start_time: 10.0 },
        &SeriesRenderer::new(dir.path()),
    )
    .unwrap();
    assert_eq!(outcome, Outcome::NoData);
    assert_no_output(dir.path(), "png");
}
