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
use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;

use logseries::{
    pipeline::{run_cpu_util, CpuUtilConfig},
    util::{self, OutputArgs},
};

/// Plot the total CPU utilization logged once per second by the host monitor.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// Log file containing `Total CPU Utilization: X%` lines.
    path: PathBuf,
    /// Only plot samples from this second on.
    #[arg(default_value_t = 2)]
    start_time: u32,
    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> ExitCode {
    util::init_logging();
    let args = Args::parse();

    let config = CpuUtilConfig {
        start_time: args.start_time as f64,
    };
    let result = run_cpu_util(&args.path, &config, &args.output.renderer())
        .with_context(|| format!("Cannot plot the CPU utilization of {:?}", args.path));
    util::finish(&args.path, result)
}
