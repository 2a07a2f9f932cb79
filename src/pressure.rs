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
    pipeline::{run_pressure, PressureConfig},
    util::{self, OutputArgs},
};

/// Plot CPU and memory pressure (PSI averages) over time.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// CSV file with the columns `Timestamp`, `CPU`, and `Memory`.
    path: PathBuf,
    /// Elapsed time assigned to the first sample.
    #[arg(long, default_value_t = PressureConfig::default().offset, allow_negative_numbers = true)]
    offset: f64,
    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> ExitCode {
    util::init_logging();
    let args = Args::parse();

    let config = PressureConfig {
        offset: args.offset,
    };
    let result = run_pressure(&args.path, &config, &args.output.renderer())
        .with_context(|| format!("Cannot plot the pressure of {:?}", args.path));
    util::finish(&args.path, result)
}
