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
    binning::{QoeConfig, QoeWeights},
    pipeline::run_qoe,
    util::{self, OutputArgs},
};

/// Compute the QoE of a DASH session per time bin and plot it.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// CSV file with the columns `ts`, `videoBitrate`, and `videoBufferLength`.
    path: PathBuf,
    /// Size of the bins in seconds.
    #[arg(default_value_t = 1.0, value_parser = util::parse_positive_secs)]
    bin_size: f64,
    /// Penalty per second of stalling (defaults to the highest bitrate of the video).
    #[arg(long, default_value_t = QoeWeights::default().stall_penalty)]
    stall_penalty: f64,
    /// Penalty per unit of bitrate change between consecutive samples.
    #[arg(long, default_value_t = QoeWeights::default().switch_penalty)]
    switch_penalty: f64,
    /// Buffer level (in seconds) at or below which the player counts as stalled.
    #[arg(long, default_value_t = QoeConfig::default().stall_threshold)]
    stall_threshold: f64,
    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> ExitCode {
    util::init_logging();
    let args = Args::parse();

    let config = QoeConfig {
        bin_width: args.bin_size,
        stall_threshold: args.stall_threshold,
        weights: QoeWeights {
            stall_penalty: args.stall_penalty,
            switch_penalty: args.switch_penalty,
        },
    };
    let result = run_qoe(&args.path, &config, &args.output.renderer())
        .with_context(|| format!("Cannot compute the QoE of {:?}", args.path));
    util::finish(&args.path, result)
}
