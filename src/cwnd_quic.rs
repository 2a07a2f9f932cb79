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
    pipeline::{cwnd_quic_series, run_cwnd, CwndLabels, CwndQuicConfig},
    util::{self, OutputArgs},
};

/// Plot the median QUIC congestion window per second.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// Log file (or single-column CSV) containing `<timestamp> ... cwnd: N` lines.
    path: PathBuf,
    /// Ignore everything logged this many seconds after the first sample.
    #[arg(default_value_t = CwndQuicConfig::default().cutoff, value_parser = util::parse_positive_secs)]
    cutoff: f64,
    /// Width of the bins in seconds.
    #[arg(long, default_value_t = 1.0, value_parser = util::parse_positive_secs)]
    bin_size: f64,
    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> ExitCode {
    util::init_logging();
    let args = Args::parse();

    let config = CwndQuicConfig {
        bin_width: args.bin_size,
        cutoff: args.cutoff,
    };
    let result = run_cwnd(
        &args.path,
        |p| cwnd_quic_series(p, &config),
        CwndLabels::QUIC,
        &args.output.renderer(),
    )
    .with_context(|| format!("Cannot plot the congestion window of {:?}", args.path));
    util::finish(&args.path, result)
}
