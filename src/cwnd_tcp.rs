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
    pipeline::{cwnd_tcp_series, run_cwnd, CwndLabels, CwndTcpConfig},
    util::{self, OutputArgs},
};

/// Plot the median TCP send window per second.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// CSV file with the columns `timestamp` and `snd_wnd`.
    path: PathBuf,
    /// Seconds subtracted from every timestamp to align the series with the QUIC run.
    #[arg(default_value_t = CwndTcpConfig::default().offset, allow_negative_numbers = true)]
    offset: f64,
    /// Width of the bins in seconds.
    #[arg(long, default_value_t = 1.0, value_parser = util::parse_positive_secs)]
    bin_size: f64,
    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> ExitCode {
    util::init_logging();
    let args = Args::parse();

    let config = CwndTcpConfig {
        bin_width: args.bin_size,
        offset: args.offset,
    };
    let result = run_cwnd(
        &args.path,
        |p| cwnd_tcp_series(p, &config),
        CwndLabels::TCP,
        &args.output.renderer(),
    )
    .with_context(|| format!("Cannot plot the send window of {:?}", args.path));
    util::finish(&args.path, result)
}
