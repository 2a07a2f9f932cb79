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
//! Utility module collection of functions shared by all tools.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use crate::{
    parser::ParseError,
    render::{display_paths, RenderError, SeriesRenderer},
};

/// Logging configuration, relative to the working directory.
pub const LOG_CONFIG: &str = "log4rs.yml";

/// Initialize logging from `log4rs.yml` if present. Otherwise, log to stderr according to
/// `RUST_LOG`.
pub fn init_logging() {
    if Path::new(LOG_CONFIG).exists() {
        match log4rs::init_file(LOG_CONFIG, Default::default()) {
            Ok(()) => return,
            Err(e) => eprintln!("Cannot load {LOG_CONFIG}: {e}. Falling back to RUST_LOG."),
        }
    }
    let _ = pretty_env_logger::try_init();
}

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("File not found at {0:?}")]
    InputNotFound(PathBuf),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result of a tool that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The plots were written to these files.
    Saved(Vec<PathBuf>),
    /// The input did not contain any usable data. Nothing was written.
    NoData,
}

/// Exit code of a run that failed.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code of a run that found no usable data.
pub const EXIT_NO_DATA: u8 = 2;

/// Check that the input exists before anything is parsed or written.
pub fn ensure_input(path: &Path) -> Result<(), JobError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(JobError::InputNotFound(path.to_path_buf()))
    }
}

/// Report the result of a tool to the user and return the exit status of the process.
///
/// Errors are logged with their context chain only. Backtraces are never shown.
pub fn report(input: &Path, result: anyhow::Result<Outcome>) -> u8 {
    match result {
        Ok(Outcome::Saved(paths)) => {
            println!("Plot saved as {}", display_paths(&paths));
            0
        }
        Ok(Outcome::NoData) => {
            println!("No valid data found in {}.", input.display());
            EXIT_NO_DATA
        }
        Err(e) => {
            log::error!("{e:#}");
            EXIT_FAILURE
        }
    }
}

/// [`report`] the result and turn it into the exit code of the process.
pub fn finish(input: &Path, result: anyhow::Result<Outcome>) -> ExitCode {
    ExitCode::from(report(input, result))
}

/// Command line options that control where and how the plots are written.
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Directory in which the plots are stored.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
    /// Also write an interactive HTML version of every plot.
    #[arg(long)]
    pub html: bool,
}

impl OutputArgs {
    pub fn renderer(&self) -> SeriesRenderer {
        SeriesRenderer {
            html: self.html,
            ..SeriesRenderer::new(&self.output_dir)
        }
    }
}

/// Parse a strictly positive number of seconds, e.g. a bin size.
pub fn parse_positive_secs(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(x) if x.is_finite() && x > 0.0 => Ok(x),
        Ok(x) => Err(format!("must be a positive number of seconds, got {x}")),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn positive_secs() {
        assert_eq!(parse_positive_secs("2.5"), Ok(2.5));
        assert_eq!(parse_positive_secs("1"), Ok(1.0));
        assert!(parse_positive_secs("0").is_err());
        assert!(parse_positive_secs("-1").is_err());
        assert!(parse_positive_secs("inf").is_err());
        assert!(parse_positive_secs("one").is_err());
    }

    #[test]
    fn exit_status() {
        let input = Path::new("dash_quic4.csv");
        assert_eq!(
            report(input, Ok(Outcome::Saved(vec![PathBuf::from("qoe_quic4.png")]))),
            0
        );
        assert_eq!(report(input, Ok(Outcome::NoData)), EXIT_NO_DATA);
        assert_eq!(report(input, Err(anyhow::anyhow!("broken"))), EXIT_FAILURE);

        let err = anyhow::Error::from(JobError::InputNotFound(input.to_path_buf()))
            .context("Cannot compute the QoE");
        assert_eq!(report(input, Err(err)), EXIT_FAILURE);
    }

    #[test]
    fn missing_input() {
        let err = ensure_input(Path::new("/no/such/dash_quic4.csv")).unwrap_err();
        assert!(matches!(err, JobError::InputNotFound(_)));
        assert_eq!(
            err.to_string(),
            "File not found at \"/no/such/dash_quic4.csv\""
        );
    }
}
