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
//! End-to-end tests of the tool pipelines on small log files.
//!
//! These tests stop short of drawing PNGs, which depends on the fonts installed on the machine.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

mod cpu_util;
mod qoe;

/// Write `content` to `name` inside a fresh temporary directory.
pub fn fixture(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::File::create(&path)
        .unwrap()
        .write_all(content.as_bytes())
        .unwrap();
    (dir, path)
}

/// Assert that `dir` contains no files with the given extension.
#[track_caller]
pub fn assert_no_output(dir: &Path, extension: &str) {
    let found: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == extension))
        .collect();
    assert!(found.is_empty(), "unexpected output files: {found:?}");
}
