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
//! Render series to a PNG image (and optionally to an interactive HTML page).
use std::{
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use plotly::{
    color::NamedColor,
    common::{Line, Marker, Mode, Title},
    layout::Axis,
    Layout, Plot, Scatter,
};
use plotters::prelude::*;

use crate::{binning::AggregatedPoint, parser::Observation};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot draw {path:?}: {reason}")]
    Drawing { path: PathBuf, reason: String },
    #[error("Figure {0:?} contains no data")]
    EmptyFigure(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotColor {
    Red,
    Blue,
    Green,
}

impl PlotColor {
    fn rgb(&self) -> RGBColor {
        match self {
            Self::Red => RED,
            Self::Blue => BLUE,
            Self::Green => GREEN,
        }
    }

    fn named(&self) -> NamedColor {
        match self {
            Self::Red => NamedColor::Red,
            Self::Blue => NamedColor::Blue,
            Self::Green => NamedColor::Green,
        }
    }
}

/// A labelled sequence of `(x, y)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    /// Fixed color. Series without one are colored from a palette.
    pub color: Option<PlotColor>,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            color: None,
            points,
        }
    }

    /// Plot the (normalized) observations as they are.
    pub fn from_observations(label: impl Into<String>, series: &[Observation]) -> Self {
        Self::new(label, series.iter().map(|o| (o.time, o.value)).collect())
    }

    /// Plot reduced bins at the start time of each bin.
    pub fn from_bins(label: impl Into<String>, points: &[AggregatedPoint], width: f64) -> Self {
        Self::new(
            label,
            points.iter().map(|p| (p.time(width), p.value)).collect(),
        )
    }

    pub fn with_color(self, color: PlotColor) -> Self {
        Self {
            color: Some(color),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    /// Draw a marker at every point in addition to the line.
    pub markers: bool,
}

impl Figure {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            series: Vec::new(),
            markers: false,
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_markers(self) -> Self {
        Self {
            markers: true,
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Whether a legend is drawn.
    pub fn has_legend(&self) -> bool {
        self.series.len() > 1
    }

    /// Axis ranges covering all points, padded by 5% on each side.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let points = self.series.iter().flat_map(|s| s.points.iter());
        let (x_min, x_max) = points.clone().map(|p| p.0).minmax_by(f64::total_cmp).into_option()?;
        let (y_min, y_max) = points.map(|p| p.1).minmax_by(f64::total_cmp).into_option()?;
        Some((pad(x_min, x_max), pad(y_min, y_max)))
    }
}

fn pad(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    if span > 0.0 {
        (min - 0.05 * span, max + 0.05 * span)
    } else {
        (min - 1.0, max + 1.0)
    }
}

/// Writes figures into `output_dir`, named by a stem (e.g., `qoe_quic4`).
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRenderer {
    pub output_dir: PathBuf,
    /// Image size in pixels.
    pub size: (u32, u32),
    /// Also write an interactive HTML version of each figure.
    pub html: bool,
}

impl Default for SeriesRenderer {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            size: (1000, 500),
            html: false,
        }
    }
}

impl SeriesRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn png_path(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}.png"))
    }

    pub fn html_path(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}.html"))
    }

    /// Render `figure` and return the paths of all written files.
    pub fn render(&self, stem: &str, figure: &Figure) -> Result<Vec<PathBuf>, RenderError> {
        if figure.is_empty() {
            return Err(RenderError::EmptyFigure(figure.title.clone()));
        }
        fs::create_dir_all(&self.output_dir)?;

        let mut written = vec![self.render_png(stem, figure)?];
        if self.html {
            written.push(self.render_html(stem, figure)?);
        }
        Ok(written)
    }

    /// Draw the figure into a PNG file. The drawing area is released when this returns.
    pub fn render_png(&self, stem: &str, figure: &Figure) -> Result<PathBuf, RenderError> {
        let path = self.png_path(stem);
        let ((x_min, x_max), (y_min, y_max)) = figure
            .bounds()
            .ok_or_else(|| RenderError::EmptyFigure(figure.title.clone()))?;
        let err = |e: &dyn std::fmt::Display| RenderError::Drawing {
            path: path.clone(),
            reason: e.to_string(),
        };

        log::debug!("Plotting {path:?}");
        let root = BitMapBackend::new(&path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| err(&e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&figure.title, ("sans-serif", 22).into_font())
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(80)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| err(&e))?;

        chart
            .configure_mesh()
            .x_desc(&figure.x_label)
            .y_desc(&figure.y_label)
            .draw()
            .map_err(|e| err(&e))?;

        for (i, series) in figure.series.iter().enumerate() {
            let color = series
                .color
                .map(|c| c.rgb().to_rgba())
                .unwrap_or_else(|| Palette99::pick(i).to_rgba());

            chart
                .draw_series(LineSeries::new(
                    series.points.iter().copied(),
                    color.stroke_width(2),
                ))
                .map_err(|e| err(&e))?
                .label(&series.label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

            if figure.markers {
                chart
                    .draw_series(
                        series
                            .points
                            .iter()
                            .map(|p| Circle::new(*p, 3, color.filled())),
                    )
                    .map_err(|e| err(&e))?;
            }
        }

        if figure.has_legend() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(|e| err(&e))?;
        }

        drop(chart);
        root.present().map_err(|e| err(&e))?;
        drop(root);
        Ok(path)
    }

    /// Write the figure as an interactive plotly page.
    pub fn render_html(&self, stem: &str, figure: &Figure) -> Result<PathBuf, RenderError> {
        let path = self.html_path(stem);
        let mode = if figure.markers {
            Mode::LinesMarkers
        } else {
            Mode::Lines
        };

        let mut plot = Plot::new();
        for series in &figure.series {
            let (xs, ys): (Vec<f64>, Vec<f64>) = series.points.iter().copied().unzip();
            let mut trace = Scatter::new(xs, ys).name(&series.label).mode(mode.clone());
            if let Some(color) = series.color {
                trace = trace
                    .line(Line::new().color(color.named()))
                    .marker(Marker::new().color(color.named()));
            }
            plot.add_trace(trace);
        }
        plot.set_layout(
            Layout::new()
                .title(Title::from(figure.title.as_str()))
                .x_axis(
                    Axis::new()
                        .title(Title::from(figure.x_label.as_str()))
                        .show_grid(true),
                )
                .y_axis(
                    Axis::new()
                        .title(Title::from(figure.y_label.as_str()))
                        .show_grid(true),
                )
                .show_legend(figure.has_legend()),
        );

        log::debug!("Plotting {path:?}");
        fs::write(&path, plot.to_html())?;
        Ok(path)
    }
}

/// Draw all `figures` and return the written files. Used by tools producing more than one image.
pub fn render_all<'a>(
    renderer: &SeriesRenderer,
    figures: impl IntoIterator<Item = (&'a str, &'a Figure)>,
) -> Result<Vec<PathBuf>, RenderError> {
    let mut written = Vec::new();
    for (stem, figure) in figures {
        written.extend(renderer.render(stem, figure)?);
    }
    Ok(written)
}

/// Display a list of written files, e.g. `a.png and b.png`.
pub fn display_paths(paths: &[impl AsRef<Path>]) -> String {
    paths
        .iter()
        .map(|p| p.as_ref().display().to_string())
        .join(" and ")
}

#[cfg(test)]
mod test {
    use super::*;

    fn figure() -> Figure {
        Figure::new("QoE Over Time", "Time (seconds)", "QoE")
            .with_series(Series::new("QoE", vec![(0.0, 1.0), (1.0, 3.0), (2.0, 2.0)]).with_color(PlotColor::Red))
            .with_markers()
    }

    #[test]
    fn bounds_are_padded() {
        let ((x0, x1), (y0, y1)) = figure().bounds().unwrap();
        assert!(x0 < 0.0 && x1 > 2.0);
        assert!(y0 < 1.0 && y1 > 3.0);
    }

    #[test]
    fn bounds_of_a_single_point() {
        let f = Figure::new("t", "x", "y").with_series(Series::new("s", vec![(4.0, 7.0)]));
        assert_eq!(f.bounds(), Some(((3.0, 5.0), (6.0, 8.0))));
    }

    #[test]
    fn legend_only_for_multiple_series() {
        assert!(!figure().has_legend());
        let f = figure().with_series(Series::new("other", vec![(0.0, 0.0)]));
        assert!(f.has_legend());
    }

    #[test]
    fn empty_figure_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SeriesRenderer::new(dir.path());
        let f = Figure::new("t", "x", "y").with_series(Series::new("s", Vec::new()));
        assert!(f.is_empty());
        assert!(matches!(
            renderer.render("empty", &f),
            Err(RenderError::EmptyFigure(_))
        ));
        assert!(!renderer.png_path("empty").exists());
    }

    #[test]
    fn html_output() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SeriesRenderer::new(dir.path());
        let path = renderer.render_html("qoe_quic4", &figure()).unwrap();
        assert_eq!(path, dir.path().join("qoe_quic4.html"));
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("QoE Over Time"));
    }

    #[test]
    fn unwritable_html_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SeriesRenderer::new(dir.path().join("missing"));
        assert!(matches!(
            renderer.render_html("qoe_quic4", &figure()),
            Err(RenderError::Io(_))
        ));
    }

    #[test]
    fn from_bins_uses_bin_start() {
        let points = [
            AggregatedPoint { bin: 0, value: 1.0 },
            AggregatedPoint { bin: 3, value: 2.0 },
        ];
        let s = Series::from_bins("median", &points, 2.0);
        assert_eq!(s.points, vec![(0.0, 1.0), (6.0, 2.0)]);
    }

    #[test]
    fn paths() {
        assert_eq!(display_paths(&["a.png", "b.png"]), "a.png and b.png");
        let r = SeriesRenderer::new("plots");
        assert_eq!(r.png_path("cwnd_tcp38"), PathBuf::from("plots/cwnd_tcp38.png"));
    }
}
