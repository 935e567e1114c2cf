//! Chart output. The run pipeline only talks to [`ChartSurface`]: it hands over the
//! complete set of series and asks for a render. [`PlottersChart`] draws them into a PNG
//! file with `plotters`.
use log::info;
use plotters::prelude::*;
use std::ops::Range;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("failed to render chart: {0}")]
    Render(String),
}

fn render_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// A labelled line on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl ChartSeries {
    pub fn new(label: &str, points: Vec<(f64, f64)>) -> Self {
        ChartSeries {
            label: label.to_string(),
            points,
        }
    }

    /// points with both coordinates finite, the only ones that can be drawn
    pub fn finite_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect()
    }
}

/// The single chart shown to the user. Series are always replaced as a whole.
pub trait ChartSurface {
    fn replace_all_series(&mut self, series: Vec<ChartSeries>);
    fn render(&mut self) -> Result<(), ChartError>;
}

pub struct PlottersChart {
    path: PathBuf,
    caption: String,
    x_desc: String,
    size: (u32, u32),
    series: Vec<ChartSeries>,
}

impl PlottersChart {
    pub fn new(path: impl Into<PathBuf>, x_desc: &str) -> Self {
        PlottersChart {
            path: path.into(),
            caption: "y' = f(x)".to_string(),
            x_desc: x_desc.to_string(),
            size: (800, 600),
            series: Vec::new(),
        }
    }

    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = caption.to_string();
        self
    }

    pub fn series(&self) -> &[ChartSeries] {
        &self.series
    }

    /// Axis ranges over all drawable points, widened by 5% of the span.
    fn ranges(&self) -> (Range<f64>, Range<f64>) {
        let points: Vec<(f64, f64)> = self.series.iter().flat_map(|s| s.finite_points()).collect();
        if points.is_empty() {
            return (0.0..1.0, 0.0..1.0);
        }
        let bounds = |values: Vec<f64>| {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let pad = if max > min { 0.05 * (max - min) } else { 1.0 };
            (min - pad)..(max + pad)
        };
        let x_range = bounds(points.iter().map(|p| p.0).collect());
        let y_range = bounds(points.iter().map(|p| p.1).collect());
        (x_range, y_range)
    }
}

impl ChartSurface for PlottersChart {
    fn replace_all_series(&mut self, series: Vec<ChartSeries>) {
        self.series = series;
    }

    fn render(&mut self) -> Result<(), ChartError> {
        let (x_range, y_range) = self.ranges();
        let root_area = BitMapBackend::new(&self.path, self.size).into_drawing_area();
        root_area.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root_area)
            .caption(&self.caption, ("sans-serif", 50))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(30)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .x_desc(&self.x_desc)
            .y_desc("y")
            .draw()
            .map_err(render_error)?;

        for (col, series) in self.series.iter().enumerate() {
            chart
                .draw_series(LineSeries::new(series.finite_points(), &Palette99::pick(col)))
                .map_err(render_error)?
                .label(series.label.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(col))
                });
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_error)?;
        root_area.present().map_err(render_error)?;
        info!("chart saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_finite_points_skip_nan() {
        let series = ChartSeries::new(
            "Euler Approximation",
            vec![(0.0, 1.0), (1.0, f64::NAN), (f64::INFINITY, 2.0), (2.0, 3.0)],
        );
        assert_eq!(series.finite_points(), vec![(0.0, 1.0), (2.0, 3.0)]);
    }

    #[test]
    fn test_ranges() {
        let mut chart = PlottersChart::new("unused.png", "x");
        assert_eq!(chart.ranges(), (0.0..1.0, 0.0..1.0));
        chart.replace_all_series(vec![
            ChartSeries::new("a", vec![(0.0, -1.0), (10.0, 1.0)]),
            ChartSeries::new("b", vec![(5.0, f64::NAN)]),
        ]);
        assert_eq!(chart.series().len(), 2);
        let (x_range, y_range) = chart.ranges();
        assert_eq!(x_range, -0.5..10.5);
        assert_relative_eq!(y_range.start, -1.1, epsilon = 1e-12);
        assert_relative_eq!(y_range.end, 1.1, epsilon = 1e-12);
        chart.replace_all_series(vec![ChartSeries::new("c", vec![(2.0, 3.0)])]);
        assert_eq!(chart.ranges(), (1.0..3.0, 2.0..4.0));
    }

    #[test]
    #[ignore = "needs a system font for the caption"]
    fn test_render_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let mut chart = PlottersChart::new(&path, "x");
        chart.replace_all_series(vec![ChartSeries::new(
            "Euler Approximation",
            vec![(0.0, 0.0), (1.0, 0.0), (2.0, 1.0)],
        )]);
        chart.render().unwrap();
        assert!(path.exists());
    }
}
