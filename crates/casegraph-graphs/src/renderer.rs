//! Chart rendering trait and the plotters implementation

use crate::chart_data::{Band, ChartData, TextLabel};
use casegraph_common::{parse_rgb, CaseGraphError, Result};
use plotters::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FONT_FAMILY: &str = "sans-serif";
const TITLE_FONT_SIZE: u32 = 28;
const AXIS_FONT_SIZE: u32 = 16;
const ANNOTATION_FONT_SIZE: u32 = 14;
const FOOTER_HEIGHT: i32 = 30;
const LINE_WIDTH: u32 = 2;

/// Handle to a chart written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedChart {
    /// Where the image was written.
    pub path: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// Something that can draw a [`ChartData`] to a file.
pub trait ChartRenderer: Send + Sync {
    /// Draw `chart` to `path`, creating parent directories as needed.
    fn render_to_file(&self, chart: &ChartData, path: &Path) -> Result<RenderedChart>;

    /// Gets the name of this renderer.
    fn name(&self) -> &'static str;
}

/// Draws the annotated case chart as a PNG through plotters' bitmap backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseChartRenderer;

impl CaseChartRenderer {
    /// Create a new renderer
    pub const fn new() -> Self {
        Self
    }
}

/// Resolve a configured colour name or `#rrggbb` value.
pub fn rgb(value: &str) -> Result<RGBColor> {
    parse_rgb(value)
        .map(|(r, g, b)| RGBColor(r, g, b))
        .ok_or_else(|| CaseGraphError::graph(format!("Unknown colour '{value}'")))
}

fn band_rectangles(bands: &[Band]) -> Result<Vec<Rectangle<(f64, f64)>>> {
    bands
        .iter()
        .map(|band| {
            Ok(Rectangle::new(
                [(band.x_start, band.y_low), (band.x_end, band.y_high)],
                rgb(&band.color)?.filled(),
            ))
        })
        .collect()
}

fn text_elements(labels: &[TextLabel]) -> Result<Vec<Text<'static, (f64, f64), String>>> {
    labels
        .iter()
        .map(|label| {
            let style = (FONT_FAMILY, ANNOTATION_FONT_SIZE)
                .into_font()
                .color(&rgb(&label.color)?);
            Ok(Text::new(label.text.clone(), (label.x, label.y), style))
        })
        .collect()
}

impl ChartRenderer for CaseChartRenderer {
    fn render_to_file(&self, chart: &ChartData, path: &Path) -> Result<RenderedChart> {
        if chart.lines.iter().all(|line| line.values.is_empty()) {
            return Err(CaseGraphError::graph("No data to render"));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let root = BitMapBackend::new(path, (chart.width, chart.height)).into_drawing_area();
        root.fill(&rgb(&chart.background)?)?;

        let plot_height = i32::try_from(chart.height).unwrap_or(i32::MAX) - FOOTER_HEIGHT;
        let (upper, footer) = root.split_vertically(plot_height.max(0));

        let ticks: HashMap<usize, &str> = chart
            .x_ticks
            .iter()
            .map(|(row, label)| (*row, label.as_str()))
            .collect();
        let x_formatter = |x: &f64| {
            let row = x.round().max(0.0) as usize;
            ticks.get(&row).map(|s| (*s).to_string()).unwrap_or_default()
        };

        let mut context = ChartBuilder::on(&upper)
            .caption(&chart.title, (FONT_FAMILY, TITLE_FONT_SIZE))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(0f64..chart.x_max.max(1.0), 0f64..chart.y_max)?;

        // Bands sit underneath the grid and the lines.
        context.draw_series(band_rectangles(&chart.month_bands)?)?;
        context.draw_series(band_rectangles(&chart.era_bands)?)?;

        context
            .configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_labels(chart.x_ticks.len().max(1))
            .x_label_formatter(&x_formatter)
            .axis_desc_style((FONT_FAMILY, AXIS_FONT_SIZE))
            .light_line_style(rgb(&chart.grid)?)
            .draw()?;

        for line in &chart.lines {
            let color = rgb(&line.color)?;
            let points = line
                .values
                .iter()
                .enumerate()
                .map(|(i, &value)| (i as f64, value as f64));
            context
                .draw_series(LineSeries::new(points, color.stroke_width(LINE_WIDTH)))?
                .label(line.metric.name())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        context.draw_series(text_elements(&chart.marker_labels)?)?;
        context.draw_series(text_elements(&chart.month_labels)?)?;
        context.draw_series(text_elements(&chart.latest_labels)?)?;

        context
            .configure_series_labels()
            .position(SeriesLabelPosition::MiddleLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        footer.draw(&Text::new(
            chart.footnote.clone(),
            (10, 5),
            (FONT_FAMILY, ANNOTATION_FONT_SIZE).into_font(),
        ))?;

        root.present()?;
        debug!(
            bands = chart.month_bands.len() + chart.era_bands.len(),
            labels = chart.marker_labels.len() + chart.month_labels.len(),
            "Chart annotations drawn"
        );
        info!("Successfully rendered chart to {:?}", path);

        Ok(RenderedChart {
            path: path.to_path_buf(),
            width: chart.width,
            height: chart.height,
        })
    }

    fn name(&self) -> &'static str {
        "case_chart"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart_data::build_chart_data;
    use casegraph_common::test_utils::{create_temp_dir, feed_fixtures};
    use casegraph_config::ChartConfig;
    use casegraph_data::{parse_payload, transform};

    #[test]
    fn test_rgb_names_and_hex() {
        assert_eq!(rgb("FIREBRICK").unwrap(), RGBColor(178, 34, 34));
        assert_eq!(rgb("#102030").unwrap(), RGBColor(16, 32, 48));
    }

    #[test]
    fn test_rgb_unknown_is_graph_error() {
        assert!(matches!(rgb("octarine"), Err(CaseGraphError::Graph { .. })));
    }

    #[test]
    fn test_renderer_name() {
        assert_eq!(CaseChartRenderer::new().name(), "case_chart");
    }

    fn sample_chart() -> ChartData {
        let records = parse_payload(&feed_fixtures::sample_payload()).unwrap();
        let series = transform(&records, "Singapore").unwrap();
        let config = ChartConfig {
            markers: vec![],
            ..ChartConfig::default()
        };
        build_chart_data(&series, &config).unwrap()
    }

    #[test]
    fn test_render_empty_data_error() {
        let mut chart = sample_chart();
        for line in &mut chart.lines {
            line.values.clear();
        }

        let temp_dir = create_temp_dir();
        let path = temp_dir.path().join("empty.png");
        let result = CaseChartRenderer::new().render_to_file(&chart, &path);

        assert!(matches!(result, Err(CaseGraphError::Graph { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_render_unknown_background_is_graph_error() {
        let mut chart = sample_chart();
        chart.background = "octarine".to_string();

        let temp_dir = create_temp_dir();
        let result = CaseChartRenderer::new().render_to_file(&chart, &temp_dir.path().join("x.png"));
        assert!(matches!(result, Err(CaseGraphError::Graph { .. })));
    }

    #[test]
    fn test_render_to_file() {
        let chart = sample_chart();

        let temp_dir = create_temp_dir();
        let path = temp_dir.path().join("nested").join("chart.png");
        let rendered = CaseChartRenderer::new().render_to_file(&chart, &path).unwrap();

        assert_eq!(rendered.path, path);
        assert_eq!((rendered.width, rendered.height), (1600, 800));
        let metadata = std::fs::metadata(&path).expect("Failed to read file metadata");
        assert!(metadata.len() > 1000, "Generated chart file is too small");
    }
}
