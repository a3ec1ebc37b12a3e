//! Trend chart rendering: one line per sensor across measurement stages.

use crate::timeseries::TimeSeriesMatrix;
use crate::utils::error::OutputError;
use log::info;
use plotters::prelude::*;
use std::path::Path;

/// Spacing between y-axis grid lines, in Vt code units
pub const Y_TICK_STEP: f64 = 0.5;

/// Chart appearance
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Average Vt per Sensor over Time".to_string(),
            width: 1600,
            height: 960,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Y range padded to whole units: `floor(min) - 1 ..= ceil(max) + 1`
pub fn y_axis_bounds(min: f64, max: f64) -> (f64, f64) {
    (min.floor() - 1.0, max.ceil() + 1.0)
}

/// Number of y labels so that grid lines fall every [`Y_TICK_STEP`]
pub fn y_label_count(low: f64, high: f64) -> usize {
    ((high - low) / Y_TICK_STEP).round() as usize + 1
}

/// Render the trend matrix as a PNG line chart
///
/// **Public** - main entry point for chart output
///
/// # Errors
/// * `OutputError::RenderFailed` - Matrix is empty or drawing failed
/// * `OutputError::InvalidPath` - Path is invalid
pub fn render_trend_chart(
    matrix: &TimeSeriesMatrix,
    output_path: impl AsRef<Path>,
    config: &ChartConfig,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    let (min, max) = matrix
        .value_range()
        .ok_or_else(|| OutputError::RenderFailed("trend matrix has no values".to_string()))?;
    let (y_low, y_high) = y_axis_bounds(min, max);

    info!("Rendering trend chart to: {}", output_path.display());
    super::prepare_output(output_path)?;

    let stages = matrix.stages();
    let stage_count = stages.len() as i32;

    let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_failed)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d((0..stage_count).into_segmented(), y_low..y_high)
        .map_err(render_failed)?;

    chart
        .configure_mesh()
        .x_desc("Time (DR)")
        .y_desc("Average Vt")
        .x_labels(stages.len())
        .y_labels(y_label_count(y_low, y_high))
        .x_label_formatter(&|v: &SegmentValue<i32>| match v {
            SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                stages.get(*i as usize).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .y_label_formatter(&|v: &f64| format!("{:.1}", v))
        .draw()
        .map_err(render_failed)?;

    for (idx, sensor) in matrix.sensors().iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let points: Vec<(SegmentValue<i32>, f64)> = matrix
            .series(sensor)
            .into_iter()
            .map(|(stage, value)| (SegmentValue::CenterOf(stage as i32), value))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(render_failed)?
            .label(sensor.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        chart
            .draw_series(
                points
                    .into_iter()
                    .map(|point| Circle::new(point, 4, color.filled())),
            )
            .map_err(render_failed)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_failed)?;

    root.present().map_err(render_failed)?;

    info!(
        "Chart written: {} sensors x {} stages",
        matrix.sensors().len(),
        stages.len()
    );
    Ok(())
}

fn render_failed<E: std::fmt::Display>(err: E) -> OutputError {
    OutputError::RenderFailed(err.to_string())
}
