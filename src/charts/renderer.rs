//! Static Chart Renderer
//! Renders the trend chart to a PNG with plotters, on the same log axis as the
//! interactive view.
//!
//! Layout:
//! 1. Caption centered at top
//! 2. Historical trend line with markers
//! 3. Prediction marker (if any)
//! 4. Legend in the upper-left corner

use crate::charts::presenter::{
    ChartPoint, ChartPresenter, LogScale, HISTORICAL_LABEL, PREDICTION_LABEL, X_AXIS_TITLE,
    Y_AXIS_TITLE,
};
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const HISTORICAL: RGBColor = RGBColor(68, 68, 68);
const PREDICTION: RGBColor = RGBColor(0, 188, 212);

pub const DEFAULT_PNG_NAME: &str = "trend_chart.png";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart drawing failed: {0}")]
    Draw(String),
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Points as `(year, count)` tuples, dropping anything the log axis cannot show.
    pub fn series(points: &[ChartPoint]) -> Vec<(f64, f64)> {
        points
            .iter()
            .filter(|p| p.x.is_finite() && p.y > 0.0)
            .map(|p| (p.x, p.y))
            .collect()
    }

    /// Render the chart into PNG bytes in memory.
    pub fn render_to_bytes(
        chart: &ChartPresenter,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let ([x_min, x_max], [exp_min, exp_max]) = chart.bounds();
        let historical = Self::series(chart.historical());
        let prediction = Self::series(chart.prediction());

        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let mut ctx = ChartBuilder::on(&root)
                .caption("Transistor Count Trend", ("sans-serif", 24))
                .margin(20)
                .x_label_area_size(45)
                .y_label_area_size(80)
                .build_cartesian_2d(
                    x_min..x_max,
                    (LogScale::from_plot(exp_min)..LogScale::from_plot(exp_max)).log_scale(),
                )
                .map_err(draw_err)?;

            ctx.configure_mesh()
                .x_desc(X_AXIS_TITLE)
                .y_desc(Y_AXIS_TITLE)
                .x_label_formatter(&|x| format!("{:.0}", x))
                .y_label_formatter(&|y| format!("{:.0e}", y))
                .draw()
                .map_err(draw_err)?;

            ctx.draw_series(LineSeries::new(
                historical.iter().copied(),
                HISTORICAL.stroke_width(2),
            ))
            .map_err(draw_err)?
            .label(HISTORICAL_LABEL)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], HISTORICAL));

            ctx.draw_series(
                historical
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, HISTORICAL.filled())),
            )
            .map_err(draw_err)?;

            if !prediction.is_empty() {
                ctx.draw_series(
                    prediction
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 8, PREDICTION.filled())),
                )
                .map_err(draw_err)?
                .label(PREDICTION_LABEL)
                .legend(|(x, y)| Circle::new((x + 10, y), 5, PREDICTION.filled()));
            }

            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(draw_err)?;

            root.present().map_err(draw_err)?;
        }

        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RenderError::Draw("pixel buffer size mismatch".to_string()))?;
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    /// Render the chart and write it to `path`.
    pub fn save_png(
        chart: &ChartPresenter,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let png = Self::render_to_bytes(chart, width, height)?;
        std::fs::write(path, png)?;
        info!(path = %path.display(), "Chart image saved");
        Ok(())
    }
}
