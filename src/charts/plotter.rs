//! Chart Plotter Module
//! Draws the interactive trend chart using egui_plot.

use crate::charts::presenter::{
    ChartPoint, ChartPresenter, LogScale, HISTORICAL_LABEL, PREDICTION_LABEL, X_AXIS_TITLE,
    Y_AXIS_TITLE,
};
use egui::Color32;
use egui_plot::{GridMark, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints, Points};

pub const HISTORICAL_COLOR: Color32 = Color32::from_rgb(68, 68, 68);
pub const PREDICTION_COLOR: Color32 = Color32::from_rgb(0, 188, 212); // Cyan

/// Upper bound on y grid lines per frame
const MAX_GRID_MARKS: usize = 40;

/// Creates the trend visualization using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Convert points to plot space, dropping anything the log axis cannot show.
    pub fn to_plot_points(points: &[ChartPoint]) -> Vec<[f64; 2]> {
        points
            .iter()
            .filter(|p| p.x.is_finite() && p.y > 0.0)
            .map(|p| [p.x, LogScale::to_plot(p.y)])
            .collect()
    }

    /// Grid marks on whole exponents between `lo` and `hi`.
    ///
    /// One mark per decade, widening to every n-th decade once the view spans
    /// more than `MAX_GRID_MARKS` decades. Non-finite bounds yield no marks.
    pub fn decade_marks(lo: f64, hi: f64) -> Vec<GridMark> {
        if !lo.is_finite() || !hi.is_finite() || hi < lo {
            return Vec::new();
        }

        let step = ((hi.ceil() - lo.floor()) / MAX_GRID_MARKS as f64).ceil().max(1.0);
        let first = (lo / step).floor() * step;
        (0..=MAX_GRID_MARKS + 1)
            .map(|i| first + i as f64 * step)
            .take_while(|&value| value <= hi.ceil())
            .map(|value| GridMark {
                value,
                step_size: step,
            })
            .collect()
    }

    /// Draw historical trend plus the prediction marker.
    /// X-axis: year, Y-axis: transistor count on a log10 scale
    pub fn draw_trend_chart(ui: &mut egui::Ui, chart: &ChartPresenter, height: f32) {
        let ([x_min, x_max], [y_min, y_max]) = chart.bounds();
        let historical = Self::to_plot_points(chart.historical());
        let prediction = Self::to_plot_points(chart.prediction());

        Plot::new("trend_chart")
            .height(height)
            .legend(Legend::default())
            .x_axis_label(X_AXIS_TITLE)
            .y_axis_label(Y_AXIS_TITLE)
            .allow_scroll(false)
            .include_x(x_min)
            .include_x(x_max)
            .include_y(y_min)
            .include_y(y_max)
            .y_grid_spacer(|input| {
                let (lo, hi) = input.bounds;
                Self::decade_marks(lo, hi)
            })
            .y_axis_formatter(|mark, _range| LogScale::tick_label(mark.value))
            .label_formatter(|name, value| {
                let count = LogScale::from_plot(value.y);
                if name.is_empty() {
                    format!("{:.0}: {:.3e}", value.x, count)
                } else {
                    format!("{}\n{:.0}: {:.3e}", name, value.x, count)
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(historical.iter().copied()))
                        .color(HISTORICAL_COLOR)
                        .style(LineStyle::dashed_loose())
                        .width(1.5)
                        .name(HISTORICAL_LABEL),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(historical.iter().copied()))
                        .radius(3.0)
                        .color(HISTORICAL_COLOR)
                        .name(HISTORICAL_LABEL),
                );

                if !prediction.is_empty() {
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(prediction.iter().copied()))
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(8.0)
                            .color(PREDICTION_COLOR)
                            .name(PREDICTION_LABEL),
                    );
                }
            });
    }
}
