//! Chart Presenter Module
//! Owns the trend chart's two series and the log mapping used to draw them.

/// Known process generations: (year, transistor count).
pub const HISTORICAL_TREND: [ChartPoint; 6] = [
    ChartPoint::new(1971.0, 2_300.0),
    ChartPoint::new(1980.0, 29_000.0),
    ChartPoint::new(1990.0, 1_200_000.0),
    ChartPoint::new(2000.0, 42_000_000.0),
    ChartPoint::new(2010.0, 2_300_000_000.0),
    ChartPoint::new(2020.0, 50_000_000_000.0),
];

pub const HISTORICAL_LABEL: &str = "Historical Trend (Moore's Law)";
pub const PREDICTION_LABEL: &str = "Your Prediction (You Are Here)";
pub const X_AXIS_TITLE: &str = "Year";
pub const Y_AXIS_TITLE: &str = "Transistor Count (Log Scale)";

/// A single (year, transistor count) sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

impl ChartPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Base-10 log mapping for the vertical axis.
///
/// Counts span 10^3 to past 10^10, so plots work in exponent space.
pub struct LogScale;

impl LogScale {
    pub fn to_plot(count: f64) -> f64 {
        count.log10()
    }

    pub fn from_plot(value: f64) -> f64 {
        10f64.powf(value)
    }

    /// Tick label for a value in exponent space, e.g. `1e9`.
    pub fn tick_label(value: f64) -> String {
        let rounded = value.round();
        if (value - rounded).abs() < 1e-6 {
            format!("1e{}", rounded as i64)
        } else {
            String::new()
        }
    }
}

/// Dataset behind the trend chart.
///
/// The historical series is fixed at construction. The prediction series holds
/// zero or one point and is only ever replaced whole.
#[derive(Debug, Clone)]
pub struct ChartPresenter {
    historical: Vec<ChartPoint>,
    prediction: Vec<ChartPoint>,
    redraw_pending: bool,
}

impl Default for ChartPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartPresenter {
    pub fn new() -> Self {
        Self {
            historical: HISTORICAL_TREND.to_vec(),
            prediction: Vec::new(),
            redraw_pending: false,
        }
    }

    pub fn historical(&self) -> &[ChartPoint] {
        &self.historical
    }

    pub fn prediction(&self) -> &[ChartPoint] {
        &self.prediction
    }

    /// Replace the prediction series with `point`, then schedule a redraw.
    pub fn set_prediction(&mut self, point: ChartPoint) {
        self.prediction = vec![point];
        self.redraw_pending = true;
    }

    /// Consume the pending redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    /// Plot bounds in (year, exponent) space covering both series.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let mut x = [f64::INFINITY, f64::NEG_INFINITY];
        let mut y = [f64::INFINITY, f64::NEG_INFINITY];

        for point in self.historical.iter().chain(self.prediction.iter()) {
            if !point.x.is_finite() || !(point.y > 0.0) {
                continue;
            }
            let exp = LogScale::to_plot(point.y);
            x = [x[0].min(point.x), x[1].max(point.x)];
            y = [y[0].min(exp), y[1].max(exp)];
        }

        ([x[0].floor() - 5.0, x[1].ceil() + 5.0], [y[0].floor(), y[1].ceil()])
    }
}
