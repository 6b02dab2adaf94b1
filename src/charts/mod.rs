//! Charts module - Trend dataset and rendering

mod plotter;
mod presenter;
mod renderer;

pub use plotter::ChartPlotter;
pub use presenter::{ChartPoint, ChartPresenter};
pub use renderer::{StaticChartRenderer, DEFAULT_PNG_NAME};
