//! GUI module - User interface components

mod app;
mod chart_viewer;
mod dialogs;
mod form_panel;

pub use app::ProjectorApp;
pub use chart_viewer::{ChartViewer, ChartViewerAction};
pub use dialogs::{DialogAction, DialogLayer};
pub use form_panel::{FormPanel, FormPanelAction};
