//! Form Controller
//! Drives one submission cycle: busy state, background request, and fan-out of
//! the result to the result panel, the chart, and the export binding.

use crate::charts::{ChartPoint, ChartPresenter};
use crate::client::{PredictError, PredictionService};
use crate::model::{FormFields, PredictionInput, PredictionResult};
use crate::report::{ReportError, ReportExporter};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{error, info, warn};

pub const SUBMIT_LABEL: &str = "▶ Predict";
pub const BUSY_LABEL: &str = "Calculating...";
pub const NODE_SIZE_WARNING: &str = "Warning: Node size must be positive.";
pub const CONNECTION_FAILED: &str = "Server Connection Failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message surfaced to the user until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Label and enabled flag of the submit button.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitControl {
    pub label: &'static str,
    pub enabled: bool,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            label: SUBMIT_LABEL,
            enabled: true,
        }
    }
}

impl SubmitControl {
    fn enter_busy(&mut self) {
        self.label = BUSY_LABEL;
        self.enabled = false;
    }

    fn restore(&mut self) {
        *self = Self::default();
    }
}

/// The three result fields, copied verbatim from the service.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub count: String,
    pub interval: String,
    pub comparison: String,
    pub moores_projection: Option<String>,
}

impl ResultPanel {
    fn from_result(result: &PredictionResult) -> Self {
        Self {
            count: result.formatted_count.clone(),
            interval: result.interval_text(),
            comparison: result.moores_comp.clone(),
            moores_projection: result.moores_val.map(|v| format!("{v:.0}")),
        }
    }
}

/// Last successful (result, input) pair, consumed by the export trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBinding {
    pub result: PredictionResult,
    pub input: PredictionInput,
}

/// How a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Success,
    Rejected,
    TransportFailure,
}

/// Request waiting on the worker thread.
struct InFlight {
    input: PredictionInput,
    rx: Receiver<Result<PredictionResult, PredictError>>,
}

/// Puts the submit button back when dropped, whichever way settlement exits.
struct RestoreOnDrop<'a> {
    form: &'a mut FormController,
}

impl Deref for RestoreOnDrop<'_> {
    type Target = FormController;

    fn deref(&self) -> &FormController {
        self.form
    }
}

impl DerefMut for RestoreOnDrop<'_> {
    fn deref_mut(&mut self) -> &mut FormController {
        self.form
    }
}

impl Drop for RestoreOnDrop<'_> {
    fn drop(&mut self) {
        self.form.submit.restore();
    }
}

/// Owns every piece of per-session UI state.
pub struct FormController {
    pub fields: FormFields,
    service: Arc<dyn PredictionService>,
    submit: SubmitControl,
    in_flight: Option<InFlight>,
    chart: ChartPresenter,
    result_panel: Option<ResultPanel>,
    export: Option<ExportBinding>,
    notices: Vec<Notice>,
    scroll_to_chart: bool,
}

impl FormController {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self {
            fields: FormFields::default(),
            service,
            submit: SubmitControl::default(),
            in_flight: None,
            chart: ChartPresenter::new(),
            result_panel: None,
            export: None,
            notices: Vec::new(),
            scroll_to_chart: false,
        }
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn chart(&self) -> &ChartPresenter {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut ChartPresenter {
        &mut self.chart
    }

    /// `None` until the first successful prediction.
    pub fn result_panel(&self) -> Option<&ResultPanel> {
        self.result_panel.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn dismiss_notices(&mut self) {
        self.notices.clear();
    }

    /// Consume a pending request to bring the chart into view.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_chart)
    }

    /// Start a prediction for the current field values.
    ///
    /// Returns false when the button is disabled (a request is already in flight).
    pub fn submit(&mut self) -> bool {
        if !self.submit.enabled || self.in_flight.is_some() {
            return false;
        }

        self.submit.enter_busy();
        // Notices belong to a single submission cycle
        self.notices.clear();

        let input = self.fields.to_input();
        if input.needs_node_size_warning() {
            warn!(node_size = input.node_size, "Non-positive node size submitted");
            self.notices.push(Notice::warning(NODE_SIZE_WARNING));
        }

        info!(year = %input.year, node_size = input.node_size, "Submitting prediction");

        let (tx, rx) = channel();
        let service = Arc::clone(&self.service);
        let request = input.clone();
        thread::spawn(move || {
            let _ = tx.send(service.predict(&request));
        });

        self.in_flight = Some(InFlight { input, rx });
        true
    }

    /// Check the worker for a response. Returns how the cycle ended once it has.
    pub fn poll(&mut self) -> Option<Settlement> {
        let in_flight = self.in_flight.take()?;

        let outcome = match in_flight.rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => {
                self.in_flight = Some(in_flight);
                return None;
            }
            Err(TryRecvError::Disconnected) => Err(PredictError::Transport(
                "prediction worker exited without a response".to_string(),
            )),
        };

        Some(self.settle(in_flight.input, outcome))
    }

    fn settle(
        &mut self,
        input: PredictionInput,
        outcome: Result<PredictionResult, PredictError>,
    ) -> Settlement {
        let mut form = RestoreOnDrop { form: self };

        match outcome {
            Ok(result) => {
                info!(count = %result.formatted_count, "Prediction received");
                form.result_panel = Some(ResultPanel::from_result(&result));
                form.chart
                    .set_prediction(ChartPoint::new(input.year_value(), result.prediction_count));
                form.replace_export_handler(result, input);
                form.scroll_to_chart = true;
                Settlement::Success
            }
            Err(PredictError::Rejected(message)) => {
                warn!(%message, "Prediction rejected by service");
                form.notices.push(Notice::error(format!("Error: {message}")));
                Settlement::Rejected
            }
            Err(PredictError::Transport(reason)) => {
                error!(%reason, "Prediction request failed");
                form.notices.push(Notice::error(CONNECTION_FAILED));
                Settlement::TransportFailure
            }
        }
    }

    /// Point the export trigger at a new (result, input) pair.
    pub fn replace_export_handler(&mut self, result: PredictionResult, input: PredictionInput) {
        self.export = Some(ExportBinding { result, input });
    }

    pub fn export_binding(&self) -> Option<&ExportBinding> {
        self.export.as_ref()
    }

    /// Write the report for the bound pair. `None` when nothing is bound yet.
    pub fn export_report(&self, path: &Path) -> Option<Result<PathBuf, ReportError>> {
        let binding = self.export.as_ref()?;
        Some(ReportExporter::export(&binding.result, &binding.input, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    fn result(count: f64, formatted: &str) -> PredictionResult {
        PredictionResult {
            prediction_count: count,
            formatted_count: formatted.into(),
            lower_bound: "96.0B".into(),
            upper_bound: "144.0B".into(),
            moores_comp: "2.1x ahead of trend".into(),
            prediction_log: 11.08,
            moores_val: None,
        }
    }

    /// Replies from a script, one entry per call, counting calls.
    struct ScriptedService {
        replies: Mutex<Vec<Result<PredictionResult, PredictError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedService {
        fn new(replies: Vec<Result<PredictionResult, PredictError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl PredictionService for ScriptedService {
        fn predict(&self, _input: &PredictionInput) -> Result<PredictionResult, PredictError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies.lock().unwrap().remove(0)
        }
    }

    /// Blocks until the test releases it.
    struct GatedService {
        gate: Mutex<Receiver<()>>,
    }

    impl PredictionService for GatedService {
        fn predict(&self, _input: &PredictionInput) -> Result<PredictionResult, PredictError> {
            let _ = self.gate.lock().unwrap().recv();
            Ok(result(1e10, "10.0 Billion"))
        }
    }

    struct PanickingService;

    impl PredictionService for PanickingService {
        fn predict(&self, _input: &PredictionInput) -> Result<PredictionResult, PredictError> {
            panic!("worker died");
        }
    }

    fn fill(form: &mut FormController, year: &str, node_size: &str) {
        form.fields = FormFields {
            year: year.into(),
            node_size: node_size.into(),
            area: "100".into(),
            trans_density: "250".into(),
            power_density: "50".into(),
        };
    }

    fn wait(form: &mut FormController) -> Settlement {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(settlement) = form.poll() {
                return settlement;
            }
            assert!(Instant::now() < deadline, "submission never settled");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn success_fans_out_to_panel_chart_and_export() {
        let service = ScriptedService::new(vec![Ok(result(1.2e11, "120.0 Billion"))]);
        let mut form = FormController::new(service.clone());
        fill(&mut form, "2030", "2");

        assert!(form.submit());
        assert_eq!(wait(&mut form), Settlement::Success);

        let panel = form.result_panel().unwrap();
        assert_eq!(panel.count, "120.0 Billion");
        assert_eq!(panel.interval, "96.0B - 144.0B");
        assert_eq!(panel.comparison, "2.1x ahead of trend");

        assert_eq!(form.chart().prediction(), &[ChartPoint::new(2030.0, 1.2e11)]);
        assert!(form.chart_mut().take_redraw());
        assert!(form.take_scroll_request());

        let binding = form.export_binding().unwrap();
        assert_eq!(binding.input.year, "2030");
        assert_eq!(binding.result.formatted_count, "120.0 Billion");

        assert_eq!(form.submit_control(), &SubmitControl::default());
        assert!(form.notices().is_empty());
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rejection_shows_message_and_keeps_previous_state() {
        let service = ScriptedService::new(vec![
            Ok(result(1.2e11, "120.0 Billion")),
            Err(PredictError::Rejected("Year out of supported range".into())),
        ]);
        let mut form = FormController::new(service);
        fill(&mut form, "2030", "2");
        form.submit();
        wait(&mut form);
        let chart_before = form.chart().prediction().to_vec();
        let panel_before = form.result_panel().cloned();

        fill(&mut form, "3000", "2");
        form.submit();
        assert_eq!(wait(&mut form), Settlement::Rejected);

        assert_eq!(
            form.notices(),
            &[Notice::error("Error: Year out of supported range")]
        );
        assert_eq!(form.chart().prediction(), chart_before.as_slice());
        assert_eq!(form.result_panel().cloned(), panel_before);
        assert_eq!(form.export_binding().unwrap().input.year, "2030");
        assert!(form.submit_control().enabled);
    }

    #[test]
    fn transport_failure_leaves_chart_empty() {
        let service = ScriptedService::new(vec![Err(PredictError::Transport("refused".into()))]);
        let mut form = FormController::new(service);
        fill(&mut form, "2030", "2");
        form.submit();

        assert_eq!(wait(&mut form), Settlement::TransportFailure);
        assert_eq!(form.notices(), &[Notice::error(CONNECTION_FAILED)]);
        assert!(form.chart().prediction().is_empty());
        assert!(form.result_panel().is_none());
        assert!(form.export_binding().is_none());
        assert!(form.submit_control().enabled);
    }

    #[test]
    fn new_submission_clears_previous_notices() {
        let service = ScriptedService::new(vec![
            Err(PredictError::Transport("refused".into())),
            Err(PredictError::Transport("refused".into())),
            Ok(result(1.2e11, "120.0 Billion")),
        ]);
        let mut form = FormController::new(service);
        fill(&mut form, "2030", "2");

        form.submit();
        assert_eq!(wait(&mut form), Settlement::TransportFailure);
        form.submit();
        assert_eq!(wait(&mut form), Settlement::TransportFailure);
        assert_eq!(form.notices(), &[Notice::error(CONNECTION_FAILED)]);

        form.submit();
        assert_eq!(wait(&mut form), Settlement::Success);
        assert!(form.notices().is_empty());
        assert_eq!(form.result_panel().unwrap().count, "120.0 Billion");
    }

    #[test]
    fn vanished_worker_counts_as_transport_failure() {
        let mut form = FormController::new(Arc::new(PanickingService));
        fill(&mut form, "2030", "2");
        form.submit();

        assert_eq!(wait(&mut form), Settlement::TransportFailure);
        assert!(!form.is_busy());
        assert!(form.submit_control().enabled);
    }

    #[test]
    fn button_stays_disabled_until_settled_even_after_warning() {
        let (release, gate) = std::sync::mpsc::channel();
        let mut form = FormController::new(Arc::new(GatedService {
            gate: Mutex::new(gate),
        }));
        fill(&mut form, "2030", "0");

        assert!(form.submit());
        assert_eq!(form.notices(), &[Notice::warning(NODE_SIZE_WARNING)]);
        assert_eq!(form.submit_control().label, BUSY_LABEL);
        assert!(!form.submit_control().enabled);

        // Second click while in flight is ignored
        assert!(!form.submit());
        thread::sleep(Duration::from_millis(20));
        assert_eq!(form.poll(), None);
        assert!(!form.submit_control().enabled);

        release.send(()).unwrap();
        assert_eq!(wait(&mut form), Settlement::Success);
        assert_eq!(form.submit_control().label, SUBMIT_LABEL);
        assert!(form.submit_control().enabled);
    }

    #[test]
    fn export_before_success_does_nothing() {
        let form = FormController::new(ScriptedService::new(vec![]));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prediction_report.pdf");

        assert!(form.export_report(&path).is_none());
        assert!(!path.exists());
    }

    #[test]
    fn export_reflects_latest_success() {
        let service = ScriptedService::new(vec![
            Ok(result(1e10, "10.0 Billion")),
            Ok(result(1.2e11, "120.0 Billion")),
        ]);
        let mut form = FormController::new(service);
        fill(&mut form, "2025", "3");
        form.submit();
        wait(&mut form);
        fill(&mut form, "2030", "2");
        form.submit();
        wait(&mut form);

        assert_eq!(form.chart().prediction(), &[ChartPoint::new(2030.0, 1.2e11)]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prediction_report.pdf");
        form.export_report(&path).unwrap().unwrap();

        let text = String::from_utf8_lossy(&std::fs::read(&path).unwrap()).into_owned();
        assert!(text.contains("(- Target Year: 2030) Tj"));
        assert!(text.contains("(- Node Size \\(nm\\): 2) Tj"));
        assert!(text.contains("(Predicted Count: 120.0 Billion) Tj"));
        assert!(!text.contains("(Predicted Count: 10.0 Billion) Tj"));
    }
}
