use std::path::PathBuf;

use crate::alert::{AlertChannel, AlertSeverity};
use crate::view_model::{project, AppViewModel};
use crate::{DragState, Effect, FileList};

/// The only content type the upload gateway accepts.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
/// Output name used when the field is blank.
pub const DEFAULT_OUTPUT_NAME: &str = "merged";

/// Which section of the page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    AwaitingFirstUpload,
    ListVisible,
    MergeInFlight,
    ResultVisible,
}

/// A local file the user picked, before it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    /// Declared media type, e.g. `application/pdf`.
    pub content_type: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn is_pdf(&self) -> bool {
        self.content_type == PDF_CONTENT_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    files: FileList,
    mode: UiMode,
    pending_result: Option<String>,
    output_name_input: String,
    drag: DragState,
    alerts: AlertChannel,
    epoch: u64,
    uploads_in_flight: usize,
    clear_confirmation_pending: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            files: FileList::new(),
            mode: UiMode::AwaitingFirstUpload,
            pending_result: None,
            output_name_input: DEFAULT_OUTPUT_NAME.to_string(),
            drag: DragState::Idle,
            alerts: AlertChannel::new(),
            epoch: 0,
            uploads_in_flight: 0,
            clear_confirmation_pending: false,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        project(self)
    }

    pub fn files(&self) -> &FileList {
        &self.files
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn pending_result(&self) -> Option<&str> {
        self.pending_result.as_deref()
    }

    pub fn output_name_input(&self) -> &str {
        &self.output_name_input
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn alerts(&self) -> &AlertChannel {
        &self.alerts
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn uploads_in_flight(&self) -> usize {
        self.uploads_in_flight
    }

    pub fn clear_confirmation_pending(&self) -> bool {
        self.clear_confirmation_pending
    }

    /// Output name the merge will use: the trimmed field, or the default when blank.
    pub fn effective_output_name(&self) -> String {
        let trimmed = self.output_name_input.trim();
        if trimmed.is_empty() {
            DEFAULT_OUTPUT_NAME.to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Returns true once after any state change, for render throttling.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn files_mut(&mut self) -> &mut FileList {
        self.dirty = true;
        &mut self.files
    }

    pub(crate) fn drag_mut(&mut self) -> &mut DragState {
        self.dirty = true;
        &mut self.drag
    }

    /// Splits the borrow so a drop can mutate the list through the gesture.
    pub(crate) fn drag_and_files_mut(&mut self) -> (&mut DragState, &mut FileList) {
        self.dirty = true;
        (&mut self.drag, &mut self.files)
    }

    pub(crate) fn set_mode(&mut self, mode: UiMode) {
        if self.mode != mode {
            self.mode = mode;
            self.dirty = true;
        }
    }

    pub(crate) fn set_pending_result(&mut self, output_name: String) {
        self.pending_result = Some(output_name);
        self.dirty = true;
    }

    pub(crate) fn set_output_name_input(&mut self, text: String) {
        self.output_name_input = text;
        self.dirty = true;
    }

    pub(crate) fn set_clear_confirmation_pending(&mut self, pending: bool) {
        self.clear_confirmation_pending = pending;
        self.dirty = true;
    }

    pub(crate) fn upload_started(&mut self) {
        self.uploads_in_flight += 1;
        self.dirty = true;
    }

    pub(crate) fn upload_finished(&mut self) {
        self.uploads_in_flight = self.uploads_in_flight.saturating_sub(1);
        self.dirty = true;
    }

    /// Posts an alert and returns the timer effect that will expire it.
    pub(crate) fn post_alert(&mut self, message: impl Into<String>, severity: AlertSeverity) -> Effect {
        let generation = self.alerts.post(message, severity);
        self.dirty = true;
        Effect::ArmAlertTimer { generation }
    }

    pub(crate) fn expire_alert(&mut self, generation: u64) {
        if self.alerts.expire(generation) {
            self.dirty = true;
        }
    }

    /// Back to an empty session. Completions issued before this call become stale.
    pub(crate) fn reset(&mut self) {
        self.files.clear();
        self.pending_result = None;
        self.mode = UiMode::AwaitingFirstUpload;
        self.output_name_input = DEFAULT_OUTPUT_NAME.to_string();
        self.drag = DragState::Idle;
        self.alerts.dismiss();
        self.uploads_in_flight = 0;
        self.clear_confirmation_pending = false;
        self.epoch += 1;
        self.dirty = true;
    }
}
