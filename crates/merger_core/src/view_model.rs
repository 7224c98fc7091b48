use crate::{AlertSeverity, AppState, Msg, UiMode};

/// Shown in place of the merge/clear buttons while fewer than two files are listed.
pub const ADD_FILES_HINT: &str = "Add at least 2 PDF files to merge";
pub const RESULT_MESSAGE: &str = "PDFs merged successfully!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub mode: UiMode,
    pub upload_section_visible: bool,
    pub files_section_visible: bool,
    pub result_section_visible: bool,
    pub file_count_label: String,
    pub files: Vec<FileRowView>,
    pub can_merge: bool,
    /// Merge and clear buttons; hidden exactly when the hint is shown.
    pub action_group_visible: bool,
    pub hint: Option<&'static str>,
    pub merge_enabled: bool,
    pub loading: bool,
    pub uploads_in_flight: usize,
    pub output_name_input: String,
    pub confirm_clear_prompt: bool,
    pub result: Option<ResultView>,
    pub alert: Option<AlertView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub index: usize,
    /// 1-based position.
    pub position_label: String,
    pub display_name: String,
    /// Message the row's remove button sends.
    pub remove: Msg,
    pub is_dragging: bool,
    pub is_drop_target: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub message: &'static str,
    pub output_name: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertView {
    pub message: String,
    pub severity: AlertSeverity,
}

/// Full, non-incremental projection of the state.
pub(crate) fn project(state: &AppState) -> AppViewModel {
    let mode = state.mode();
    let files = state.files();
    let drag = state.drag();
    let can_merge = files.can_merge();

    let rows = files
        .iter()
        .enumerate()
        .map(|(index, id)| FileRowView {
            index,
            position_label: (index + 1).to_string(),
            display_name: id.to_string(),
            remove: Msg::RemoveClicked { index },
            is_dragging: drag.source() == Some(index),
            is_drop_target: drag.target() == Some(index),
        })
        .collect();

    let result = match (mode, state.pending_result()) {
        (UiMode::ResultVisible, Some(name)) => Some(ResultView {
            message: RESULT_MESSAGE,
            output_name: name.to_string(),
            file_name: format!("{name}.pdf"),
        }),
        _ => None,
    };

    AppViewModel {
        mode,
        upload_section_visible: mode == UiMode::AwaitingFirstUpload,
        files_section_visible: matches!(mode, UiMode::ListVisible | UiMode::MergeInFlight),
        result_section_visible: mode == UiMode::ResultVisible,
        file_count_label: file_count_label(files.len()),
        files: rows,
        can_merge,
        action_group_visible: can_merge,
        hint: (!can_merge).then_some(ADD_FILES_HINT),
        merge_enabled: can_merge && mode != UiMode::MergeInFlight,
        loading: mode == UiMode::MergeInFlight,
        uploads_in_flight: state.uploads_in_flight(),
        output_name_input: state.output_name_input().to_string(),
        confirm_clear_prompt: state.clear_confirmation_pending(),
        result,
        alert: state.alerts().current().map(|alert| AlertView {
            message: alert.message.clone(),
            severity: alert.severity,
        }),
        dirty: state.is_dirty(),
    }
}

fn file_count_label(count: usize) -> String {
    if count == 1 {
        "1 file".to_string()
    } else {
        format!("{count} files")
    }
}
