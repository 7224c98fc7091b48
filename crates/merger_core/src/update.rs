use merger_logging::{merger_debug, merger_error, merger_info, merger_warn};

use crate::{
    AlertSeverity, AppState, DropOutcome, Effect, MergerError, Msg, SelectedFile, UiMode,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(files) => select_files(&mut state, files),
        Msg::UploadDone {
            epoch,
            file_name,
            result,
        } => {
            if is_stale(&state, epoch, "upload") {
                return (state, Vec::new());
            }
            state.upload_finished();
            match result {
                Ok(ids) => {
                    merger_info!("Upload of {} stored {} file(s)", file_name, ids.len());
                    state.files_mut().extend(ids);
                    // Only the first-upload screen advances; a running merge or a shown
                    // result keeps its screen and the files wait for the next merge.
                    if !state.files().is_empty() && state.mode() == UiMode::AwaitingFirstUpload {
                        state.set_mode(UiMode::ListVisible);
                    }
                    vec![state.post_alert(
                        format!("✓ \"{file_name}\" added successfully!"),
                        AlertSeverity::Success,
                    )]
                }
                Err(message) => {
                    merger_warn!("Upload of {} failed: {}", file_name, message);
                    vec![alert_error(&mut state, MergerError::UploadFailed(message))]
                }
            }
        }
        Msg::RemoveClicked { index } => {
            match state.files_mut().remove_at(index) {
                Ok(id) => {
                    merger_debug!("Removed {} from row {}", id, index);
                    state.drag_mut().cancel();
                    if state.files().is_empty() {
                        state.reset();
                    }
                }
                Err(err) => contract_violation("remove", &err),
            }
            Vec::new()
        }
        Msg::DragStarted { index } => {
            let (drag, files) = state.drag_and_files_mut();
            if let Err(err) = drag.start(index, files) {
                contract_violation("drag start", &err);
            }
            Vec::new()
        }
        Msg::DragEntered { index } => {
            let (drag, files) = state.drag_and_files_mut();
            if let Err(err) = drag.hover(index, files) {
                contract_violation("drag hover", &err);
            }
            Vec::new()
        }
        Msg::DragLeft { index } => {
            state.drag_mut().leave(index);
            Vec::new()
        }
        Msg::Dropped { index } => {
            let (drag, files) = state.drag_and_files_mut();
            match drag.drop_on(index, files) {
                Ok(DropOutcome::Swapped { source, target }) => {
                    merger_debug!("Swapped rows {} and {}", source, target);
                }
                Ok(DropOutcome::Unchanged | DropOutcome::NoGesture) => {}
                Err(err) => contract_violation("drop", &err),
            }
            Vec::new()
        }
        Msg::DragEnded => {
            if state.drag().is_live() {
                state.drag_mut().cancel();
            }
            Vec::new()
        }
        Msg::OutputNameChanged(text) => {
            state.set_output_name_input(text);
            Vec::new()
        }
        Msg::MergeClicked => match state.mode() {
            UiMode::MergeInFlight => {
                merger_debug!("Merge already in flight; click ignored");
                Vec::new()
            }
            UiMode::ResultVisible => Vec::new(),
            UiMode::AwaitingFirstUpload | UiMode::ListVisible => {
                if state.files().can_merge() {
                    let output_name = state.effective_output_name();
                    let file_ids = state.files().as_slice().to_vec();
                    merger_info!("Merging {} files into {}.pdf", file_ids.len(), output_name);
                    state.set_mode(UiMode::MergeInFlight);
                    vec![Effect::Merge {
                        epoch: state.epoch(),
                        file_ids,
                        output_name,
                    }]
                } else {
                    vec![alert_error(&mut state, MergerError::InsufficientFiles)]
                }
            }
        },
        Msg::MergeDone {
            epoch,
            output_name,
            result,
        } => {
            if is_stale(&state, epoch, "merge") || state.mode() != UiMode::MergeInFlight {
                return (state, Vec::new());
            }
            match result {
                Ok(()) => {
                    merger_info!("Merge produced {}.pdf", output_name);
                    state.set_mode(UiMode::ResultVisible);
                    let message = format!("✓ PDF merged successfully! Saved as {output_name}.pdf");
                    state.set_pending_result(output_name);
                    vec![state.post_alert(message, AlertSeverity::Success)]
                }
                Err(reason) => {
                    merger_warn!("Merge into {} failed: {}", output_name, reason);
                    state.set_mode(UiMode::ListVisible);
                    vec![alert_error(&mut state, MergerError::MergeFailed(reason))]
                }
            }
        }
        Msg::ClearClicked => {
            if state.mode() == UiMode::ListVisible && state.files().can_merge() {
                state.set_clear_confirmation_pending(true);
                vec![Effect::ConfirmClear]
            } else {
                Vec::new()
            }
        }
        Msg::ClearConfirmed { accepted } => {
            if !state.clear_confirmation_pending() {
                return (state, Vec::new());
            }
            state.set_clear_confirmation_pending(false);
            if accepted {
                vec![Effect::Clear {
                    epoch: state.epoch(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::ClearDone { epoch, result } => {
            if is_stale(&state, epoch, "clear") {
                return (state, Vec::new());
            }
            match result {
                Ok(()) => {
                    merger_info!("Server-side files cleared");
                    state.reset();
                    vec![state.post_alert("All files cleared", AlertSeverity::Success)]
                }
                Err(message) => {
                    merger_warn!("Clear failed: {}", message);
                    vec![alert_error(&mut state, MergerError::ClearFailed(message))]
                }
            }
        }
        Msg::DownloadClicked => match state.pending_result() {
            Some(name) => vec![Effect::Download {
                output_name: name.to_string(),
            }],
            None => {
                merger_debug!("Download requested without a merge result");
                Vec::new()
            }
        },
        Msg::DownloadDone { result } => match result {
            Ok(path) => vec![state.post_alert(
                format!("✓ Merged PDF saved to {path}"),
                AlertSeverity::Success,
            )],
            Err(message) => vec![alert_error(&mut state, MergerError::DownloadFailed(message))],
        },
        Msg::NewMergeClicked => {
            state.reset();
            Vec::new()
        }
        Msg::AlertExpired { generation } => {
            state.expire_alert(generation);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Validates each selected file and issues one upload per accepted PDF.
fn select_files(state: &mut AppState, files: Vec<SelectedFile>) -> Vec<Effect> {
    if state.mode() == UiMode::ResultVisible {
        merger_debug!("File selection ignored while the result is shown");
        return Vec::new();
    }
    if files.is_empty() {
        return vec![state.post_alert("No file selected", AlertSeverity::Warning)];
    }

    let mut effects = Vec::with_capacity(files.len() + 1);
    let mut rejected = None;
    for file in files {
        if file.is_pdf() {
            state.upload_started();
            effects.push(Effect::Upload {
                epoch: state.epoch(),
                file,
            });
        } else {
            merger_warn!(
                "Rejected {} with content type {}",
                file.name,
                file.content_type
            );
            rejected = Some(MergerError::UnsupportedType {
                file_name: file.name,
                content_type: file.content_type,
            });
        }
    }
    if let Some(err) = rejected {
        effects.push(alert_error(state, err));
    }
    effects
}

fn alert_error(state: &mut AppState, err: MergerError) -> Effect {
    state.post_alert(err.to_string(), AlertSeverity::Error)
}

fn is_stale(state: &AppState, epoch: u64, what: &str) -> bool {
    if epoch == state.epoch() {
        return false;
    }
    merger_debug!(
        "Ignoring {} completion from epoch {} (current {})",
        what,
        epoch,
        state.epoch()
    );
    true
}

fn contract_violation(operation: &str, err: &MergerError) {
    merger_error!("Contract violation during {}: {}", operation, err);
}
