use std::path::PathBuf;

use merger_core::{
    update, AppState, AppViewModel, Msg, SelectedFile, UiMode, ADD_FILES_HINT,
};
use pretty_assertions::assert_eq;

fn with_files(ids: &[&str]) -> AppState {
    let mut state = AppState::new();
    for id in ids {
        let file = SelectedFile {
            name: format!("{id}.pdf"),
            content_type: "application/pdf".to_string(),
            path: PathBuf::from(format!("{id}.pdf")),
        };
        let (next, _) = update(state, Msg::FilesSelected(vec![file]));
        let epoch = next.epoch();
        let (next, _) = update(
            next,
            Msg::UploadDone {
                epoch,
                file_name: format!("{id}.pdf"),
                result: Ok(vec![id.to_string()]),
            },
        );
        state = next;
    }
    state
}

fn assert_merge_controls_consistent(view: &AppViewModel) {
    assert_eq!(view.can_merge, view.files.len() >= 2);
    assert_eq!(view.action_group_visible, view.can_merge);
    assert_eq!(view.hint.is_some(), !view.can_merge);
}

#[test]
fn initial_view_shows_upload_section() {
    let view = AppState::new().view();
    assert_eq!(view.mode, UiMode::AwaitingFirstUpload);
    assert!(view.upload_section_visible);
    assert!(!view.files_section_visible);
    assert!(!view.result_section_visible);
    assert_eq!(view.file_count_label, "0 files");
    assert_eq!(view.output_name_input, "merged");
    assert_merge_controls_consistent(&view);
}

#[test]
fn rows_carry_position_name_and_remove_binding() {
    let view = with_files(&["a", "b", "c"]).view();
    assert!(view.files_section_visible);
    assert_eq!(view.file_count_label, "3 files");

    let labels: Vec<_> = view
        .files
        .iter()
        .map(|row| (row.position_label.as_str(), row.display_name.as_str()))
        .collect();
    assert_eq!(labels, vec![("1", "a"), ("2", "b"), ("3", "c")]);
    assert_eq!(view.files[1].remove, Msg::RemoveClicked { index: 1 });
}

#[test]
fn single_file_shows_hint_instead_of_actions() {
    let view = with_files(&["a"]).view();
    assert_eq!(view.file_count_label, "1 file");
    assert!(!view.can_merge);
    assert!(!view.action_group_visible);
    assert_eq!(view.hint, Some(ADD_FILES_HINT));
    assert!(!view.merge_enabled);
}

#[test]
fn can_merge_tracks_size_through_mutations() {
    let mut state = with_files(&["a", "b", "c"]);
    assert_merge_controls_consistent(&state.view());
    for _ in 0..3 {
        let (next, _) = update(state, Msg::RemoveClicked { index: 0 });
        state = next;
        assert_merge_controls_consistent(&state.view());
    }
    assert_eq!(state.view().mode, UiMode::AwaitingFirstUpload);
}

#[test]
fn drag_markers_follow_the_gesture() {
    let state = with_files(&["a", "b", "c"]);
    let (state, _) = update(state, Msg::DragStarted { index: 0 });
    let (state, _) = update(state, Msg::DragEntered { index: 2 });
    let view = state.view();
    let markers: Vec<_> = view
        .files
        .iter()
        .map(|row| (row.is_dragging, row.is_drop_target))
        .collect();
    assert_eq!(markers, vec![(true, false), (false, false), (false, true)]);

    let (state, _) = update(state, Msg::DragEnded);
    assert!(state
        .view()
        .files
        .iter()
        .all(|row| !row.is_dragging && !row.is_drop_target));
}

#[test]
fn merge_in_flight_shows_loading_and_disables_merge() {
    let state = with_files(&["a", "b"]);
    let (state, _) = update(state, Msg::MergeClicked);
    let view = state.view();
    assert!(view.loading);
    assert!(view.files_section_visible);
    assert!(view.action_group_visible);
    assert!(!view.merge_enabled);
}

#[test]
fn result_view_names_the_pdf() {
    let state = with_files(&["a", "b"]);
    let (state, _) = update(state, Msg::OutputNameChanged("handout".to_string()));
    let (state, _) = update(state, Msg::MergeClicked);
    let (state, _) = update(
        state,
        Msg::MergeDone {
            epoch: 0,
            output_name: "handout".to_string(),
            result: Ok(()),
        },
    );
    let view = state.view();
    assert!(view.result_section_visible);
    assert!(!view.files_section_visible);
    let result = view.result.expect("result view");
    assert_eq!(result.file_name, "handout.pdf");
}

#[test]
fn view_is_idempotent() {
    let state = with_files(&["a", "b"]);
    assert_eq!(state.view(), state.view());
}
