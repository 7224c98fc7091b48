//! Merger core: pure file-set state machine and view-model projection.
mod alert;
mod drag;
mod effect;
mod error;
mod file_list;
mod msg;
mod state;
mod update;
mod view_model;

pub use alert::{Alert, AlertChannel, AlertSeverity};
pub use drag::{DragState, DropOutcome};
pub use effect::Effect;
pub use error::MergerError;
pub use file_list::{FileList, MIN_MERGE_FILES};
pub use msg::Msg;
pub use state::{AppState, SelectedFile, UiMode, DEFAULT_OUTPUT_NAME, PDF_CONTENT_TYPE};
pub use update::update;
pub use view_model::{
    AlertView, AppViewModel, FileRowView, ResultView, ADD_FILES_HINT, RESULT_MESSAGE,
};
