use crate::SelectedFile;

/// IO the app must perform on behalf of the state machine.
///
/// Gateway effects carry the session epoch they were issued in; the matching
/// completion message must echo it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Upload {
        epoch: u64,
        file: SelectedFile,
    },
    Merge {
        epoch: u64,
        file_ids: Vec<String>,
        output_name: String,
    },
    /// Ask the user a yes/no question before clearing; answer with `Msg::ClearConfirmed`.
    ConfirmClear,
    Clear {
        epoch: u64,
    },
    Download {
        output_name: String,
    },
    /// Replace any pending alert expiry with one for `generation`.
    ArmAlertTimer {
        generation: u64,
    },
}
