#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked or dropped one or more local files.
    FilesSelected(Vec<crate::SelectedFile>),
    /// Upload gateway finished for one file.
    UploadDone {
        epoch: u64,
        file_name: String,
        result: Result<Vec<String>, String>,
    },
    /// User clicked the remove button of a row.
    RemoveClicked { index: usize },
    /// Drag gesture began on a row.
    DragStarted { index: usize },
    /// Dragged pointer entered a row.
    DragEntered { index: usize },
    /// Dragged pointer left a row.
    DragLeft { index: usize },
    /// Dragged item released over a row.
    Dropped { index: usize },
    /// Gesture ended; a drop, if any, has already been delivered.
    DragEnded,
    /// User edited the output name field.
    OutputNameChanged(String),
    MergeClicked,
    /// Merge gateway finished.
    MergeDone {
        epoch: u64,
        output_name: String,
        result: Result<(), String>,
    },
    ClearClicked,
    /// Answer to the clear confirmation prompt.
    ClearConfirmed { accepted: bool },
    /// Clear gateway finished.
    ClearDone {
        epoch: u64,
        result: Result<(), String>,
    },
    DownloadClicked,
    /// Download gateway finished; `Ok` holds the saved path.
    DownloadDone { result: Result<String, String> },
    /// User clicked "New merge" on the result screen.
    NewMergeClicked,
    /// An alert expiry timer fired.
    AlertExpired { generation: u64 },
    /// Fallback for placeholder wiring.
    NoOp,
}
