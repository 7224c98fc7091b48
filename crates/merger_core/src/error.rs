use thiserror::Error;

/// Failures surfaced by the file-set state machine.
///
/// Everything except `IndexOutOfRange` ends up as a user-facing alert; the
/// `Display` text is the alert message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergerError {
    #[error("Only PDF files are allowed! \"{file_name}\" is {content_type}")]
    UnsupportedType {
        file_name: String,
        content_type: String,
    },
    #[error("index {index} out of range for {len} file(s)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Upload failed: {0}")]
    UploadFailed(String),
    #[error("Please select at least 2 PDF files")]
    InsufficientFiles,
    #[error("Error: {0}")]
    MergeFailed(String),
    #[error("Error clearing files: {0}")]
    ClearFailed(String),
    #[error("Error downloading file: {0}")]
    DownloadFailed(String),
}
