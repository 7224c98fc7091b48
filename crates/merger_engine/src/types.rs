use std::fmt;
use std::path::PathBuf;

/// A local file to send to the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSource {
    pub file_name: String,
    pub content_type: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub output_name: String,
    /// Service path the merged PDF can be fetched from.
    pub download_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UploadCompleted {
        epoch: u64,
        file_name: String,
        result: Result<Vec<String>, GatewayError>,
    },
    MergeCompleted {
        epoch: u64,
        output_name: String,
        result: Result<MergeOutcome, GatewayError>,
    },
    ClearCompleted {
        epoch: u64,
        result: Result<(), GatewayError>,
    },
    DownloadCompleted {
        output_name: String,
        result: Result<PathBuf, GatewayError>,
    },
    AlertTimerFired {
        generation: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct GatewayError {
    pub kind: FailureKind,
    pub message: String,
}

impl GatewayError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    UnsupportedType { content_type: String },
    InsufficientFiles,
    TooLarge { max_bytes: u64, actual: u64 },
    InvalidUrl,
    /// The service answered with its own error message.
    Rejected,
    HttpStatus(u16),
    Timeout,
    /// Network failure or an unreadable response body.
    Transport,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::UnsupportedType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::InsufficientFiles => write!(f, "insufficient files"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "too large (max {max_bytes}, actual {actual})")
            }
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Rejected => write!(f, "rejected by service"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Transport => write!(f, "transport error"),
            FailureKind::Io => write!(f, "io error"),
        }
    }
}
