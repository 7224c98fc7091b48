//! Merger engine: HTTP gateways to the merge service and effect execution.
mod engine;
mod filename;
mod gateway;
mod persist;
mod types;

pub use engine::{EngineConfig, EngineHandle};
pub use filename::download_filename;
pub use gateway::{MergeService, ReqwestMergeService, ServiceSettings, PDF_CONTENT_TYPE};
pub use persist::{ensure_target_dir, AtomicFileWriter, PersistError};
pub use types::{EngineEvent, FailureKind, GatewayError, MergeOutcome, UploadSource};
