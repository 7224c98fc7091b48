use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use bytes::Bytes;
use merger_logging::{merger_debug, merger_warn};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::filename::download_filename;
use crate::gateway::{MergeService, ReqwestMergeService, ServiceSettings};
use crate::persist::AtomicFileWriter;
use crate::{EngineEvent, FailureKind, GatewayError, UploadSource};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub service: ServiceSettings,
    pub download_dir: PathBuf,
    pub alert_timeout: Duration,
}

enum EngineCommand {
    Gateway(GatewayCommand),
    ArmAlertTimer { generation: u64 },
}

enum GatewayCommand {
    Upload {
        epoch: u64,
        source: UploadSource,
    },
    Merge {
        epoch: u64,
        file_ids: Vec<String>,
        output_name: String,
    },
    Clear {
        epoch: u64,
    },
    Download {
        output_name: String,
    },
}

/// Front door to the IO thread. Commands return immediately; results arrive
/// as [`EngineEvent`]s on the receiver handed out by [`EngineHandle::spawn`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(config: EngineConfig) -> Result<(Self, mpsc::Receiver<EngineEvent>), GatewayError> {
        let service = Arc::new(ReqwestMergeService::new(config.service.clone())?);
        Self::with_service(service, config.download_dir, config.alert_timeout)
    }

    /// Same as [`EngineHandle::spawn`] with a caller-supplied service.
    pub fn with_service(
        service: Arc<dyn MergeService>,
        download_dir: PathBuf,
        alert_timeout: Duration,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>), GatewayError> {
        let runtime = Runtime::new()
            .map_err(|err| GatewayError::new(FailureKind::Io, format!("tokio runtime: {err}")))?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut alert_timer: Option<CancellationToken> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::ArmAlertTimer { generation } => {
                        if let Some(previous) = alert_timer.take() {
                            previous.cancel();
                        }
                        let token = CancellationToken::new();
                        alert_timer = Some(token.clone());
                        runtime.spawn(run_alert_timer(
                            generation,
                            alert_timeout,
                            token,
                            event_tx.clone(),
                        ));
                    }
                    EngineCommand::Gateway(command) => {
                        let service = service.clone();
                        let download_dir = download_dir.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let event =
                                handle_command(service.as_ref(), &download_dir, command).await;
                            let _ = event_tx.send(event);
                        });
                    }
                }
            }
            merger_debug!("Engine command channel closed");
        });

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn upload(&self, epoch: u64, source: UploadSource) {
        self.send(EngineCommand::Gateway(GatewayCommand::Upload { epoch, source }));
    }

    pub fn merge(&self, epoch: u64, file_ids: Vec<String>, output_name: impl Into<String>) {
        self.send(EngineCommand::Gateway(GatewayCommand::Merge {
            epoch,
            file_ids,
            output_name: output_name.into(),
        }));
    }

    pub fn clear(&self, epoch: u64) {
        self.send(EngineCommand::Gateway(GatewayCommand::Clear { epoch }));
    }

    pub fn download(&self, output_name: impl Into<String>) {
        self.send(EngineCommand::Gateway(GatewayCommand::Download {
            output_name: output_name.into(),
        }));
    }

    /// Cancels any pending alert timer and starts one for `generation`.
    pub fn arm_alert_timer(&self, generation: u64) {
        self.send(EngineCommand::ArmAlertTimer { generation });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            merger_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn run_alert_timer(
    generation: u64,
    after: Duration,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    tokio::select! {
        _ = token.cancelled() => {}
        _ = tokio::time::sleep(after) => {
            let _ = event_tx.send(EngineEvent::AlertTimerFired { generation });
        }
    }
}

async fn handle_command(
    service: &dyn MergeService,
    download_dir: &Path,
    command: GatewayCommand,
) -> EngineEvent {
    match command {
        GatewayCommand::Upload { epoch, source } => {
            let result = service.upload(&source).await;
            EngineEvent::UploadCompleted {
                epoch,
                file_name: source.file_name,
                result,
            }
        }
        GatewayCommand::Merge {
            epoch,
            file_ids,
            output_name,
        } => {
            let result = service.merge(&file_ids, &output_name).await;
            EngineEvent::MergeCompleted {
                epoch,
                output_name,
                result,
            }
        }
        GatewayCommand::Clear { epoch } => EngineEvent::ClearCompleted {
            epoch,
            result: service.clear().await,
        },
        GatewayCommand::Download { output_name } => {
            let result = match service.download(&output_name).await {
                Ok(bytes) => save_download(download_dir, &output_name, bytes).await,
                Err(err) => Err(err),
            };
            EngineEvent::DownloadCompleted {
                output_name,
                result,
            }
        }
    }
}

async fn save_download(
    download_dir: &Path,
    output_name: &str,
    content: Bytes,
) -> Result<PathBuf, GatewayError> {
    let writer = AtomicFileWriter::new(download_dir.to_path_buf());
    let filename = download_filename(output_name);
    tokio::task::spawn_blocking(move || writer.write(&filename, &content))
        .await
        .map_err(|err| GatewayError::new(FailureKind::Io, err.to_string()))?
        .map_err(|err| GatewayError::new(FailureKind::Io, err.to_string()))
}
