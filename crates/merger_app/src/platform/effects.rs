use std::sync::mpsc;
use std::thread;

use merger_core::{Effect, Msg};
use merger_engine::{EngineConfig, EngineEvent, EngineHandle, GatewayError, UploadSource};
use merger_logging::{merger_debug, merger_info, merger_warn};

use super::app::AppEvent;

/// Executes core effects on the engine and feeds completions back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, app_tx: mpsc::Sender<AppEvent>) -> Result<Self, GatewayError> {
        let (engine, events) = EngineHandle::spawn(config)?;
        spawn_event_loop(events, app_tx);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Upload { epoch, file } => {
                    merger_info!("Upload epoch={} file={}", epoch, file.name);
                    self.engine.upload(
                        epoch,
                        UploadSource {
                            file_name: file.name,
                            content_type: file.content_type,
                            path: file.path,
                        },
                    );
                }
                Effect::Merge {
                    epoch,
                    file_ids,
                    output_name,
                } => {
                    merger_info!(
                        "Merge epoch={} files={} output={}",
                        epoch,
                        file_ids.len(),
                        output_name
                    );
                    self.engine.merge(epoch, file_ids, output_name);
                }
                Effect::ConfirmClear => {
                    // the prompt is part of the rendered view
                }
                Effect::Clear { epoch } => {
                    merger_info!("Clear epoch={}", epoch);
                    self.engine.clear(epoch);
                }
                Effect::Download { output_name } => {
                    merger_info!("Download output={}", output_name);
                    self.engine.download(output_name);
                }
                Effect::ArmAlertTimer { generation } => {
                    self.engine.arm_alert_timer(generation);
                }
            }
        }
    }
}

fn spawn_event_loop(events: mpsc::Receiver<EngineEvent>, app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            if app_tx.send(AppEvent::Msg(map_event(event))).is_err() {
                break;
            }
        }
        merger_debug!("Engine event loop finished");
    });
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted {
            epoch,
            file_name,
            result,
        } => Msg::UploadDone {
            epoch,
            result: result.map_err(|err| failure(&file_name, err)),
            file_name,
        },
        EngineEvent::MergeCompleted {
            epoch,
            output_name,
            result,
        } => Msg::MergeDone {
            epoch,
            result: result
                .map(|outcome| {
                    merger_debug!("Merged file served at {}", outcome.download_path);
                })
                .map_err(|err| failure(&output_name, err)),
            output_name,
        },
        EngineEvent::ClearCompleted { epoch, result } => Msg::ClearDone {
            epoch,
            result: result.map_err(|err| failure("clear", err)),
        },
        EngineEvent::DownloadCompleted {
            output_name,
            result,
        } => Msg::DownloadDone {
            result: result
                .map(|path| path.display().to_string())
                .map_err(|err| failure(&output_name, err)),
        },
        EngineEvent::AlertTimerFired { generation } => Msg::AlertExpired { generation },
    }
}

fn failure(subject: &str, err: GatewayError) -> String {
    merger_warn!("{} failed ({}): {}", subject, err.kind, err.message);
    err.message
}
