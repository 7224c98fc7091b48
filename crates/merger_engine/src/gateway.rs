use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use merger_logging::{merger_debug, merger_info};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::{FailureKind, GatewayError, MergeOutcome, UploadSource};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
const MIN_MERGE_FILES: usize = 2;

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// The service refuses bodies above this size; checked before sending.
    pub max_upload_bytes: u64,
    pub max_download_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            max_upload_bytes: 50 * 1024 * 1024,
            max_download_bytes: 512 * 1024 * 1024,
        }
    }
}

/// The four calls the merge service exposes.
#[async_trait::async_trait]
pub trait MergeService: Send + Sync {
    /// Sends one PDF; returns the identifiers the service stored it under.
    async fn upload(&self, file: &UploadSource) -> Result<Vec<String>, GatewayError>;

    async fn merge(
        &self,
        file_ids: &[String],
        output_name: &str,
    ) -> Result<MergeOutcome, GatewayError>;

    async fn clear(&self) -> Result<(), GatewayError>;

    async fn download(&self, output_name: &str) -> Result<Bytes, GatewayError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    files: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MergeResponse {
    #[serde(default)]
    success: bool,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestMergeService {
    settings: ServiceSettings,
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestMergeService {
    pub fn new(settings: ServiceSettings) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| GatewayError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::new(
                FailureKind::InvalidUrl,
                format!("{base_url} cannot be used as a base url"),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GatewayError::new(FailureKind::Transport, err.to_string()))?;
        Ok(Self {
            settings,
            base_url,
            client,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait::async_trait]
impl MergeService for ReqwestMergeService {
    async fn upload(&self, file: &UploadSource) -> Result<Vec<String>, GatewayError> {
        if file.content_type != PDF_CONTENT_TYPE {
            return Err(GatewayError::new(
                FailureKind::UnsupportedType {
                    content_type: file.content_type.clone(),
                },
                "Only PDF files are allowed!",
            ));
        }

        let size = tokio::fs::metadata(&file.path)
            .await
            .map_err(|err| io_error(&file.file_name, err))?
            .len();
        if size > self.settings.max_upload_bytes {
            return Err(GatewayError::new(
                FailureKind::TooLarge {
                    max_bytes: self.settings.max_upload_bytes,
                    actual: size,
                },
                format!(
                    "{} is {} bytes; the limit is {} bytes",
                    file.file_name, size, self.settings.max_upload_bytes
                ),
            ));
        }
        let content = tokio::fs::read(&file.path)
            .await
            .map_err(|err| io_error(&file.file_name, err))?;

        let part = Part::bytes(content)
            .file_name(file.file_name.clone())
            .mime_str(PDF_CONTENT_TYPE)
            .map_err(map_reqwest_error)?;
        let form = Form::new().part("files", part);

        merger_info!("POST /upload {} ({} bytes)", file.file_name, size);
        let response = self
            .client
            .post(self.endpoint(&["upload"]))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let (status, body) = read_body(response).await?;
        if status == StatusCode::OK {
            let parsed: UploadResponse = parse_json(&body)?;
            Ok(parsed.files)
        } else {
            Err(service_error(status, &body, "Upload failed"))
        }
    }

    async fn merge(
        &self,
        file_ids: &[String],
        output_name: &str,
    ) -> Result<MergeOutcome, GatewayError> {
        if file_ids.len() < MIN_MERGE_FILES {
            return Err(GatewayError::new(
                FailureKind::InsufficientFiles,
                "Please select at least 2 PDF files",
            ));
        }

        let file_order = serde_json::to_string(file_ids)
            .map_err(|err| GatewayError::new(FailureKind::Transport, err.to_string()))?;
        let form = Form::new()
            .text("fileOrder", file_order)
            .text("outputName", output_name.to_string());

        merger_info!("POST /merge {} files -> {}", file_ids.len(), output_name);
        let response = self
            .client
            .post(self.endpoint(&["merge"]))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let (status, body) = read_body(response).await?;
        let parsed: MergeResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(GatewayError::new(
                    FailureKind::HttpStatus(status.as_u16()),
                    status.to_string(),
                ));
            }
            Err(err) => {
                return Err(GatewayError::new(FailureKind::Transport, err.to_string()));
            }
        };

        if status.is_success() && parsed.success {
            Ok(MergeOutcome {
                output_name: output_name.to_string(),
                download_path: self.endpoint(&["download", output_name]).path().to_string(),
            })
        } else {
            Err(GatewayError::new(
                FailureKind::Rejected,
                parsed.error.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }

    async fn clear(&self) -> Result<(), GatewayError> {
        merger_info!("POST /clear");
        let response = self
            .client
            .post(self.endpoint(&["clear"]))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let (status, body) = read_body(response).await?;
        if status.is_success() {
            Ok(())
        } else {
            Err(service_error(status, &body, "Clear failed"))
        }
    }

    async fn download(&self, output_name: &str) -> Result<Bytes, GatewayError> {
        let url = self.endpoint(&["download", output_name]);
        merger_info!("GET {}", url.path());
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let (status, body) = read_body(response).await?;
            return Err(service_error(status, &body, "Download failed"));
        }

        let max_bytes = self.settings.max_download_bytes;
        if let Some(len) = response.content_length() {
            if len > max_bytes {
                return Err(too_large(max_bytes, len));
            }
        }

        let mut buffer = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = buffer.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            buffer.extend_from_slice(&chunk);
        }
        merger_debug!("Downloaded {} bytes for {}", buffer.len(), output_name);
        Ok(buffer.freeze())
    }
}

async fn read_body(response: Response) -> Result<(StatusCode, String), GatewayError> {
    let status = response.status();
    let body = response.text().await.map_err(map_reqwest_error)?;
    Ok((status, body))
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, GatewayError> {
    serde_json::from_str(body)
        .map_err(|err| GatewayError::new(FailureKind::Transport, format!("invalid response: {err}")))
}

/// Prefers the service's `error` field; falls back to the status line.
fn service_error(status: StatusCode, body: &str, fallback: &str) -> GatewayError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            error: Some(message),
        }) => GatewayError::new(FailureKind::Rejected, message),
        _ => GatewayError::new(
            FailureKind::HttpStatus(status.as_u16()),
            format!("{fallback} ({status})"),
        ),
    }
}

fn too_large(max_bytes: u64, actual: u64) -> GatewayError {
    GatewayError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn io_error(file_name: &str, err: std::io::Error) -> GatewayError {
    GatewayError::new(FailureKind::Io, format!("{file_name}: {err}"))
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::new(FailureKind::Timeout, err.to_string());
    }
    GatewayError::new(FailureKind::Transport, err.to_string())
}
