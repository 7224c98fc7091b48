use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use merger_engine::{
    FailureKind, MergeService, ReqwestMergeService, ServiceSettings, UploadSource,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> ReqwestMergeService {
    let settings = ServiceSettings {
        base_url: server.uri(),
        ..ServiceSettings::default()
    };
    ReqwestMergeService::new(settings).expect("service")
}

fn pdf_fixture(dir: &TempDir, name: &str) -> UploadSource {
    let path: PathBuf = dir.path().join(name);
    fs::write(&path, b"%PDF-1.4\n%%EOF\n").unwrap();
    UploadSource {
        file_name: name.to_string(),
        content_type: "application/pdf".to_string(),
        path,
    }
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn upload_sends_one_multipart_file_and_returns_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("name=\"files\""))
        .and(body_string_contains("filename=\"a.pdf\""))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"success": true, "files": ["a_1700000000000.pdf"], "count": 1}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let stored = service_for(&server)
        .upload(&pdf_fixture(&dir, "a.pdf"))
        .await
        .expect("upload ok");
    assert_eq!(stored, ids(&["a_1700000000000.pdf"]));
}

#[tokio::test]
async fn upload_rejects_non_pdf_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut source = pdf_fixture(&dir, "notes.txt");
    source.content_type = "text/plain".to_string();

    let err = service_for(&server).upload(&source).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedType {
            content_type: "text/plain".to_string()
        }
    );
}

#[tokio::test]
async fn upload_surfaces_service_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(400).set_body_raw(
            r#"{"error": "Invalid file: a.pdf. Only PDF files allowed."}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let err = service_for(&server)
        .upload(&pdf_fixture(&dir, "a.pdf"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.message, "Invalid file: a.pdf. Only PDF files allowed.");
}

#[tokio::test]
async fn upload_refuses_files_over_the_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let settings = ServiceSettings {
        base_url: server.uri(),
        max_upload_bytes: 4,
        ..ServiceSettings::default()
    };
    let service = ReqwestMergeService::new(settings).unwrap();
    let dir = TempDir::new().unwrap();
    let err = service
        .upload(&pdf_fixture(&dir, "big.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 4, .. }));
}

#[tokio::test]
async fn upload_of_missing_file_is_io_error() {
    let server = MockServer::start().await;
    let source = UploadSource {
        file_name: "gone.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        path: PathBuf::from("/definitely/not/here/gone.pdf"),
    };
    let err = service_for(&server).upload(&source).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Io);
}

#[tokio::test]
async fn merge_posts_order_and_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/merge"))
        .and(body_string_contains(r#"["b","a"]"#))
        .and(body_string_contains("name=\"outputName\""))
        .and(body_string_contains("handout"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"success": true, "filename": "handout.pdf"}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = service_for(&server)
        .merge(&ids(&["b", "a"]), "handout")
        .await
        .expect("merge ok");
    assert_eq!(outcome.output_name, "handout");
    assert_eq!(outcome.download_path, "/download/handout");
}

#[tokio::test]
async fn merge_reports_service_failure_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/merge"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"success": false, "error": "File not found: a"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .merge(&ids(&["a", "b"]), "merged")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.message, "File not found: a");
}

#[tokio::test]
async fn merge_falls_back_to_generic_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/merge"))
        .respond_with(
            ResponseTemplate::new(500).set_body_raw(r#"{"success": false}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = service_for(&server)
        .merge(&ids(&["a", "b"]), "merged")
        .await
        .unwrap_err();
    assert_eq!(err.message, "Unknown error");
}

#[tokio::test]
async fn merge_validation_error_carries_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/merge"))
        .respond_with(ResponseTemplate::new(400).set_body_raw(
            r#"{"error": "File not found: x"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .merge(&ids(&["x", "y"]), "merged")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.message, "File not found: x");
}

#[tokio::test]
async fn merge_failure_without_json_body_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/merge"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .merge(&ids(&["a", "b"]), "merged")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
}

#[tokio::test]
async fn merge_with_one_file_never_reaches_the_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/merge"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = service_for(&server)
        .merge(&ids(&["only"]), "merged")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InsufficientFiles);
}

#[tokio::test]
async fn clear_accepts_any_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/clear"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    service_for(&server).clear().await.expect("clear ok");
}

#[tokio::test]
async fn clear_failure_uses_status_when_body_is_not_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/clear"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = service_for(&server).clear().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn download_returns_body_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/merged"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"%PDF-1.7 merged".to_vec(), "application/pdf"),
        )
        .mount(&server)
        .await;

    let bytes = service_for(&server).download("merged").await.expect("download ok");
    assert_eq!(&bytes[..], b"%PDF-1.7 merged");
}

#[tokio::test]
async fn download_missing_artifact_reports_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/nothing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_raw(r#"{"error": "File not found"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = service_for(&server).download("nothing").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.message, "File not found");
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/clear"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(250)))
        .mount(&server)
        .await;

    let settings = ServiceSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ServiceSettings::default()
    };
    let err = ReqwestMergeService::new(settings)
        .unwrap()
        .clear()
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[test]
fn invalid_base_url_is_rejected() {
    let settings = ServiceSettings {
        base_url: "not a url".to_string(),
        ..ServiceSettings::default()
    };
    let err = ReqwestMergeService::new(settings).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
