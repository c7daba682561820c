//! HTTP-level contract tests against a mock DAM server

use damkit_client::{
    ClientError, DamClient, FilePayload, ListFilesOptions, ListFoldersOptions, UploadOptions,
    UploadProgress,
};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> DamClient {
    DamClient::connect(server.uri(), "test-key", "test-secret").unwrap()
}

fn file_body(id: &str) -> serde_json::Value {
    serde_json::json!({
        "data": {
            "id": id,
            "name": format!("{id}.png"),
            "mime_type": "image/png",
            "size": 4,
        }
    })
}

#[tokio::test]
async fn auth_headers_sent_on_every_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/public/files"))
        .and(header("X-API-Key-ID", "test-key"))
        .and(header("X-API-Key-Secret", "test-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.get_files(&ListFilesOptions::default()).await.unwrap();
    assert!(result.data.is_empty());
}

#[tokio::test]
async fn list_query_parameters_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/public/files"))
        .and(query_param("folder_id", "f1"))
        .and(query_param("mime_type", "image/png"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [],
            "pagination": {"total": 0, "limit": 10, "offset": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let options = ListFilesOptions {
        folder_id: Some("f1".to_string()),
        mime_type: Some("image/png".to_string()),
        limit: Some(10),
        ..Default::default()
    };
    let result = client.get_files(&options).await.unwrap();
    assert_eq!(result.pagination.unwrap().limit, 10);
}

#[tokio::test]
async fn error_message_extracted_from_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/public/files/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "not found"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client.get_file("missing").await.unwrap_err();
    match error {
        ClientError::Request { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "not found");
        }
        other => panic!("expected Request error, got {other:?}"),
    }
}

#[tokio::test]
async fn unparseable_error_body_falls_back_to_status_line() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats/dashboard"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client.dashboard_stats().await.unwrap_err();
    match error {
        ClientError::Request { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "HTTP 500: Internal Server Error");
        }
        other => panic!("expected Request error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_json_on_success_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats/storage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client.storage_stats().await.unwrap_err();
    assert!(matches!(error, ClientError::Parse(_)));
}

#[tokio::test]
async fn repeated_list_calls_hit_the_server_each_time() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/public/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let first = client.get_files(&ListFilesOptions::default()).await.unwrap();
    let second = client.get_files(&ListFilesOptions::default()).await.unwrap();
    assert_eq!(first.data.len(), second.data.len());
}

#[tokio::test]
async fn delete_file_accepts_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/public/files/f1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.delete_file("f1").await.unwrap();
}

#[tokio::test]
async fn move_file_sends_folder_id_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/files/f1/move"))
        .and(body_json(serde_json::json!({"folder_id": "dest"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_body("f1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let moved = client.move_file("f1", Some("dest")).await.unwrap();
    assert_eq!(moved.data.id, "f1");
}

#[tokio::test]
async fn move_file_to_root_sends_null() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/files/f1/move"))
        .and(body_json(serde_json::json!({"folder_id": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_body("f1")))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.move_file("f1", None).await.unwrap();
}

#[tokio::test]
async fn create_folder_merges_name_and_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/folders"))
        .and(body_json(serde_json::json!({
            "name": "assets",
            "parent_id": "root"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": {"id": "new", "name": "assets", "parent_id": "root"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let options = damkit_client::CreateFolderOptions {
        parent_id: Some("root".to_string()),
        ..Default::default()
    };
    let created = client.create_folder("assets", &options).await.unwrap();
    assert_eq!(created.data.id, "new");
}

#[tokio::test]
async fn list_folders_forwards_parent_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/folders"))
        .and(query_param("parent_id", "root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let options = ListFoldersOptions {
        parent_id: Some("root".to_string()),
    };
    client.list_folders(&options).await.unwrap();
}

#[tokio::test]
async fn test_connection_probes_with_limit_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/public/files"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.test_connection().await.unwrap();
}

#[tokio::test]
async fn test_connection_surfaces_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/public/files"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"error": "invalid API key"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client.test_connection().await.unwrap_err();
    assert!(error.is_auth_error());
    match error {
        ClientError::Request { message, .. } => assert_eq!(message, "invalid API key"),
        other => panic!("expected Request error, got {other:?}"),
    }
}

#[tokio::test]
async fn upload_file_posts_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/public/single"))
        .respond_with(ResponseTemplate::new(201).set_body_json(file_body("up1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let payload = FilePayload::new("logo.png", &b"data"[..]);
    let options = UploadOptions::default()
        .with_folder("f1")
        .with_metadata(serde_json::json!({"alt": "logo"}));
    let uploaded = client.upload_file(payload, &options).await.unwrap();
    assert_eq!(uploaded.data.id, "up1");
}

#[tokio::test]
async fn upload_multiple_posts_to_multiple_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/public/multiple"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": [
                {"id": "a", "name": "a.png"},
                {"id": "b", "name": "b.png"},
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let payloads = vec![
        FilePayload::new("a.png", &b"aa"[..]),
        FilePayload::new("b.png", &b"bb"[..]),
    ];
    let uploaded = client
        .upload_files(payloads, &UploadOptions::default())
        .await
        .unwrap();
    assert_eq!(uploaded.data.len(), 2);
}

#[tokio::test]
async fn progress_upload_reports_monotonic_sequence_ending_at_100() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/public/single"))
        .respond_with(ResponseTemplate::new(201).set_body_json(file_body("big")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    // Several chunks' worth of data so intermediate reports fire.
    let payload = FilePayload::new("big.bin", vec![0u8; 200 * 1024]);

    let reports: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reports);
    let callback: damkit_client::ProgressCallback = Arc::new(move |p: UploadProgress| {
        sink.lock().unwrap().push(p.percentage());
    });

    client
        .upload_file_with_progress(payload, &UploadOptions::default(), callback)
        .await
        .unwrap();

    let reports = reports.lock().unwrap();
    assert!(!reports.is_empty());
    assert!(reports.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*reports.last().unwrap(), 100);
}

#[tokio::test]
async fn progress_upload_failure_uses_request_error_rule() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/public/single"))
        .respond_with(
            ResponseTemplate::new(413).set_body_json(serde_json::json!({"message": "too large"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let payload = FilePayload::new("big.bin", vec![0u8; 1024]);
    let callback: damkit_client::ProgressCallback = Arc::new(|_| {});

    let error = client
        .upload_file_with_progress(payload, &UploadOptions::default(), callback)
        .await
        .unwrap_err();
    match error {
        ClientError::Request { status, message } => {
            assert_eq!(status, 413);
            assert_eq!(message, "too large");
        }
        other => panic!("expected Request error, got {other:?}"),
    }
}

#[tokio::test]
async fn update_file_sends_only_present_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/files/f1"))
        .and(body_json(serde_json::json!({"name": "renamed.png"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_body("f1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let updates = damkit_client::FileUpdate {
        name: Some("renamed.png".to_string()),
        ..Default::default()
    };
    client.update_file("f1", &updates).await.unwrap();
}

#[tokio::test]
async fn update_folder_sends_only_present_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/folders/d1"))
        .and(body_json(serde_json::json!({"name": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"id": "d1", "name": "renamed"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let updates = damkit_client::FolderUpdate {
        name: Some("renamed".to_string()),
        ..Default::default()
    };
    let updated = client.update_folder("d1", &updates).await.unwrap();
    assert_eq!(updated.data.name, "renamed");
}

#[tokio::test]
async fn bulk_delete_posts_id_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/files/bulk-delete"))
        .and(body_json(serde_json::json!({"ids": ["a", "b"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": null})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .delete_files(&["a".to_string(), "b".to_string()])
        .await
        .unwrap();
}

#[tokio::test]
async fn network_failure_is_not_a_request_error() {
    // Nothing is listening on this port.
    let client = DamClient::connect("http://127.0.0.1:9", "key", "secret").unwrap();
    let error = client.get_files(&ListFilesOptions::default()).await.unwrap_err();
    assert!(matches!(error, ClientError::Network(_)));
}
