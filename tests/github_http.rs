//! Publisher against a mocked GitHub API

use release_asset_publisher::github::{AssetId, ReleaseId};
use release_asset_publisher::publish::Silent;
use release_asset_publisher::{
    GitHubClient, GitHubConfig, HostError, PublishError, Publisher, ReleaseCollection,
    RetryConfig, UploadRequest,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UPLOAD_PATH: &str = "/repos/electron/nightlies/releases/42/assets";

fn publisher_for(server: &MockServer, retries: u32) -> Publisher<GitHubClient> {
    let mut config = GitHubConfig::new("test-token");
    config.api_url = server.uri();
    config.uploads_url = server.uri();
    let client = GitHubClient::new(config.clone()).unwrap();
    Publisher::new(client, config, RetryConfig::with_uploads(retries))
}

fn nightly_request(dir: &tempfile::TempDir) -> UploadRequest {
    let artifact = dir.path().join("build.zip");
    std::fs::write(&artifact, b"zip-bytes").unwrap();
    UploadRequest::new(artifact, "app.zip", ReleaseId(42), "v4.0.0-nightly.20181018")
}

#[tokio::test]
async fn test_conflict_deletes_stale_asset_and_retries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .and(query_param("name", "app.zip"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "errors": [{"resource": "ReleaseAsset", "code": "already_exists", "field": "name"}]
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .and(query_param("name", "app.zip"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 100,
            "name": "app.zip",
            "size": 9,
            "browser_download_url": "https://github.com/electron/nightlies/releases/download/v4.0.0-nightly.20181018/app.zip"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/electron/nightlies/releases/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "tag_name": "v4.0.0-nightly.20181018",
            "assets": [
                {"id": 98, "name": "SHASUMS256.txt"},
                {"id": 99, "name": "app.zip"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/repos/electron/nightlies/releases/assets/99"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let outcome = publisher_for(&server, 4)
        .publish(&nightly_request(&dir), &Silent)
        .await
        .unwrap();

    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.collection, ReleaseCollection::Nightly);
    assert_eq!(outcome.asset.id, AssetId(100));
}

#[tokio::test]
async fn test_persistent_server_error_exhausts_budget() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/electron/nightlies/releases/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "assets": [] })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let err = publisher_for(&server, 2)
        .publish(&nightly_request(&dir), &Silent)
        .await
        .unwrap_err();

    match err {
        PublishError::BudgetExhausted {
            asset,
            attempts,
            source,
        } => {
            assert_eq!(asset, "app.zip");
            assert_eq!(attempts, 3);
            assert!(matches!(source, HostError::Api { status: 502, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}
