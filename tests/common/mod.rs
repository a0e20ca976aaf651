use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use survey_intake::config::Config;

/// A running test server instance with its own survey log.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub dir: PathBuf,
    pub store_path: PathBuf,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON survey, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/v1/survey"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST a raw body with an explicit content type, return (body, status).
    pub async fn submit_raw(&self, content_type: &str, body: &'static str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/v1/survey"))
            .header("content-type", content_type)
            .body(body)
            .send()
            .await
            .expect("submit raw failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Every line appended to the survey log so far, parsed as JSON.
    pub fn stored_lines(&self) -> Vec<Value> {
        match std::fs::read_to_string(&self.store_path) {
            Ok(contents) => contents
                .lines()
                .map(|l| serde_json::from_str(l).expect("stored line is not JSON"))
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => panic!("failed to read survey log: {e}"),
        }
    }
}

fn test_config(store_path: PathBuf) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        store_path,
        max_body_size: 65_536,
        log_level: "warn".to_string(),
    }
}

/// Spawn a test app writing to a fresh temporary directory.
pub async fn spawn_app() -> TestApp {
    let dir = std::env::temp_dir().join(format!("survey_test_{}", Uuid::now_v7().simple()));
    let store_path = dir.join("data").join("survey.ndjson");
    spawn_app_with(dir, store_path).await
}

/// Spawn a test app whose store path is supplied by the caller.
pub async fn spawn_app_with(dir: PathBuf, store_path: PathBuf) -> TestApp {
    let app = survey_intake::build_app(test_config(store_path.clone()));

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        dir,
        store_path,
    }
}

/// Remove the test app's temporary directory.
pub fn cleanup(app: TestApp) {
    let _ = std::fs::remove_dir_all(&app.dir);
}
