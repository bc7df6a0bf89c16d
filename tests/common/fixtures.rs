//! Mock console API and configuration fixtures

use dify_export::config::{ENV_CONSOLE_API, ENV_EMAIL, ENV_PASSWORD};
use dify_export::{Config, RetryConfig};
use std::collections::HashMap;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Email used by fixtures
pub const EMAIL: &str = "admin@example.com";
/// Password used by fixtures
pub const PASSWORD: &str = "hunter2";

/// Build a configuration pointing at `server`, writing into `dir`
///
/// Goes through `Config::from_lookup` so the variable names are exercised too.
pub fn config_for(server: &MockServer, dir: &TempDir) -> Config {
    let vars: HashMap<&str, String> = [
        (ENV_CONSOLE_API, server.uri()),
        (ENV_EMAIL, EMAIL.to_string()),
        (ENV_PASSWORD, PASSWORD.to_string()),
    ]
    .into_iter()
    .collect();

    with_fast_retries(
        Config::from_lookup(|k| vars.get(k).cloned()),
        dir,
    )
}

/// Point the output into `dir` and shrink retry delays for tests
pub fn with_fast_retries(mut config: Config, dir: &TempDir) -> Config {
    config.output_path = dir.path().join("apps.zip");
    config.http.retry = RetryConfig {
        max_attempts: 2,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        backoff_multiplier: 2.0,
        jitter: false,
    };
    config
}

/// Mount a successful `POST /login` issuing `access_token`
pub async fn mount_login(server: &MockServer, access_token: &str) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "success",
            "data": { "access_token": access_token, "refresh_token": "refresh" }
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount one listing page, expected to be requested `times` times
pub async fn mount_page(
    server: &MockServer,
    access_token: &str,
    page: u32,
    has_more: bool,
    ids: &[&str],
    times: u64,
) {
    let data: Vec<_> = ids.iter().map(|id| serde_json::json!({ "id": id })).collect();
    Mock::given(method("GET"))
        .and(path("/apps"))
        .and(query_param("page", page.to_string()))
        .and(query_param("limit", "100"))
        .and(header("authorization", format!("Bearer {}", access_token)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "page": page,
            "limit": 100,
            "has_more": has_more,
            "data": data,
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// Mount a successful export of `id` returning `document`
pub async fn mount_export(server: &MockServer, id: &str, document: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/apps/{}/export", id)))
        .and(query_param("include_secret", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": document
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// Mount a failing export of `id`
pub async fn mount_export_failure(server: &MockServer, id: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/apps/{}/export", id)))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
            "code": "app_not_found",
            "message": "App not found"
        })))
        .expect(1)
        .mount(server)
        .await;
}
