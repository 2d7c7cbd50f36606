//! End-to-end tests for the HTTP surface: a real server on a free port,
//! driven with `reqwest`.

use coffee_wifi::config::{Config, SecretKey};
use coffee_wifi::server::run_server;
use reqwest::{redirect, Client, StatusCode};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ─── Helpers ────────────────────────────────────────────────────────

fn test_config(store_path: &Path, port: u16) -> Config {
    let config_content = format!(
        r#"
[store]
path = "{}"

[server]
bind = "127.0.0.1:{}"
"#,
        store_path.display(),
        port
    );
    toml::from_str(&config_content).unwrap()
}

fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn wait_for_server(port: u16) {
    let client = Client::new();
    let url = format!("http://127.0.0.1:{}/health", port);
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        if let Ok(resp) = client.get(&url).send().await {
            if resp.status().is_success() {
                return;
            }
        }
    }
    panic!("Server did not become ready within 5 seconds");
}

struct TestServer {
    _tmp: TempDir,
    store_path: PathBuf,
    base: String,
    client: Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a server whose store holds `initial` (or no file at all).
    async fn start(initial: Option<&str>) -> Self {
        let tmp = TempDir::new().unwrap();
        let store_path = tmp.path().join("cafe-data.csv");
        if let Some(content) = initial {
            std::fs::write(&store_path, content).unwrap();
        }

        let port = find_free_port();
        let cfg = test_config(&store_path, port);
        let secret = SecretKey::new("test-secret").unwrap();
        let handle = tokio::spawn(async move {
            run_server(&cfg, secret).await.ok();
        });
        wait_for_server(port).await;

        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            _tmp: tmp,
            store_path,
            base: format!("http://127.0.0.1:{}", port),
            client,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status();
        (status, resp.text().await.unwrap())
    }

    async fn csrf_token(&self) -> String {
        let (_, html) = self.get_text("/add").await;
        extract_csrf_token(&html)
    }

    fn store_content(&self) -> String {
        std::fs::read_to_string(&self.store_path).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn extract_csrf_token(html: &str) -> String {
    let marker = "name=\"csrf_token\" value=\"";
    let start = html.find(marker).expect("form has a csrf token") + marker.len();
    let end = start + html[start..].find('"').unwrap();
    html[start..end].to_string()
}

fn joes_form(token: &str) -> Vec<(&'static str, String)> {
    vec![
        ("csrf_token", token.to_string()),
        ("name", "Joe's".to_string()),
        ("location", "https://maps.example/x".to_string()),
        ("opening", "8AM".to_string()),
        ("closing", "5:30PM".to_string()),
        ("coffee_rating", "3".to_string()),
        ("wifi_rating", "0".to_string()),
        ("power_rating", "5".to_string()),
    ]
}

const EXISTING: &str = "Lighthaus,https://goo.gl/maps/2EvhB4oq4gyUXKXx9,11AM,3:30PM,☕️☕️☕️☕️,💪💪💪,🔌🔌\n";

// ─── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_and_index() {
    let server = TestServer::start(Some("")).await;

    let resp = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let (status, html) = server.get_text("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("href=\"/cafes\""));
}

#[tokio::test]
async fn test_add_form_offers_rating_choices() {
    let server = TestServer::start(Some("")).await;

    let (status, html) = server.get_text("/add").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<option value=\"1\">☕️</option>"));
    assert!(html.contains("<option value=\"5\">💪💪💪💪💪</option>"));
    assert!(html.contains("<option value=\"0\">✘</option>"));
    assert!(!extract_csrf_token(&html).is_empty());
}

#[tokio::test]
async fn test_submit_appends_and_redirects() {
    let server = TestServer::start(Some(EXISTING)).await;
    let token = server.csrf_token().await;

    let resp = server
        .client
        .post(server.url("/add"))
        .form(&joes_form(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get("location").unwrap().to_str().unwrap(),
        "/cafes"
    );

    assert_eq!(
        server.store_content(),
        format!(
            "{}Joe's,https://maps.example/x,8AM,5:30PM,☕️☕️☕️,✘,🔌🔌🔌🔌🔌\n",
            EXISTING
        )
    );

    let (status, html) = server.get_text("/cafes").await;
    assert_eq!(status, StatusCode::OK);
    let lighthaus = html.find("Lighthaus").unwrap();
    let joes = html.find("Joe&#x27;s").unwrap();
    assert!(lighthaus < joes, "new cafe should be listed last");
    assert!(html.contains("<td>☕️☕️☕️</td><td>✘</td><td>🔌🔌🔌🔌🔌</td>"));
}

#[tokio::test]
async fn test_invalid_time_rerenders_without_writing() {
    let server = TestServer::start(Some(EXISTING)).await;
    let token = server.csrf_token().await;

    let mut form = joes_form(&token);
    form[3].1 = "25:00".to_string();

    let resp = server
        .client
        .post(server.url("/add"))
        .form(&form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await.unwrap();

    assert!(html.contains("Incorrect format. Correct format: 9PM or 5:30AM"));
    assert!(html.contains("id=\"opening\" name=\"opening\" value=\"25:00\""));
    assert!(html.contains("<option value=\"3\" selected>☕️☕️☕️</option>"));
    assert_eq!(server.store_content(), EXISTING);
}

#[tokio::test]
async fn test_missing_csrf_token_is_rejected() {
    let server = TestServer::start(Some(EXISTING)).await;

    let resp = server
        .client
        .post(server.url("/add"))
        .form(&joes_form(""))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await.unwrap();
    assert!(html.contains("The CSRF token is missing."));
    assert_eq!(server.store_content(), EXISTING);
}

#[tokio::test]
async fn test_forged_csrf_token_is_rejected() {
    let server = TestServer::start(Some(EXISTING)).await;
    let token = server.csrf_token().await;
    let forged = format!("{}00", &token[..token.len() - 2]);
    let forged = if forged == token {
        format!("{}11", &token[..token.len() - 2])
    } else {
        forged
    };

    let resp = server
        .client
        .post(server.url("/add"))
        .form(&joes_form(&forged))
        .send()
        .await
        .unwrap();
    let html = resp.text().await.unwrap();
    assert!(html.contains("The CSRF token is invalid."));
    assert_eq!(server.store_content(), EXISTING);
}

#[tokio::test]
async fn test_missing_store_is_server_error() {
    let server = TestServer::start(None).await;

    let (status, html) = server.get_text("/cafes").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!html.contains("cafe-data.csv"), "paths must not leak");
}

#[tokio::test]
async fn test_unwritable_store_is_server_error() {
    let server = TestServer::start(None).await;
    std::fs::create_dir(&server.store_path).unwrap();
    let token = server.csrf_token().await;

    let resp = server
        .client
        .post(server.url("/add"))
        .form(&joes_form(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.headers().get("location").is_none());
    let html = resp.text().await.unwrap();
    assert!(!html.contains("cafe-data.csv"), "paths must not leak");
    assert!(server.store_path.is_dir());
}

#[tokio::test]
async fn test_listing_is_stable_between_reads() {
    let server = TestServer::start(Some(EXISTING)).await;

    let (_, first) = server.get_text("/cafes").await;
    let (_, second) = server.get_text("/cafes").await;
    assert_eq!(first, second);
}
