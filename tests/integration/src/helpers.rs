//! Test helpers for integration tests
//!
//! Provides the [`TestServer`] plus request and assertion utilities.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use gallery_api::{create_app, AppState};
use gallery_common::AppConfig;
use gallery_media::LocalImageStore;
use gallery_service::memory::MemoryStore;
use reqwest::{multipart::Form, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Password accepted by [`TestServer`]'s admin login
pub use gallery_service::memory::TEST_ADMIN_PASSWORD as ADMIN_PASSWORD;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// Backing store, for inspecting state the API does not expose
    pub store: MemoryStore,
    upload_dir: TempDir,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let store = MemoryStore::new();
        let upload_dir = tempfile::tempdir()?;
        let config = test_config(&upload_dir)?;

        let image_store = LocalImageStore::new(upload_dir.path(), config.storage.url_prefix.clone());
        let context = store
            .context_builder()
            .image_store(Arc::new(image_store))
            .max_upload_bytes(config.storage.max_file_size_mb * 1024 * 1024)
            .build()
            .map_err(|e| anyhow::anyhow!("Context error: {e}"))?;

        let app = create_app(AppState::new(context, config));

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
                .await
                .ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            store,
            upload_dir,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn upload_dir(&self) -> &std::path::Path {
        self.upload_dir.path()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// GET as a specific client address
    pub async fn get_as(&self, path: &str, client_ip: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .header(FORWARDED_FOR, client_ip)
            .send()
            .await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// POST as a specific client address
    pub async fn post_as<T: Serialize>(&self, path: &str, client_ip: &str, body: &T) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header(FORWARDED_FOR, client_ip)
            .json(body)
            .send()
            .await?)
    }

    pub async fn patch<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.patch(self.url(path)).json(body).send().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }

    pub async fn upload(&self, form: Form) -> Result<Response> {
        Ok(self.client.post(self.url("/photos")).multipart(form).send().await?)
    }

    /// Attach an admin session cookie to a request
    pub fn with_session(request: RequestBuilder, cookie: &str) -> RequestBuilder {
        request.header(reqwest::header::COOKIE, cookie)
    }

    /// Log in and return the `name=value` pair of the session cookie
    pub async fn admin_cookie(&self) -> Result<String> {
        let response = self
            .post("/admin/login", &serde_json::json!({ "password": ADMIN_PASSWORD }))
            .await?;
        session_cookie(&response).ok_or_else(|| anyhow::anyhow!("login did not set a session cookie"))
    }

    pub async fn patch_admin<T: Serialize>(&self, path: &str, cookie: &str, body: &T) -> Result<Response> {
        let request = self.client.patch(self.url(path)).json(body);
        Ok(Self::with_session(request, cookie).send().await?)
    }

    pub async fn delete_admin(&self, path: &str, cookie: &str) -> Result<Response> {
        let request = self.client.delete(self.url(path));
        Ok(Self::with_session(request, cookie).send().await?)
    }

    pub async fn post_admin(&self, path: &str, cookie: &str) -> Result<Response> {
        let request = self.client.post(self.url(path));
        Ok(Self::with_session(request, cookie).send().await?)
    }

    pub async fn get_admin(&self, path: &str, cookie: &str) -> Result<Response> {
        let request = self.client.get(self.url(path));
        Ok(Self::with_session(request, cookie).send().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Configuration for a test server storing uploads under `upload_dir`
pub fn test_config(upload_dir: &TempDir) -> Result<AppConfig> {
    let upload_path = upload_dir.path().to_string_lossy().into_owned();
    let vars: HashMap<&str, String> = HashMap::from([
        ("APP_NAME", "gallery-test".to_string()),
        ("API_PORT", "0".to_string()),
        ("DATABASE_URL", "postgres://unused".to_string()),
        ("ADMIN_PASSWORD", ADMIN_PASSWORD.to_string()),
        ("ADMIN_SESSION_SECRET", "integration-secret".to_string()),
        ("UPLOAD_DIR", upload_path),
        ("MAX_FILE_SIZE_MB", "1".to_string()),
    ]);

    AppConfig::from_lookup(|key| vars.get(key).cloned()).map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// `name=value` of the `admin_session` cookie set by a response
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("admin_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status only
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error envelope with the given status and code
pub async fn assert_error(response: Response, expected_status: StatusCode, expected_code: &str) -> Result<()> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    anyhow::ensure!(body["success"] == false, "expected success=false, got {body}");
    anyhow::ensure!(
        body["error"]["code"] == expected_code,
        "expected code {expected_code}, got {}",
        body["error"]["code"]
    );
    Ok(())
}
