//! Persistence gateway: backend REST calls and direct image host uploads.
//!
//! Every call is a single round trip. No retry, timeout or backoff.

use crate::config::SidebarConfig;
use resource_types::ResourcePayload;
use serde::{Deserialize, Deserializer};
use std::future::Future;
use std::path::Path;
use tracing::{debug, info};

/// Signed credential authorizing one direct upload to the image host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadTicket {
    #[serde(deserialize_with = "timestamp_text")]
    pub timestamp: String,
    pub signature: String,
}

/// Backends return the timestamp as either a number or a string.
fn timestamp_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::String(s) => Ok(s),
        other => Err(serde::de::Error::custom(format!(
            "expected timestamp number or string, got {other}"
        ))),
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// File picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        Self {
            content_type: guess_content_type(&file_name).map(str::to_string),
            file_name,
            bytes,
        }
    }

    /// Read a file from disk, naming it after the path's final component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| crate::Error::Config(format!("Failed to read {}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".into());
        Ok(Self::new(file_name, bytes))
    }
}

fn guess_content_type(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Backend and image host operations used by the sidebar.
pub trait ResourceApi {
    fn create(&self, payload: &ResourcePayload) -> impl Future<Output = Result<(), crate::Error>>;

    fn update(
        &self,
        id: &str,
        payload: &ResourcePayload,
    ) -> impl Future<Output = Result<(), crate::Error>>;

    fn delete(&self, id: &str) -> impl Future<Output = Result<(), crate::Error>>;

    /// Step one of an upload: ask the backend to sign a ticket.
    fn upload_ticket(&self) -> impl Future<Output = Result<UploadTicket, crate::Error>>;

    /// Step two: post the file to the image host. Returns the secure URL.
    fn upload_image(
        &self,
        file: &ImageFile,
        ticket: &UploadTicket,
    ) -> impl Future<Output = Result<String, crate::Error>>;
}

/// [`ResourceApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    config: SidebarConfig,
}

impl HttpGateway {
    pub fn new(config: SidebarConfig) -> Result<Self, crate::Error> {
        if config.backend_url.trim().is_empty() {
            return Err(crate::Error::Config("backend_url is empty".into()));
        }
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| crate::Error::Config(format!("HTTP client build failed: {e}")))?;
        info!(backend = %config.backend_url, "Resource gateway initialized");
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SidebarConfig {
        &self.config
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<reqwest::Response, crate::Error> {
        let response = request
            .send()
            .await
            .map_err(|e| crate::Error::Http(format!("{what} failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(crate::Error::Http(format!("{what} HTTP error: {status}")));
        }
        Ok(response)
    }
}

impl ResourceApi for HttpGateway {
    async fn create(&self, payload: &ResourcePayload) -> Result<(), crate::Error> {
        let url = self.config.create_url();
        debug!(url = %url, "POST resource");
        self.send(self.http.post(&url).json(payload), "create").await?;
        Ok(())
    }

    async fn update(&self, id: &str, payload: &ResourcePayload) -> Result<(), crate::Error> {
        let url = self.config.resource_url(id);
        debug!(url = %url, "PUT resource");
        self.send(self.http.put(&url).json(payload), "update").await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), crate::Error> {
        let url = self.config.resource_url(id);
        debug!(url = %url, "DELETE resource");
        self.send(self.http.delete(&url), "delete").await?;
        Ok(())
    }

    async fn upload_ticket(&self) -> Result<UploadTicket, crate::Error> {
        let url = self.config.signature_url();
        debug!(url = %url, "POST upload signature");
        self.send(self.http.post(&url), "upload signature")
            .await?
            .json()
            .await
            .map_err(|e| crate::Error::Http(format!("upload signature parse error: {e}")))
    }

    async fn upload_image(
        &self,
        file: &ImageFile,
        ticket: &UploadTicket,
    ) -> Result<String, crate::Error> {
        let mut part =
            reqwest::multipart::Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| crate::Error::Http(format!("invalid content type: {e}")))?;
        }
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone())
            .text("timestamp", ticket.timestamp.clone())
            .text("signature", ticket.signature.clone())
            .text("api_key", self.config.cloudinary_api_key.clone());

        debug!(url = %self.config.cloudinary_upload_url, file = %file.file_name, "POST image upload");
        let resp: UploadResponse = self
            .send(
                self.http.post(&self.config.cloudinary_upload_url).multipart(form),
                "image upload",
            )
            .await?
            .json()
            .await
            .map_err(|e| crate::Error::Http(format!("image upload parse error: {e}")))?;
        Ok(resp.secure_url)
    }
}
