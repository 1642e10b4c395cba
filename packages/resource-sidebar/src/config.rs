//! Sidebar configuration.

use serde::Deserialize;

/// Endpoints and credentials for the backend and image host.
#[derive(Debug, Clone, Deserialize)]
pub struct SidebarConfig {
    #[serde(default = "defaults::backend_url")]
    pub backend_url: String,

    #[serde(default)]
    pub cloudinary_api_key: String,

    #[serde(default = "defaults::upload_preset")]
    pub upload_preset: String,

    #[serde(default = "defaults::cloudinary_upload_url")]
    pub cloudinary_upload_url: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            backend_url: defaults::backend_url(),
            cloudinary_api_key: String::new(),
            upload_preset: defaults::upload_preset(),
            cloudinary_upload_url: defaults::cloudinary_upload_url(),
        }
    }
}

impl SidebarConfig {
    /// Load from an optional `sidebar.{toml,json,yaml}` file, then `SIDEBAR_*` env vars.
    pub fn load() -> Result<Self, crate::Error> {
        config::Config::builder()
            .add_source(config::File::with_name("sidebar").required(false))
            .add_source(config::Environment::with_prefix("SIDEBAR"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| crate::Error::Config(format!("Failed to load config: {e}")))
    }

    fn base(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }

    pub fn create_url(&self) -> String {
        format!("{}/api/resource/add", self.base())
    }

    pub fn resource_url(&self, id: &str) -> String {
        format!("{}/api/resource/{id}", self.base())
    }

    pub fn signature_url(&self) -> String {
        format!("{}/api/cloudinary-signature", self.base())
    }
}

mod defaults {
    pub fn backend_url() -> String {
        "http://localhost:5000".into()
    }

    pub fn upload_preset() -> String {
        "mlsa-hackathon".into()
    }

    pub fn cloudinary_upload_url() -> String {
        "https://api.cloudinary.com/v1_1/sambit-mondal/image/upload".into()
    }
}
