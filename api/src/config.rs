//! API Configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default config file, overridable through `CONFIG_PATH`
pub const DEFAULT_CONFIG_PATH: &str = "quickdesk.json";

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Listen address
    pub listen_addr: String,
    /// HMAC secret for bearer tokens
    pub jwt_secret: String,
    /// Token lifetime
    pub token_ttl_hours: i64,
    /// Keys accepted for admin registration
    pub admin_keys: Vec<String>,
    /// Where ticket attachments are written
    pub upload_dir: PathBuf,
    /// Frontend assets served at `/`
    pub static_dir: Option<PathBuf>,
    /// Sender address on outgoing mail
    pub mail_from: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".into(),
            jwt_secret: "quickdesk-secret-change-in-production".into(),
            token_ttl_hours: 24,
            admin_keys: vec!["ADMIN2024".into(), "SUPERADMIN".into(), "QUICKDESK_ADMIN".into()],
            upload_dir: PathBuf::from("uploads"),
            static_dir: None,
            mail_from: "noreply@quickdesk.local".into(),
        }
    }
}

impl ApiConfig {
    /// Load from file
    pub fn load(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Load the file named by `CONFIG_PATH`, then apply `PORT` and `JWT_SECRET`.
    ///
    /// A missing or unreadable file falls back to defaults.
    pub fn from_env() -> Self {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut config = match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "config not loaded, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(std::env::var("PORT").ok(), std::env::var("JWT_SECRET").ok());
        config
    }

    fn apply_overrides(&mut self, port: Option<String>, jwt_secret: Option<String>) {
        if let Some(port) = port.filter(|p| !p.is_empty()) {
            let host = self.listen_addr.rsplit_once(':').map(|(h, _)| h).unwrap_or("0.0.0.0");
            self.listen_addr = format!("{host}:{port}");
        }
        if let Some(secret) = jwt_secret.filter(|s| !s.is_empty()) {
            self.jwt_secret = secret;
        }
    }

    pub fn is_admin_key(&self, key: &str) -> bool {
        self.admin_keys.iter().any(|k| k == key)
    }
}
