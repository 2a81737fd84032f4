//! Session cookie provisioning from the environment

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::SessionCfg;
use crate::shared::errors::SessionError;
use crate::shared::types::SessionCookie;

/// Turns the base64 credential blob into a cookie file and loads it back
pub struct SessionProvisioner {
    cookie_env: String,
    cookie_file: PathBuf,
}

impl SessionProvisioner {
    pub fn new(cfg: &SessionCfg) -> Self {
        Self {
            cookie_env: cfg.cookie_env.clone(),
            cookie_file: PathBuf::from(&cfg.cookie_file),
        }
    }

    pub fn cookie_file(&self) -> &Path {
        &self.cookie_file
    }

    /// Read the credential variable, write the cookie file and load it
    pub fn provision(&self) -> Result<Vec<SessionCookie>, SessionError> {
        let blob = std::env::var(&self.cookie_env)
            .ok()
            .filter(|v| !v.trim().is_empty());
        self.provision_from(blob.as_deref())
    }

    pub fn provision_from(&self, blob: Option<&str>) -> Result<Vec<SessionCookie>, SessionError> {
        let blob = blob.ok_or_else(|| SessionError::MissingCredential(self.cookie_env.clone()))?;
        let decoded = decode_blob(blob)?;
        // Reject garbage before it lands on disk
        serde_json::from_slice::<Vec<SessionCookie>>(&decoded)?;

        fs::write(&self.cookie_file, &decoded)?;
        info!("✅ Cookie file written: {}", self.cookie_file.display());

        load_cookies(&self.cookie_file)
    }
}

pub fn decode_blob(blob: &str) -> Result<Vec<u8>, SessionError> {
    let compact: String = blob.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

pub fn load_cookies(path: &Path) -> Result<Vec<SessionCookie>, SessionError> {
    if !path.exists() {
        return Err(SessionError::CookieFileMissing(path.display().to_string()));
    }
    let raw = fs::read(path)?;
    Ok(serde_json::from_slice(&raw)?)
}
