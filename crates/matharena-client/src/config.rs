//! Client configuration and factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use matharena_core::{ArenaApi, SessionStore};

use crate::http::{HttpArenaClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::store::FileSessionStore;

/// Environment variable overriding `base_url`.
pub const BASE_URL_ENV: &str = "MATHARENA_BASE_URL";

/// Top-level client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Address of the MathArena backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Where the signed-in session is kept. Defaults to
    /// `~/.config/matharena/session.json`.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            session_file: None,
        }
    }
}

impl ArenaConfig {
    /// Per-user directory, `$HOME/.config/matharena`.
    pub fn user_dir() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(PathBuf::from(home).join(".config").join("matharena"))
    }

    /// Files looked at when no `--config` is given, first match wins.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("matharena.toml")];
        paths.extend(Self::user_dir().map(|dir| dir.join("config.toml")));
        paths
    }

    /// Resolved location of the session file.
    pub fn session_path(&self) -> PathBuf {
        match (&self.session_file, Self::user_dir()) {
            (Some(path), _) => path.clone(),
            (None, Some(dir)) => dir.join("session.json"),
            (None, None) => PathBuf::from(".matharena-session.json"),
        }
    }

    /// Apply `MATHARENA_BASE_URL` and expand `${VAR}` references.
    fn finish(mut self) -> Result<Self> {
        if let Some(url) = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
        {
            self.base_url = url;
        }
        self.base_url = expand_env(&self.base_url);
        if let Some(path) = self.session_file.take() {
            self.session_file = Some(PathBuf::from(expand_env(&path.to_string_lossy())));
        }

        anyhow::ensure!(self.timeout_secs >= 1, "timeout_secs must be at least 1");
        Ok(self)
    }
}

/// Replace `${NAME}` with the value of the environment variable `NAME`
/// (empty when unset). An unterminated `${` is kept as is.
fn expand_env(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(open) = rest.find("${") {
        let Some(len) = rest[open + 2..].find('}') else {
            break;
        };
        let name = &rest[open + 2..open + 2 + len];
        out.push_str(&rest[..open]);
        out.push_str(&std::env::var(name).unwrap_or_default());
        rest = &rest[open + 3 + len..];
    }
    out.push_str(rest);
    out
}

/// Load the config at `path`, or the first of `ArenaConfig::search_paths`
/// that exists. With neither, defaults are used.
///
/// `MATHARENA_BASE_URL` overrides the configured backend address.
pub fn load_config_from(path: Option<&Path>) -> Result<ArenaConfig> {
    let source = match path {
        Some(p) if !p.exists() => anyhow::bail!("config file not found: {}", p.display()),
        Some(p) => Some(p.to_path_buf()),
        None => ArenaConfig::search_paths().into_iter().find(|p| p.exists()),
    };

    let config = match source {
        None => ArenaConfig::default(),
        Some(source) => {
            let content = std::fs::read_to_string(&source)
                .with_context(|| format!("failed to read config: {}", source.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", source.display()))?
        }
    };
    config.finish()
}

/// Create the HTTP backend client from configuration.
pub fn create_client(config: &ArenaConfig) -> Result<Arc<dyn ArenaApi>> {
    let client = HttpArenaClient::new(&config.base_url, config.timeout_secs)
        .context("failed to create MathArena client")?;
    Ok(Arc::new(client))
}

/// Create the session store from configuration.
pub fn session_store(config: &ArenaConfig) -> Arc<dyn SessionStore> {
    Arc::new(FileSessionStore::new(config.session_path()))
}
