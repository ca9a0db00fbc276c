use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_SELF_LABEL: &str = "Você";
pub const DEFAULT_FALLBACK_AUTHOR: &str = "Suporte de T.I.";

fn default_user_name() -> String {
    "Aristeu Miranda".to_string()
}

fn default_user_role() -> String {
    "Infraestrutura de T.I".to_string()
}

fn default_self_label() -> String {
    DEFAULT_SELF_LABEL.to_string()
}

fn default_fallback_author() -> String {
    DEFAULT_FALLBACK_AUTHOR.to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Shown in the header next to the role.
    #[serde(default = "default_user_name")]
    pub user_name: String,
    #[serde(default = "default_user_role")]
    pub user_role: String,
    /// Assignee written into a ticket when the viewer claims it.
    #[serde(default = "default_self_label")]
    pub self_label: String,
    /// Comment author used while the ticket has nobody assigned.
    #[serde(default = "default_fallback_author")]
    pub fallback_author: String,
    /// JSON ticket file replacing the built-in mock tickets.
    #[serde(default)]
    pub tickets_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user_name: default_user_name(),
            user_role: default_user_role(),
            self_label: default_self_label(),
            fallback_author: default_fallback_author(),
            tickets_path: None,
        }
    }
}

pub fn config_dir() -> PathBuf {
    let dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("unidesk");
    let _ = fs::create_dir_all(&dir);
    dir
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

impl Config {
    /// Loads the config at `path`. A missing file is not an error: every
    /// field has a default.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }
}
