use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::remote::DEFAULT_API_BASE_URL;

/// Environment variable that overrides the saved API base URL.
pub const API_URL_ENV: &str = "BOURRACHO_API_URL";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub user_id: String,
    pub user_name: String,
    pub last_conversation_id: String,
    pub last_conversation_name: String,
    /// Follow new messages even when scrolled up
    pub auto_follow: bool,
    pub theme: String,
    /// Sent messages, oldest first
    pub history: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_id: String::new(),
            user_name: String::new(),
            last_conversation_id: String::new(),
            last_conversation_name: String::new(),
            auto_follow: false,
            theme: "dark".to_string(),
            history: Vec::new(),
        }
    }
}

impl Settings {
    /// Apply the environment override, if set and non-blank.
    pub fn with_env_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        self
    }
}

pub fn settings_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("net", "bourracho", "bourracho-client")?;
    let dir = proj.config_dir();
    if let Err(e) = fs::create_dir_all(dir) {
        tracing::warn!(error = %e, "failed to create config dir");
        return None;
    }
    Some(dir.join("settings.json"))
}

/// Load saved settings, falling back to defaults, then apply `BOURRACHO_API_URL`.
pub fn load_settings() -> Settings {
    let saved = settings_path()
        .and_then(|path| fs::read_to_string(path).ok())
        .and_then(|content| parse_settings(&content))
        .unwrap_or_default();
    saved.with_env_override(std::env::var(API_URL_ENV).ok())
}

fn parse_settings(content: &str) -> Option<Settings> {
    match serde_json::from_str(content) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable settings file");
            None
        }
    }
}

pub fn save_settings(settings: &Settings) -> std::io::Result<()> {
    if let Some(path) = settings_path() {
        let data = serde_json::to_string_pretty(settings)?;
        let mut file = fs::File::create(path)?;
        file.write_all(data.as_bytes())?;
    }
    Ok(())
}
