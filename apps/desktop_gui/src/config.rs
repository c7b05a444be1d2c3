use std::{collections::HashMap, fs};

use client_core::{normalize_api_url, DEFAULT_API_URL};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Layered resolution: defaults, then `contact_desk.toml`, then the
/// `CONTACT_API_URL` environment variable. The winner is validated once
/// here and injected into the backend worker at startup.
pub fn load_settings() -> Settings {
    let file_value = fs::read_to_string("contact_desk.toml")
        .ok()
        .and_then(|raw| toml::from_str::<HashMap<String, String>>(&raw).ok())
        .and_then(|file_cfg| file_cfg.get("api_url").cloned());
    let env_value = std::env::var("CONTACT_API_URL").ok();

    Settings {
        api_url: resolve_api_url(file_value, env_value),
    }
}

fn resolve_api_url(file_value: Option<String>, env_value: Option<String>) -> String {
    let configured = env_value
        .or(file_value)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    match normalize_api_url(&configured) {
        Ok(url) => url,
        Err(err) => {
            warn!("ignoring configured contact service URL: {err}");
            DEFAULT_API_URL.to_string()
        }
    }
}
