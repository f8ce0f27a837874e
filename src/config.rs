use crate::api::{CurrentUser, Listen, DEFAULT_API_URL};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
const PROPS_ELEMENT_ID: &str = "page-props";
#[cfg(not(target_arch = "wasm32"))]
const PROPS_ENV_VAR: &str = "PLAYLIST_PAGE_PROPS";

/// Page props plus UI tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub current_user: Option<CurrentUser>,
    #[serde(default)]
    pub listens: Vec<Listen>,
    #[serde(default = "default_playlist_page_size")]
    pub playlist_page_size: u32,
    #[serde(default = "default_modal_fade_ms")]
    pub modal_fade_ms: u64,
    #[serde(default = "default_toast_timeout_ms")]
    pub toast_timeout_ms: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_playlist_page_size() -> u32 {
    25
}

fn default_modal_fade_ms() -> u64 {
    500
}

fn default_toast_timeout_ms() -> u64 {
    5000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            current_user: None,
            listens: Vec::new(),
            playlist_page_size: default_playlist_page_size(),
            modal_fade_ms: default_modal_fade_ms(),
            toast_timeout_ms: default_toast_timeout_ms(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(raw)?;
        // Flask renders an empty object for anonymous visitors.
        if config
            .current_user
            .as_ref()
            .is_some_and(|user| user.name.is_empty() && user.auth_token().is_none())
        {
            config.current_user = None;
        }
        config.playlist_page_size = config.playlist_page_size.clamp(1, 100);
        Ok(config)
    }

    /// Load props for this page, falling back to defaults when they are missing or invalid.
    pub fn load() -> Self {
        match Self::read_props() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Using default page props: {err}");
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn read_props() -> Result<Self, ConfigError> {
        let raw = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.get_element_by_id(PROPS_ELEMENT_ID))
            .and_then(|element| element.text_content())
            .ok_or_else(|| ConfigError::MissingElement(PROPS_ELEMENT_ID.to_string()))?;
        Self::from_json(&raw)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn read_props() -> Result<Self, ConfigError> {
        let Ok(value) = std::env::var(PROPS_ENV_VAR) else {
            return Ok(Self::default());
        };
        let trimmed = value.trim();
        if trimmed.starts_with('{') {
            return Self::from_json(trimmed);
        }
        let raw = std::fs::read_to_string(trimmed).map_err(|source| ConfigError::Io {
            path: trimmed.to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.current_user.as_ref().and_then(CurrentUser::auth_token)
    }
}
