use serde::{Deserialize, Serialize};

/// Top-level inbox configuration, handed to the engine and UI at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboxConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    /// Fixed refresh interval of the poll loop
    pub poll_interval_ms: u64,
    /// How long a toast notice stays on screen
    pub notice_ttl_secs: u64,
    pub theme: ThemeConfig,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            notice_ttl_secs: DEFAULT_NOTICE_TTL_SECS,
            theme: ThemeConfig::default(),
        }
    }
}

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
pub const DEFAULT_NOTICE_TTL_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
        }
    }
}

impl ApiConfig {
    /// Join the base URL and an endpoint path, tolerating stray slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
    /// Key the session layer stores the bearer token under
    pub token_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Auto,
            token_key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }
}

pub const DEFAULT_TOKEN_KEY: &str = "authToken";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// Auto-detect best available backend
    Auto,
    Memory,
    LocalStorage,
}

/// RGB colors used by the UI palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background: [u8; 3],
    pub surface: [u8; 3],
    pub text: [u8; 3],
    pub text_muted: [u8; 3],
    pub accent: [u8; 3],
    pub user_bubble: [u8; 3],
    pub assistant_bubble: [u8; 3],
    pub online: [u8; 3],
    pub error: [u8; 3],
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: [248, 250, 252],
            surface: [255, 255, 255],
            text: [15, 23, 42],
            text_muted: [100, 116, 139],
            accent: [37, 99, 235],
            user_bubble: [219, 234, 254],
            assistant_bubble: [241, 245, 249],
            online: [34, 197, 94],
            error: [220, 38, 38],
        }
    }
}
