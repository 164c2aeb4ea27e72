use serde::{Deserialize, Serialize};
use crate::conversation::TITLE_MAX_CHARS;

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub persistence: PersistenceMode,
    /// Prefix for every backend path; empty means same origin
    pub api_base: String,
    pub typing: TypingConfig,
    pub title_max_chars: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            persistence: PersistenceMode::Remote,
            api_base: String::new(),
            typing: TypingConfig::default(),
            title_max_chars: TITLE_MAX_CHARS,
        }
    }
}

impl ClientConfig {
    /// Defaults for the given persistence mode. The local variant reveals
    /// replies character by character; the remote one shows them at once.
    pub fn for_mode(mode: PersistenceMode) -> Self {
        let typing = TypingConfig {
            enabled: mode == PersistenceMode::Local,
            ..TypingConfig::default()
        };
        Self {
            persistence: mode,
            typing,
            ..Self::default()
        }
    }

    /// Join the API base and an endpoint path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

/// Where conversations live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistenceMode {
    /// Server-side chat store behind a login
    Remote,
    /// Browser local storage, no account needed
    Local,
}

impl PersistenceMode {
    pub fn all() -> &'static [PersistenceMode] {
        &[PersistenceMode::Remote, PersistenceMode::Local]
    }

    pub fn label(&self) -> &str {
        match self {
            PersistenceMode::Remote => "Server",
            PersistenceMode::Local => "This browser",
        }
    }

    /// Parse the host page's `data-persistence` attribute
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "remote" | "server" => Some(PersistenceMode::Remote),
            "local" | "browser" => Some(PersistenceMode::Local),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingConfig {
    pub enabled: bool,
    pub chars_per_tick: usize,
    pub tick_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            chars_per_tick: 2,
            tick_ms: 20,
        }
    }
}
