//! What the host page tells us, and the one navigation we perform.
//!
//! The server renders `<body data-loggedin="…" data-persistence="…">`.

use chat_types::{ChatError, Result, config::PersistenceMode};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    pub logged_in: bool,
    pub persistence: Option<PersistenceMode>,
}

impl PageContext {
    /// Read the body's data attributes. A missing body yields the defaults.
    pub fn from_document() -> Self {
        let Some(body) = gloo_utils::document().body() else {
            log::warn!("Document has no <body>, assuming logged out");
            return Self::default();
        };
        let dataset = body.dataset();
        Self::from_attributes(
            dataset.get("loggedin").as_deref(),
            dataset.get("persistence").as_deref(),
        )
    }

    /// Any non-empty value other than "false" (any case) counts as logged in
    pub fn from_attributes(logged_in: Option<&str>, persistence: Option<&str>) -> Self {
        let logged_in = logged_in
            .map(str::trim)
            .map(|v| !v.is_empty() && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(false);
        Self {
            logged_in,
            persistence: persistence.and_then(PersistenceMode::parse),
        }
    }
}

/// Full-page navigation, used for the OAuth redirect
pub fn navigate(url: &str) -> Result<()> {
    gloo_utils::window()
        .location()
        .set_href(url)
        .map_err(|e| ChatError::JsInterop(format!("{:?}", e)))
}
