//! Small settings kept in client storage: theme and client config.

use chat_types::{Result, config::ClientConfig};
use crate::ports::StoragePort;

pub const DARK_MODE_KEY: &str = "darkMode";
pub const CONFIG_KEY: &str = "chat:config";

/// Stored as the text `"true"` / `"false"`; anything else reads as light.
pub async fn load_dark_mode(storage: &dyn StoragePort) -> Result<bool> {
    Ok(storage
        .get(DARK_MODE_KEY)
        .await?
        .is_some_and(|v| v == b"true"))
}

pub async fn save_dark_mode(storage: &dyn StoragePort, dark: bool) -> Result<()> {
    let value = if dark { "true" } else { "false" };
    storage.set(DARK_MODE_KEY, value.as_bytes()).await
}

pub async fn load_config(storage: &dyn StoragePort) -> Result<Option<ClientConfig>> {
    match storage.get(CONFIG_KEY).await? {
        Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
        None => Ok(None),
    }
}

pub async fn save_config(storage: &dyn StoragePort, config: &ClientConfig) -> Result<()> {
    let json = serde_json::to_vec(config)?;
    storage.set(CONFIG_KEY, &json).await
}
