//! WASM-target tests for chat-platform (Node.js runtime).
//!
//! Tests MemoryStorage, the local conversation store on top of it, and
//! page attribute parsing under wasm32-unknown-unknown via
//! `wasm-pack test --node`.
//!
//! localStorage and fetch need a browser and are exercised manually.

use wasm_bindgen_test::*;

use chat_core::ports::{AccountPort, StoragePort};
use chat_core::store::{ConversationStore, LocalStore, Change};
use chat_core::preferences::{load_dark_mode, save_dark_mode};
use chat_platform::http::HttpChatBackend;
use chat_platform::page::PageContext;
use chat_platform::storage::MemoryStorage;
use chat_types::config::{ClientConfig, PersistenceMode};
use chat_types::message::Message;
use std::rc::Rc;

// ─── MemoryStorage Tests ─────────────────────────────────

#[wasm_bindgen_test]
async fn memory_storage_get_missing() {
    let storage = MemoryStorage::new();
    assert!(storage.get("nonexistent").await.unwrap().is_none());
}

#[wasm_bindgen_test]
async fn memory_storage_overwrite() {
    let storage = MemoryStorage::new();
    storage.set("key", b"v1").await.unwrap();
    storage.set("key", b"v2").await.unwrap();
    assert_eq!(storage.get("key").await.unwrap(), Some(b"v2".to_vec()));
}

// ─── Stores on MemoryStorage ─────────────────────────────

#[wasm_bindgen_test]
async fn local_store_over_memory() {
    let storage: Rc<dyn StoragePort> = Rc::new(MemoryStorage::new());
    let store = LocalStore::new(storage.clone());

    let mut conv = store.create().await.unwrap();
    conv.messages.push(Message::user("hello"));
    let all = vec![conv.clone()];
    store
        .persist(&all, &conv, &Change::MessageAppended(Message::user("hello")))
        .await
        .unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, all);
}

#[wasm_bindgen_test]
async fn dark_mode_preference_over_memory() {
    let storage = MemoryStorage::new();
    save_dark_mode(&storage, true).await.unwrap();
    assert_eq!(storage.get("darkMode").await.unwrap(), Some(b"true".to_vec()));
    assert!(load_dark_mode(&storage).await.unwrap());
}

// ─── Page / HTTP Tests ───────────────────────────────────

#[wasm_bindgen_test]
fn page_context_from_attributes() {
    let ctx = PageContext::from_attributes(Some("true"), Some("local"));
    assert!(ctx.logged_in);
    assert_eq!(ctx.persistence, Some(PersistenceMode::Local));

    let ctx = PageContext::from_attributes(Some(""), None);
    assert!(!ctx.logged_in);
    assert!(ctx.persistence.is_none());

    let ctx = PageContext::from_attributes(Some("false"), Some("nonsense"));
    assert!(!ctx.logged_in);
    assert!(ctx.persistence.is_none());

    assert_eq!(PageContext::from_attributes(None, None), PageContext::default());
}

#[wasm_bindgen_test]
fn page_context_false_in_any_case_is_logged_out() {
    assert!(!PageContext::from_attributes(Some("False"), None).logged_in);
    assert!(!PageContext::from_attributes(Some("FALSE"), None).logged_in);
    assert!(!PageContext::from_attributes(Some(" false "), None).logged_in);
    assert!(!PageContext::from_attributes(Some("   "), None).logged_in);
    assert!(PageContext::from_attributes(Some(" True "), None).logged_in);
}

#[wasm_bindgen_test]
fn oauth_url_respects_api_base() {
    let backend = HttpChatBackend::new(ClientConfig::default());
    assert_eq!(backend.oauth_login_url(), "/login/google");

    let mut config = ClientConfig::default();
    config.api_base = "https://chat.example.com".to_string();
    let backend = HttpChatBackend::new(config);
    assert_eq!(backend.oauth_login_url(), "https://chat.example.com/login/google");
}
