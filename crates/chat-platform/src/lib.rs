//! Browser adapters for the chat-core ports.

pub mod http;
pub mod storage;
pub mod page;
