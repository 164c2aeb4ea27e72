//! egui panels for the chat client. Panels draw a `ChatView` and report
//! what the user did as [`state::UiAction`]s; they never touch the
//! controller themselves.

pub mod state;
pub mod theme;
pub mod panels;

#[cfg(test)]
mod tests;
