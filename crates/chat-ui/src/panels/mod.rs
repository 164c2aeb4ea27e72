pub mod chat;
pub mod sidebar;
pub mod account;
pub mod dialogs;
pub mod settings;
