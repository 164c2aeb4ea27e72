//! Conversation state, persistence strategies and the controller that ties
//! them together. Platform code plugs in through [`ports`].

pub mod ports;
pub mod event_bus;
pub mod state;
pub mod reveal;
pub mod store;
pub mod view;
pub mod controller;
pub mod account;
pub mod preferences;
