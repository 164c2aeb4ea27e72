//! Account actions: login, signup, password change, account deletion, logout.
//!
//! Server answers are `{ success, message }`; any message worth showing is
//! surfaced as a blocking notice on the event bus.

use std::rc::Rc;

use chat_types::{Result, api::Credentials, event::ChatEvent};
use crate::controller::Session;
use crate::event_bus::EventBus;
use crate::ports::AccountPort;

#[derive(Clone)]
pub struct AccountController {
    account: Rc<dyn AccountPort>,
    session: Session,
    event_bus: EventBus,
}

impl AccountController {
    pub fn new(account: Rc<dyn AccountPort>, session: Session, event_bus: EventBus) -> Self {
        Self {
            account,
            session,
            event_bus,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Returns whether the server accepted the credentials
    pub async fn login(&self, credentials: &Credentials) -> Result<bool> {
        let response = self.account.login(credentials).await?;
        self.settle_auth(response.success, response.message, "Login");
        Ok(response.success)
    }

    pub async fn signup(&self, credentials: &Credentials) -> Result<bool> {
        let response = self.account.signup(credentials).await?;
        self.settle_auth(response.success, response.message, "Signup");
        Ok(response.success)
    }

    fn settle_auth(&self, success: bool, message: String, action: &str) {
        if success {
            log::info!("{} succeeded", action);
            self.set_logged_in(true);
        } else {
            log::info!("{} rejected: {}", action, message);
            self.event_bus.notice(message);
        }
    }

    /// Blank passwords never reach the server
    pub async fn change_password(&self, password: &str) -> Result<bool> {
        if password.is_empty() {
            self.event_bus.notice("Enter a new password");
            return Ok(false);
        }
        let response = self.account.change_password(password).await?;
        self.event_bus.notice(response.message);
        Ok(response.success)
    }

    /// Callers confirm with the user first; this cannot be undone.
    pub async fn delete_account(&self) -> Result<bool> {
        let response = self.account.delete_account().await?;
        self.event_bus.notice(response.message);
        if response.success {
            self.set_logged_in(false);
        }
        Ok(response.success)
    }

    pub async fn logout(&self) -> Result<()> {
        self.account.logout().await?;
        self.set_logged_in(false);
        Ok(())
    }

    pub fn oauth_login_url(&self) -> String {
        self.account.oauth_login_url()
    }

    fn set_logged_in(&self, logged_in: bool) {
        self.session.set_logged_in(logged_in);
        self.event_bus.emit(ChatEvent::SessionChanged { logged_in });
    }
}
