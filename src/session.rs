//! User session and developer-mode flag
//!
//! Boundary collaborator for the presentation layer: a trivial flag store
//! with change notification. The core performs no authorization checks on
//! install or launch; this state only gates whether authoring affordances
//! are shown.

use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub username: Option<String>,
    pub developer: bool,
}

/// Current user session. Observers watch for state changes.
#[derive(Debug)]
pub struct Session {
    tx: watch::Sender<SessionState>,
}

impl Session {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SessionState::default());
        Self { tx }
    }

    /// Log in as `username`. Empty names are rejected.
    pub fn login(&self, username: &str) -> bool {
        if username.is_empty() {
            return false;
        }
        self.tx.send_modify(|state| {
            state.username = Some(username.to_string());
        });
        true
    }

    /// Clear the user and drop developer mode.
    pub fn logout(&self) {
        self.tx.send_modify(|state| {
            state.username = None;
            state.developer = false;
        });
    }

    pub fn set_developer(&self, enabled: bool) {
        self.tx.send_if_modified(|state| {
            if state.developer == enabled {
                return false;
            }
            state.developer = enabled;
            true
        });
    }

    pub fn is_developer(&self) -> bool {
        self.tx.borrow().developer
    }

    pub fn username(&self) -> Option<String> {
        self.tx.borrow().username.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_rejects_empty_username() {
        let session = Session::new();
        assert!(!session.login(""));
        assert!(session.username().is_none());
    }

    #[test]
    fn test_logout_clears_developer_mode() {
        let session = Session::new();
        session.login("ada");
        session.set_developer(true);
        assert!(session.is_developer());

        session.logout();
        assert!(session.username().is_none());
        assert!(!session.is_developer());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let session = Session::new();
        let mut rx = session.subscribe();

        session.login("ada");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().username.as_deref(), Some("ada"));
    }

    #[test]
    fn test_redundant_developer_toggle_does_not_notify() {
        let session = Session::new();
        let rx = session.subscribe();

        session.set_developer(false);
        assert!(!rx.has_changed().unwrap());
    }
}
