// Session and role gate
//
// Authentication is a local comparison against configured operator
// credentials; the service itself only sees the resulting role string
// on control writes. The session is a plain value threaded through
// call sites, never global state.

use secrecy::{ExposeSecret, SecretString};

/// Configured administrator credentials.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password: SecretString,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Exact match on both fields. No hashing: the service protocol
    /// itself is credential-free, this gate only arms the local
    /// control surface.
    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.expose_secret() == password
    }
}

/// Operator session state.
///
/// Invariant: `admin` implies `logged_in`. The only transitions are a
/// successful [`Session::authenticate`] (sets both) and
/// [`Session::deauthenticate`] (clears both).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    logged_in: bool,
    admin: bool,
    user: Option<String>,
}

impl Session {
    /// Attempt to log in. On a match both flags are set and the
    /// username is recorded; on a mismatch the session is left exactly
    /// as it was.
    pub fn authenticate(
        &mut self,
        username: &str,
        password: &str,
        credentials: &AdminCredentials,
    ) -> bool {
        if credentials.matches(username, password) {
            self.logged_in = true;
            self.admin = true;
            self.user = Some(username.to_string());
            true
        } else {
            false
        }
    }

    /// Log out, dropping both flags and the recorded user.
    pub fn deauthenticate(&mut self) {
        *self = Session::default();
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// The authenticated username, if any.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn creds() -> AdminCredentials {
        AdminCredentials::new("operator", SecretString::from("hunter2"))
    }

    #[test]
    fn test_authenticate_success_sets_both_flags() {
        let mut session = Session::default();
        assert!(session.authenticate("operator", "hunter2", &creds()));
        assert!(session.is_logged_in());
        assert!(session.is_admin());
        assert_eq!(session.user(), Some("operator"));
    }

    #[test]
    fn test_authenticate_failure_leaves_session_untouched() {
        let mut session = Session::default();
        assert!(!session.authenticate("operator", "wrong", &creds()));
        assert_eq!(session, Session::default());

        // A failed attempt must not demote an existing session either.
        let mut session = Session::default();
        session.authenticate("operator", "hunter2", &creds());
        let before = session.clone();
        assert!(!session.authenticate("intruder", "guess", &creds()));
        assert_eq!(session, before);
    }

    #[test]
    fn test_deauthenticate_resets() {
        let mut session = Session::default();
        session.authenticate("operator", "hunter2", &creds());
        session.deauthenticate();
        assert!(!session.is_logged_in());
        assert!(!session.is_admin());
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_admin_implies_logged_in() {
        // No reachable state has admin set without logged_in.
        let mut session = Session::default();
        assert!(!session.is_admin() || session.is_logged_in());
        session.authenticate("operator", "hunter2", &creds());
        assert!(!session.is_admin() || session.is_logged_in());
        session.deauthenticate();
        assert!(!session.is_admin() || session.is_logged_in());
    }
}
