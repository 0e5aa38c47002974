//! Session states and the snapshot handed to views

use advertboard_api_client::User;
use serde::Serialize;
use std::fmt;

/// Lifecycle of the session
///
/// `Uninitialized → Restoring → {Authenticated, Anonymous}`; login, register
/// and logout move between the two settled states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing checked yet
    Uninitialized,
    /// Persisted token being verified against the backend
    Restoring,
    /// Signed in as the contained user
    Authenticated(User),
    /// No signed-in user
    Anonymous,
}

impl SessionState {
    /// Whether a user is signed in
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Whether restore has finished (or was never needed)
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Authenticated(_) | Self::Anonymous)
    }

    /// Signed-in user, if any
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Snapshot for views
    #[must_use]
    pub fn session(&self) -> Session {
        Session {
            user: self.user().cloned(),
            authenticated: self.is_authenticated(),
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => f.write_str("uninitialized"),
            Self::Restoring => f.write_str("restoring"),
            Self::Authenticated(user) => write!(f, "authenticated as {}", user.email),
            Self::Anonymous => f.write_str("anonymous"),
        }
    }
}

/// What views see of the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Signed-in user
    pub user: Option<User>,
    /// Whether `user` is set
    pub authenticated: bool,
}
