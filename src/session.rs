//! Authentication capability consumed by the slip manager.
//!
//! Used only to gate submission and to resolve the `userId` recorded on a
//! bet. An authenticated session that exposes no identifier falls back to
//! the `"guest"` sentinel.

/// Sentinel user id for an authenticated session without an identifier
pub const GUEST_USER_ID: &str = "guest";

/// Session capability: who, if anyone, is signed in
pub trait SessionProvider: Send + Sync {
    fn is_authenticated(&self) -> bool;

    /// Identifier of the signed-in user, when the session exposes one
    fn user_id(&self) -> Option<String>;
}

/// Fixed session state, for embedders that resolve auth up front and for
/// tests
#[derive(Debug, Clone)]
pub struct StaticSession {
    authenticated: bool,
    user_id: Option<String>,
}

impl StaticSession {
    /// An authenticated session for `user_id`
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            user_id: Some(user_id.into()),
        }
    }

    /// An authenticated session with no identifier; bets record `"guest"`
    pub fn guest() -> Self {
        Self {
            authenticated: true,
            user_id: None,
        }
    }

    /// A signed-out session
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user_id: None,
        }
    }
}

impl SessionProvider for StaticSession {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}
