//! Client route guard
//!
//! Gates navigation to protected views on token *presence* only; no
//! validity or expiry check happens here. A UX convenience, not a
//! security control: a stale token passes the guard and then earns a
//! 401 from the server.

use crate::session::SessionStore;

/// Route to redirect to when activation is denied
pub const LOGIN_ROUTE: &str = "/login";

/// Outcome of a guard evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Navigation may proceed
    Allow,
    /// Navigation denied; redirect to [`LOGIN_ROUTE`]
    RedirectToLogin,
}

/// Guard for protected client routes
#[derive(Clone)]
pub struct RouteGuard {
    session: SessionStore,
}

impl RouteGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// Synchronous activation check, evaluated before a protected view
    /// is shown
    pub fn can_activate(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Activation check with the redirect target made explicit
    pub fn check(&self) -> GuardOutcome {
        if self.can_activate() {
            GuardOutcome::Allow
        } else {
            GuardOutcome::RedirectToLogin
        }
    }
}
