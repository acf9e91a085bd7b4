//! Client request interceptor
//!
//! Attaches the stored token to every outgoing request as a bearer
//! header. Requests without a session token pass through unmodified.
//! No retry or refresh happens on a 401; the caller must
//! re-authenticate.

use crate::session::SessionStore;
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

/// Interceptor that injects `Authorization: Bearer <token>`
#[derive(Clone)]
pub struct AuthInterceptor {
    session: SessionStore,
}

impl AuthInterceptor {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// Apply the bearer header if a token is present; runs once per
    /// outgoing call
    pub fn intercept(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.get() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }
}
