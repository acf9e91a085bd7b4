//! MedTrack client session layer
//!
//! The client-side half of the authentication design: a session store
//! holding the current token, a route guard gating navigation on token
//! presence, a request interceptor attaching the bearer header, and a
//! local (non-authoritative) token payload decoder for choosing which
//! data calls to issue.
//!
//! None of this is a trust boundary. The server re-derives role and
//! ownership on every request; these pieces only shape the UI flow.

pub mod api;
pub mod claims;
pub mod guard;
pub mod interceptor;
pub mod session;

pub use api::{ApiClient, ClientError, DashboardData};
pub use claims::{decode_role_hint, TokenHint};
pub use guard::{GuardOutcome, RouteGuard, LOGIN_ROUTE};
pub use interceptor::AuthInterceptor;
pub use session::{MemoryStorage, SessionStore, TokenStorage, TOKEN_STORAGE_KEY};
