//! HTTP middleware stack for the Wishbox API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS (only when a separate SPA origin is configured)
//! 5. Session layer (tower-sessions with `PostgreSQL` store)
//! 6. Security headers

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{RequireOwner, set_current_owner};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
