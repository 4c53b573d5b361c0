//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (add unique ID to each request and its span)
//! 4. Security headers (CSP, frame and referrer policy)
//! 5. Session layer (tower-sessions with in-memory store)

pub mod request_id;
pub mod security_headers;
pub mod session;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
