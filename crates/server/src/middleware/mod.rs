//! HTTP middleware stack for the scanner gateway.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. `TraceLayer` (one span and log line per request)
//! 3. Request ID
//! 4. CORS (permissive)
//! 5. Security headers

pub mod request_id;
pub mod security_headers;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
