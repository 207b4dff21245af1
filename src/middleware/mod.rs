// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request span creation and the configured CORS layer

pub mod cors;
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing
pub use self::tracing::{create_request_span, REQUEST_ID_HEADER};
