//! Middleware del sistema
//!
//! CORS, rate limiting e idioma de cada request.

pub mod cors;
pub mod locale;
pub mod rate_limit;

pub use cors::cors_layer;
pub use locale::locale_middleware;
pub use rate_limit::{rate_limit_middleware, RateLimitState};
