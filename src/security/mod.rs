//! Security module for webdesk.
//!
//! The jail itself lives in [`crate::shell::PathResolver`]; this module
//! covers the transport-side concerns in front of it.
//!
//! ## Features
//!
//! - **Rate Limiting**: IP-based sliding window rate limiter
//! - **Input Validation**: size caps and byte-level checks on request input
//!
//! ## Example
//!
//! ```rust
//! use webdesk::security::{InputValidator, RateLimiter};
//!
//! // Create rate limiter (100 req/min)
//! let limiter = RateLimiter::default();
//!
//! // Create input validator
//! let validator = InputValidator::default();
//! assert!(validator.validate_command("ls").is_ok());
//! ```

pub mod rate_limit;
pub mod validation;

// Re-export commonly used types
pub use rate_limit::{rate_limit_middleware, RateLimitConfig, RateLimiter};
pub use validation::{InputValidator, ValidationConfig, ValidationError};
