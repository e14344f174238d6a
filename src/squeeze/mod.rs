//! Response squeezing middleware.
//!
//! Applies the decisions made by [`crate::policy`] to outgoing responses:
//! minifies the body, compresses it with the negotiated encoding, and keeps
//! the result for static resources in a shared in-memory cache.
//!
//! ```ignore
//! use axum::{middleware, Router};
//! use squeeze::{squeeze_response, Squeeze, SqueezeConfig};
//!
//! let squeeze = Squeeze::new(SqueezeConfig::from_env());
//! let app: Router = Router::new()
//!     // .route(...)
//!     .layer(middleware::from_fn_with_state(squeeze, squeeze_response));
//! ```

pub mod cache;
pub mod middleware;
pub mod state;

pub use cache::{CacheKey, CachedBody, StaticCache};
pub use middleware::squeeze_response;
pub use state::{Squeeze, Squeezed};
