pub mod config;
pub mod error;
pub mod infra;
pub mod policy;
pub mod routes;
pub mod squeeze;

pub use config::{Config, SqueezeConfig};
pub use error::SqueezeError;
pub use policy::{
    select_encoding, select_minification, ConfigFlags, Encoding, MinificationKind, ResourceType,
};
pub use squeeze::{squeeze_response, Squeeze};
