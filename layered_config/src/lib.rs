//! Layered configuration for Rust applications.
//!
//! Sources are read by [`loader::Loader`]s into a dynamic [`Value`] tree and
//! merged in order, so later sources override earlier ones key by key. String
//! values may carry `{{ ... }}` templates, which are rendered against an
//! [`EnvSnapshot`] once loading finishes. The result is an immutable
//! [`Config`] offering:
//!
//! - dotted-path lookups with forgiving typed accessors
//!   ([`Config::get_int`], [`Config::get_duration`], ...)
//! - strict binding onto records via `#[derive(Bind)]`
//! - declarative validation rules ([`validate`])
//!
//! ```rust
//! use layered_config::{Config, EnvSnapshot, loader::EnvLoader, path::expand_dot_keys, Value};
//!
//! let defaults = expand_dot_keys([
//!     ("server.host", Value::from("localhost")),
//!     ("server.port", Value::from(8080)),
//! ]);
//! let config = Config::builder()
//!     .env(EnvSnapshot::from_pairs([("APP_SERVER__PORT", "9090")]))
//!     .loader(defaults)
//!     .loader(EnvLoader::new("APP_"))
//!     .build()?;
//!
//! assert_eq!(config.get_string("server.host"), "localhost");
//! assert_eq!(config.get_int("server.port"), 9090);
//! # Ok::<(), layered_config::ConfigError>(())
//! ```

extern crate self as layered_config;

pub mod bind;
pub mod coerce;
mod config;
pub mod env;
pub mod error;
pub mod loader;
pub mod merge;
pub mod path;
pub mod template;
pub mod validate;
pub mod value;

pub use bind::{Bind, BindError, BindField};
pub use config::{Config, ConfigBuilder};
pub use env::EnvSnapshot;
pub use error::{ConfigError, ConfigResult, LoadError};
pub use layered_config_macros::Bind;
pub use validate::{Rule, ValidationErrors, Violation};
pub use value::{Mapping, Value};
