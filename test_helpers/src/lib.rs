//! Test helpers shared across the `layered_config` workspace.
//!
//! Process-global state (environment variables and the working directory)
//! is mutated only through RAII guards that serialise access and restore the
//! prior state on drop. [`figment::with_jail`] wraps `figment::Jail` for
//! provider tests.

pub mod cwd;
pub mod env;
pub mod figment;
