//! Resolution of individual configuration values
//!
//! `ConfigResolver` walks the precedence chain for one `ResolutionRequest`
//! and reports the winning `ValueSource` alongside the value.

mod request;
mod config_resolver;

pub use request::{ResolutionRequest, Resolved, ValueSource};
pub use config_resolver::ConfigResolver;
