//! Environment variable sources
//!
//! - `EnvSource` trait for anything that can answer variable lookups
//! - `ProcessEnv` for the live process environment
//! - `MemoryEnv` for tests and embedding

mod traits;
mod process_env;
mod memory_env;

pub use traits::EnvSource;
pub use process_env::ProcessEnv;
pub use memory_env::MemoryEnv;
