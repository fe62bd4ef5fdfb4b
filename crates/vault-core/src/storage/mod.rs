//! Storage backends for the credential collection
//!
//! This module provides two storage backends:
//! 1. In-memory (default, lost when the process exits)
//! 2. JSON file (persistent, opt-in)

mod json_file;
mod memory;
mod traits;

pub use json_file::{default_data_dir, JsonFileStorage};
pub(crate) use json_file::write_atomic;
pub use memory::MemoryStorage;
pub use traits::VaultStorage;
