//! Storage effect handlers
//!
//! The filesystem handler is the production backend. The memory handler is
//! stateless from the caller's point of view and is used for ephemeral sessions.

mod filesystem;
mod memory;

pub use filesystem::FilesystemStorageHandler;
pub use memory::MemoryStorageHandler;
