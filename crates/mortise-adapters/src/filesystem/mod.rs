//! Filesystem adapters.

mod local;
mod memory;

pub use local::LocalFileSystem;
pub use memory::{FsOp, MemoryFileSystem};
