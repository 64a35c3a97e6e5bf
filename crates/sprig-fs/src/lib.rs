//! # sprig-fs
//!
//! Storage collaborators for Sprig: an on-disk content store for file
//! snapshots and a working-tree abstraction over the user's checkout.
//! Both are exposed through traits so the engines can run against
//! in-memory implementations in tests.

mod error;
mod path;
mod store;
mod traits;
mod worktree;

pub use error::{Error, Result};
pub use path::validate_path;
pub use store::{BlobStore, ContentHandle};
pub use traits::{ContentStore, WorkingTree};
pub use worktree::Worktree;
