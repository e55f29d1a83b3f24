//! Working tree access and checkout for Sprig.
//!
//! The working tree is a flat directory of files keyed by name. The
//! [`Worktree`] trait abstracts it so merge and checkout logic runs the same
//! against a real directory ([`DiskWorktree`]) or a map ([`InMemoryWorktree`]).
//! [`Checkout`] materializes committed file versions into a worktree and
//! guards against clobbering untracked files.

pub mod checkout;
pub mod disk;
pub mod error;
pub mod memory;
pub mod traits;

pub use checkout::Checkout;
pub use disk::DiskWorktree;
pub use error::{WorktreeError, WorktreeResult};
pub use memory::InMemoryWorktree;
pub use traits::Worktree;
