//! Three-way merge engine for Sprig.
//!
//! Merging a branch into the current one happens in three layers:
//!
//! - [`classify`] decides, per file, what to do given its blob in the split
//!   point, the current tip, and the given tip.
//! - [`MergeEngine`] applies those decisions to a [`MergeContext`] (the
//!   staging area plus the working tree), writing conflict markers where
//!   both sides disagree.
//! - [`Merger`] runs the guard checks, resolves the split point, handles
//!   the up-to-date and fast-forward cases, and records the merge commit.

pub mod classify;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod merger;

pub use classify::{classify, MergeAction};
pub use conflict::render_conflict;
pub use engine::{MergeContext, MergeEngine, MergeReport};
pub use error::{MergeError, MergeResult};
pub use merger::{MergeOutcome, Merger};
