//! Commit graph queries for Sprig.
//!
//! [`AncestorWalker`] computes the ancestor set of a commit by following
//! first and second parent edges through an [`ObjectStore`]. The order in
//! which ancestors are discovered is recorded, and [`find_split_point`]
//! relies on it to pick the split point (lowest common ancestor) of two
//! branch tips.
//!
//! [`ObjectStore`]: sprig_store::ObjectStore

pub mod error;
pub mod split;
pub mod walker;

pub use error::{DagError, DagResult};
pub use split::{find_split_point, is_ancestor, SplitPoint};
pub use walker::{AncestorSet, AncestorWalker, TraversalOrder};
