//! Content hashing for Sprig.
//!
//! Object identifiers are domain-separated BLAKE3 hashes, so a blob and a
//! commit whose serialized bytes happen to coincide still get distinct ids.

pub mod hasher;

pub use hasher::ContentHasher;
