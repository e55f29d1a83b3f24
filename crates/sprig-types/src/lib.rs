//! Foundation types for Sprig.
//!
//! Every other Sprig crate depends on `sprig-types` for [`ObjectId`], the
//! content-addressed identifier that names blobs and commits.

pub mod error;
pub mod object;

pub use error::TypeError;
pub use object::ObjectId;
