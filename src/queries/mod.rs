//! Pure operations over the loaded collection.
//!
//! Nothing here touches I/O: filtering, aggregation and image resolution are
//! plain functions of their arguments. [`CollectionQuery`] bundles them over
//! a borrowed [`Dataset`](crate::loader::Dataset) for convenience.

pub mod aggregate;
pub mod filter;
pub mod image;

pub use aggregate::{group_by, summarize};
pub use filter::{filter, CollectionQuery};
pub use image::{resolve_image, ImageResolver};
