//! Content normalization and persistence core for a single-tenant marketing
//! site: an on-disk JSON document, a normalizer that coerces arbitrary admin
//! payloads into a bounded schema-correct document, and gallery list
//! mutations composed on top.

pub mod config;
pub mod defaults;
pub mod errors;
pub mod gallery;
pub mod models;
pub mod normalize;
pub mod store;

pub use config::ContentPaths;
pub use errors::{ContentError, ContentResult};
pub use models::{ContentDocument, GalleryEntry};
pub use store::ContentStore;
