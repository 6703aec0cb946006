//! Catalog ingestion for shopsight.
//!
//! Reads per-category CSV exports through a [`CatalogSource`], normalizes
//! each row into a canonical [`shopsight_core::Product`], and publishes the
//! result atomically through the [`CatalogStore`]. Bad fields default, bad
//! rows drop, bad files skip — a catalog load succeeds partially by design.

pub mod error;
pub mod normalize;
pub mod source;
pub mod store;
pub mod types;

mod parse;

pub use error::IngestError;
pub use normalize::{category_from_source, normalize_row, parse_catalog};
pub use source::{CatalogSource, DirectorySource};
pub use store::CatalogStore;
pub use types::{RawRow, SourceFile};
