//! Image catalog access
//!
//! The catalog is an ordered set of image records keyed by an integer index.
//! The slideshow only ever needs three things from it: how many records
//! exist, which indices are valid, and the record behind one index.

pub mod errors;
pub mod sqlite;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use errors::CatalogError;
pub use sqlite::SqliteCatalog;

/// Metadata for one image in the catalog
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// File name inside the image directory
    pub name: String,
    /// URL path the file is served under
    pub path: String,
    /// Absolute URL of the image, as stored in the catalog
    pub http: String,
    pub idx: i64,
    /// "landscape" or "portrait"
    pub orientation: String,
    pub ext: String,
}

#[async_trait]
pub trait CatalogAccessor: Send + Sync {
    async fn count_records(&self) -> Result<i64, CatalogError>;

    /// Valid indices in ascending order
    async fn list_valid_indices(&self) -> Result<Vec<i64>, CatalogError>;

    async fn get_record(&self, idx: i64) -> Result<ImageRecord, CatalogError>;
}
