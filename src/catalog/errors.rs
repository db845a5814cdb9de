//! Catalog access errors

use std::fmt;
use std::fmt::Display;

/// Failures reported by a [`CatalogAccessor`](super::CatalogAccessor)
#[derive(Debug)]
pub enum CatalogError {
    /// The backing store could not be opened
    Open(crate::Error),

    /// A query against an open store failed
    Query(crate::Error),

    /// No record exists for the requested catalog index
    NotFound(i64),
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Open(e) | CatalogError::Query(e) => Some(e.as_ref()),
            CatalogError::NotFound(_) => None,
        }
    }
}

impl Display for CatalogError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CatalogError::Open(e) => write!(fmt, "failed to open catalog: {}", e),
            CatalogError::Query(e) => write!(fmt, "catalog query failed: {}", e),
            CatalogError::NotFound(idx) => write!(fmt, "no image with index {}", idx),
        }
    }
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}
