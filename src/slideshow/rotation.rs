use std::sync::RwLock;

use crate::catalog::CatalogAccessor;

/// Where the rotation stands, read under one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// Catalog index now on display
    pub index: i64,
    /// 1-based position within the index list
    pub position: usize,
    pub len: usize,
}

struct Rotation {
    /// valid catalog indices, ascending and unique
    indices: Vec<i64>,
    /// position into `indices`, meaningful only when it is non-empty
    cursor: usize,
}

impl Rotation {
    fn current(&self) -> Option<i64> {
        self.indices.get(self.cursor).copied()
    }

    fn slide(&self) -> Option<Advance> {
        self.current().map(|index| Advance {
            index,
            position: self.cursor + 1,
            len: self.indices.len(),
        })
    }
}

/// Which catalog index the frame is currently showing.
///
/// The index list is fixed for the life of the process. The current index is
/// always read through the cursor under the same lock, so readers never see
/// a value that is not in the list.
pub struct RotationState {
    inner: RwLock<Rotation>,
}

impl RotationState {
    pub fn new(mut indices: Vec<i64>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self {
            inner: RwLock::new(Rotation { indices, cursor: 0 }),
        }
    }

    /// Load the index list from the catalog. A catalog that cannot be read is
    /// treated as empty so the server still comes up.
    pub async fn load(catalog: &dyn CatalogAccessor) -> Self {
        match catalog.list_valid_indices().await {
            Ok(indices) => Self::new(indices),
            Err(e) => {
                tracing::error!("Failed to load catalog indices: {}", e);
                Self::new(Vec::new())
            }
        }
    }

    /// Move to the next index, wrapping to the start. No-op when empty.
    pub fn advance(&self) -> Option<Advance> {
        let mut rotation = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let len = rotation.indices.len();
        if len == 0 {
            return None;
        }

        rotation.cursor += 1;
        if rotation.cursor >= len {
            rotation.cursor = 0;
        }

        rotation.slide()
    }

    /// `None` means there is no content to show
    pub fn current_index(&self) -> Option<i64> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .current()
    }

    /// Current index together with its position, taken from a single read
    pub fn current(&self) -> Option<Advance> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .slide()
    }

    /// 1-based position and list length, `None` when empty
    pub fn position(&self) -> Option<(usize, usize)> {
        let rotation = self.inner.read().unwrap_or_else(|e| e.into_inner());
        if rotation.indices.is_empty() {
            None
        } else {
            Some((rotation.cursor + 1, rotation.indices.len()))
        }
    }

    pub fn snapshot_lists(&self) -> (Vec<i64>, usize) {
        let rotation = self.inner.read().unwrap_or_else(|e| e.into_inner());
        (rotation.indices.clone(), rotation.indices.len())
    }

    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .indices
            .is_empty()
    }
}
