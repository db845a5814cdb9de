//! Slideshow rotation
//!
//! [`RotationState`] holds the ordered catalog indices and the cursor into
//! them. [`SlideshowTicker`] advances it once per tick.

pub mod rotation;

use async_trait::async_trait;
use std::sync::Arc;

use crate::utils::periodic::PeriodicTask;

pub use rotation::{Advance, RotationState};

pub struct SlideshowTicker {
    rotation: Arc<RotationState>,
}

impl SlideshowTicker {
    pub fn new(rotation: Arc<RotationState>) -> Self {
        Self { rotation }
    }
}

#[async_trait]
impl PeriodicTask for SlideshowTicker {
    fn name(&self) -> &'static str {
        "slideshow"
    }

    async fn tick(&self) {
        if let Some(step) = self.rotation.advance() {
            tracing::info!(
                "Slideshow advanced to image index {} (position {} of {})",
                step.index,
                step.position,
                step.len
            );
        }
    }
}
