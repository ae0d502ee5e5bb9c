// ABOUTME: Image operations trait for container engines.
// ABOUTME: List and remove local images.

use super::sealed::Sealed;
use crate::engine::error::EngineError;
use crate::model::ImageRecord;
use crate::types::ImageId;
use async_trait::async_trait;

/// Image operations: list, remove.
#[async_trait]
pub trait ImageOps: Sealed + Send + Sync {
    /// List tagged or digested images. Entries with neither are left out.
    async fn list_images(&self) -> Result<Vec<ImageRecord>, EngineError>;

    /// Force-remove an image.
    async fn remove_image(&self, id: &ImageId) -> Result<(), EngineError>;
}
