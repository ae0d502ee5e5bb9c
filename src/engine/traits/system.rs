// ABOUTME: System-level operations trait for container engines.
// ABOUTME: Disk usage accounting and connectivity check.

use super::sealed::Sealed;
use crate::engine::error::EngineError;
use crate::model::DiskUsageSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait SystemOps: Sealed + Send + Sync {
    /// Disk usage of images, containers, volumes, and build cache.
    async fn disk_usage(&self) -> Result<DiskUsageSnapshot, EngineError>;

    /// Check that the engine answers.
    async fn ping(&self) -> Result<(), EngineError>;
}
