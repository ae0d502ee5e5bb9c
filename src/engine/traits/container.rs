// ABOUTME: Container operations trait for container engines.
// ABOUTME: List, start, stop, and remove containers.

use super::sealed::Sealed;
use crate::engine::error::EngineError;
use crate::model::ContainerRecord;
use crate::types::ContainerId;
use async_trait::async_trait;

/// Container lifecycle operations.
#[async_trait]
pub trait ContainerOps: Sealed + Send + Sync {
    /// List all containers, including stopped ones.
    async fn list_containers(&self) -> Result<Vec<ContainerRecord>, EngineError>;

    /// Start a created or stopped container.
    async fn start_container(&self, id: &ContainerId) -> Result<(), EngineError>;

    /// Stop a running container.
    async fn stop_container(&self, id: &ContainerId) -> Result<(), EngineError>;

    /// Force-remove a container, stopping it first if needed.
    async fn remove_container(&self, id: &ContainerId) -> Result<(), EngineError>;
}
