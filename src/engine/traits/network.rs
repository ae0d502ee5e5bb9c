// ABOUTME: Network operations trait for container engines.

use super::sealed::Sealed;
use crate::engine::error::EngineError;
use crate::model::NetworkRecord;
use async_trait::async_trait;

#[async_trait]
pub trait NetworkOps: Sealed + Send + Sync {
    async fn list_networks(&self) -> Result<Vec<NetworkRecord>, EngineError>;
}
