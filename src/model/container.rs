// ABOUTME: Container record as listed by the engine.

use crate::types::ContainerId;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerRecord {
    pub id: ContainerId,
    pub image: String,
    pub command: String,
    pub created: DateTime<Utc>,
    /// Human-readable status, e.g. "Up 2 minutes".
    pub status: String,
    /// Machine-readable state, e.g. "running" or "exited".
    pub state: String,
    /// Published ports, e.g. "0.0.0.0:8080->80/tcp, 443/tcp", or "-".
    pub ports: String,
    /// First engine name without the leading slash, or "-".
    pub name: String,
}

impl ContainerRecord {
    pub fn is_running(&self) -> bool {
        self.state == "running"
    }
}
