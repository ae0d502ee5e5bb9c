// ABOUTME: Disk usage accounting snapshot from the engine.
// ABOUTME: Per-kind usage rows plus a derived summary per kind.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskUsageSnapshot {
    /// Total size of all image layers.
    pub layers_size: u64,
    pub images: Vec<ImageUsage>,
    pub containers: Vec<ContainerUsage>,
    pub volumes: Vec<VolumeUsage>,
    pub build_cache: Vec<BuildCacheUsage>,
    pub image_summary: UsageSummary,
    pub container_summary: UsageSummary,
    pub volume_summary: UsageSummary,
    pub build_cache_summary: UsageSummary,
}

/// Aggregate over one kind of resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UsageSummary {
    pub total_size: u64,
    pub total_count: usize,
    pub active_count: usize,
    /// Bytes held by resources not in active use.
    pub reclaimable: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageUsage {
    pub id: String,
    pub repo_tags: Vec<String>,
    pub created: DateTime<Utc>,
    pub size: u64,
    /// Bytes shared with other images; `None` when the engine did not compute it.
    pub shared_size: Option<u64>,
    pub containers: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerUsage {
    pub id: String,
    pub names: Vec<String>,
    pub image: String,
    pub state: String,
    pub created: DateTime<Utc>,
    /// Size of the writable layer.
    pub size_rw: u64,
    pub size_root_fs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeUsage {
    pub name: String,
    pub driver: String,
    pub mountpoint: String,
    /// `None` when the engine does not report a size for this volume.
    pub size: Option<u64>,
    pub ref_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildCacheUsage {
    pub id: String,
    pub cache_type: String,
    pub description: String,
    pub in_use: bool,
    pub shared: bool,
    pub size: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub usage_count: u64,
}
