// ABOUTME: Normalized records handed to front ends.
// ABOUTME: Immutable snapshots rebuilt wholesale on every refresh.

mod container;
mod disk_usage;
mod image;
mod network;

pub use container::ContainerRecord;
pub use disk_usage::{
    BuildCacheUsage, ContainerUsage, DiskUsageSnapshot, ImageUsage, UsageSummary, VolumeUsage,
};
pub use image::{ImageRecord, NONE_SENTINEL};
pub use network::{AttachedContainer, Ipam, IpamConfig, NetworkRecord};
