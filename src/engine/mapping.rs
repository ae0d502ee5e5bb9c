// ABOUTME: Normalization from engine JSON shapes to domain records.
// ABOUTME: Name splitting, port formatting, timestamps, disk usage summaries.

use super::wire;
use crate::model::{
    AttachedContainer, BuildCacheUsage, ContainerRecord, ContainerUsage, DiskUsageSnapshot,
    ImageRecord, ImageUsage, Ipam, IpamConfig, NONE_SENTINEL, NetworkRecord, UsageSummary,
    VolumeUsage,
};
use crate::types::{ContainerId, ImageId, NetworkId};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Images
// =============================================================================

/// Map one image entry; `None` for entries with no usable tag or digest.
pub fn image_record(summary: wire::ImageSummary) -> Option<ImageRecord> {
    let (repository, tag) = summary
        .repo_tags
        .iter()
        .chain(summary.repo_digests.iter())
        .map(|name| split_reference(name))
        .find(|(repository, _)| repository != NONE_SENTINEL)?;

    Some(ImageRecord {
        id: ImageId::new(summary.id),
        repository,
        tag,
        created: unix_time(summary.created),
        size: non_negative(summary.size),
        in_use: summary.containers > 0,
    })
}

/// Split `repo@digest` or `repo:tag` into its two halves.
///
/// A colon before the last `/` belongs to a registry host:port and is not
/// a tag separator. Missing halves become `<none>`.
pub fn split_reference(name: &str) -> (String, String) {
    if let Some((repository, digest)) = name.split_once('@') {
        return (or_none(repository), or_none(digest));
    }

    let name_start = name.rfind('/').map_or(0, |i| i + 1);
    match name[name_start..].rfind(':') {
        Some(i) => {
            let split = name_start + i;
            (or_none(&name[..split]), or_none(&name[split + 1..]))
        }
        None => (or_none(name), NONE_SENTINEL.to_string()),
    }
}

fn or_none(part: &str) -> String {
    if part.is_empty() {
        NONE_SENTINEL.to_string()
    } else {
        part.to_string()
    }
}

// =============================================================================
// Containers
// =============================================================================

pub fn container_record(summary: wire::ContainerSummary) -> ContainerRecord {
    ContainerRecord {
        ports: format_ports(&summary.ports),
        name: display_name(&summary.names),
        id: ContainerId::new(summary.id),
        image: summary.image,
        command: summary.command,
        created: unix_time(summary.created),
        status: summary.status,
        state: summary.state,
    }
}

/// `ip:public->private/type` for published ports, `private/type` otherwise,
/// joined with `, `; `-` when there are none.
pub fn format_ports(ports: &[wire::Port]) -> String {
    if ports.is_empty() {
        return "-".to_string();
    }

    ports
        .iter()
        .map(|port| match (port.public_port, port.ip.as_deref()) {
            (Some(public), Some(ip)) if !ip.is_empty() => {
                format!("{}:{}->{}/{}", ip, public, port.private_port, port.kind)
            }
            (Some(public), _) => format!("{}->{}/{}", public, port.private_port, port.kind),
            (None, _) => format!("{}/{}", port.private_port, port.kind),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// First engine-provided name without its leading slash, or `-`.
pub fn display_name(names: &[String]) -> String {
    names
        .first()
        .map(|name| name.strip_prefix('/').unwrap_or(name).to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "-".to_string())
}

// =============================================================================
// Networks
// =============================================================================

pub fn network_record(network: wire::Network) -> NetworkRecord {
    let mut containers: Vec<AttachedContainer> = network
        .containers
        .into_iter()
        .map(|(id, endpoint)| AttachedContainer {
            id,
            name: endpoint.name,
            endpoint_id: endpoint.endpoint_id,
            mac_address: endpoint.mac_address,
            ipv4_address: endpoint.ipv4_address,
            ipv6_address: endpoint.ipv6_address,
        })
        .collect();
    // Id breaks ties so the order is stable across refreshes.
    containers.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    let config = network
        .ipam
        .config
        .into_iter()
        .enumerate()
        .map(|(index, pool)| IpamConfig {
            index,
            subnet: pool.subnet,
            gateway: pool.gateway,
            ip_range: pool.ip_range,
            aux_addresses: sorted(pool.aux_addresses),
        })
        .collect();

    NetworkRecord {
        id: NetworkId::new(network.id),
        name: network.name,
        created: parse_created(&network.created),
        created_raw: network.created,
        scope: network.scope,
        driver: network.driver,
        enable_ipv4: network.enable_ipv4,
        enable_ipv6: network.enable_ipv6,
        ipam: Ipam {
            driver: network.ipam.driver,
            options: sorted(network.ipam.options),
            config,
        },
        internal: network.internal,
        attachable: network.attachable,
        ingress: network.ingress,
        config_from: network
            .config_from
            .map(|reference| reference.network)
            .filter(|name| !name.is_empty()),
        config_only: network.config_only,
        containers,
        options: sorted(network.options),
        labels: sorted(network.labels),
    }
}

/// Parse an engine timestamp: RFC 3339 (with or without fractional
/// seconds), then the same layout without a zone, read as UTC.
pub fn parse_created(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

fn sorted(map: HashMap<String, String>) -> BTreeMap<String, String> {
    map.into_iter().collect()
}

// =============================================================================
// Disk usage
// =============================================================================

pub fn disk_usage(df: wire::SystemDataUsage) -> DiskUsageSnapshot {
    let layers_size = non_negative(df.layers_size);

    let images: Vec<ImageUsage> = df
        .images
        .into_iter()
        .map(|image| ImageUsage {
            created: unix_time(image.created),
            size: non_negative(image.size),
            shared_size: known(image.shared_size.unwrap_or(-1)),
            containers: non_negative(image.containers),
            repo_tags: image.repo_tags,
            id: image.id,
        })
        .collect();

    let containers: Vec<ContainerUsage> = df
        .containers
        .into_iter()
        .map(|container| ContainerUsage {
            id: container.id,
            names: container.names,
            image: container.image,
            state: container.state,
            created: unix_time(container.created),
            size_rw: non_negative(container.size_rw.unwrap_or(0)),
            size_root_fs: non_negative(container.size_root_fs.unwrap_or(0)),
        })
        .collect();

    let volumes: Vec<VolumeUsage> = df
        .volumes
        .into_iter()
        .map(|volume| VolumeUsage {
            size: volume.usage_data.as_ref().and_then(|usage| known(usage.size)),
            ref_count: volume
                .usage_data
                .as_ref()
                .and_then(|usage| known(usage.ref_count)),
            name: volume.name,
            driver: volume.driver,
            mountpoint: volume.mountpoint,
        })
        .collect();

    let build_cache: Vec<BuildCacheUsage> = df
        .build_cache
        .into_iter()
        .map(|entry| BuildCacheUsage {
            id: entry.id,
            cache_type: entry.kind,
            description: entry.description,
            in_use: entry.in_use,
            shared: entry.shared,
            size: non_negative(entry.size),
            created_at: entry.created_at.as_deref().and_then(parse_utc),
            last_used_at: entry.last_used_at.as_deref().and_then(parse_utc),
            usage_count: non_negative(entry.usage_count),
        })
        .collect();

    snapshot(layers_size, images, containers, volumes, build_cache)
}

/// Assemble a snapshot and derive the per-kind summaries.
pub fn snapshot(
    layers_size: u64,
    images: Vec<ImageUsage>,
    containers: Vec<ContainerUsage>,
    volumes: Vec<VolumeUsage>,
    build_cache: Vec<BuildCacheUsage>,
) -> DiskUsageSnapshot {
    DiskUsageSnapshot {
        image_summary: image_summary(layers_size, &images),
        container_summary: container_summary(&containers),
        volume_summary: volume_summary(&volumes),
        build_cache_summary: build_cache_summary(&build_cache),
        layers_size,
        images,
        containers,
        volumes,
        build_cache,
    }
}

/// Layers not exclusively held by an image with containers are reclaimable.
fn image_summary(layers_size: u64, images: &[ImageUsage]) -> UsageSummary {
    let active: Vec<&ImageUsage> = images.iter().filter(|i| i.containers > 0).collect();
    let used: u64 = active
        .iter()
        .filter_map(|image| {
            image
                .shared_size
                .map(|shared| image.size.saturating_sub(shared))
        })
        .sum();

    UsageSummary {
        total_size: layers_size,
        total_count: images.len(),
        active_count: active.len(),
        reclaimable: layers_size.saturating_sub(used),
    }
}

fn container_summary(containers: &[ContainerUsage]) -> UsageSummary {
    let is_active = |c: &&ContainerUsage| {
        matches!(c.state.as_str(), "running" | "paused" | "restarting")
    };

    UsageSummary {
        total_size: containers.iter().map(|c| c.size_rw).sum(),
        total_count: containers.len(),
        active_count: containers.iter().filter(is_active).count(),
        reclaimable: containers
            .iter()
            .filter(|c| !is_active(c))
            .map(|c| c.size_rw)
            .sum(),
    }
}

fn volume_summary(volumes: &[VolumeUsage]) -> UsageSummary {
    let in_use = |v: &&VolumeUsage| v.ref_count.unwrap_or(0) > 0;

    UsageSummary {
        total_size: volumes.iter().filter_map(|v| v.size).sum(),
        total_count: volumes.len(),
        active_count: volumes.iter().filter(in_use).count(),
        reclaimable: volumes
            .iter()
            .filter(|v| !in_use(v))
            .filter_map(|v| v.size)
            .sum(),
    }
}

fn build_cache_summary(entries: &[BuildCacheUsage]) -> UsageSummary {
    UsageSummary {
        total_size: entries.iter().map(|e| e.size).sum(),
        total_count: entries.len(),
        active_count: entries.iter().filter(|e| e.in_use).count(),
        reclaimable: entries
            .iter()
            .filter(|e| !e.in_use && !e.shared)
            .map(|e| e.size)
            .sum(),
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn unix_time(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    parse_created(raw).map(|t| t.with_timezone(&Utc))
}

fn non_negative(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Engine sizes and counts use -1 for "not computed".
fn known(value: i64) -> Option<u64> {
    u64::try_from(value).ok()
}
