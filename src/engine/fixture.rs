// ABOUTME: In-memory engine serving canned records for previews and tests.
// ABOUTME: Mutations act on the held data and never touch a socket.

use super::error::EngineError;
use super::mapping;
use super::traits::sealed::Sealed;
use super::traits::{ContainerOps, ImageOps, NetworkOps, SystemOps};
use crate::model::{
    AttachedContainer, BuildCacheUsage, ContainerRecord, ContainerUsage, DiskUsageSnapshot,
    ImageRecord, ImageUsage, Ipam, IpamConfig, NetworkRecord, VolumeUsage,
};
use crate::types::{ContainerId, ImageId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct FixtureState {
    images: Vec<ImageRecord>,
    containers: Vec<ContainerRecord>,
    networks: Vec<NetworkRecord>,
    disk_usage: DiskUsageSnapshot,
}

/// Engine backed by records held in memory.
///
/// Unknown identifiers fail with a 404 and starting a running container
/// (or stopping a stopped one) fails with a 304, matching the engine.
#[derive(Debug)]
pub struct FixtureEngine {
    state: Mutex<FixtureState>,
}

impl FixtureEngine {
    pub fn new(
        images: Vec<ImageRecord>,
        containers: Vec<ContainerRecord>,
        networks: Vec<NetworkRecord>,
        disk_usage: DiskUsageSnapshot,
    ) -> Self {
        Self {
            state: Mutex::new(FixtureState {
                images,
                containers,
                networks,
                disk_usage,
            }),
        }
    }

    /// A small, realistic engine: two images, two containers, three networks.
    pub fn sample() -> Self {
        Self::new(
            sample_images(),
            sample_containers(),
            sample_networks(),
            sample_disk_usage(),
        )
    }

    fn set_running(&self, id: &ContainerId, running: bool) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        let container = state
            .containers
            .iter_mut()
            .find(|c| matches_container(c, id.as_str()))
            .ok_or_else(|| not_found("container", id.as_str()))?;

        if container.is_running() == running {
            return Err(EngineError::RequestFailed {
                status: 304,
                message: "HTTP 304".to_string(),
            });
        }

        if running {
            container.state = "running".to_string();
            container.status = "Up Less than a second".to_string();
        } else {
            container.state = "exited".to_string();
            container.status = "Exited (0) Less than a second ago".to_string();
        }
        tracing::debug!(
            container = %container.name,
            state = %container.state,
            "fixture state changed"
        );
        Ok(())
    }
}

impl Default for FixtureEngine {
    fn default() -> Self {
        Self::sample()
    }
}

impl Sealed for FixtureEngine {}

#[async_trait]
impl ImageOps for FixtureEngine {
    async fn list_images(&self) -> Result<Vec<ImageRecord>, EngineError> {
        Ok(self.state.lock().images.clone())
    }

    async fn remove_image(&self, id: &ImageId) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        let position = state
            .images
            .iter()
            .position(|image| matches_image(image, id.as_str()))
            .ok_or_else(|| not_found("image", id.as_str()))?;
        state.images.remove(position);
        Ok(())
    }
}

#[async_trait]
impl ContainerOps for FixtureEngine {
    async fn list_containers(&self) -> Result<Vec<ContainerRecord>, EngineError> {
        Ok(self.state.lock().containers.clone())
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), EngineError> {
        self.set_running(id, true)
    }

    async fn stop_container(&self, id: &ContainerId) -> Result<(), EngineError> {
        self.set_running(id, false)
    }

    async fn remove_container(&self, id: &ContainerId) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        let position = state
            .containers
            .iter()
            .position(|c| matches_container(c, id.as_str()))
            .ok_or_else(|| not_found("container", id.as_str()))?;
        state.containers.remove(position);
        Ok(())
    }
}

#[async_trait]
impl NetworkOps for FixtureEngine {
    async fn list_networks(&self) -> Result<Vec<NetworkRecord>, EngineError> {
        Ok(self.state.lock().networks.clone())
    }
}

#[async_trait]
impl SystemOps for FixtureEngine {
    async fn disk_usage(&self) -> Result<DiskUsageSnapshot, EngineError> {
        Ok(self.state.lock().disk_usage.clone())
    }

    async fn ping(&self) -> Result<(), EngineError> {
        Ok(())
    }
}

fn not_found(what: &str, id: &str) -> EngineError {
    EngineError::RequestFailed {
        status: 404,
        message: format!(r#"{{"message":"No such {}: {}"}}"#, what, id),
    }
}

/// Full id, id prefix (with or without `sha256:`), or `repo:tag`.
fn matches_image(image: &ImageRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let full = image.id.as_str();
    let bare = full.strip_prefix("sha256:").unwrap_or(full);
    full.starts_with(needle) || bare.starts_with(needle) || image.reference() == needle
}

/// Full id, id prefix, or name.
fn matches_container(container: &ContainerRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    container.id.as_str().starts_with(needle) || container.name == needle
}

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

// =============================================================================
// Sample data
// =============================================================================

const NGINX_ID: &str = "sha256:a8758716bb6aa4d90071160d27028fe4eaee7ce8166221a97d30440c8eac2be6";
const REDIS_ID: &str = "sha256:7614ae9453d1d87e740a2056257a6de7135c84037c367e1fffa92ae922784631";
const WEB_ID: &str = "3f4c1a9b2e7d8c6a5b4f3e2d1c0b9a8f7e6d5c4b3a291807f6e5d4c3b2a19080";
const CACHE_ID: &str = "9e8d7c6b5a4f3e2d1c0b9a8f7e6d5c4b3a2918070f6e5d4c3b2a190807f6e5d4";

fn sample_images() -> Vec<ImageRecord> {
    vec![
        ImageRecord {
            id: ImageId::new(NGINX_ID),
            repository: "nginx".to_string(),
            tag: "latest".to_string(),
            created: at(1_717_430_400),
            size: 187_694_648,
            in_use: true,
        },
        ImageRecord {
            id: ImageId::new(REDIS_ID),
            repository: "redis".to_string(),
            tag: "sha256:5a93f6b2e6a2b5a1c8f0c9a5d5f1e1a0b9c8d7e6f5a4b3c2d1e0f9a8b7c6d5e4"
                .to_string(),
            created: at(1_715_000_000),
            size: 116_843_210,
            in_use: false,
        },
    ]
}

fn sample_containers() -> Vec<ContainerRecord> {
    vec![
        ContainerRecord {
            id: ContainerId::new(WEB_ID),
            image: "nginx:latest".to_string(),
            command: "/docker-entrypoint.sh nginx -g 'daemon off;'".to_string(),
            created: at(1_717_500_000),
            status: "Up 2 hours".to_string(),
            state: "running".to_string(),
            ports: "0.0.0.0:8080->80/tcp".to_string(),
            name: "web".to_string(),
        },
        ContainerRecord {
            id: ContainerId::new(CACHE_ID),
            image: "redis".to_string(),
            command: "docker-entrypoint.sh redis-server".to_string(),
            created: at(1_717_400_000),
            status: "Exited (0) 3 days ago".to_string(),
            state: "exited".to_string(),
            ports: "-".to_string(),
            name: "cache".to_string(),
        },
    ]
}

fn sample_networks() -> Vec<NetworkRecord> {
    let network = |id: &str, name: &str, driver: &str| NetworkRecord {
        id: id.into(),
        name: name.to_string(),
        created: mapping::parse_created("2024-06-03T09:12:44.123456789Z"),
        created_raw: "2024-06-03T09:12:44.123456789Z".to_string(),
        scope: "local".to_string(),
        driver: driver.to_string(),
        enable_ipv4: Some(true),
        enable_ipv6: Some(false),
        ipam: Ipam {
            driver: "default".to_string(),
            ..Ipam::default()
        },
        internal: false,
        attachable: false,
        ingress: false,
        config_from: None,
        config_only: false,
        containers: Vec::new(),
        options: BTreeMap::new(),
        labels: BTreeMap::new(),
    };

    let mut bridge = network(
        "f2de39df4171b0dc801e8002d1d999b77256983dfc63041c0f34030aa3977566",
        "bridge",
        "bridge",
    );
    bridge.ipam.config.push(IpamConfig {
        index: 0,
        subnet: Some("172.17.0.0/16".to_string()),
        gateway: Some("172.17.0.1".to_string()),
        ip_range: None,
        aux_addresses: BTreeMap::new(),
    });
    bridge.containers.push(AttachedContainer {
        id: WEB_ID.to_string(),
        name: "web".to_string(),
        endpoint_id: "628cadb8bcb92de107b2a1e516cbffe463e321f548feb37697cce00ad694f21a"
            .to_string(),
        mac_address: "02:42:ac:11:00:02".to_string(),
        ipv4_address: "172.17.0.2/16".to_string(),
        ipv6_address: String::new(),
    });
    bridge.options.insert(
        "com.docker.network.bridge.default_bridge".to_string(),
        "true".to_string(),
    );

    vec![
        bridge,
        network(
            "e086a3893b05ab69242d3c44e49483a3bbbd3a26b46baa8f61ab797c1088d794",
            "host",
            "host",
        ),
        network(
            "c1d2b3a4958677f6e5d4c3b2a1908f7e6d5c4b3a29180706f5e4d3c2b1a09080",
            "none",
            "null",
        ),
    ]
}

fn sample_disk_usage() -> DiskUsageSnapshot {
    let images = vec![
        ImageUsage {
            id: NGINX_ID.to_string(),
            repo_tags: vec!["nginx:latest".to_string()],
            created: at(1_717_430_400),
            size: 187_694_648,
            shared_size: Some(0),
            containers: 1,
        },
        ImageUsage {
            id: REDIS_ID.to_string(),
            repo_tags: Vec::new(),
            created: at(1_715_000_000),
            size: 116_843_210,
            shared_size: Some(0),
            containers: 0,
        },
    ];

    let containers = vec![
        ContainerUsage {
            id: WEB_ID.to_string(),
            names: vec!["/web".to_string()],
            image: "nginx:latest".to_string(),
            state: "running".to_string(),
            created: at(1_717_500_000),
            size_rw: 1_093,
            size_root_fs: 187_695_741,
        },
        ContainerUsage {
            id: CACHE_ID.to_string(),
            names: vec!["/cache".to_string()],
            image: "redis".to_string(),
            state: "exited".to_string(),
            created: at(1_717_400_000),
            size_rw: 4_096,
            size_root_fs: 116_847_306,
        },
    ];

    let volumes = vec![VolumeUsage {
        name: "cache-data".to_string(),
        driver: "local".to_string(),
        mountpoint: "/var/lib/docker/volumes/cache-data/_data".to_string(),
        size: Some(52_428_800),
        ref_count: Some(1),
    }];

    let build_cache = vec![BuildCacheUsage {
        id: "hw53o5aio51xtltp5xjp8v7fx".to_string(),
        cache_type: "regular".to_string(),
        description: "mount / from exec /bin/sh -c apt-get update".to_string(),
        in_use: false,
        shared: false,
        size: 20_971_520,
        created_at: Some(at(1_717_000_000)),
        last_used_at: Some(at(1_717_300_000)),
        usage_count: 3,
    }];

    mapping::snapshot(304_537_858, images, containers, volumes, build_cache)
}
