// ABOUTME: Local engine socket detection.
// ABOUTME: Checks Podman sockets first, then Docker Desktop and Docker.

use super::types::{EngineInfo, EngineKind};
use std::path::PathBuf;

/// Error during engine detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container engine socket found (checked {0} locations)")]
    NoEngineFound(usize),
}

pub const DOCKER_SOCKET: &str = "/var/run/docker.sock";
const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";

/// Detect a container engine on this machine.
///
/// Detection order:
/// 1. Rootless Podman socket (`/run/user/$UID/podman/podman.sock`)
/// 2. Rootful Podman socket (`/run/podman/podman.sock`)
/// 3. Docker Desktop socket (`~/.docker/run/docker.sock`)
/// 4. Docker socket (`/var/run/docker.sock`)
pub fn detect_local() -> Result<EngineInfo, DetectionError> {
    detect_from(&candidate_sockets())
}

/// First candidate whose socket file exists.
pub fn detect_from(candidates: &[EngineInfo]) -> Result<EngineInfo, DetectionError> {
    candidates
        .iter()
        .find(|candidate| candidate.socket_path.exists())
        .cloned()
        .ok_or(DetectionError::NoEngineFound(candidates.len()))
}

/// Well-known socket locations in detection order.
pub fn candidate_sockets() -> Vec<EngineInfo> {
    let mut candidates = Vec::new();

    if let Some(uid) = get_uid() {
        candidates.push(EngineInfo {
            kind: EngineKind::Podman,
            socket_path: PathBuf::from(format!("/run/user/{}/podman/podman.sock", uid)),
        });
    }

    candidates.push(EngineInfo {
        kind: EngineKind::Podman,
        socket_path: PathBuf::from(ROOTFUL_PODMAN),
    });

    if let Some(home) = dirs::home_dir() {
        candidates.push(EngineInfo {
            kind: EngineKind::Docker,
            socket_path: home.join(".docker/run/docker.sock"),
        });
    }

    candidates.push(EngineInfo {
        kind: EngineKind::Docker,
        socket_path: PathBuf::from(DOCKER_SOCKET),
    });

    candidates
}

/// Default socket for an explicitly chosen engine.
pub fn default_socket_path(kind: EngineKind) -> PathBuf {
    match kind {
        EngineKind::Docker => PathBuf::from(DOCKER_SOCKET),
        EngineKind::Podman => get_uid()
            .map(|uid| PathBuf::from(format!("/run/user/{}/podman/podman.sock", uid)))
            .filter(|path| path.exists())
            .unwrap_or_else(|| PathBuf::from(ROOTFUL_PODMAN)),
    }
}

fn get_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        // Shells rarely export UID; fall back to /proc.
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}
