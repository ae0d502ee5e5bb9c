// ABOUTME: Configuration for berth from config.yml, flags, and environment.
// ABOUTME: Resolves the engine socket path and request timeout.

use crate::engine::{self, EngineKind};
use crate::error::{Error, Result};
use crate::http::DEFAULT_TIMEOUT;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_DIR: &str = "berth";
pub const CONFIG_FILENAME: &str = "config.yml";

/// Socket override, highest priority after the `--socket` flag.
pub const SOCKET_ENV: &str = "BERTH_SOCKET";
/// Honored when it names a `unix://` endpoint.
pub const DOCKER_HOST_ENV: &str = "DOCKER_HOST";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub socket: Option<PathBuf>,

    #[serde(default)]
    pub engine: Option<EngineKind>,

    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            socket: None,
            engine: None,
            timeout: default_timeout(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// `$XDG_CONFIG_HOME/berth/config.yml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
    }

    /// Load an explicit config file, which must exist, or the default one if present.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::ConfigNotFound(path.to_path_buf()));
            }
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Resolve the engine socket. The first source that names one wins:
    /// flag, `BERTH_SOCKET`, `DOCKER_HOST`, config `socket`, config `engine`,
    /// local detection, then `/var/run/docker.sock`.
    pub fn socket_path(&self, flag: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(path.to_path_buf());
        }

        if let Some(path) = non_empty_env(SOCKET_ENV) {
            return Ok(PathBuf::from(path));
        }

        if let Some(host) = non_empty_env(DOCKER_HOST_ENV) {
            return parse_docker_host(&host);
        }

        if let Some(path) = &self.socket {
            return Ok(path.clone());
        }

        if let Some(kind) = self.engine {
            return Ok(engine::default_socket_path(kind));
        }

        match engine::detect_local() {
            Ok(info) => {
                tracing::debug!(
                    engine = %info.kind,
                    socket = %info.socket_path.display(),
                    "detected engine"
                );
                Ok(info.socket_path)
            }
            Err(e) => {
                tracing::debug!(error = %e, "falling back to default docker socket");
                Ok(PathBuf::from(engine::DOCKER_SOCKET))
            }
        }
    }

    pub fn timeout(&self, flag: Option<Duration>) -> Duration {
        flag.unwrap_or(self.timeout)
    }
}

/// Accepts `unix:///path/to.sock`; any other scheme is a remote endpoint.
pub fn parse_docker_host(host: &str) -> Result<PathBuf> {
    match host.strip_prefix("unix://") {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Err(Error::UnsupportedEndpoint(host.to_string())),
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn parses_all_fields() {
        let config = Config::from_yaml(
            "socket: /run/podman/podman.sock\nengine: podman\ntimeout: 500ms\n",
        )
        .unwrap();
        assert_eq!(config.socket, Some(PathBuf::from("/run/podman/podman.sock")));
        assert_eq!(config.engine, Some(EngineKind::Podman));
        assert_eq!(config.timeout, Duration::from_millis(500));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Config::from_yaml("sockett: /tmp/x.sock\n").is_err());
    }

    #[test]
    fn docker_host_schemes() {
        assert_eq!(
            parse_docker_host("unix:///var/run/docker.sock").unwrap(),
            PathBuf::from("/var/run/docker.sock")
        );
        assert!(matches!(
            parse_docker_host("tcp://10.0.0.5:2376"),
            Err(Error::UnsupportedEndpoint(_))
        ));
        assert!(parse_docker_host("unix://").is_err());
    }

    #[test]
    fn timeout_flag_wins() {
        let config = Config::default();
        assert_eq!(config.timeout(None), Duration::from_secs(3));
        assert_eq!(
            config.timeout(Some(Duration::from_secs(10))),
            Duration::from_secs(10)
        );
    }
}
