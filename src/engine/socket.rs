// ABOUTME: Socket-backed engine client speaking the engine's HTTP API.
// ABOUTME: Builds request paths, checks status, decodes and normalizes JSON.

use super::error::{DecodeSnafu, EngineError, HttpSnafu, RequestFailedSnafu};
use super::mapping;
use super::traits::sealed::Sealed;
use super::traits::{ContainerOps, ImageOps, NetworkOps, SystemOps};
use super::types::EngineInfo;
use super::wire;
use crate::http::{HttpClient, HttpResponse, Request, Transport, UnixTransport};
use crate::model::{ContainerRecord, DiskUsageSnapshot, ImageRecord, NetworkRecord};
use crate::types::{ContainerId, ImageId};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use urlencoding::encode;

/// Engine client that opens one socket connection per operation.
///
/// Holds only immutable configuration, so it can be shared freely between
/// tasks; concurrent calls never share a connection.
#[derive(Debug, Clone)]
pub struct SocketEngine<T = UnixTransport> {
    http: HttpClient<T>,
}

impl SocketEngine<UnixTransport> {
    pub fn new(socket_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            http: HttpClient::unix(socket_path, timeout),
        }
    }

    /// Connect to a detected engine.
    pub fn connect(info: &EngineInfo, timeout: Duration) -> Self {
        tracing::debug!(engine = %info.kind, socket = %info.socket_path.display(), "using engine");
        Self::new(info.socket_path.clone(), timeout)
    }

    pub fn socket_path(&self) -> &Path {
        self.http.transport().path()
    }
}

impl<T: Transport> SocketEngine<T> {
    pub fn with_transport(transport: T, timeout: Duration) -> Self {
        Self {
            http: HttpClient::new(transport, timeout),
        }
    }

    pub fn transport(&self) -> &T {
        self.http.transport()
    }

    pub fn timeout(&self) -> Duration {
        self.http.timeout()
    }

    /// Send a request and reject non-2xx statuses.
    async fn call(&self, request: Request) -> Result<HttpResponse, EngineError> {
        let response = self.http.send(&request).await.context(HttpSnafu)?;

        if response.is_success() {
            return Ok(response);
        }

        let message = response
            .body_text()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", response.status));

        tracing::warn!(
            status = response.status,
            method = %request.method,
            path = %request.path,
            "engine rejected request"
        );

        RequestFailedSnafu {
            status: response.status,
            message,
        }
        .fail()
    }

    async fn get_json<W: DeserializeOwned>(
        &self,
        path: &str,
        what: &'static str,
    ) -> Result<W, EngineError> {
        let response = self.call(Request::get(path)).await?;
        serde_json::from_slice(&response.body).context(DecodeSnafu { what })
    }
}

impl<T: Transport> Sealed for SocketEngine<T> {}

#[async_trait]
impl<T: Transport> ImageOps for SocketEngine<T> {
    async fn list_images(&self) -> Result<Vec<ImageRecord>, EngineError> {
        let images: Vec<wire::ImageSummary> = self.get_json("/images/json", "image list").await?;
        Ok(images
            .into_iter()
            .filter_map(mapping::image_record)
            .collect())
    }

    async fn remove_image(&self, id: &ImageId) -> Result<(), EngineError> {
        let path = format!("/images/{}?force=1", encode(id.as_str()));
        self.call(Request::delete(path)).await?;
        Ok(())
    }
}

#[async_trait]
impl<T: Transport> ContainerOps for SocketEngine<T> {
    async fn list_containers(&self) -> Result<Vec<ContainerRecord>, EngineError> {
        let containers: Vec<wire::ContainerSummary> = self
            .get_json("/containers/json?all=1", "container list")
            .await?;
        Ok(containers
            .into_iter()
            .map(mapping::container_record)
            .collect())
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), EngineError> {
        let path = format!("/containers/{}/start", encode(id.as_str()));
        self.call(Request::post(path)).await?;
        Ok(())
    }

    async fn stop_container(&self, id: &ContainerId) -> Result<(), EngineError> {
        let path = format!("/containers/{}/stop", encode(id.as_str()));
        self.call(Request::post(path)).await?;
        Ok(())
    }

    async fn remove_container(&self, id: &ContainerId) -> Result<(), EngineError> {
        let path = format!("/containers/{}?force=1", encode(id.as_str()));
        self.call(Request::delete(path)).await?;
        Ok(())
    }
}

#[async_trait]
impl<T: Transport> NetworkOps for SocketEngine<T> {
    async fn list_networks(&self) -> Result<Vec<NetworkRecord>, EngineError> {
        let networks: Vec<wire::Network> = self.get_json("/networks", "network list").await?;
        Ok(networks
            .into_iter()
            .map(mapping::network_record)
            .collect())
    }
}

#[async_trait]
impl<T: Transport> SystemOps for SocketEngine<T> {
    async fn disk_usage(&self) -> Result<DiskUsageSnapshot, EngineError> {
        let df: wire::SystemDataUsage = self.get_json("/system/df", "disk usage").await?;
        Ok(mapping::disk_usage(df))
    }

    async fn ping(&self) -> Result<(), EngineError> {
        self.call(Request::get("/_ping")).await?;
        Ok(())
    }
}
