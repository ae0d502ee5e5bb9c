// ABOUTME: Container engine client over the Docker-compatible HTTP API.
// ABOUTME: Socket-backed and in-memory engines behind capability traits.

mod detection;
mod error;
mod fixture;
pub mod mapping;
mod socket;
pub mod traits;
mod types;
pub mod wire;

pub use detection::{
    DOCKER_SOCKET, DetectionError, candidate_sockets, default_socket_path, detect_from,
    detect_local,
};
pub use error::{EngineError, EngineErrorKind};
pub use fixture::FixtureEngine;
pub use socket::SocketEngine;
pub use traits::{ContainerOps, Engine, ImageOps, NetworkOps, SystemOps};
pub use types::{EngineInfo, EngineKind};
