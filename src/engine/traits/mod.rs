// ABOUTME: Composable capability traits for container engines.
// ABOUTME: Defines ImageOps, ContainerOps, NetworkOps, SystemOps, and Engine.

mod container;
mod image;
mod network;
pub(crate) mod sealed;
mod system;

pub use container::ContainerOps;
pub use image::ImageOps;
pub use network::NetworkOps;
pub use system::SystemOps;

/// Every capability at once. Implemented automatically.
pub trait Engine: ImageOps + ContainerOps + NetworkOps + SystemOps {}

impl<T> Engine for T where T: ImageOps + ContainerOps + NetworkOps + SystemOps {}
