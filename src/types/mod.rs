// ABOUTME: Type-safe identifiers shared by the engine client and its records.
// ABOUTME: Uses phantom types to prevent ID confusion at compile time.

mod id;

pub use id::{ContainerId, Id, ImageId, NetworkId};
