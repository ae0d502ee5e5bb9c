// ABOUTME: Sealed trait pattern for engine capability traits.
// ABOUTME: Only the socket and fixture engines implement them.

/// Sealed trait to prevent external implementations.
///
/// New operations can be added to the capability traits without breaking
/// downstream code, since nothing outside this crate implements them.
pub trait Sealed {}
