// ABOUTME: Image record as listed by the engine.

use crate::types::ImageId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Placeholder the engine uses for a missing repository or tag.
pub const NONE_SENTINEL: &str = "<none>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub id: ImageId,
    pub repository: String,
    /// Tag, or digest (`sha256:...`) for digest-only references.
    pub tag: String,
    pub created: DateTime<Utc>,
    /// Size in bytes.
    pub size: u64,
    /// At least one container depends on this image.
    pub in_use: bool,
}

impl ImageRecord {
    /// No repository/tag and nothing using it.
    ///
    /// Socket listings already drop all-`<none>` entries, so this only
    /// fires for fixture or hand-built records.
    pub fn is_dangling(&self) -> bool {
        self.repository == NONE_SENTINEL && self.tag == NONE_SENTINEL && !self.in_use
    }

    /// `repository:tag`, or `repository@digest` for digest references.
    pub fn reference(&self) -> String {
        if self.tag.contains(':') {
            format!("{}@{}", self.repository, self.tag)
        } else {
            format!("{}:{}", self.repository, self.tag)
        }
    }
}
