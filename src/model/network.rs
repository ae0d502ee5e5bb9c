// ABOUTME: Network record with IPAM configuration and attached containers.

use crate::types::NetworkId;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkRecord {
    pub id: NetworkId,
    pub name: String,
    /// Parsed creation time; `None` when `created_raw` is not a timestamp.
    pub created: Option<DateTime<FixedOffset>>,
    pub created_raw: String,
    pub scope: String,
    pub driver: String,
    pub enable_ipv4: Option<bool>,
    pub enable_ipv6: Option<bool>,
    pub ipam: Ipam,
    pub internal: bool,
    pub attachable: bool,
    pub ingress: bool,
    /// Network this one takes its configuration from.
    pub config_from: Option<String>,
    pub config_only: bool,
    /// Sorted by name.
    pub containers: Vec<AttachedContainer>,
    pub options: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ipam {
    pub driver: String,
    pub options: BTreeMap<String, String>,
    pub config: Vec<IpamConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpamConfig {
    /// Position in the engine's config list.
    pub index: usize,
    pub subnet: Option<String>,
    pub gateway: Option<String>,
    pub ip_range: Option<String>,
    pub aux_addresses: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachedContainer {
    pub id: String,
    pub name: String,
    pub endpoint_id: String,
    pub mac_address: String,
    pub ipv4_address: String,
    pub ipv6_address: String,
}
