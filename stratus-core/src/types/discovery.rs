//! Service discovery domain types.

use serde::{Deserialize, Serialize};

/// DNS record type for a discovery record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DnsRecordType {
    /// Dual A/AAAA registration
    #[serde(rename = "A_AAAA")]
    AAndAaaa,
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DnsRecordType::AAndAaaa => write!(f, "A_AAAA"),
        }
    }
}

/// Private DNS zone for internal service lookup, scoped to a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryNamespace {
    /// Domain name (e.g., "api.example.io")
    pub domain: String,
}

/// Named entry inside a namespace pointing at a service's entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryRecord {
    /// Record name
    pub name: String,

    /// DNS record type
    pub record_type: DnsRecordType,

    /// Record TTL in seconds
    pub ttl_seconds: u32,
}
