//! Network domain types.

use crate::error::{Result, StackError};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Subnet tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubnetKind {
    Public,
    Private,
}

impl std::fmt::Display for SubnetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubnetKind::Public => write!(f, "public"),
            SubnetKind::Private => write!(f, "private"),
        }
    }
}

/// Subnet carved out of a network's address space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    /// Subnet CIDR (e.g., "10.0.0.0/24")
    pub cidr: String,

    /// Subnet tier
    pub kind: SubnetKind,
}

/// Isolated address space that every other resource attaches to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Network CIDR (e.g., "10.0.0.0/16")
    pub cidr: String,

    /// Subnets owned by this network
    pub subnets: Vec<Subnet>,
}

impl Network {
    /// Build a network from a CIDR block, carving one public and one private
    /// /24 subnet out of the front of its range.
    pub fn from_cidr(cidr: &str) -> Result<Self> {
        let (addr, prefix) = parse_cidr(cidr)?;
        if prefix > 23 {
            return Err(StackError::InvalidCidr {
                cidr: cidr.to_string(),
                reason: "prefix longer than /23 leaves no room for subnets".to_string(),
            });
        }

        let base = network_base(addr, prefix);
        let public = Ipv4Addr::from(base);
        let private = Ipv4Addr::from(base + 256);

        Ok(Self {
            cidr: cidr.to_string(),
            subnets: vec![
                Subnet { cidr: format!("{}/24", public), kind: SubnetKind::Public },
                Subnet { cidr: format!("{}/24", private), kind: SubnetKind::Private },
            ],
        })
    }
}

/// Parse and validate "A.B.C.D/PREFIX" CIDR syntax.
pub(crate) fn parse_cidr(cidr: &str) -> Result<(Ipv4Addr, u8)> {
    let (addr_str, prefix_str) = cidr.split_once('/').ok_or_else(|| StackError::InvalidCidr {
        cidr: cidr.to_string(),
        reason: "expected ADDRESS/PREFIX".to_string(),
    })?;

    let addr: Ipv4Addr = addr_str.parse().map_err(|_| StackError::InvalidCidr {
        cidr: cidr.to_string(),
        reason: format!("invalid IPv4 address '{}'", addr_str),
    })?;

    let prefix: u8 = prefix_str.parse().map_err(|_| StackError::InvalidCidr {
        cidr: cidr.to_string(),
        reason: format!("invalid prefix length '{}'", prefix_str),
    })?;

    if prefix > 32 {
        return Err(StackError::InvalidCidr {
            cidr: cidr.to_string(),
            reason: format!("prefix length {} exceeds 32", prefix),
        });
    }

    Ok((addr, prefix))
}

/// Network address of `addr` under a prefix mask.
fn network_base(addr: Ipv4Addr, prefix: u8) -> u32 {
    let host_bits = 32 - u64::from(prefix);
    let mask = (!((1u64 << host_bits) - 1)) as u32;
    u32::from(addr) & mask
}
