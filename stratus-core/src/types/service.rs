//! Cluster and service domain types.

use serde::{Deserialize, Serialize};

/// Compute pool that tasks run on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Cluster name
    pub name: String,
}

/// Scaled, continuously-reconciled instantiation of a task specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Service name
    pub name: String,

    /// Desired replica count
    pub desired_count: u32,

    /// Whether the service is reachable through a public load balancer
    pub public: bool,
}

/// Traffic entry point for a publicly exposed service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancer {
    /// Load balancer name
    pub name: String,
}
