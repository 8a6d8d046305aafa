//! Core domain types for stratus.

pub mod discovery;
pub mod image;
pub mod network;
pub mod service;
pub mod task;

// Re-exports
pub use discovery::{DiscoveryNamespace, DiscoveryRecord, DnsRecordType};
pub use image::ImageReference;
pub use network::{Network, Subnet, SubnetKind};
pub use service::{Cluster, LoadBalancer, Service};
pub use task::{
    valid_task_size, ContainerDefinition, LogConfiguration, PortMapping, Protocol,
    TaskSpecification,
};
