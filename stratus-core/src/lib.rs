//! Stratus core library.
//!
//! Declarative deployment topology for a containerized API: a stack
//! configuration goes in, a desired-state resource graph comes out, and an
//! external provisioning engine turns the synthesized template into
//! create/update/delete operations. The core never talks to a cloud provider.

pub mod builder;
pub mod config;
pub mod defaults;
pub mod error;
pub mod graph;
pub mod synth;
pub mod types;

#[cfg(test)]
mod builder_tests;

// Re-export commonly used items
pub use builder::StackBuilder;
pub use config::StackConfig;
pub use error::{ErrorKind, Result, StackError};
pub use graph::{Edge, NodeId, Resource, ResourceGraph, ResourceNode};
pub use synth::{synthesize, Template, TemplateResource};
pub use types::{
    Cluster, ContainerDefinition, DiscoveryNamespace, DiscoveryRecord, DnsRecordType,
    ImageReference, LoadBalancer, LogConfiguration, Network, PortMapping, Protocol, Service,
    Subnet, SubnetKind, TaskSpecification,
};
