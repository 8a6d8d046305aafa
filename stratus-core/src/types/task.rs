//! Task specification domain types.

use crate::types::ImageReference;
use serde::{Deserialize, Serialize};

/// Network protocol for a port mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Udp => write!(f, "udp"),
        }
    }
}

/// Port mapping (host:container).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    /// Host port
    pub host_port: u16,

    /// Container port
    pub container_port: u16,

    /// Protocol (tcp, udp)
    pub protocol: Protocol,
}

/// Log configuration for one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfiguration {
    /// Prefix of the log stream this container writes to
    pub stream_prefix: String,
}

/// One process definition inside a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDefinition {
    /// Container name
    pub name: String,

    /// Image to run
    pub image: ImageReference,

    /// Whether the task fails when this container exits
    pub essential: bool,

    /// Entry point override (empty = image default)
    #[serde(default)]
    pub entry_point: Vec<String>,

    /// Memory reservation ceiling in MiB, if any
    #[serde(default)]
    pub memory_reservation_mib: Option<u32>,

    /// Port mappings
    pub port_mappings: Vec<PortMapping>,

    /// Log configuration
    pub log_config: LogConfiguration,
}

/// CPU/memory shape plus the containers sharing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpecification {
    /// CPU units allocated to the task
    pub cpu_units: u32,

    /// Memory allocated to the task in MiB
    pub memory_mib: u32,

    /// Container definitions owned by this task
    pub containers: Vec<ContainerDefinition>,

    /// Policy names granted to the task's execution identity
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Whether a CPU/memory pair is a recognized task size.
///
/// Sizes follow the provider's combination table: each CPU tier admits a fixed
/// set of memory values in 1 GiB steps (plus the small 512 MiB shape on the
/// 256-unit tier).
pub fn valid_task_size(cpu_units: u32, memory_mib: u32) -> bool {
    let giga_steps =
        |lo: u32, hi: u32| memory_mib >= lo && memory_mib <= hi && memory_mib % 1024 == 0;
    match cpu_units {
        256 => matches!(memory_mib, 512 | 1024 | 2048),
        512 => giga_steps(1024, 4096),
        1024 => giga_steps(2048, 8192),
        2048 => giga_steps(4096, 16384),
        4096 => giga_steps(8192, 30720),
        _ => false,
    }
}
