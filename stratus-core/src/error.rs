//! Error types for stratus.
//!
//! All errors use `thiserror` for ergonomic error handling and proper error chains.

use thiserror::Error;

/// Result type alias for stack construction operations.
pub type Result<T> = std::result::Result<T, StackError>;

/// Broad error category.
///
/// Configuration errors mean the input was bad and construction stopped before
/// any node referencing the bad value was built. Structural errors mean the
/// finished graph violated one of its own invariants, which is a builder
/// defect and non-recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Structural,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Structural => write!(f, "structural"),
        }
    }
}

/// Main error type for stack construction.
#[derive(Error, Debug)]
pub enum StackError {
    // Configuration errors
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: &'static str },

    #[error("Invalid CIDR block '{cidr}': {reason}")]
    InvalidCidr { cidr: String, reason: String },

    #[error("Container port must be between 1 and 65535, got {port}")]
    InvalidPort { port: u16 },

    #[error("{cpu_units} CPU units with {memory_mib} MiB memory is not a recognized task size")]
    InvalidTaskSize { cpu_units: u32, memory_mib: u32 },

    #[error("Desired replica count must be at least 1, got {count}")]
    InvalidReplicaCount { count: u32 },

    #[error("Ambiguous image source: both a repository ARN and a registry URI were supplied")]
    AmbiguousImageSource,

    #[error("Missing image source: supply either a repository ARN or a registry URI")]
    MissingImageSource,

    #[error("Registry coordinate is empty")]
    EmptyRegistryCoordinate,

    #[error("Service discovery requires a public load balancer to register against")]
    DiscoveryWithoutLoadBalancer,

    #[error("Service discovery is enabled but no discovery domain was supplied")]
    MissingDiscoveryDomain,

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // Structural errors
    #[error("Duplicate node id in graph: {id}")]
    DuplicateNode { id: String },

    #[error("Dangling reference: '{from}' points at unknown node '{to}'")]
    DanglingReference { from: String, to: String },

    #[error("Port conflict in task '{task}': host port {host_port}/{protocol} mapped twice")]
    PortConflict { task: String, host_port: u16, protocol: String },

    #[error("Task '{task}' has no essential container")]
    NoEssentialContainer { task: String },

    #[error("Failed to serialize template: {source}")]
    TemplateSerialize {
        #[source]
        source: serde_json::Error,
    },
}

impl StackError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StackError::MissingParameter { .. }
            | StackError::InvalidCidr { .. }
            | StackError::InvalidPort { .. }
            | StackError::InvalidTaskSize { .. }
            | StackError::InvalidReplicaCount { .. }
            | StackError::AmbiguousImageSource
            | StackError::MissingImageSource
            | StackError::EmptyRegistryCoordinate
            | StackError::DiscoveryWithoutLoadBalancer
            | StackError::MissingDiscoveryDomain
            | StackError::ConfigRead { .. }
            | StackError::ConfigParse { .. } => ErrorKind::Configuration,

            StackError::DuplicateNode { .. }
            | StackError::DanglingReference { .. }
            | StackError::PortConflict { .. }
            | StackError::NoEssentialContainer { .. }
            | StackError::TemplateSerialize { .. } => ErrorKind::Structural,
        }
    }

    /// True for bad-input errors.
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// True for graph invariant violations.
    pub fn is_structural(&self) -> bool {
        self.kind() == ErrorKind::Structural
    }
}
