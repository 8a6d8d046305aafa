//! Well-known constants for stack construction.
//!
//! Fixed values for resources whose shape is not configurable: the tracing
//! agent sidecar and the service-discovery record. Everything configurable
//! lives in [`crate::config::StackConfig`].

/// Default network CIDR block when none is configured.
pub const DEFAULT_CIDR_BLOCK: &str = "10.0.0.0/16";

/// Default image tag when a repository ARN is supplied without one.
pub const DEFAULT_IMAGE_TAG: &str = "latest";

// ============================================================================
// Tracing sidecar
// ============================================================================

/// Well-known tracing agent image.
pub const TRACING_AGENT_IMAGE: &str = "amazon/aws-xray-daemon";

/// UDP port the tracing agent listens on (host and container side).
pub const TRACING_AGENT_PORT: u16 = 2000;

/// Memory reservation ceiling for the tracing agent container.
pub const TRACING_AGENT_MEMORY_MIB: u32 = 256;

/// Entry point override for the tracing agent container.
pub const TRACING_AGENT_ENTRY_POINT: &[&str] = &["/usr/bin/xray", "-b", "0.0.0.0:2000", "-o"];

/// Log stream prefix for the tracing agent container.
pub const TRACING_LOG_PREFIX: &str = "x-ray";

/// Managed policy granting the task's execution identity permission to emit
/// trace data.
pub const TRACE_WRITE_POLICY: &str = "AWSXRayDaemonWriteAccess";

// ============================================================================
// Service discovery
// ============================================================================

/// TTL for discovery records, in seconds.
pub const DISCOVERY_RECORD_TTL_SECONDS: u32 = 30;
