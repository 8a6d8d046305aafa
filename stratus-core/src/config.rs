//! Stack configuration.
//!
//! The whole configuration surface for one stack. Validation is eager and
//! exhaustive: [`StackConfig::validate`] is called before any graph node is
//! built, so a bad value never reaches construction.

use crate::defaults;
use crate::error::{Result, StackError};
use crate::types::network::Network;
use crate::types::valid_task_size;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for one stack build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Stack name; prefixes logical ids and the primary log stream.
    pub stack_name: String,

    /// Target deployment region.
    pub region: String,

    /// Network address range.
    pub cidr_block: String,

    /// Repository ARN (repository-lookup image form).
    pub ecr_arn: Option<String>,

    /// Tag used with `ecr_arn`; defaults to "latest".
    pub image_tag: Option<String>,

    /// Direct registry URI (direct-pull image form).
    pub image_uri: Option<String>,

    /// Desired replica count for the service.
    pub desired_count: u32,

    /// CPU units allocated to the task.
    pub task_cpu_units: u32,

    /// Memory allocated to the task in MiB.
    pub task_memory_mib: u32,

    /// Application port exposed by the primary container.
    pub container_port: u16,

    /// Whether to expose the service through a public load balancer.
    pub public_load_balancer: bool,

    /// Whether to attach the tracing agent sidecar.
    pub tracing_sidecar: bool,

    /// Whether to register the service in a private DNS namespace.
    pub service_discovery: bool,

    /// Private DNS zone name; required when `service_discovery` is set.
    pub discovery_domain: Option<String>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stack_name: String::new(),
            region: String::new(),
            cidr_block: defaults::DEFAULT_CIDR_BLOCK.to_string(),
            ecr_arn: None,
            image_tag: None,
            image_uri: None,
            desired_count: 1,
            task_cpu_units: 256,
            task_memory_mib: 1024,
            container_port: 0,
            public_load_balancer: true,
            tracing_sidecar: false,
            service_discovery: false,
            discovery_domain: None,
        }
    }
}

impl StackConfig {
    /// Load a stack configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StackError::ConfigRead {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| StackError::ConfigParse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Validate the whole configuration.
    ///
    /// Checks run in declaration order and stop at the first violation; all of
    /// them fire before any graph node exists.
    pub fn validate(&self) -> Result<()> {
        if self.stack_name.trim().is_empty() {
            return Err(StackError::MissingParameter { name: "stack_name" });
        }
        if self.region.trim().is_empty() {
            return Err(StackError::MissingParameter { name: "region" });
        }

        // Full network construction is repeated at build time; running it here
        // keeps CIDR problems in the eager-validation phase.
        Network::from_cidr(&self.cidr_block)?;

        match (&self.ecr_arn, &self.image_uri) {
            (Some(_), Some(_)) => return Err(StackError::AmbiguousImageSource),
            (None, None) => return Err(StackError::MissingImageSource),
            (Some(arn), None) if arn.trim().is_empty() => {
                return Err(StackError::EmptyRegistryCoordinate)
            }
            (None, Some(uri)) if uri.trim().is_empty() => {
                return Err(StackError::EmptyRegistryCoordinate)
            }
            _ => {}
        }

        if self.desired_count == 0 {
            return Err(StackError::InvalidReplicaCount { count: self.desired_count });
        }
        if !valid_task_size(self.task_cpu_units, self.task_memory_mib) {
            return Err(StackError::InvalidTaskSize {
                cpu_units: self.task_cpu_units,
                memory_mib: self.task_memory_mib,
            });
        }
        if self.container_port == 0 {
            return Err(StackError::InvalidPort { port: self.container_port });
        }

        if self.service_discovery {
            if !self.public_load_balancer {
                return Err(StackError::DiscoveryWithoutLoadBalancer);
            }
            match &self.discovery_domain {
                Some(domain) if !domain.trim().is_empty() => {}
                _ => return Err(StackError::MissingDiscoveryDomain),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> StackConfig {
        StackConfig {
            stack_name: "api".to_string(),
            region: "ap-northeast-1".to_string(),
            image_uri: Some("123.dkr.ecr.ap-northeast-1.amazonaws.com/app:latest".to_string()),
            container_port: 8080,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        valid_config().validate().unwrap();
    }

    #[test]
    fn test_missing_stack_name() {
        let config = StackConfig { stack_name: String::new(), ..valid_config() };
        assert!(matches!(
            config.validate().unwrap_err(),
            StackError::MissingParameter { name: "stack_name" }
        ));
    }

    #[test]
    fn test_missing_region() {
        let config = StackConfig { region: "  ".to_string(), ..valid_config() };
        assert!(matches!(
            config.validate().unwrap_err(),
            StackError::MissingParameter { name: "region" }
        ));
    }

    #[test]
    fn test_both_image_sources_rejected() {
        let config = StackConfig {
            ecr_arn: Some("arn:aws:ecr:ap-northeast-1:123:repository/app".to_string()),
            ..valid_config()
        };
        assert!(matches!(config.validate().unwrap_err(), StackError::AmbiguousImageSource));
    }

    #[test]
    fn test_no_image_source_rejected() {
        let config = StackConfig { image_uri: None, ..valid_config() };
        assert!(matches!(config.validate().unwrap_err(), StackError::MissingImageSource));
    }

    #[test]
    fn test_empty_coordinate_rejected() {
        let config = StackConfig { image_uri: Some("  ".to_string()), ..valid_config() };
        assert!(matches!(config.validate().unwrap_err(), StackError::EmptyRegistryCoordinate));
    }

    #[test]
    fn test_unrecognized_task_size_rejected() {
        let config = StackConfig { task_cpu_units: 256, task_memory_mib: 4096, ..valid_config() };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, StackError::InvalidTaskSize { cpu_units: 256, memory_mib: 4096 }));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_zero_port_rejected() {
        let config = StackConfig { container_port: 0, ..valid_config() };
        assert!(matches!(config.validate().unwrap_err(), StackError::InvalidPort { port: 0 }));
    }

    #[test]
    fn test_zero_replicas_rejected() {
        let config = StackConfig { desired_count: 0, ..valid_config() };
        assert!(matches!(
            config.validate().unwrap_err(),
            StackError::InvalidReplicaCount { count: 0 }
        ));
    }

    #[test]
    fn test_discovery_without_load_balancer_rejected() {
        let config = StackConfig {
            service_discovery: true,
            public_load_balancer: false,
            discovery_domain: Some("api.example.io".to_string()),
            ..valid_config()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            StackError::DiscoveryWithoutLoadBalancer
        ));
    }

    #[test]
    fn test_discovery_without_domain_rejected() {
        let config = StackConfig { service_discovery: true, ..valid_config() };
        assert!(matches!(config.validate().unwrap_err(), StackError::MissingDiscoveryDomain));
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stack.json");
        std::fs::write(&path, serde_json::to_string(&valid_config()).unwrap()).unwrap();

        let loaded = StackConfig::load(&path).unwrap();
        loaded.validate().unwrap();
        assert_eq!(loaded.stack_name, "api");
        assert_eq!(loaded.cidr_block, defaults::DEFAULT_CIDR_BLOCK);
    }

    #[test]
    fn test_load_missing_file() {
        let err = StackConfig::load(Path::new("/nonexistent/stack.json")).unwrap_err();
        assert!(matches!(err, StackError::ConfigRead { .. }));
    }

    #[test]
    fn test_defaults_applied_when_fields_omitted() {
        let config: StackConfig = serde_json::from_str(
            r#"{"stack_name": "api", "region": "us-east-1", "image_uri": "registry.example.com/app", "container_port": 8080}"#,
        )
        .unwrap();
        assert_eq!(config.cidr_block, "10.0.0.0/16");
        assert_eq!(config.desired_count, 1);
        assert_eq!(config.task_cpu_units, 256);
        assert_eq!(config.task_memory_mib, 1024);
        assert!(config.public_load_balancer);
        assert!(!config.tracing_sidecar);
        assert!(!config.service_discovery);
    }
}
