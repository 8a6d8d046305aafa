//! Stack builder: configuration in, resource graph out.
//!
//! Single-pass construction in dependency order, leaves first: network,
//! cluster, image, task specification, service, then the optional sidecar and
//! service-discovery subtrees. Either the whole graph is produced or
//! construction fails before anything is handed to synthesis; no partial
//! graph ever escapes.

use crate::config::StackConfig;
use crate::defaults;
use crate::error::{Result, StackError};
use crate::graph::{NodeId, Resource, ResourceGraph};
use crate::types::{
    Cluster, ContainerDefinition, DiscoveryNamespace, DiscoveryRecord, DnsRecordType,
    ImageReference, LoadBalancer, LogConfiguration, Network, PortMapping, Protocol, Service,
    TaskSpecification,
};
use tracing::{info, instrument};

/// Builds the resource graph for one stack.
#[derive(Debug)]
pub struct StackBuilder {
    config: StackConfig,
    graph: ResourceGraph,
}

impl StackBuilder {
    /// Create a builder for the given configuration.
    ///
    /// The configuration is validated eagerly; a builder is never handed back
    /// for a configuration that fails validation.
    pub fn new(config: StackConfig) -> Result<Self> {
        config.validate()?;
        let graph = ResourceGraph::new(&config.stack_name, &config.region);
        Ok(Self { config, graph })
    }

    /// Run the full construction and hand back the finished graph.
    #[instrument(skip(self), fields(stack = %self.config.stack_name))]
    pub fn build(mut self) -> Result<ResourceGraph> {
        info!(region = %self.config.region, "Building resource graph");

        let network = self.build_network()?;
        let cluster = self.build_cluster(&network)?;
        let image = self.resolve_image()?;
        let task = self.build_task_specification(image)?;

        if self.config.tracing_sidecar {
            self.attach_tracing_sidecar(&task)?;
        }

        let (service, load_balancer) = self.build_service(&network, &cluster, &task)?;

        if self.config.service_discovery {
            self.build_service_discovery(&network, &service, load_balancer.as_ref())?;
        }

        self.graph.validate()?;
        info!(
            nodes = self.graph.nodes().len(),
            edges = self.graph.edges().len(),
            "Resource graph complete"
        );
        Ok(self.graph)
    }

    /// Declare the network and its subnets. Pure construction; fails only on
    /// malformed CIDR syntax.
    fn build_network(&mut self) -> Result<NodeId> {
        let network = Network::from_cidr(&self.config.cidr_block)?;
        info!(cidr = %self.config.cidr_block, "Declaring network");
        self.graph.add_node("network", Resource::Network(network))
    }

    fn build_cluster(&mut self, network: &NodeId) -> Result<NodeId> {
        let cluster = Cluster { name: format!("{}-cluster", self.config.stack_name) };
        info!(cluster = %cluster.name, "Declaring cluster");
        let id = self.graph.add_node("cluster", Resource::Cluster(cluster))?;
        self.graph.add_edge(&id, network)?;
        Ok(id)
    }

    /// Resolve the configured registry coordinate into an image reference.
    ///
    /// An ARN coordinate is a repository lookup by identity; a URI coordinate
    /// is a direct pull. Construction treats both the same; only the engine's
    /// pull authentication differs.
    fn resolve_image(&self) -> Result<ImageReference> {
        match (&self.config.ecr_arn, &self.config.image_uri) {
            (Some(arn), None) => Ok(ImageReference::EcrRepository {
                arn: arn.clone(),
                tag: self
                    .config
                    .image_tag
                    .clone()
                    .unwrap_or_else(|| defaults::DEFAULT_IMAGE_TAG.to_string()),
            }),
            (None, Some(uri)) => Ok(ImageReference::Registry { uri: uri.clone() }),
            (Some(_), Some(_)) => Err(StackError::AmbiguousImageSource),
            (None, None) => Err(StackError::MissingImageSource),
        }
    }

    /// Declare the task specification with its primary container.
    fn build_task_specification(&mut self, image: ImageReference) -> Result<NodeId> {
        info!(
            cpu = self.config.task_cpu_units,
            memory = self.config.task_memory_mib,
            port = self.config.container_port,
            image = %image,
            "Declaring task specification"
        );

        let app = ContainerDefinition {
            name: format!("{}-container", self.config.stack_name),
            image,
            essential: true,
            entry_point: vec![],
            memory_reservation_mib: None,
            port_mappings: vec![PortMapping {
                host_port: self.config.container_port,
                container_port: self.config.container_port,
                protocol: Protocol::Tcp,
            }],
            log_config: LogConfiguration { stream_prefix: self.config.stack_name.clone() },
        };

        let task = TaskSpecification {
            cpu_units: self.config.task_cpu_units,
            memory_mib: self.config.task_memory_mib,
            containers: vec![app],
            permissions: vec![],
        };

        self.graph.add_node("task", Resource::TaskSpecification(task))
    }

    /// Append the tracing agent container to an already-declared task and
    /// grant the task's execution identity trace write permission.
    fn attach_tracing_sidecar(&mut self, task: &NodeId) -> Result<()> {
        info!(image = defaults::TRACING_AGENT_IMAGE, "Attaching tracing sidecar");

        let agent = ContainerDefinition {
            name: "tracing-agent".to_string(),
            image: ImageReference::Registry { uri: defaults::TRACING_AGENT_IMAGE.to_string() },
            essential: true,
            entry_point: defaults::TRACING_AGENT_ENTRY_POINT
                .iter()
                .map(|s| s.to_string())
                .collect(),
            memory_reservation_mib: Some(defaults::TRACING_AGENT_MEMORY_MIB),
            port_mappings: vec![PortMapping {
                host_port: defaults::TRACING_AGENT_PORT,
                container_port: defaults::TRACING_AGENT_PORT,
                protocol: Protocol::Udp,
            }],
            log_config: LogConfiguration {
                stream_prefix: defaults::TRACING_LOG_PREFIX.to_string(),
            },
        };

        match self.graph.get_mut(task) {
            Some(Resource::TaskSpecification(spec)) => {
                spec.containers.push(agent);
                spec.permissions.push(defaults::TRACE_WRITE_POLICY.to_string());
                Ok(())
            }
            _ => Err(StackError::DanglingReference {
                from: "tracing-sidecar".to_string(),
                to: task.to_string(),
            }),
        }
    }

    /// Declare the service, wiring in a load balancer as its traffic entry
    /// point when public exposure is requested.
    fn build_service(
        &mut self,
        network: &NodeId,
        cluster: &NodeId,
        task: &NodeId,
    ) -> Result<(NodeId, Option<NodeId>)> {
        // The entry point is a leaf of the service, so it is declared first.
        let load_balancer = if self.config.public_load_balancer {
            let lb = LoadBalancer { name: format!("{}-alb", self.config.stack_name) };
            let lb_id = self.graph.add_node("load-balancer", Resource::LoadBalancer(lb))?;
            self.graph.add_edge(&lb_id, network)?;
            Some(lb_id)
        } else {
            None
        };

        let service = Service {
            name: format!("{}-service", self.config.stack_name),
            desired_count: self.config.desired_count,
            public: self.config.public_load_balancer,
        };
        info!(
            service = %service.name,
            replicas = service.desired_count,
            public = service.public,
            "Declaring service"
        );

        let service_id = self.graph.add_node("service", Resource::Service(service))?;
        self.graph.add_edge(&service_id, cluster)?;
        self.graph.add_edge(&service_id, task)?;
        if let Some(lb_id) = &load_balancer {
            self.graph.add_edge(&service_id, lb_id)?;
        }

        Ok((service_id, load_balancer))
    }

    /// Declare the discovery namespace and register a record against the
    /// service's load balancer.
    fn build_service_discovery(
        &mut self,
        network: &NodeId,
        service: &NodeId,
        load_balancer: Option<&NodeId>,
    ) -> Result<(NodeId, NodeId)> {
        // Discovery needs a registrable target. Config validation already
        // rules this out for user input; reaching it here is a builder defect
        // path reported the same way.
        let load_balancer = load_balancer.ok_or(StackError::DiscoveryWithoutLoadBalancer)?;
        let domain = self
            .config
            .discovery_domain
            .as_ref()
            .ok_or(StackError::MissingDiscoveryDomain)?
            .clone();

        info!(domain = %domain, "Declaring service discovery");

        let namespace = DiscoveryNamespace { domain };
        let namespace_id =
            self.graph.add_node("namespace", Resource::DiscoveryNamespace(namespace))?;
        self.graph.add_edge(&namespace_id, network)?;

        let record = DiscoveryRecord {
            name: format!("{}-service", self.config.stack_name),
            record_type: DnsRecordType::AAndAaaa,
            ttl_seconds: defaults::DISCOVERY_RECORD_TTL_SECONDS,
        };
        let record_id =
            self.graph.add_node("discovery-record", Resource::DiscoveryRecord(record))?;
        self.graph.add_edge(&record_id, &namespace_id)?;
        self.graph.add_edge(&record_id, load_balancer)?;
        self.graph.add_edge(&record_id, service)?;

        Ok((namespace_id, record_id))
    }
}
