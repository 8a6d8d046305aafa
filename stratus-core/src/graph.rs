//! Desired-state resource graph.
//!
//! An append-only collection of typed resource nodes plus explicit dependency
//! edges. The external provisioning engine derives its execution plan from the
//! edge set; the graph itself never talks to a provider and is never mutated
//! after synthesis.

use crate::error::{Result, StackError};
use crate::types::{
    Cluster, DiscoveryNamespace, DiscoveryRecord, LoadBalancer, Network, Protocol, Service,
    TaskSpecification,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Logical identifier of a graph node.
///
/// Ids are derived from the stack name, so two builds from identical
/// configuration produce identical ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Typed payload of one graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties", rename_all = "snake_case")]
pub enum Resource {
    Network(Network),
    Cluster(Cluster),
    TaskSpecification(TaskSpecification),
    Service(Service),
    LoadBalancer(LoadBalancer),
    DiscoveryNamespace(DiscoveryNamespace),
    DiscoveryRecord(DiscoveryRecord),
}

impl Resource {
    /// Stable type tag, matching the serialized form.
    pub fn type_name(&self) -> &'static str {
        match self {
            Resource::Network(_) => "network",
            Resource::Cluster(_) => "cluster",
            Resource::TaskSpecification(_) => "task_specification",
            Resource::Service(_) => "service",
            Resource::LoadBalancer(_) => "load_balancer",
            Resource::DiscoveryNamespace(_) => "discovery_namespace",
            Resource::DiscoveryRecord(_) => "discovery_record",
        }
    }
}

/// One node: logical id plus resource payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    pub id: NodeId,
    pub resource: Resource,
}

/// Dependency edge: `from` must be created after `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

/// Desired-state graph for one stack.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceGraph {
    stack_name: String,
    region: String,
    nodes: Vec<ResourceNode>,
    edges: Vec<Edge>,
}

impl ResourceGraph {
    /// Create an empty graph for a stack targeting a region.
    pub fn new(stack_name: &str, region: &str) -> Self {
        Self {
            stack_name: stack_name.to_string(),
            region: region.to_string(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Nodes in construction order.
    pub fn nodes(&self) -> &[ResourceNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Append a node under the logical id `<stack>-<suffix>`.
    pub fn add_node(&mut self, suffix: &str, resource: Resource) -> Result<NodeId> {
        let id = NodeId(format!("{}-{}", self.stack_name, suffix));
        if self.nodes.iter().any(|n| n.id == id) {
            return Err(StackError::DuplicateNode { id: id.to_string() });
        }
        self.nodes.push(ResourceNode { id: id.clone(), resource });
        Ok(id)
    }

    /// Record that `from` depends on `to`. Both endpoints must already exist.
    pub fn add_edge(&mut self, from: &NodeId, to: &NodeId) -> Result<()> {
        for endpoint in [from, to] {
            if self.get(endpoint).is_none() {
                return Err(StackError::DanglingReference {
                    from: from.to_string(),
                    to: endpoint.to_string(),
                });
            }
        }
        self.edges.push(Edge { from: from.clone(), to: to.clone() });
        Ok(())
    }

    /// Look up a node's payload.
    pub fn get(&self, id: &NodeId) -> Option<&Resource> {
        self.nodes.iter().find(|n| &n.id == id).map(|n| &n.resource)
    }

    /// Mutable payload lookup, for attaching to an already-declared node.
    pub(crate) fn get_mut(&mut self, id: &NodeId) -> Option<&mut Resource> {
        self.nodes.iter_mut().find(|n| &n.id == id).map(|n| &mut n.resource)
    }

    /// Ids this node depends on, in insertion order.
    pub fn depends_on(&self, id: &NodeId) -> Vec<&NodeId> {
        self.edges.iter().filter(|e| &e.from == id).map(|e| &e.to).collect()
    }

    /// Structural invariant sweep over the finished graph.
    ///
    /// Violations indicate a builder defect, not bad input, and are
    /// non-recoverable.
    pub fn validate(&self) -> Result<()> {
        for node in &self.nodes {
            match &node.resource {
                Resource::TaskSpecification(task) => {
                    self.validate_task(&node.id, task)?;
                }
                Resource::Service(_) => {
                    self.require_dependency(&node.id, |r| matches!(r, Resource::Cluster(_)))?;
                    self.require_dependency(&node.id, |r| {
                        matches!(r, Resource::TaskSpecification(_))
                    })?;
                }
                Resource::DiscoveryRecord(_) => {
                    self.require_dependency(&node.id, |r| {
                        matches!(r, Resource::DiscoveryNamespace(_))
                    })?;
                    self.require_dependency(&node.id, |r| matches!(r, Resource::LoadBalancer(_)))?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn validate_task(&self, id: &NodeId, task: &TaskSpecification) -> Result<()> {
        if !task.containers.iter().any(|c| c.essential) {
            return Err(StackError::NoEssentialContainer { task: id.to_string() });
        }

        let mut seen: HashSet<(u16, Protocol)> = HashSet::new();
        for container in &task.containers {
            for mapping in &container.port_mappings {
                if !seen.insert((mapping.host_port, mapping.protocol)) {
                    return Err(StackError::PortConflict {
                        task: id.to_string(),
                        host_port: mapping.host_port,
                        protocol: mapping.protocol.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The node must have at least one dependency matching the predicate.
    fn require_dependency(
        &self,
        id: &NodeId,
        matches: impl Fn(&Resource) -> bool,
    ) -> Result<()> {
        let satisfied = self
            .depends_on(id)
            .iter()
            .filter_map(|dep| self.get(dep))
            .any(matches);
        if satisfied {
            Ok(())
        } else {
            Err(StackError::DanglingReference {
                from: id.to_string(),
                to: "required dependency".to_string(),
            })
        }
    }
}
