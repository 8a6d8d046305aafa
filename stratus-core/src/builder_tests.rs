//! End-to-end scenario tests for the stack builder.

use crate::builder::StackBuilder;
use crate::config::StackConfig;
use crate::error::StackError;
use crate::graph::{Resource, ResourceGraph};
use crate::types::{Protocol, TaskSpecification};

fn base_config() -> StackConfig {
    StackConfig {
        stack_name: "api".to_string(),
        region: "ap-northeast-1".to_string(),
        cidr_block: "10.0.0.0/16".to_string(),
        image_uri: Some("123.dkr.ecr.ap-northeast-1.amazonaws.com/app:latest".to_string()),
        task_cpu_units: 256,
        task_memory_mib: 1024,
        container_port: 8080,
        ..Default::default()
    }
}

fn task_of(graph: &ResourceGraph) -> &TaskSpecification {
    graph
        .nodes()
        .iter()
        .find_map(|n| match &n.resource {
            Resource::TaskSpecification(t) => Some(t),
            _ => None,
        })
        .expect("graph has a task specification")
}

fn count_type(graph: &ResourceGraph, type_name: &str) -> usize {
    graph.nodes().iter().filter(|n| n.resource.type_name() == type_name).count()
}

#[test]
fn test_full_scenario_with_tracing_sidecar() {
    let config = StackConfig { tracing_sidecar: true, ..base_config() };
    let graph = StackBuilder::new(config).unwrap().build().unwrap();

    assert_eq!(count_type(&graph, "network"), 1);
    assert_eq!(count_type(&graph, "cluster"), 1);
    assert_eq!(count_type(&graph, "task_specification"), 1);
    assert_eq!(count_type(&graph, "service"), 1);
    assert_eq!(count_type(&graph, "load_balancer"), 1);
    assert_eq!(count_type(&graph, "discovery_namespace"), 0);

    let task = task_of(&graph);
    assert_eq!(task.containers.len(), 2);

    let app = &task.containers[0];
    assert!(app.essential);
    assert_eq!(app.port_mappings.len(), 1);
    assert_eq!(app.port_mappings[0].container_port, 8080);
    assert_eq!(app.port_mappings[0].protocol, Protocol::Tcp);
    assert_eq!(app.log_config.stream_prefix, "api");

    let agent = &task.containers[1];
    assert!(agent.essential);
    assert_eq!(agent.image.coordinate(), "amazon/aws-xray-daemon");
    assert_eq!(agent.port_mappings[0].host_port, 2000);
    assert_eq!(agent.port_mappings[0].protocol, Protocol::Udp);
    assert_eq!(agent.memory_reservation_mib, Some(256));
    assert_eq!(agent.entry_point, vec!["/usr/bin/xray", "-b", "0.0.0.0:2000", "-o"]);

    assert_eq!(task.permissions, vec!["AWSXRayDaemonWriteAccess".to_string()]);
}

#[test]
fn test_sidecar_ports_never_overlap_with_app() {
    // The agent binds UDP 2000; an app on TCP 2000 must still pass the
    // host-port/protocol collision check.
    let config =
        StackConfig { tracing_sidecar: true, container_port: 2000, ..base_config() };
    let graph = StackBuilder::new(config).unwrap().build().unwrap();

    let task = task_of(&graph);
    assert_eq!(task.containers.len(), 2);
    graph.validate().unwrap();
}

#[test]
fn test_bare_scenario_has_single_container_and_no_discovery() {
    let graph = StackBuilder::new(base_config()).unwrap().build().unwrap();

    assert_eq!(task_of(&graph).containers.len(), 1);
    assert_eq!(count_type(&graph, "discovery_namespace"), 0);
    assert_eq!(count_type(&graph, "discovery_record"), 0);
}

#[test]
fn test_private_service_has_no_load_balancer() {
    let config = StackConfig { public_load_balancer: false, ..base_config() };
    let graph = StackBuilder::new(config).unwrap().build().unwrap();

    assert_eq!(count_type(&graph, "load_balancer"), 0);
    assert_eq!(count_type(&graph, "service"), 1);
}

#[test]
fn test_service_discovery_wiring() {
    let config = StackConfig {
        service_discovery: true,
        discovery_domain: Some("api.example.io".to_string()),
        ..base_config()
    };
    let graph = StackBuilder::new(config).unwrap().build().unwrap();

    assert_eq!(count_type(&graph, "discovery_namespace"), 1);
    assert_eq!(count_type(&graph, "discovery_record"), 1);

    let record_id = graph
        .nodes()
        .iter()
        .find(|n| matches!(n.resource, Resource::DiscoveryRecord(_)))
        .map(|n| n.id.clone())
        .unwrap();
    let deps: Vec<String> =
        graph.depends_on(&record_id).iter().map(|d| d.to_string()).collect();
    assert!(deps.contains(&"api-namespace".to_string()));
    assert!(deps.contains(&"api-load-balancer".to_string()));

    let record = graph
        .nodes()
        .iter()
        .find_map(|n| match &n.resource {
            Resource::DiscoveryRecord(r) => Some(r),
            _ => None,
        })
        .unwrap();
    assert_eq!(record.ttl_seconds, 30);
    assert_eq!(record.record_type.to_string(), "A_AAAA");
}

#[test]
fn test_discovery_requires_public_load_balancer() {
    let config = StackConfig {
        service_discovery: true,
        public_load_balancer: false,
        discovery_domain: Some("api.example.io".to_string()),
        ..base_config()
    };
    let err = StackBuilder::new(config).unwrap_err();
    assert!(matches!(err, StackError::DiscoveryWithoutLoadBalancer));
    assert!(err.is_configuration());
}

#[test]
fn test_ambiguous_image_source_produces_no_graph() {
    let config = StackConfig {
        ecr_arn: Some("arn:aws:ecr:ap-northeast-1:123:repository/app".to_string()),
        ..base_config()
    };
    let err = StackBuilder::new(config).unwrap_err();
    assert!(matches!(err, StackError::AmbiguousImageSource));
}

#[test]
fn test_unrecognized_task_size_produces_no_graph() {
    let config = StackConfig { task_cpu_units: 256, task_memory_mib: 8192, ..base_config() };
    let err = StackBuilder::new(config).unwrap_err();
    assert!(matches!(err, StackError::InvalidTaskSize { .. }));
}

#[test]
fn test_idempotent_construction() {
    let make = || {
        StackBuilder::new(StackConfig {
            tracing_sidecar: true,
            service_discovery: true,
            discovery_domain: Some("api.example.io".to_string()),
            ..base_config()
        })
        .unwrap()
        .build()
        .unwrap()
    };

    let first = make();
    let second = make();
    assert_eq!(first, second);
}

#[test]
fn test_construction_order_is_leaves_first() {
    let config = StackConfig {
        tracing_sidecar: true,
        service_discovery: true,
        discovery_domain: Some("api.example.io".to_string()),
        ..base_config()
    };
    let graph = StackBuilder::new(config).unwrap().build().unwrap();

    let order: Vec<&str> =
        graph.nodes().iter().map(|n| n.resource.type_name()).collect();
    assert_eq!(
        order,
        vec![
            "network",
            "cluster",
            "task_specification",
            "load_balancer",
            "service",
            "discovery_namespace",
            "discovery_record",
        ]
    );

    // Every edge points backwards to an already-constructed node.
    for edge in graph.edges() {
        let from_pos = graph.nodes().iter().position(|n| n.id == edge.from).unwrap();
        let to_pos = graph.nodes().iter().position(|n| n.id == edge.to).unwrap();
        assert!(to_pos < from_pos, "edge {} -> {} points forward", edge.from, edge.to);
    }
}
