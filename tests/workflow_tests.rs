//! Workflow model and validation tests

use uuid::Uuid;

use catalyst_schemas::workflow::{
    validate_workflow, ProcessProps, TriggerProps, WorkflowDefinition, WorkflowEdge, WorkflowNode,
    WorkflowNodeType,
};

fn valid_workflow() -> WorkflowDefinition {
    let trigger = WorkflowNode::Trigger {
        id: "node-1".to_string(),
        label: "Start".to_string(),
        properties: TriggerProps {
            event_type: "manual".to_string(),
        },
    };
    let process = WorkflowNode::Process {
        id: "node-2".to_string(),
        label: "Process".to_string(),
        properties: ProcessProps {
            description: Some("Do something".to_string()),
            handler_ref: None,
        },
    };
    let completion = WorkflowNode::Completion {
        id: "node-3".to_string(),
        label: "End".to_string(),
        properties: Default::default(),
    };

    WorkflowDefinition {
        id: Uuid::new_v4(),
        name: "Test Workflow".to_string(),
        description: None,
        use_case_id: Some("UC-TEST".to_string()),
        nodes: vec![trigger, process, completion],
        edges: vec![
            WorkflowEdge::new("node-1", "node-2"),
            WorkflowEdge::new("node-2", "node-3"),
        ],
    }
}

#[test]
fn test_workflow_instantiation() {
    let wf = valid_workflow();
    assert_eq!(wf.name, "Test Workflow");
    assert_eq!(wf.nodes.len(), 3);
    assert_eq!(wf.edges.len(), 2);
    assert_eq!(wf.nodes[0].node_type(), WorkflowNodeType::Trigger);
}

#[test]
fn test_validation_success() {
    assert!(validate_workflow(&valid_workflow()).is_empty());
}

#[test]
fn test_validation_missing_trigger() {
    let wf = WorkflowDefinition {
        id: Uuid::new_v4(),
        name: "Bad Workflow".to_string(),
        description: None,
        use_case_id: None,
        nodes: vec![WorkflowNode::Process {
            id: "node-1".to_string(),
            label: "Process".to_string(),
            properties: Default::default(),
        }],
        edges: vec![],
    };

    let errors = validate_workflow(&wf);
    assert!(errors.iter().any(|e| e.contains("must have at least one Trigger")));
}

#[test]
fn test_validation_island_detection() {
    // node-1 -> node-2; node-3 is disconnected
    let wf = WorkflowDefinition {
        id: Uuid::new_v4(),
        name: "Island Workflow".to_string(),
        description: None,
        use_case_id: None,
        nodes: vec![
            WorkflowNode::Trigger {
                id: "node-1".to_string(),
                label: "Start".to_string(),
                properties: TriggerProps {
                    event_type: "m".to_string(),
                },
            },
            WorkflowNode::Process {
                id: "node-2".to_string(),
                label: "P1".to_string(),
                properties: Default::default(),
            },
            WorkflowNode::Process {
                id: "node-3".to_string(),
                label: "P2".to_string(),
                properties: Default::default(),
            },
        ],
        edges: vec![WorkflowEdge::new("node-1", "node-2")],
    };

    let errors = validate_workflow(&wf);
    let island_error = errors
        .iter()
        .find(|e| e.contains("Unreachable nodes found"))
        .expect("expected island report");
    assert!(island_error.contains("node-3"));
}

#[test]
fn test_validation_cycle_detection() {
    // t -> a -> b -> a
    let wf = WorkflowDefinition {
        id: Uuid::new_v4(),
        name: "Cycle Workflow".to_string(),
        description: None,
        use_case_id: None,
        nodes: vec![
            WorkflowNode::Trigger {
                id: "t".to_string(),
                label: "T".to_string(),
                properties: TriggerProps {
                    event_type: "m".to_string(),
                },
            },
            WorkflowNode::Process {
                id: "a".to_string(),
                label: "A".to_string(),
                properties: Default::default(),
            },
            WorkflowNode::Process {
                id: "b".to_string(),
                label: "B".to_string(),
                properties: Default::default(),
            },
        ],
        edges: vec![
            WorkflowEdge::new("t", "a"),
            WorkflowEdge::new("a", "b"),
            WorkflowEdge::new("b", "a"),
        ],
    };

    let errors = validate_workflow(&wf);
    assert!(errors.iter().any(|e| e.contains("Cycle detected")));
}

#[test]
fn test_validation_broken_edge_references() {
    let wf = WorkflowDefinition {
        id: Uuid::new_v4(),
        name: "Broken Edge".to_string(),
        description: None,
        use_case_id: None,
        nodes: vec![WorkflowNode::Trigger {
            id: "t".to_string(),
            label: "T".to_string(),
            properties: TriggerProps {
                event_type: "m".to_string(),
            },
        }],
        edges: vec![WorkflowEdge::new("t", "x")],
    };

    let errors = validate_workflow(&wf);
    assert!(errors.iter().any(|e| e.contains("Edge target x does not exist")));
}

#[test]
fn test_polymorphic_deserialization() {
    let data = serde_json::json!({
        "id": "5f6d2c4e-9b0a-4c7d-8f3e-2a1b0c9d8e7f",
        "name": "Poly Test",
        "nodes": [
            {
                "id": "t1",
                "label": "T",
                "type": "TRIGGER",
                "properties": { "event_type": "api" }
            },
            {
                "id": "p1",
                "label": "P",
                "type": "PROCESS",
                "properties": { "description": "desc", "handler_ref": "ref" }
            }
        ],
        "edges": []
    });

    let wf: WorkflowDefinition = serde_json::from_value(data).unwrap();

    match &wf.nodes[0] {
        WorkflowNode::Trigger { properties, .. } => assert_eq!(properties.event_type, "api"),
        other => panic!("expected Trigger, got {other:?}"),
    }
    match &wf.nodes[1] {
        WorkflowNode::Process { properties, .. } => {
            assert_eq!(properties.handler_ref.as_deref(), Some("ref"));
        }
        other => panic!("expected Process, got {other:?}"),
    }
}

#[test]
fn test_condition_on_decision_edges() {
    let edge = WorkflowEdge::new("d", "approved").with_condition("amount < 1000");
    assert_eq!(edge.condition.as_deref(), Some("amount < 1000"));

    let json = serde_json::to_value(&edge).unwrap();
    assert_eq!(json["condition"], "amount < 1000");
}
