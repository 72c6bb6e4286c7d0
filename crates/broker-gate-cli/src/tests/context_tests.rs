// crates/broker-gate-cli/src/tests/context_tests.rs
// ============================================================================
// Module: Command Context Tests
// Description: Tests for get/run dispatch over a recording client.
// Purpose: Pin path dispatch, addressing, and overload execution calls.
// Dependencies: broker-gate-core, serde_json, tokio
// ============================================================================

//! ## Overview
//! Each test executes one command line through [`CommandContext`] and asserts
//! the exact sequence of backend calls it produced.

use std::sync::Arc;

use broker_gate_core::AccessClient;
use broker_gate_core::AttributeRequest;
use broker_gate_core::ComponentKind;
use broker_gate_core::Filter;
use broker_gate_core::OperationArgument;
use broker_gate_core::OperationMap;
use broker_gate_core::OperationSchema;
use broker_gate_core::OperationSignature;
use broker_gate_core::ParameterDescriptor;
use serde_json::json;

use crate::context::CommandContext;
use crate::context::STATUS_FAILED;
use crate::context::STATUS_OK;
use crate::tests::support::Call;
use crate::tests::support::RecordingClient;

/// Builds a context without an endpoint over the given recording client.
fn context(client: &Arc<RecordingClient>) -> CommandContext {
    CommandContext::new(Arc::clone(client) as Arc<dyn AccessClient>, None)
}

/// Converts string literals into owned command arguments.
fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(ToString::to_string).collect()
}

/// One single-overload operation map with a lone string parameter.
fn single_string_operation(name: &str, param: &str) -> OperationMap {
    let schema = OperationSchema {
        args: vec![ParameterDescriptor {
            name: param.to_string(),
            type_tag: "java.lang.String".to_string(),
            desc: String::new(),
        }],
        ret: "java.lang.String".to_string(),
        desc: String::new(),
    };
    OperationMap::from([(name.to_string(), vec![schema])])
}

/// Verifies a gateway-targeted broker attribute read.
#[tokio::test]
async fn broker_attributes_are_read_via_gateway_target() {
    let client = Arc::new(RecordingClient::new());
    let status =
        context(&client).process_command(&argv(&["get", "@broker0/", "-a", "Status"])).await;

    assert_eq!(status, STATUS_OK);
    assert_eq!(
        client.calls(),
        vec![Call::ReadAttributes {
            kind: ComponentKind::Broker,
            request: AttributeRequest {
                name: None,
                address: None,
                routing_type: None,
                attrs: Filter::Names(vec!["Status".to_string()]),
            },
            target: Some("broker0".to_string()),
        }]
    );
}

/// Verifies the schema fetch, overload resolution, and invoke sequence.
#[tokio::test]
async fn run_resolves_the_unique_overload_and_invokes() {
    let client = Arc::new(
        RecordingClient::new().with_operations(single_string_operation("listAddresses", "filter")),
    );
    let status =
        context(&client).process_command(&argv(&["run", "@broker0/", "listAddresses(a)"])).await;

    assert_eq!(status, STATUS_OK);
    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        Call::ReadOperations {
            kind: ComponentKind::Broker,
            request: AttributeRequest::default(),
            names: Filter::Names(vec!["listAddresses".to_string()]),
            target: Some("broker0".to_string()),
        }
    );
    assert_eq!(
        calls[1],
        Call::Invoke {
            kind: ComponentKind::Broker,
            name: None,
            signature: OperationSignature {
                name: "listAddresses".to_string(),
                args: vec![OperationArgument {
                    type_tag: "java.lang.String".to_string(),
                    value: "a".to_string(),
                }],
            },
            target: Some("broker0".to_string()),
        }
    );
}

/// Verifies an empty schema map stops the run before invoking.
#[tokio::test]
async fn run_reports_an_unknown_operation() {
    let client = Arc::new(RecordingClient::new());
    let status =
        context(&client).process_command(&argv(&["run", "@broker0/", "noSuchOp()"])).await;

    assert_eq!(status, STATUS_FAILED);
    assert!(!client.calls().iter().any(|call| matches!(call, Call::Invoke { .. })));
}

/// Verifies attribute flags without a component name are rejected.
#[tokio::test]
async fn attribute_flags_require_a_component_name() {
    let client = Arc::new(RecordingClient::new());
    let status = context(&client).process_command(&argv(&["get", "/queues", "-a", "X"])).await;

    assert_eq!(status, STATUS_FAILED);
    assert!(client.calls().is_empty());
}

/// Verifies the wildcard type rejects attribute flags.
#[tokio::test]
async fn attribute_flags_are_rejected_for_the_wildcard_type() {
    let client = Arc::new(RecordingClient::new());
    let status = context(&client).process_command(&argv(&["get", "/*", "-a", "X"])).await;

    assert_eq!(status, STATUS_FAILED);
    assert!(client.calls().is_empty());
}

/// Verifies a bare first segment is discarded, not routed.
#[tokio::test]
async fn bare_first_segment_is_not_an_endpoint_source() {
    let client = Arc::new(RecordingClient::new());
    let status = context(&client).process_command(&argv(&["get", "broker0/"])).await;

    assert_eq!(status, STATUS_OK);
    assert_eq!(
        client.calls(),
        vec![Call::ReadBroker {
            target: None,
        }]
    );
}

/// Verifies a single quoted argument is split into command tokens.
#[tokio::test]
async fn quoted_command_lines_are_split_into_tokens() {
    let client = Arc::new(RecordingClient::new());
    let status = context(&client).process_command(&["get /queues".to_string()]).await;

    assert_eq!(status, STATUS_OK);
    assert_eq!(
        client.calls(),
        vec![Call::ReadComponents {
            kind: ComponentKind::Queue,
            target: None,
        }]
    );
}

/// Verifies unknown commands fail locally.
#[tokio::test]
async fn unknown_commands_fail_without_backend_calls() {
    let client = Arc::new(RecordingClient::new());
    let status = context(&client).process_command(&argv(&["status"])).await;

    assert_eq!(status, STATUS_FAILED);
    assert!(client.calls().is_empty());
}

/// Verifies typed paths need a component name to run on.
#[tokio::test]
async fn run_requires_a_component_name_for_typed_paths() {
    let client = Arc::new(RecordingClient::new());
    let status = context(&client).process_command(&argv(&["run", "/queues", "purge()"])).await;

    assert_eq!(status, STATUS_FAILED);
    assert!(client.calls().is_empty());
}

/// Verifies invocation parsing failures stop the command early.
#[tokio::test]
async fn malformed_invocations_fail_before_any_fetch() {
    let client = Arc::new(RecordingClient::new());
    let status = context(&client).process_command(&argv(&["run", "/", "listAddresses("])).await;

    assert_eq!(status, STATUS_FAILED);
    assert!(client.calls().is_empty());
}

/// Verifies queue reads resolve address and routing type first.
#[tokio::test]
async fn queue_attributes_resolve_addressing_from_the_listing() {
    let listing = json!([{
        "name": "orders",
        "address": { "name": "orders" },
        "routing-type": "anycast",
    }]);
    let client = Arc::new(RecordingClient::new().with_components(listing));
    let status = context(&client)
        .process_command(&argv(&["get", "/queues", "orders", "-a", "MessageCount"]))
        .await;

    assert_eq!(status, STATUS_OK);
    assert_eq!(
        client.calls(),
        vec![
            Call::ReadComponents {
                kind: ComponentKind::Queue,
                target: None,
            },
            Call::ReadAttributes {
                kind: ComponentKind::Queue,
                request: AttributeRequest {
                    name: Some("orders".to_string()),
                    address: Some("orders".to_string()),
                    routing_type: Some("anycast".to_string()),
                    attrs: Filter::Names(vec!["MessageCount".to_string()]),
                },
                target: None,
            },
        ]
    );
}

/// Verifies a named get without flags reads the component listing.
#[tokio::test]
async fn named_component_gets_read_the_listing() {
    let listing = json!([{ "name": "orders" }, { "name": "returns" }]);
    let client = Arc::new(RecordingClient::new().with_components(listing));
    let status = context(&client).process_command(&argv(&["get", "/queues", "orders"])).await;

    assert_eq!(status, STATUS_OK);
    assert_eq!(
        client.calls(),
        vec![Call::ReadComponents {
            kind: ComponentKind::Queue,
            target: None,
        }]
    );
}

/// Verifies repeated gets issue identical backend reads.
#[tokio::test]
async fn repeated_gets_issue_identical_reads() {
    let client = Arc::new(RecordingClient::new().with_components(json!([{ "name": "orders" }])));
    let context = context(&client);

    assert_eq!(context.process_command(&argv(&["get", "/queues"])).await, STATUS_OK);
    assert_eq!(context.process_command(&argv(&["get", "/queues"])).await, STATUS_OK);

    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

/// Verifies runs of spaces inside an argument literal reach the invoke call.
#[tokio::test]
async fn argument_literals_keep_embedded_spaces() {
    let listing = json!([{
        "name": "orders",
        "address": { "name": "orders" },
        "routing-type": "anycast",
    }]);
    let client = Arc::new(
        RecordingClient::new()
            .with_components(listing)
            .with_operations(single_string_operation("purge", "filter")),
    );
    let status = context(&client)
        .process_command(&["run /queues orders purge(a  b)".to_string()])
        .await;

    assert_eq!(status, STATUS_OK);
    let calls = client.calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(
        &calls[2],
        Call::Invoke {
            signature,
            ..
        } if signature.args == vec![OperationArgument {
            type_tag: "java.lang.String".to_string(),
            value: "a  b".to_string(),
        }]
    ));
}

/// Verifies an unmatched queue name stops the run pipeline.
#[tokio::test]
async fn run_on_an_unknown_queue_fails_before_invoking() {
    let client = Arc::new(
        RecordingClient::new().with_operations(single_string_operation("purge", "filter")),
    );
    let status =
        context(&client).process_command(&argv(&["run", "/queues", "ghost", "purge(a)"])).await;

    assert_eq!(status, STATUS_FAILED);
    assert_eq!(
        client.calls(),
        vec![Call::ReadComponents {
            kind: ComponentKind::Queue,
            target: None,
        }]
    );
}

/// Verifies named components pass their name to the invoke call.
#[tokio::test]
async fn named_component_invocations_carry_the_component_name() {
    let client = Arc::new(
        RecordingClient::new().with_operations(single_string_operation("stop", "mode")),
    );
    let status =
        context(&client).process_command(&argv(&["run", "/acceptors", "artemis", "stop(x)"])).await;

    assert_eq!(status, STATUS_OK);
    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(
        &calls[1],
        Call::Invoke {
            kind: ComponentKind::Acceptor,
            name: Some(name),
            ..
        } if name == "artemis"
    ));
}
