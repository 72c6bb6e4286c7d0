// crates/broker-gate-cli/src/tests/interactive_tests.rs
// ============================================================================
// Module: Interactive Session Tests
// Description: Tests for the endpoint registry and command routing.
// Purpose: Pin add/switch/list behavior and get/run delegation.
// Dependencies: broker-gate-core, tokio
// ============================================================================

//! ## Overview
//! Each test drives [`InteractiveCommandContext`] line by line and asserts
//! the prompt, the status, and the backend calls the session produced.

use std::sync::Arc;

use broker_gate_core::AccessClient;
use broker_gate_core::ComponentKind;
use broker_gate_core::EndpointListing;

use crate::interactive::InteractiveCommandContext;
use crate::tests::support::Call;
use crate::tests::support::RecordingClient;

/// Builds a session over the given recording client.
fn session(client: &Arc<RecordingClient>, user: Option<&str>) -> InteractiveCommandContext {
    InteractiveCommandContext::new(
        Arc::clone(client) as Arc<dyn AccessClient>,
        user.map(ToString::to_string),
    )
}

/// Verifies add authenticates, registers, and switches the session.
#[tokio::test]
async fn add_registers_authenticates_and_switches() {
    let client = Arc::new(RecordingClient::new());
    let mut interactive = session(&client, None);

    assert_eq!(interactive.prompt(), "> ");
    let status = interactive.process_single_command("add e1 http://localhost:8161").await;

    assert_eq!(status, 0);
    assert_eq!(interactive.prompt(), "e1> ");
    assert_eq!(
        client.calls(),
        vec![Call::Authenticate {
            broker_name: "e1".to_string(),
        }]
    );
}

/// Verifies a duplicate add fails without re-authenticating.
#[tokio::test]
async fn duplicate_names_are_rejected_without_a_second_login() {
    let client = Arc::new(RecordingClient::new());
    let mut interactive = session(&client, None);

    assert_eq!(interactive.process_single_command("add e1 http://localhost:8161").await, 0);
    assert_eq!(interactive.process_single_command("add e1 http://localhost:8162").await, 1);
    assert_eq!(client.calls().len(), 1);
}

/// Verifies switching to an unregistered name fails.
#[tokio::test]
async fn switching_to_an_unknown_endpoint_fails() {
    let client = Arc::new(RecordingClient::new());
    let mut interactive = session(&client, None);

    assert_eq!(interactive.process_single_command("switch nope").await, 1);
    assert_eq!(interactive.prompt(), "> ");
}

/// Verifies `@` switches route later commands via the gateway.
#[tokio::test]
async fn switching_to_a_gateway_endpoint_routes_through_the_gateway() {
    let client = Arc::new(RecordingClient::new());
    let mut interactive = session(&client, None);

    assert_eq!(interactive.process_single_command("switch @remote").await, 0);
    assert_eq!(interactive.prompt(), "@remote> ");

    assert_eq!(interactive.process_single_command("get /").await, 0);
    assert_eq!(
        client.calls(),
        vec![Call::ReadBroker {
            target: Some("remote".to_string()),
        }]
    );
}

/// Verifies local commands need at least one registered endpoint.
#[tokio::test]
async fn commands_need_an_endpoint_when_the_registry_is_empty() {
    let client = Arc::new(RecordingClient::new());
    let mut interactive = session(&client, None);

    assert_eq!(interactive.process_single_command("get /queues").await, 1);
    assert!(client.calls().is_empty());
}

/// Verifies path-named endpoints execute one-shot without switching.
#[tokio::test]
async fn commands_delegate_to_a_named_endpoint_without_switching() {
    let client = Arc::new(RecordingClient::new());
    let mut interactive = session(&client, None);

    assert_eq!(interactive.process_single_command("add e1 http://localhost:8161").await, 0);
    assert_eq!(interactive.process_single_command("add e2 http://localhost:8162").await, 0);
    assert_eq!(interactive.prompt(), "e2> ");

    assert_eq!(interactive.process_single_command("get e1/queues").await, 0);
    assert_eq!(interactive.prompt(), "e2> ");
    assert_eq!(
        client.calls(),
        vec![
            Call::Authenticate {
                broker_name: "e1".to_string(),
            },
            Call::Authenticate {
                broker_name: "e2".to_string(),
            },
            Call::ReadComponents {
                kind: ComponentKind::Queue,
                target: None,
            },
        ]
    );
}

/// Verifies switching back restores the originally registered endpoint.
#[tokio::test]
async fn switching_back_restores_the_registered_endpoint() {
    let client = Arc::new(RecordingClient::new());
    let mut interactive = session(&client, None);

    assert_eq!(interactive.process_single_command("add b0 http://localhost:8161").await, 0);
    assert_eq!(interactive.process_single_command("add b1 http://localhost:8162").await, 0);
    assert_eq!(interactive.prompt(), "b1> ");

    assert_eq!(interactive.process_single_command("switch b0").await, 0);
    assert_eq!(interactive.prompt(), "b0> ");

    assert_eq!(interactive.process_single_command("get /").await, 0);
    assert_eq!(
        client.calls().last(),
        Some(&Call::ReadBroker {
            target: None,
        })
    );
}

/// Verifies a path naming an unregistered endpoint fails.
#[tokio::test]
async fn commands_naming_an_unregistered_endpoint_fail() {
    let client = Arc::new(RecordingClient::new());
    let mut interactive = session(&client, None);

    assert_eq!(interactive.process_single_command("add e1 http://localhost:8161").await, 0);
    assert_eq!(interactive.process_single_command("get ghost/queues").await, 1);
    assert_eq!(client.calls().len(), 1);
}

/// Verifies list asks the gateway for its proxied endpoints.
#[tokio::test]
async fn list_queries_the_gateway_for_proxied_endpoints() {
    let client = Arc::new(RecordingClient::new().with_listings(vec![EndpointListing {
        name: "remote1".to_string(),
        url: "http://broker1:8161".to_string(),
    }]));
    let mut interactive = session(&client, None);

    assert_eq!(interactive.process_single_command("list").await, 0);
    assert_eq!(client.calls(), vec![Call::ListEndpoints]);
}

/// Verifies list lines keep registration order and place locals first.
#[tokio::test]
async fn list_lines_render_locals_in_order_then_proxied() {
    let client = Arc::new(RecordingClient::new());
    let mut interactive = session(&client, None);

    assert_eq!(interactive.process_single_command("add z0 http://localhost:8161").await, 0);
    assert_eq!(interactive.process_single_command("add a1 http://localhost:8162").await, 0);

    let lines = interactive.endpoint_lines(&[EndpointListing {
        name: "remote1".to_string(),
        url: "http://broker1:8161".to_string(),
    }]);
    assert_eq!(lines, vec![
        "z0(local): http://localhost:8161".to_string(),
        "a1(local): http://localhost:8162".to_string(),
        "@remote1: http://broker1:8161".to_string(),
    ]);
}

/// Verifies the prompt combines login identity and endpoint name.
#[tokio::test]
async fn prompt_reflects_the_login_identity() {
    let client = Arc::new(RecordingClient::new());
    let mut interactive = session(&client, Some("admin"));

    assert_eq!(interactive.prompt(), "admin> ");
    assert_eq!(interactive.process_single_command("add e1 http://localhost:8161").await, 0);
    assert_eq!(interactive.prompt(), "admin:e1> ");
}

/// Verifies unknown interactive commands fail locally.
#[tokio::test]
async fn unknown_interactive_commands_fail() {
    let client = Arc::new(RecordingClient::new());
    let mut interactive = session(&client, None);

    assert_eq!(interactive.process_single_command("frobnicate").await, 1);
    assert!(client.calls().is_empty());
}

/// Verifies blank input lines succeed without side effects.
#[tokio::test]
async fn blank_lines_are_ignored() {
    let client = Arc::new(RecordingClient::new());
    let mut interactive = session(&client, None);

    assert_eq!(interactive.process_single_command("   ").await, 0);
    assert!(client.calls().is_empty());
}
