//! Integration tests for the network bridge between the TUI and the backend.
//!
//! Tests that `spawn_net` runs scoring requests on background tasks and that
//! the resulting `NetEvent`s, applied to an `App` in arrival order, leave the
//! store reflecting the most recently issued request.
//!
//! These tests validate:
//! - `spawn_net` returns working channel handles
//! - `NetCommand::Submit` produces a `NetEvent::Completed` with the same id
//! - Backend failures arrive as `Err` results, not dropped events
//! - A slow earlier request does not block or override a later one
//! - Shutdown stops the command handler

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::{Value, json};
use tokio::sync::mpsc;
use url::Url;

use taskpilot::app::{App, Command, Effect};
use taskpilot::net::{self, NetCommand, NetConfig, NetEvent};
use taskpilot::scoring::ScoringError;
use taskpilot_proto::api::Endpoint;
use taskpilot_proto::task::Task;

/// Backend that scores every task with its importance and sleeps for a
/// while when the first task is titled `slow`.
async fn start_backend() -> Url {
    async fn analyze(Json(body): Json<Value>) -> Json<Value> {
        let tasks = body.as_array().cloned().unwrap_or_default();
        if tasks.first().and_then(|t| t["title"].as_str()) == Some("slow") {
            tokio::time::sleep(Duration::from_millis(400)).await;
        }
        let scored = tasks
            .into_iter()
            .map(|mut t| {
                t["score"] = t.get("importance").cloned().unwrap_or(json!(0));
                t
            })
            .collect();
        Json(Value::Array(scored))
    }

    let router = Router::new()
        .route("/api/tasks/analyze/", post(analyze))
        .route(
            "/api/tasks/suggest/",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "scoring failed"})),
                )
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

fn spawn(url: Url) -> (mpsc::Sender<NetCommand>, mpsc::Receiver<NetEvent>) {
    let mut config = NetConfig::new(url);
    config.request_timeout = Some(Duration::from_secs(5));
    net::spawn_net(config).expect("spawn_net should succeed")
}

async fn next_event(rx: &mut mpsc::Receiver<NetEvent>) -> NetEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timeout waiting for net event")
        .expect("event channel closed unexpectedly")
}

/// Forward the app's submissions to the network task.
async fn send_effects(tx: &mpsc::Sender<NetCommand>, effects: Vec<Effect>) -> Vec<u64> {
    let mut ids = Vec::new();
    for effect in effects {
        if let Effect::Submit {
            request_id,
            endpoint,
            tasks,
        } = effect
        {
            ids.push(request_id);
            tx.send(NetCommand::Submit {
                request_id,
                endpoint,
                tasks,
            })
            .await
            .unwrap();
        }
    }
    ids
}

#[tokio::test]
async fn submit_produces_completed_event() {
    let url = start_backend().await;
    let (cmd_tx, mut evt_rx) = spawn(url);

    cmd_tx
        .send(NetCommand::Submit {
            request_id: 42,
            endpoint: Endpoint::Analyze,
            tasks: vec![Task::new("A").with_importance(9)],
        })
        .await
        .unwrap();

    let NetEvent::Completed {
        request_id,
        endpoint,
        result,
    } = next_event(&mut evt_rx).await;
    assert_eq!(request_id, 42);
    assert_eq!(endpoint, Endpoint::Analyze);
    let tasks = result.expect("analyze should succeed");
    assert_eq!(tasks[0].score, Some(9.0));
}

#[tokio::test]
async fn backend_failure_is_delivered_as_error() {
    let url = start_backend().await;
    let (cmd_tx, mut evt_rx) = spawn(url);

    cmd_tx
        .send(NetCommand::Submit {
            request_id: 1,
            endpoint: Endpoint::Suggest,
            tasks: vec![Task::new("A")],
        })
        .await
        .unwrap();

    let NetEvent::Completed { result, .. } = next_event(&mut evt_rx).await;
    assert_eq!(
        result,
        Err(ScoringError::Rejected {
            status: 500,
            message: "scoring failed".to_string(),
        })
    );
}

#[tokio::test]
async fn app_round_trip_through_backend() {
    let url = start_backend().await;
    let (cmd_tx, mut evt_rx) = spawn(url);

    let mut app = App::new();
    app.editor
        .set_text(r#"[{"title":"A","importance":3},{"title":"B","importance":8}]"#);
    let ids = send_effects(&cmd_tx, app.dispatch(Command::Analyze)).await;
    assert_eq!(ids.len(), 1);

    let NetEvent::Completed {
        request_id,
        endpoint,
        result,
    } = next_event(&mut evt_rx).await;
    app.apply_response(request_id, endpoint, result);

    let titles: Vec<&str> = app.cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["B", "A"]);
    assert!(app.editor.text().contains("\"score\": 8"));
    assert_eq!(app.pending_requests().count(), 0);
}

#[tokio::test]
async fn slow_earlier_request_does_not_override_later_one() {
    let url = start_backend().await;
    let (cmd_tx, mut evt_rx) = spawn(url);

    let mut app = App::new();
    app.editor.set_text(r#"[{"title":"slow","importance":1}]"#);
    let first = send_effects(&cmd_tx, app.dispatch(Command::Analyze)).await;
    app.editor.set_text(r#"[{"title":"fast","importance":2}]"#);
    let second = send_effects(&cmd_tx, app.dispatch(Command::Analyze)).await;

    // The fast request finishes first even though it was sent second.
    let NetEvent::Completed {
        request_id,
        endpoint,
        result,
    } = next_event(&mut evt_rx).await;
    assert_eq!(vec![request_id], second);
    app.apply_response(request_id, endpoint, result);
    assert_eq!(app.store.as_slice()[0].title, "fast");

    // The slow response arrives afterwards and is discarded.
    let NetEvent::Completed {
        request_id,
        endpoint,
        result,
    } = next_event(&mut evt_rx).await;
    assert_eq!(vec![request_id], first);
    let effects = app.apply_response(request_id, endpoint, result);
    assert!(effects.is_empty());

    assert_eq!(app.store.len(), 1);
    assert_eq!(app.store.as_slice()[0].title, "fast");
    assert_eq!(app.pending_requests().count(), 0);
}

#[tokio::test]
async fn unreachable_backend_reports_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let url = Url::parse(&format!("http://{addr}")).unwrap();

    let (cmd_tx, mut evt_rx) = spawn(url);
    cmd_tx
        .send(NetCommand::Submit {
            request_id: 7,
            endpoint: Endpoint::Analyze,
            tasks: Vec::new(),
        })
        .await
        .unwrap();

    let NetEvent::Completed {
        request_id, result, ..
    } = next_event(&mut evt_rx).await;
    assert_eq!(request_id, 7);
    assert!(matches!(result, Err(ScoringError::Transport(_))));
}

#[tokio::test]
async fn shutdown_stops_the_handler() {
    let url = start_backend().await;
    let (cmd_tx, mut evt_rx) = spawn(url);

    cmd_tx.send(NetCommand::Shutdown).await.unwrap();

    // Once the handler exits it drops the last event sender.
    let closed = tokio::time::timeout(Duration::from_secs(5), evt_rx.recv())
        .await
        .expect("timeout waiting for shutdown");
    assert!(closed.is_none());
}
