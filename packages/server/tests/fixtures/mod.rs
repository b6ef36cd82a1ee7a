//! Shared test fixtures.
//!
//! Starts the real router on an ephemeral port inside the test runtime.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hearth_server::ServerConfig;
use serde_json::{Value, json};
use tokio::{net::TcpListener, net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// In-process server; aborted on drop
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    pub async fn start_with(config: ServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            hearth_server::ui::serve(listener, config, std::future::pending())
                .await
                .expect("Server failed");
        });
        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn connect(&self) -> WsClient {
        let (ws, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        ws
    }

    /// Poll `/api/room` until `connected_sessions` equals `expected`
    pub async fn wait_for_sessions(&self, expected: u64) {
        let client = reqwest::Client::new();
        for _ in 0..100 {
            let room: Value = client
                .get(format!("{}/api/room", self.base_url()))
                .send()
                .await
                .expect("Failed to send request")
                .json()
                .await
                .expect("Failed to parse JSON");
            if room["connected_sessions"] == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("connected_sessions never reached {expected}");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Send an invocation frame
pub async fn invoke(ws: &mut WsClient, id: Option<&str>, target: &str, arguments: Value) {
    let mut frame = json!({"type": "invocation", "target": target, "arguments": arguments});
    if let Some(id) = id {
        frame["invocation_id"] = json!(id);
    }
    ws.send(Message::Text(frame.to_string().into()))
        .await
        .expect("Failed to send frame");
}

/// Receive the next JSON text frame, failing after one second
pub async fn next_json(ws: &mut WsClient) -> Value {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(1), ws.next())
            .await
            .expect("Timed out waiting for frame")
            .expect("Stream ended")
            .expect("WebSocket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
        }
    }
}

/// Assert that no frame arrives within `millis`
pub async fn assert_silent(ws: &mut WsClient, millis: u64) {
    let result = tokio::time::timeout(Duration::from_millis(millis), ws.next()).await;
    assert!(result.is_err(), "Unexpected frame: {:?}", result);
}

/// Invoke with an id and return the matching completion, collecting any
/// events that arrive before it
pub async fn call(ws: &mut WsClient, id: &str, target: &str, arguments: Value) -> (Value, Vec<Value>) {
    invoke(ws, Some(id), target, arguments).await;
    let mut events = Vec::new();
    loop {
        let frame = next_json(ws).await;
        if frame["type"] == "completion" && frame["invocation_id"] == id {
            return (frame, events);
        }
        events.push(frame);
    }
}
