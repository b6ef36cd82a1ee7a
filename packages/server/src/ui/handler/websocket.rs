//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{Outbound, SessionIdFactory},
    infrastructure::dto::websocket::encode_event,
    ui::{handler::invocation::spawn_text, session::SessionContext, state::AppState},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = SessionIdFactory::generate();

    // One bounded queue per session carries hub events and completions alike
    let (outbound_tx, mut outbound_rx) = mpsc::channel(state.config.session_queue_capacity);
    state.hub.connect(session_id, outbound_tx.clone()).await;

    let session = Arc::new(Mutex::new(SessionContext::new(session_id)));
    let (mut sender, mut receiver) = socket.split();

    // Spawn a task to push queued frames to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(outbound) = outbound_rx.recv().await {
            let frame = match outbound {
                Outbound::Completion(frame) => frame,
                Outbound::Event(event) => {
                    let name = event.name();
                    match encode_event(event) {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::warn!("Failed to encode {}: {}", name, e);
                            continue;
                        }
                    }
                }
            };
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    let hub = state.hub.clone();
    let session_clone = session.clone();

    // Spawn a task to receive invocations from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error on session '{}': {}", session_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", session_id, text.as_str());
                    // Frames are handled one at a time, each on a task of its own
                    let guard = session_clone.clone().lock_owned().await;
                    let dispatch = spawn_text(
                        hub.clone(),
                        guard,
                        outbound_tx.clone(),
                        text.as_str().to_owned(),
                    );
                    if dispatch.await.is_err() {
                        break;
                    }
                }
                Message::Binary(_) => {
                    tracing::warn!("Ignoring binary frame from session '{}'", session_id);
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", session_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.hub.disconnect(&session_id).await;

    // Waits for a frame still being handled
    let joined = session.lock().await.take_joined();
    if state.config.leave_on_disconnect {
        for name in joined {
            tracing::info!(
                "Leaving '{}' on behalf of disconnected session '{}'",
                name,
                session_id
            );
            state.hub.leave(name).await;
        }
    }
}
