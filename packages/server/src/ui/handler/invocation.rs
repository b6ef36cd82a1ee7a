//! Remote invocation dispatch.
//!
//! Turns one inbound text frame into a hub call and, when the caller asked
//! for one, a completion frame. Protocol errors never reach the registries.
//!
//! Completions go through the same outbound queue as hub events. The slot is
//! reserved before the hub is called, and snapshot replies are queued while
//! the hub's ordering gate is held, so a client can seed its state from a
//! `list-*` result and apply every later event on top of it.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tokio::{
    sync::{OwnedMutexGuard, mpsc::Permit},
    task::JoinHandle,
};

use crate::{
    domain::{EventSink, Outbound, ParticipantName},
    infrastructure::dto::websocket::{
        ChatMessageDto, CompletionMessage, HubMethod, InvocationMessage, MessageType,
    },
    ui::session::SessionContext,
    usecase::BroadcastHub,
};

/// Reasons an inbound frame could not be dispatched
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("malformed invocation: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("expected an invocation frame, got {0:?}")]
    UnexpectedType(MessageType),

    #[error("{target} expects {expected} argument(s), got {actual}")]
    Arity {
        target: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid argument {index} for {target}: {source}")]
    InvalidArgument {
        target: &'static str,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Room held on the session's outbound queue for one completion.
///
/// Fire-and-forget invocations hold nothing and send nothing.
pub struct Reply<'a> {
    slot: Option<(String, Permit<'a, Outbound>)>,
}

impl<'a> Reply<'a> {
    /// Reserve a queue slot for `invocation_id`, waiting while the queue is full.
    ///
    /// Returns `None` once the session's writer has gone away.
    pub async fn reserve(sink: &'a EventSink, invocation_id: Option<String>) -> Option<Self> {
        let slot = match invocation_id {
            Some(id) => Some((id, sink.reserve().await.ok()?)),
            None => None,
        };
        Some(Self { slot })
    }

    /// Queue the completion for `outcome`
    pub fn send(self, outcome: Result<Value, InvocationError>) {
        let Some((invocation_id, permit)) = self.slot else {
            return;
        };
        let completion = match outcome {
            Ok(result) => CompletionMessage::success(invocation_id, result),
            Err(e) => CompletionMessage::failure(invocation_id, e.to_string()),
        };
        match serde_json::to_string(&completion) {
            Ok(frame) => permit.send(Outbound::Completion(frame)),
            Err(e) => tracing::warn!("Failed to encode completion: {}", e),
        }
    }
}

fn argument<T: DeserializeOwned>(
    target: HubMethod,
    index: usize,
    value: Option<Value>,
) -> Result<T, InvocationError> {
    serde_json::from_value(value.unwrap_or(Value::Null)).map_err(|source| {
        InvocationError::InvalidArgument {
            target: target.as_str(),
            index,
            source,
        }
    })
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value, InvocationError> {
    serde_json::to_value(value).map_err(InvocationError::Malformed)
}

/// Check an invocation's shape before anything touches the hub
fn validate(invocation: &InvocationMessage) -> Result<(), InvocationError> {
    if invocation.r#type != MessageType::Invocation {
        return Err(InvocationError::UnexpectedType(invocation.r#type));
    }
    let target = invocation.target;
    if invocation.arguments.len() != target.arity() {
        return Err(InvocationError::Arity {
            target: target.as_str(),
            expected: target.arity(),
            actual: invocation.arguments.len(),
        });
    }
    Ok(())
}

/// Run one invocation against the hub and queue its completion
pub async fn dispatch(
    hub: &BroadcastHub,
    session: &mut SessionContext,
    invocation: InvocationMessage,
    reply: Reply<'_>,
) {
    if let Err(e) = validate(&invocation) {
        tracing::warn!("Rejected frame from session '{}': {}", session.id(), e);
        reply.send(Err(e));
        return;
    }
    let target = invocation.target;
    let mut arguments = invocation.arguments.into_iter();

    let outcome = match target {
        HubMethod::ListParticipants => {
            hub.with_participants(|names| {
                let names: Vec<String> = names.into_iter().map(|n| n.into_string()).collect();
                reply.send(to_value(names));
            })
            .await;
            return;
        }
        HubMethod::ListMessages => {
            hub.with_messages(|messages| {
                let messages: Vec<ChatMessageDto> =
                    messages.into_iter().map(ChatMessageDto::from).collect();
                reply.send(to_value(messages));
            })
            .await;
            return;
        }
        HubMethod::Join => match argument::<String>(target, 0, arguments.next()) {
            Ok(name) => {
                let name = ParticipantName::from(name);
                hub.join(name.clone()).await;
                session.record_join(name);
                Ok(Value::Null)
            }
            Err(e) => Err(e),
        },
        HubMethod::Leave => match argument::<String>(target, 0, arguments.next()) {
            Ok(name) => {
                let name = ParticipantName::from(name);
                session.record_leave(&name);
                hub.leave(name).await;
                Ok(Value::Null)
            }
            Err(e) => Err(e),
        },
        HubMethod::SendMessage => match argument::<ChatMessageDto>(target, 0, arguments.next()) {
            Ok(message) => {
                hub.send_message(message.into()).await;
                Ok(Value::Null)
            }
            Err(e) => Err(e),
        },
        HubMethod::RequestMessageSync => {
            hub.request_message_sync(&session.id()).await;
            Ok(Value::Null)
        }
    };

    if let Err(e) = &outcome {
        tracing::warn!("Rejected frame from session '{}': {}", session.id(), e);
    }
    reply.send(outcome);
}

/// Read `invocation_id`, normalizing a numeric id to its decimal string
fn take_invocation_id(value: &mut Value) -> Option<String> {
    let id = value.get_mut("invocation_id")?;
    match id {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => {
            let text = number.to_string();
            *id = Value::String(text.clone());
            Some(text)
        }
        _ => None,
    }
}

/// Handle one inbound text frame, queueing its completion on `sink`.
pub async fn handle_text(
    hub: &BroadcastHub,
    session: &mut SessionContext,
    sink: &EventSink,
    text: &str,
) {
    let mut value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Session '{}' sent a non-JSON frame: {}", session.id(), e);
            return;
        }
    };
    let invocation_id = take_invocation_id(&mut value);

    let Some(reply) = Reply::reserve(sink, invocation_id).await else {
        tracing::debug!("Session '{}' is closing, skipping frame", session.id());
        return;
    };

    match serde_json::from_value::<InvocationMessage>(value) {
        Ok(invocation) => {
            tracing::debug!(
                "Session '{}' invoked {}",
                session.id(),
                invocation.target.as_str()
            );
            dispatch(hub, session, invocation, reply).await;
        }
        Err(e) => {
            let e = InvocationError::from(e);
            tracing::warn!("Rejected frame from session '{}': {}", session.id(), e);
            reply.send(Err(e));
        }
    }
}

/// Handle one frame on its own task.
///
/// The task owns the session lock until the hub call and its reply are done.
/// Dropping or aborting the caller never cuts a mutation off from its
/// broadcast, and anyone locking the session afterwards sees the result.
pub fn spawn_text(
    hub: Arc<BroadcastHub>,
    mut session: OwnedMutexGuard<SessionContext>,
    sink: EventSink,
    text: String,
) -> JoinHandle<()> {
    tokio::spawn(async move { handle_text(&hub, &mut session, &sink, &text).await })
}
