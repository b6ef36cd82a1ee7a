//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod event;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, MessageHistory, Roster};
pub use event::{EventSink, EventStream, HubEvent, Outbound};
pub use factory::SessionIdFactory;
pub use repository::{MessageLog, PresenceRegistry, SessionNotifier};
pub use value_object::{MessageContent, ParticipantName, SessionId};
