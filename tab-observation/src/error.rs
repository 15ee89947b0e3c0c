//! Error types for binding, wire decoding, channel sends and configuration.
//!
//! All of these describe programmer or integration mistakes (a second bind, a
//! peer speaking a newer protocol, a consumer that went away). None of them is
//! retried by this crate.

use crate::channel::EventStream;
use thiserror::Error;

/// Errors from the bind-once lifecycle of an [`Observation`](crate::Observation).
#[derive(Error, Debug)]
#[must_use]
pub enum BindError {
    /// `bind` was called on an observation that already owns a receiver.
    /// The rejected stream is handed back untouched.
    #[error("observation is already bound to an event stream")]
    AlreadyBound(EventStream),

    /// Delivery was requested before `bind`.
    #[error("observation is not bound to an event stream")]
    NotBound,
}

impl BindError {
    pub fn as_label(&self) -> &'static str {
        match self {
            BindError::AlreadyBound(_) => "bind_already_bound",
            BindError::NotBound => "bind_not_bound",
        }
    }

    /// Recovers the stream rejected by a double bind.
    pub fn into_stream(self) -> Option<EventStream> {
        match self {
            BindError::AlreadyBound(stream) => Some(stream),
            BindError::NotBound => None,
        }
    }
}

/// Wire-level violations: the peer sent something this build does not understand.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("unknown tab event variant `{tag}`; peer is newer than this build")]
    UnknownVariant { tag: String },

    #[error("event tagged `{tag}` carries no `{tag}` payload")]
    MissingPayload { tag: String },

    #[error("event tagged `{tag}` also carries a `{field}` payload")]
    UnexpectedPayload { tag: String, field: &'static str },

    #[error("malformed event frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("event batch is empty")]
    EmptyBatch,
}

impl ProtocolError {
    pub fn as_label(&self) -> &'static str {
        match self {
            ProtocolError::UnknownVariant { .. } => "protocol_unknown_variant",
            ProtocolError::MissingPayload { .. } => "protocol_missing_payload",
            ProtocolError::UnexpectedPayload { .. } => "protocol_unexpected_payload",
            ProtocolError::Malformed(_) => "protocol_malformed",
            ProtocolError::EmptyBatch => "protocol_empty_batch",
        }
    }
}

/// Errors returned to the producer side of an event channel.
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("refusing to send an empty event batch")]
    EmptyBatch,

    /// The consuming observation was dropped and late delivery is rejected.
    #[error("event stream consumer is gone")]
    Closed,
}

impl ChannelError {
    pub fn as_label(&self) -> &'static str {
        match self {
            ChannelError::EmptyBatch => "channel_empty_batch",
            ChannelError::Closed => "channel_closed",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid observation config: {0}")]
    Parse(#[from] toml::de::Error),
}
