//! Observation layer for a remote tab collection.
//!
//! A [`TabCollectionService`] hands out a snapshot and an [`EventStream`]. An
//! [`Observation`] binds that stream once and dispatches each batch of
//! [`TabEvent`]s, in arrival order, to a [`TabCollectionObserver`].

mod channel;
mod config;
mod error;
mod event;
mod observation;
mod observer;
mod service;
mod tab;
mod wire;

pub use channel::{event_channel, event_channel_with_config, EventSender, EventStream};
pub use config::{LateDelivery, ObservationConfig};
pub use error::{BindError, ChannelError, ConfigError, ProtocolError};
pub use event::{
    CollectionCreated, CreatedTab, DataChanged, EventBatch, NodeMoved, TabEvent, TabEventKind,
    TabsClosed, TabsCreated,
};
pub use observation::{DeliveryStats, Observation};
pub use observer::{NoOpObserver, TabCollectionObserver, TeeObserver, TracingObserver};
pub use service::TabCollectionService;
pub use tab::{
    Collection, CollectionId, CollectionKind, NodeData, NodeId, Position, Tab, TabId,
    TabsSnapshot,
};
pub use wire::{decode_batch, decode_events, encode_batch, WireTabEvent};
