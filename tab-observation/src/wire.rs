//! Wire shape of tab events.
//!
//! On the wire an event is a discriminant `tag` plus one optional field per
//! variant. The tag is authoritative: decoding checks that the tag is known and
//! that the only populated field is the one the tag names.

use crate::error::ProtocolError;
use crate::event::{
    CollectionCreated, DataChanged, EventBatch, NodeMoved, TabEvent, TabEventKind, TabsClosed,
    TabsCreated,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WireTabEvent {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabs_created: Option<TabsCreated>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabs_closed: Option<TabsClosed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_changed: Option<DataChanged>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_created: Option<CollectionCreated>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_moved: Option<NodeMoved>,
}

impl WireTabEvent {
    /// Tags of the payload fields that are populated, in declaration order.
    fn populated(&self) -> impl Iterator<Item = TabEventKind> {
        [
            self.tabs_created.is_some().then_some(TabEventKind::TabsCreated),
            self.tabs_closed.is_some().then_some(TabEventKind::TabsClosed),
            self.data_changed.is_some().then_some(TabEventKind::DataChanged),
            self.collection_created
                .is_some()
                .then_some(TabEventKind::CollectionCreated),
            self.node_moved.is_some().then_some(TabEventKind::NodeMoved),
        ]
        .into_iter()
        .flatten()
    }
}

impl TabEvent {
    pub fn into_wire(self) -> WireTabEvent {
        let mut wire = WireTabEvent {
            tag: self.kind().as_tag().to_string(),
            ..WireTabEvent::default()
        };
        match self {
            TabEvent::TabsCreated(payload) => wire.tabs_created = Some(payload),
            TabEvent::TabsClosed(payload) => wire.tabs_closed = Some(payload),
            TabEvent::DataChanged(payload) => wire.data_changed = Some(payload),
            TabEvent::CollectionCreated(payload) => wire.collection_created = Some(payload),
            TabEvent::NodeMoved(payload) => wire.node_moved = Some(payload),
        }
        wire
    }
}

impl TryFrom<WireTabEvent> for TabEvent {
    type Error = ProtocolError;

    fn try_from(wire: WireTabEvent) -> Result<Self, Self::Error> {
        let kind = TabEventKind::from_tag(&wire.tag).ok_or_else(|| {
            ProtocolError::UnknownVariant {
                tag: wire.tag.clone(),
            }
        })?;

        let stray = wire.populated().find(|populated| *populated != kind);
        if let Some(other) = stray {
            return Err(ProtocolError::UnexpectedPayload {
                tag: wire.tag,
                field: other.as_tag(),
            });
        }

        let event = match kind {
            TabEventKind::TabsCreated => wire.tabs_created.map(TabEvent::TabsCreated),
            TabEventKind::TabsClosed => wire.tabs_closed.map(TabEvent::TabsClosed),
            TabEventKind::DataChanged => wire.data_changed.map(TabEvent::DataChanged),
            TabEventKind::CollectionCreated => {
                wire.collection_created.map(TabEvent::CollectionCreated)
            }
            TabEventKind::NodeMoved => wire.node_moved.map(TabEvent::NodeMoved),
        };

        event.ok_or(ProtocolError::MissingPayload { tag: wire.tag })
    }
}

/// Validates a whole wire batch. Either every event decodes or none is returned.
pub fn decode_events(wire: Vec<WireTabEvent>) -> Result<EventBatch, ProtocolError> {
    let events = wire
        .into_iter()
        .map(TabEvent::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    EventBatch::new(events).ok_or(ProtocolError::EmptyBatch)
}

/// Parses a JSON array of wire events.
pub fn decode_batch(frame: &str) -> Result<EventBatch, ProtocolError> {
    let wire: Vec<WireTabEvent> = serde_json::from_str(frame)?;
    decode_events(wire)
}

pub fn encode_batch(batch: &EventBatch) -> Result<String, ProtocolError> {
    let wire: Vec<WireTabEvent> = batch
        .events()
        .iter()
        .cloned()
        .map(TabEvent::into_wire)
        .collect();
    Ok(serde_json::to_string(&wire)?)
}
