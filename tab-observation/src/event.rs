use crate::tab::{Collection, NodeData, NodeId, Position, Tab};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTab {
    pub position: Position,
    pub tab: Tab,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TabsCreated {
    pub tabs: Vec<CreatedTab>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TabsClosed {
    pub node_ids: Vec<NodeId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataChanged {
    pub data: NodeData,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCreated {
    pub position: Position,
    pub collection: Collection,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NodeMoved {
    pub id: NodeId,
    pub from: Position,
    pub to: Position,
}

/// A single change notification from the tab collection service.
///
/// The set of variants is closed: observers must handle each one, and adding a
/// variant is a breaking change for every `match` over this type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TabEvent {
    TabsCreated(TabsCreated),
    TabsClosed(TabsClosed),
    DataChanged(DataChanged),
    CollectionCreated(CollectionCreated),
    NodeMoved(NodeMoved),
}

impl TabEvent {
    pub fn kind(&self) -> TabEventKind {
        match self {
            TabEvent::TabsCreated(_) => TabEventKind::TabsCreated,
            TabEvent::TabsClosed(_) => TabEventKind::TabsClosed,
            TabEvent::DataChanged(_) => TabEventKind::DataChanged,
            TabEvent::CollectionCreated(_) => TabEventKind::CollectionCreated,
            TabEvent::NodeMoved(_) => TabEventKind::NodeMoved,
        }
    }
}

impl From<TabsCreated> for TabEvent {
    fn from(payload: TabsCreated) -> Self {
        TabEvent::TabsCreated(payload)
    }
}

impl From<TabsClosed> for TabEvent {
    fn from(payload: TabsClosed) -> Self {
        TabEvent::TabsClosed(payload)
    }
}

impl From<DataChanged> for TabEvent {
    fn from(payload: DataChanged) -> Self {
        TabEvent::DataChanged(payload)
    }
}

impl From<CollectionCreated> for TabEvent {
    fn from(payload: CollectionCreated) -> Self {
        TabEvent::CollectionCreated(payload)
    }
}

impl From<NodeMoved> for TabEvent {
    fn from(payload: NodeMoved) -> Self {
        TabEvent::NodeMoved(payload)
    }
}

/// Payload-free discriminant of a [`TabEvent`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum TabEventKind {
    TabsCreated,
    TabsClosed,
    DataChanged,
    CollectionCreated,
    NodeMoved,
}

impl TabEventKind {
    pub const ALL: [TabEventKind; 5] = [
        TabEventKind::TabsCreated,
        TabEventKind::TabsClosed,
        TabEventKind::DataChanged,
        TabEventKind::CollectionCreated,
        TabEventKind::NodeMoved,
    ];

    /// The wire tag for this variant.
    pub fn as_tag(&self) -> &'static str {
        match self {
            TabEventKind::TabsCreated => "tabsCreated",
            TabEventKind::TabsClosed => "tabsClosed",
            TabEventKind::DataChanged => "dataChanged",
            TabEventKind::CollectionCreated => "collectionCreated",
            TabEventKind::NodeMoved => "nodeMoved",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_tag() == tag)
    }

    /// Short snake_case label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            TabEventKind::TabsCreated => "tabs_created",
            TabEventKind::TabsClosed => "tabs_closed",
            TabEventKind::DataChanged => "data_changed",
            TabEventKind::CollectionCreated => "collection_created",
            TabEventKind::NodeMoved => "node_moved",
        }
    }
}

/// Ordered, non-empty batch of events delivered in one channel message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventBatch(Vec<TabEvent>);

impl EventBatch {
    /// Returns `None` for an empty vector.
    pub fn new(events: Vec<TabEvent>) -> Option<Self> {
        if events.is_empty() {
            None
        } else {
            Some(EventBatch(events))
        }
    }

    pub fn single(event: impl Into<TabEvent>) -> Self {
        EventBatch(vec![event.into()])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    // Always false for a batch built through `new` or `single`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn events(&self) -> &[TabEvent] {
        &self.0
    }

    /// Access inner events (for dispatch)
    pub fn into_inner(self) -> Vec<TabEvent> {
        self.0
    }
}

impl IntoIterator for EventBatch {
    type Item = TabEvent;
    type IntoIter = std::vec::IntoIter<TabEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
