use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TabId(pub u64);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollectionId(pub u64);

/// Any addressable node in the tab collection tree.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NodeId {
    Tab(TabId),
    Collection(CollectionId),
}

impl From<TabId> for NodeId {
    fn from(id: TabId) -> Self {
        NodeId::Tab(id)
    }
}

impl From<CollectionId> for NodeId {
    fn from(id: CollectionId) -> Self {
        NodeId::Collection(id)
    }
}

/// Location of a node: its parent collection (`None` for the root) and index within it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    pub index: u32,
}

impl Position {
    pub fn root(index: u32) -> Self {
        Self {
            parent: None,
            index,
        }
    }

    pub fn within(parent: impl Into<NodeId>, index: u32) -> Self {
        Self {
            parent: Some(parent.into()),
            index,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub loading: bool,
}

impl Tab {
    pub fn new(id: u64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: TabId(id),
            title: title.into(),
            url: url.into(),
            pinned: false,
            loading: false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CollectionKind {
    TabStrip,
    PinnedTabs,
    UnpinnedTabs,
    TabGroup,
    SplitTab,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: CollectionId,
    pub kind: CollectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Data carried by a node whose contents changed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NodeData {
    Tab(Tab),
    Collection(Collection),
}

impl NodeData {
    pub fn node_id(&self) -> NodeId {
        match self {
            NodeData::Tab(tab) => tab.id.into(),
            NodeData::Collection(collection) => collection.id.into(),
        }
    }
}

/// Initial state handed out by the service alongside the event stream.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TabsSnapshot {
    pub tabs: Vec<Tab>,
    pub collections: Vec<Collection>,
}
