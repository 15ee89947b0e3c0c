use std::cell::RefCell;

use tab_observation::{
    event_channel, ChannelError, Collection, CollectionCreated, CollectionId, CollectionKind,
    CreatedTab, DataChanged, EventSender, EventStream, NodeData, NodeId, NodeMoved, Position, Tab,
    TabCollectionObserver, TabCollectionService, TabEvent, TabId, TabsClosed, TabsCreated,
    TabsSnapshot,
};

// === Mock Service ===

#[derive(Default)]
struct ServiceState {
    next_id: u64,
    tabs: Vec<Tab>,
    collections: Vec<Collection>,
    subscribers: Vec<EventSender>,
}

/// In-memory tab strip that publishes every change to the streams it handed out.
#[derive(Default)]
pub struct MockTabService {
    state: RefCell<ServiceState>,
}

impl MockTabService {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> u64 {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        state.next_id
    }

    /// Send one batch to every live subscriber.
    pub fn publish(&self, events: Vec<TabEvent>) -> Result<(), ChannelError> {
        let state = self.state.borrow();
        for subscriber in &state.subscribers {
            subscriber.send(events.clone())?;
        }
        Ok(())
    }

    /// Send a raw JSON frame to every live subscriber.
    pub fn publish_wire(&self, frame: &str) -> Result<(), ChannelError> {
        let state = self.state.borrow();
        for subscriber in &state.subscribers {
            subscriber.send_wire(frame)?;
        }
        Ok(())
    }

    /// Opens tabs at the end of the strip as one batch.
    pub fn open_tabs(&self, titles: &[&str]) -> Result<Vec<TabId>, ChannelError> {
        let mut created = Vec::new();
        for title in titles {
            let tab = Tab::new(self.next_id(), *title, format!("https://{title}.test"));
            let mut state = self.state.borrow_mut();
            let index = state.tabs.len() as u32;
            state.tabs.push(tab.clone());
            created.push(CreatedTab {
                position: Position::root(index),
                tab,
            });
        }
        let ids = created.iter().map(|c| c.tab.id).collect();
        self.publish(vec![TabsCreated { tabs: created }.into()])?;
        Ok(ids)
    }

    pub fn close_tab(&self, id: TabId) -> Result<(), ChannelError> {
        self.state.borrow_mut().tabs.retain(|tab| tab.id != id);
        self.publish(vec![TabsClosed {
            node_ids: vec![id.into()],
        }
        .into()])
    }

    pub fn set_title(&self, id: TabId, title: &str) -> Result<(), ChannelError> {
        let changed = {
            let mut state = self.state.borrow_mut();
            let tab = state.tabs.iter_mut().find(|tab| tab.id == id);
            tab.map(|tab| {
                tab.title = title.to_string();
                tab.clone()
            })
        };
        match changed {
            Some(tab) => self.publish(vec![DataChanged {
                data: NodeData::Tab(tab),
            }
            .into()]),
            None => Ok(()),
        }
    }

    pub fn create_group(&self, title: &str) -> Result<CollectionId, ChannelError> {
        let collection = Collection {
            id: CollectionId(self.next_id()),
            kind: CollectionKind::TabGroup,
            title: Some(title.to_string()),
        };
        let index = {
            let mut state = self.state.borrow_mut();
            state.collections.push(collection.clone());
            state.tabs.len() as u32
        };
        let id = collection.id;
        self.publish(vec![CollectionCreated {
            position: Position::root(index),
            collection,
        }
        .into()])?;
        Ok(id)
    }

    pub fn move_tab(&self, id: TabId, to: Position) -> Result<(), ChannelError> {
        let index = {
            let state = self.state.borrow();
            state.tabs.iter().position(|tab| tab.id == id)
        };
        let Some(index) = index else {
            return Ok(());
        };
        let from = Position::root(index as u32);
        self.publish(vec![NodeMoved {
            id: id.into(),
            from,
            to,
        }
        .into()])
    }
}

impl TabCollectionService for MockTabService {
    fn get_tabs(&self) -> (TabsSnapshot, EventStream) {
        let (sender, stream) = event_channel();
        let mut state = self.state.borrow_mut();
        state.subscribers.push(sender);
        let snapshot = TabsSnapshot {
            tabs: state.tabs.clone(),
            collections: state.collections.clone(),
        };
        (snapshot, stream)
    }
}

// === Recording Observer ===

/// One observer callback, as recorded by [`Recorder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    TabsCreated(TabsCreated),
    TabsClosed(TabsClosed),
    DataChanged(DataChanged),
    CollectionCreated(CollectionCreated),
    NodeMoved(NodeMoved),
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::TabsCreated(_) => "on_tabs_created",
            Call::TabsClosed(_) => "on_tabs_closed",
            Call::DataChanged(_) => "on_data_changed",
            Call::CollectionCreated(_) => "on_collection_created",
            Call::NodeMoved(_) => "on_node_moved",
        }
    }

    /// The event that would produce this call.
    pub fn into_event(self) -> TabEvent {
        match self {
            Call::TabsCreated(p) => p.into(),
            Call::TabsClosed(p) => p.into(),
            Call::DataChanged(p) => p.into(),
            Call::CollectionCreated(p) => p.into(),
            Call::NodeMoved(p) => p.into(),
        }
    }
}

/// Observer that records every callback in order.
#[derive(Default, Debug)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Recorder {
    pub fn names(&self) -> Vec<&'static str> {
        self.calls.iter().map(Call::name).collect()
    }
}

impl TabCollectionObserver for Recorder {
    fn on_tabs_created(&mut self, event: TabsCreated) {
        self.calls.push(Call::TabsCreated(event));
    }

    fn on_tabs_closed(&mut self, event: TabsClosed) {
        self.calls.push(Call::TabsClosed(event));
    }

    fn on_data_changed(&mut self, event: DataChanged) {
        self.calls.push(Call::DataChanged(event));
    }

    fn on_collection_created(&mut self, event: CollectionCreated) {
        self.calls.push(Call::CollectionCreated(event));
    }

    fn on_node_moved(&mut self, event: NodeMoved) {
        self.calls.push(Call::NodeMoved(event));
    }
}

// === Fixtures ===

pub fn tabs_created(ids: &[u64]) -> TabEvent {
    TabsCreated {
        tabs: ids
            .iter()
            .enumerate()
            .map(|(index, id)| CreatedTab {
                position: Position::root(index as u32),
                tab: Tab::new(*id, format!("tab {id}"), format!("https://{id}.test")),
            })
            .collect(),
    }
    .into()
}

pub fn tab_data_changed(id: u64) -> TabEvent {
    DataChanged {
        data: NodeData::Tab(Tab::new(id, "changed", format!("https://{id}.test"))),
    }
    .into()
}

pub fn node_moved(id: u64, from: u32, to: u32) -> TabEvent {
    NodeMoved {
        id: NodeId::Tab(TabId(id)),
        from: Position::root(from),
        to: Position::root(to),
    }
    .into()
}
