use crate::event::{CollectionCreated, DataChanged, NodeMoved, TabsClosed, TabsCreated};

/// Typed callbacks for tab collection changes, one per event variant.
///
/// There are no default bodies: an implementation has to decide what each
/// variant means for it. Callbacks run synchronously on the thread that
/// services the channel, so implementations need not be `Send`. A panic inside
/// a callback is not caught and propagates to whoever delivered the batch.
pub trait TabCollectionObserver {
    fn on_tabs_created(&mut self, event: TabsCreated);
    fn on_tabs_closed(&mut self, event: TabsClosed);
    fn on_data_changed(&mut self, event: DataChanged);
    fn on_collection_created(&mut self, event: CollectionCreated);
    fn on_node_moved(&mut self, event: NodeMoved);
}

impl<O: TabCollectionObserver + ?Sized> TabCollectionObserver for &mut O {
    fn on_tabs_created(&mut self, event: TabsCreated) {
        (**self).on_tabs_created(event)
    }

    fn on_tabs_closed(&mut self, event: TabsClosed) {
        (**self).on_tabs_closed(event)
    }

    fn on_data_changed(&mut self, event: DataChanged) {
        (**self).on_data_changed(event)
    }

    fn on_collection_created(&mut self, event: CollectionCreated) {
        (**self).on_collection_created(event)
    }

    fn on_node_moved(&mut self, event: NodeMoved) {
        (**self).on_node_moved(event)
    }
}

impl<O: TabCollectionObserver + ?Sized> TabCollectionObserver for Box<O> {
    fn on_tabs_created(&mut self, event: TabsCreated) {
        (**self).on_tabs_created(event)
    }

    fn on_tabs_closed(&mut self, event: TabsClosed) {
        (**self).on_tabs_closed(event)
    }

    fn on_data_changed(&mut self, event: DataChanged) {
        (**self).on_data_changed(event)
    }

    fn on_collection_created(&mut self, event: CollectionCreated) {
        (**self).on_collection_created(event)
    }

    fn on_node_moved(&mut self, event: NodeMoved) {
        (**self).on_node_moved(event)
    }
}

/// No-op observer
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpObserver;

impl TabCollectionObserver for NoOpObserver {
    fn on_tabs_created(&mut self, _event: TabsCreated) {}
    fn on_tabs_closed(&mut self, _event: TabsClosed) {}
    fn on_data_changed(&mut self, _event: DataChanged) {}
    fn on_collection_created(&mut self, _event: CollectionCreated) {}
    fn on_node_moved(&mut self, _event: NodeMoved) {}
}

/// Tracing observer - logs every callback to the tracing crate
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl TabCollectionObserver for TracingObserver {
    fn on_tabs_created(&mut self, event: TabsCreated) {
        tracing::info!(target: "tab-observation::Event", "TabsCreated({:?})", event);
    }

    fn on_tabs_closed(&mut self, event: TabsClosed) {
        tracing::info!(target: "tab-observation::Event", "TabsClosed({:?})", event);
    }

    fn on_data_changed(&mut self, event: DataChanged) {
        tracing::info!(target: "tab-observation::Event", "DataChanged({:?})", event);
    }

    fn on_collection_created(&mut self, event: CollectionCreated) {
        tracing::info!(target: "tab-observation::Event", "CollectionCreated({:?})", event);
    }

    fn on_node_moved(&mut self, event: NodeMoved) {
        tracing::debug!(target: "tab-observation::Event", "NodeMoved({:?})", event);
    }
}

/// Tee observer - forwards each callback to every wrapped observer, in order.
///
/// Each observer receives its own clone of the payload.
#[derive(Default)]
pub struct TeeObserver<'a> {
    observers: Vec<Box<dyn TabCollectionObserver + 'a>>,
}

impl<'a> TeeObserver<'a> {
    pub fn new(observers: Vec<Box<dyn TabCollectionObserver + 'a>>) -> Self {
        Self { observers }
    }

    pub fn push(&mut self, observer: impl TabCollectionObserver + 'a) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl TabCollectionObserver for TeeObserver<'_> {
    fn on_tabs_created(&mut self, event: TabsCreated) {
        for observer in &mut self.observers {
            observer.on_tabs_created(event.clone());
        }
    }

    fn on_tabs_closed(&mut self, event: TabsClosed) {
        for observer in &mut self.observers {
            observer.on_tabs_closed(event.clone());
        }
    }

    fn on_data_changed(&mut self, event: DataChanged) {
        for observer in &mut self.observers {
            observer.on_data_changed(event.clone());
        }
    }

    fn on_collection_created(&mut self, event: CollectionCreated) {
        for observer in &mut self.observers {
            observer.on_collection_created(event.clone());
        }
    }

    fn on_node_moved(&mut self, event: NodeMoved) {
        for observer in &mut self.observers {
            observer.on_node_moved(event.clone());
        }
    }
}
