use crate::channel::{Delivery, EventStream};
use crate::error::{BindError, ProtocolError};
use crate::event::{EventBatch, TabEvent};
use crate::observer::TabCollectionObserver;
use crate::wire::{decode_batch, decode_events, WireTabEvent};

enum BindState {
    Unbound,
    Bound(EventStream),
}

/// Running totals of what an observation has dispatched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub batches: u64,
    pub events: u64,
}

/// Bridges an ordered stream of event batches to a [`TabCollectionObserver`].
///
/// The observation borrows its observer and never owns it; the borrow keeps the
/// observer alive for as long as events can be dispatched to it. It starts
/// unbound, and [`bind`](Self::bind) attaches it to exactly one
/// [`EventStream`]. There is no unbind: dropping the observation drops the
/// receiver, after which the producer sees a closed channel.
///
/// Every batch is dispatched synchronously, event by event in array order, and
/// each event reaches exactly one observer method with its payload moved out
/// unchanged.
pub struct Observation<'o, O: TabCollectionObserver + ?Sized> {
    observer: &'o mut O,
    state: BindState,
    stats: DeliveryStats,
}

impl<'o, O: TabCollectionObserver + ?Sized> Observation<'o, O> {
    pub fn new(observer: &'o mut O) -> Self {
        Self {
            observer,
            state: BindState::Unbound,
            stats: DeliveryStats::default(),
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, BindState::Bound(_))
    }

    pub fn observer(&self) -> &O {
        &*self.observer
    }

    pub fn stats(&self) -> DeliveryStats {
        self.stats
    }

    /// Attach to `stream` and dispatch everything already queued on it.
    ///
    /// Only the backlog present when `bind` is called is dispatched; batches
    /// that observer callbacks send while it drains wait for the next
    /// [`pump`](Self::pump) or [`run`](Self::run). Returns the number of
    /// backlog batches delivered.
    ///
    /// A second call is rejected with [`BindError::AlreadyBound`], which hands
    /// the new stream back; the existing binding and the new stream's queue are
    /// left untouched. A double bind is a programming error: callers are
    /// expected to treat this error as fatal (propagate it or `expect` it), not
    /// discard it.
    pub fn bind(&mut self, stream: EventStream) -> Result<usize, BindError> {
        if self.is_bound() {
            let err = BindError::AlreadyBound(stream);
            tracing::error!(target: "tab-observation::bind", label = err.as_label(), "{}", err);
            return Err(err);
        }

        self.state = BindState::Bound(stream);
        let drained = self.pump()?;
        tracing::debug!(
            target: "tab-observation::bind",
            "bound; dispatched {} queued batches",
            drained
        );
        Ok(drained)
    }

    /// Dispatch the batches queued at the time of the call, without waiting
    /// for more. Batches sent by observer callbacks during the drain stay queued.
    pub fn pump(&mut self) -> Result<usize, BindError> {
        let queued = match &self.state {
            BindState::Unbound => return Err(BindError::NotBound),
            BindState::Bound(stream) => stream.queued(),
        };
        let mut drained = 0;
        while drained < queued {
            let next = match &mut self.state {
                BindState::Unbound => return Err(BindError::NotBound),
                BindState::Bound(stream) => stream.try_next(),
            };
            let Some(delivery) = next else {
                break;
            };
            self.deliver(delivery);
            drained += 1;
        }
        Ok(drained)
    }

    /// Dispatch batches as they arrive until every sender is dropped.
    ///
    /// Yields only between batches; a batch is always dispatched in one go.
    pub async fn run(&mut self) -> Result<usize, BindError> {
        let mut delivered = 0;
        loop {
            let next = match &mut self.state {
                BindState::Unbound => return Err(BindError::NotBound),
                BindState::Bound(stream) => stream.next().await,
            };
            let Some(delivery) = next else {
                tracing::debug!(
                    target: "tab-observation::dispatch",
                    "event stream closed after {} batches",
                    delivered
                );
                return Ok(delivered);
            };
            self.deliver(delivery);
            delivered += 1;
        }
    }

    /// Delivery entry point for the transport: dispatch one batch in order.
    pub fn on_tab_events(&mut self, batch: EventBatch) {
        self.stats.batches += 1;
        for event in batch {
            self.dispatch(event);
        }
    }

    /// Delivery entry point for undecoded wire batches.
    ///
    /// # Panics
    ///
    /// If any event in the batch fails to decode (unknown variant tag, missing
    /// or mismatched payload): the peer speaks a protocol this build does not
    /// understand. Nothing from the offending batch is dispatched.
    pub fn on_wire_events(&mut self, batch: Vec<WireTabEvent>) {
        self.on_decoded(decode_events(batch));
    }

    /// Delivery entry point for a JSON frame of wire events.
    ///
    /// # Panics
    ///
    /// Same as [`on_wire_events`](Self::on_wire_events), and also when the
    /// frame is not a JSON array of wire events.
    pub fn on_wire_frame(&mut self, frame: &str) {
        self.on_decoded(decode_batch(frame));
    }

    fn on_decoded(&mut self, decoded: Result<EventBatch, ProtocolError>) {
        match decoded {
            Ok(batch) => self.on_tab_events(batch),
            Err(err) => panic!("tab event protocol violation ({}): {}", err.as_label(), err),
        }
    }

    fn deliver(&mut self, delivery: Delivery) {
        match delivery {
            Delivery::Events(batch) => self.on_tab_events(batch),
            Delivery::Frame(frame) => self.on_wire_frame(&frame),
        }
    }

    fn dispatch(&mut self, event: TabEvent) {
        tracing::trace!(
            target: "tab-observation::dispatch",
            kind = event.kind().as_label(),
            "dispatching tab event"
        );
        self.stats.events += 1;
        match event {
            TabEvent::TabsCreated(payload) => self.observer.on_tabs_created(payload),
            TabEvent::TabsClosed(payload) => self.observer.on_tabs_closed(payload),
            TabEvent::DataChanged(payload) => self.observer.on_data_changed(payload),
            TabEvent::CollectionCreated(payload) => self.observer.on_collection_created(payload),
            TabEvent::NodeMoved(payload) => self.observer.on_node_moved(payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::event_channel;
    use crate::event::TabsClosed;
    use crate::observer::NoOpObserver;
    use crate::tab::TabId;

    fn closed(id: u64) -> TabsClosed {
        TabsClosed {
            node_ids: vec![TabId(id).into()],
        }
    }

    #[test]
    fn starts_unbound() {
        let mut observer = NoOpObserver;
        let mut observation = Observation::new(&mut observer);
        assert!(!observation.is_bound());
        assert!(matches!(observation.pump(), Err(BindError::NotBound)));
    }

    #[test]
    fn counts_batches_and_events() {
        let (sender, stream) = event_channel();
        sender.send(vec![closed(1).into(), closed(2).into()]).unwrap();
        sender.send_event(closed(3)).unwrap();

        let mut observer = NoOpObserver;
        let mut observation = Observation::new(&mut observer);
        assert_eq!(observation.bind(stream).unwrap(), 2);
        assert_eq!(
            observation.stats(),
            DeliveryStats {
                batches: 2,
                events: 3
            }
        );
    }

    #[test]
    fn second_bind_returns_the_stream() {
        let (_first_tx, first) = event_channel();
        let (second_tx, second) = event_channel();
        second_tx.send_event(closed(9)).unwrap();

        let mut observer = NoOpObserver;
        let mut observation = Observation::new(&mut observer);
        observation.bind(first).unwrap();

        let err = observation.bind(second).unwrap_err();
        assert_eq!(err.as_label(), "bind_already_bound");
        let mut returned = err.into_stream().unwrap();
        assert!(returned.try_next().is_some());
        assert_eq!(observation.stats().events, 0);
    }
}
