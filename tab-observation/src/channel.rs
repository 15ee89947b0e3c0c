use crate::config::{LateDelivery, ObservationConfig};
use crate::error::ChannelError;
use crate::event::{EventBatch, TabEvent};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Allocate an event channel with the default late-delivery policy.
///
/// The sender goes to the producer (service or transport); the stream is the
/// bind-once handle given to an [`Observation`](crate::Observation). Batches
/// sent before the stream is bound queue up in order.
pub fn event_channel() -> (EventSender, EventStream) {
    event_channel_with_config(&ObservationConfig::default())
}

pub fn event_channel_with_config(config: &ObservationConfig) -> (EventSender, EventStream) {
    let (tx, rx) = unbounded_channel();
    let sender = EventSender {
        tx,
        late_delivery: config.late_delivery,
    };
    (sender, EventStream { rx })
}

/// One queued channel message.
///
/// Wire frames stay undecoded until they reach the observation.
#[derive(Debug)]
pub(crate) enum Delivery {
    Events(EventBatch),
    Frame(String),
}

/// Producer side of an event channel. Cloning shares the same queue.
#[derive(Clone, Debug)]
pub struct EventSender {
    tx: UnboundedSender<Delivery>,
    late_delivery: LateDelivery,
}

impl EventSender {
    /// Queue an ordered batch for the consumer.
    pub fn send(&self, events: Vec<TabEvent>) -> Result<(), ChannelError> {
        let batch = EventBatch::new(events).ok_or(ChannelError::EmptyBatch)?;
        self.send_batch(batch)
    }

    pub fn send_event(&self, event: impl Into<TabEvent>) -> Result<(), ChannelError> {
        self.send_batch(EventBatch::single(event))
    }

    /// Queue a JSON frame of wire events as one batch.
    ///
    /// The frame is decoded by the observation when it is dispatched; a frame
    /// it cannot decode is fatal there.
    pub fn send_wire(&self, frame: impl Into<String>) -> Result<(), ChannelError> {
        self.deliver(Delivery::Frame(frame.into()))
    }

    pub fn send_batch(&self, batch: EventBatch) -> Result<(), ChannelError> {
        self.deliver(Delivery::Events(batch))
    }

    fn deliver(&self, delivery: Delivery) -> Result<(), ChannelError> {
        match self.tx.send(delivery) {
            Ok(()) => Ok(()),
            Err(rejected) => match self.late_delivery {
                LateDelivery::Reject => Err(ChannelError::Closed),
                LateDelivery::Drop => {
                    tracing::debug!(
                        target: "tab-observation::channel",
                        "dropping late {:?}; consumer is gone",
                        rejected.0
                    );
                    Ok(())
                }
            },
        }
    }

    /// True once the consuming stream (or the observation owning it) was dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer side of an event channel, not yet attached to an observer.
///
/// Each channel has exactly one consumer, so this is not `Clone`.
#[derive(Debug)]
pub struct EventStream {
    rx: UnboundedReceiver<Delivery>,
}

impl EventStream {
    /// Number of messages waiting right now.
    pub(crate) fn queued(&self) -> usize {
        self.rx.len()
    }

    pub(crate) fn try_next(&mut self) -> Option<Delivery> {
        self.rx.try_recv().ok()
    }

    pub(crate) async fn next(&mut self) -> Option<Delivery> {
        self.rx.recv().await
    }
}
