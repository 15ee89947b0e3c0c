use crate::channel::EventStream;
use crate::tab::TabsSnapshot;

/// Boundary of the remote tab collection service.
///
/// `get_tabs` hands out the current state together with a stream that may
/// already be producing. Events queued on the stream describe changes made
/// after the snapshot was taken, so binding it replays them on top of the
/// snapshot in order.
pub trait TabCollectionService {
    fn get_tabs(&self) -> (TabsSnapshot, EventStream);
}
