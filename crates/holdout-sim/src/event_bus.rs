//! Synchronous observer registry for presentation events.
//!
//! Listeners run at emission time, in subscription order, on the tick
//! thread. Every event is also kept in the tick log that ends up in the
//! snapshot.

use holdout_core::events::SimEvent;

/// Callback invoked for every emitted event.
pub type Listener = Box<dyn FnMut(&SimEvent) + Send>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
    tick_log: Vec<SimEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&SimEvent) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: SimEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        self.tick_log.push(event);
    }

    /// Events emitted since the last drain, in order.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.tick_log)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("tick_log", &self.tick_log)
            .finish()
    }
}
