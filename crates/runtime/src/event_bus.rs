use std::collections::VecDeque;
use std::fmt;

/// Number of past events a bus keeps unless told otherwise.
pub const DEFAULT_HISTORY: usize = 64;

/// A recorded event with its emission sequence number.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<E> {
    /// 0-based, strictly increasing per bus.
    pub seq: u64,
    pub payload: E,
}

/// Synchronous event bus with an optional listener and bounded history.
///
/// `emit` calls the listener (if any) before returning, on the caller's
/// thread. The history is a ring: once `history` events are held, the oldest
/// one is dropped for each new emission.
pub struct EventBus<E> {
    next_seq: u64,
    history: usize,
    events: VecDeque<Event<E>>,
    listener: Option<Box<dyn FnMut(&E)>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::with_history(DEFAULT_HISTORY)
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("next_seq", &self.next_seq)
            .field("history", &self.history)
            .field("retained", &self.events.len())
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: usize) -> Self {
        Self {
            next_seq: 0,
            history,
            events: VecDeque::new(),
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: impl FnMut(&E) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Records `payload`, hands it to the listener and returns its sequence number.
    pub fn emit(&mut self, payload: E) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        if let Some(listener) = self.listener.as_mut() {
            listener(&payload);
        }

        if self.history > 0 {
            while self.events.len() >= self.history {
                self.events.pop_front();
            }
            self.events.push_back(Event { seq, payload });
        }
        seq
    }

    /// Total number of events emitted, including ones no longer retained.
    pub fn emitted(&self) -> u64 {
        self.next_seq
    }

    pub fn events(&self) -> impl Iterator<Item = &Event<E>> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&Event<E>> {
        self.events.back()
    }

    pub fn drain(&mut self) -> Vec<Event<E>> {
        self.events.drain(..).collect()
    }
}
