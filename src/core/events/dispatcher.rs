//=========================================================================
// Event Dispatcher
//=========================================================================
//
// Ordered fan-out of game events to listeners and channel subscribers.
//
// Architecture:
//   Game ──dispatch(&GameEvent)──┬─→ listeners (FnMut, registration order)
//                                └─→ subscribers (crossbeam Sender<GameEvent>)
//
// Listeners run synchronously inside the frame. Subscribers receive copies
// through unbounded channels and can drain them whenever they like; the
// channel preserves firing order. Disconnected subscribers are pruned on
// the next dispatch.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::GameEvent;

//=== ListenerId ==========================================================

/// Handle returned by [`EventDispatcher::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&GameEvent)>;

//=== EventDispatcher =====================================================

/// Delivers [`GameEvent`]s in firing order.
pub struct EventDispatcher {
    listeners: Vec<(ListenerId, Listener)>,
    subscribers: Vec<Sender<GameEvent>>,
    next_id: u64,
}

impl EventDispatcher {
    /// Creates a dispatcher with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a synchronous listener, called in registration order.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        before != self.listeners.len()
    }

    /// Opens a channel that receives a copy of every future event.
    ///
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    //--- Dispatch ---------------------------------------------------------

    /// Fires an event to every listener, then to every live subscriber.
    pub fn dispatch(&mut self, event: &GameEvent) {
        trace!("Dispatching {} event", event.label());

        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }

        let before = self.subscribers.len();
        self.subscribers.retain(|tx| tx.send(*event).is_ok());
        if self.subscribers.len() != before {
            debug!(
                "Dropped {} disconnected event subscriber(s)",
                before - self.subscribers.len()
            );
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn fixed(count: u64) -> GameEvent {
        GameEvent::BeforeFixedUpdate { count }
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();

        let first = Rc::clone(&log);
        dispatcher.add_listener(move |_| first.borrow_mut().push("first"));
        let second = Rc::clone(&log);
        dispatcher.add_listener(move |_| second.borrow_mut().push("second"));

        dispatcher.dispatch(&fixed(0));
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let hits = Rc::new(RefCell::new(0));
        let mut dispatcher = EventDispatcher::new();

        let counter = Rc::clone(&hits);
        let id = dispatcher.add_listener(move |_| *counter.borrow_mut() += 1);

        assert!(dispatcher.remove_listener(id));
        assert!(!dispatcher.remove_listener(id));

        dispatcher.dispatch(&fixed(0));
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn subscribers_receive_events_in_order() {
        let mut dispatcher = EventDispatcher::new();
        let rx = dispatcher.subscribe();

        dispatcher.dispatch(&fixed(1));
        dispatcher.dispatch(&fixed(2));

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received, vec![fixed(1), fixed(2)]);
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let mut dispatcher = EventDispatcher::new();
        let rx = dispatcher.subscribe();
        let _kept = dispatcher.subscribe();
        assert_eq!(dispatcher.subscriber_count(), 2);

        drop(rx);
        dispatcher.dispatch(&fixed(0));
        assert_eq!(dispatcher.subscriber_count(), 1);
    }
}
