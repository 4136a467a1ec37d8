//! Single-threaded observable value.

use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback<T> = Rc<RefCell<Box<dyn FnMut(&T)>>>;

struct Shared<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(SubscriptionId, Callback<T>)>>,
    next_id: Cell<u64>,
}

/// Readable, change-notifying value cell.
///
/// Clones share the same value. Subscribers are called after the value is
/// replaced, so reading any cell from inside a callback is safe. A callback
/// that is already running (nested notification) is skipped rather than
/// re-entered.
pub struct Observable<T> {
    shared: Rc<Shared<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: Debug> Debug for Observable<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.shared.value.borrow())
            .field("subscribers", &self.shared.subscribers.borrow().len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                value: RefCell::new(initial),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.shared.value.borrow().clone()
    }

    /// Registers `callback` for future changes. The current value is not
    /// replayed.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.shared.next_id.get());
        self.shared.next_id.set(id.0 + 1);
        let callback: Box<dyn FnMut(&T)> = Box::new(callback);
        self.shared
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(callback))));
        id
    }

    /// Removes one subscriber; returns `false` when it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.shared.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.borrow().len()
    }

    /// Replaces the value and notifies on change.
    #[cfg(test)]
    pub(crate) fn set(&self, value: T) -> bool {
        let changed = self.store(value);
        if changed {
            self.notify();
        }
        changed
    }

    /// Replaces the value without notifying; returns whether it changed.
    pub(crate) fn store(&self, value: T) -> bool {
        let mut current = self.shared.value.borrow_mut();
        if *current == value {
            return false;
        }
        *current = value;
        true
    }

    /// Pushes the current value to every subscriber.
    pub(crate) fn notify(&self) {
        let snapshot = self.get();
        let callbacks: Vec<(SubscriptionId, Callback<T>)> = self
            .shared
            .subscribers
            .borrow()
            .iter()
            .map(|(id, callback)| (*id, Rc::clone(callback)))
            .collect();

        for (id, callback) in callbacks {
            // An earlier callback may have unsubscribed this one.
            if !self.is_subscribed(id) {
                continue;
            }
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (&mut **callback)(&snapshot);
            }
        }
    }

    pub(crate) fn clear_subscribers(&self) {
        self.shared.subscribers.borrow_mut().clear();
    }

    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.shared
            .subscribers
            .borrow()
            .iter()
            .any(|(existing, _)| *existing == id)
    }
}
