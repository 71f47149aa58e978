//! Scoped, single-threaded event subscriptions.
//!
//! # Responsibility
//! - Let presentation code observe controller changes explicitly.
//! - Tie listener lifetime to a guard value instead of ambient globals.
//!
//! # Invariants
//! - Dropping a `Subscription` unregisters its listener exactly once.
//! - Subscribing or dropping a guard from inside a listener is safe; the
//!   change takes effect for the next emit.
//! - Listeners are invoked in subscription order.
//! - A panicking listener leaves every registration in place.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

type Listener<E> = Box<dyn FnMut(&E)>;

struct HubInner<E> {
    listeners: BTreeMap<u64, Listener<E>>,
    next_id: u64,
    dispatching: bool,
    removed_during_dispatch: Vec<u64>,
}

/// Observer registry for events of type `E`.
pub struct EventHub<E> {
    inner: Rc<RefCell<HubInner<E>>>,
}

impl<E: 'static> Default for EventHub<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> EventHub<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HubInner {
                listeners: BTreeMap::new(),
                next_id: 0,
                dispatching: false,
                removed_during_dispatch: Vec::new(),
            })),
        }
    }

    /// Registers `listener` until the returned guard is dropped.
    #[must_use = "dropping the subscription immediately unregisters the listener"]
    pub fn subscribe(&self, listener: impl FnMut(&E) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, Box::new(listener));

        let weak: Weak<RefCell<HubInner<E>>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let mut inner = inner.borrow_mut();
                    inner.listeners.remove(&id);
                    if inner.dispatching {
                        inner.removed_during_dispatch.push(id);
                    }
                }
            })),
        }
    }

    /// Delivers `event` to every registered listener.
    ///
    /// An emit issued from inside a listener is dropped: the listeners are
    /// checked out for the outer dispatch.
    pub fn emit(&self, event: &E) {
        let active = {
            let mut inner = self.inner.borrow_mut();
            if inner.dispatching {
                return;
            }
            inner.dispatching = true;
            std::mem::take(&mut inner.listeners)
        };

        let mut dispatch = Dispatch {
            inner: self.inner.as_ref(),
            active,
        };
        for listener in dispatch.active.values_mut() {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Checked-out listeners of one dispatch; returned to the hub on drop,
/// including when a listener unwinds.
struct Dispatch<'hub, E> {
    inner: &'hub RefCell<HubInner<E>>,
    active: BTreeMap<u64, Listener<E>>,
}

impl<E> Drop for Dispatch<'_, E> {
    fn drop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        let mut active = std::mem::take(&mut self.active);
        for id in std::mem::take(&mut inner.removed_during_dispatch) {
            active.remove(&id);
        }
        let added = std::mem::take(&mut inner.listeners);
        active.extend(added);
        inner.listeners = active;
        inner.dispatching = false;
    }
}

/// Registration guard returned by [`EventHub::subscribe`].
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Explicit teardown, equivalent to dropping the guard.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::EventHub;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn dropping_guard_unregisters_listener() {
        let hub = EventHub::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let guard = hub.subscribe(move |value| sink.borrow_mut().push(*value));
        hub.emit(&1);
        drop(guard);
        hub.emit(&2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn guard_dropped_inside_listener_takes_effect_after_dispatch() {
        let hub = EventHub::<u32>::new();
        let slot: Rc<RefCell<Option<super::Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(RefCell::new(0));

        let slot_in_listener = Rc::clone(&slot);
        let calls_in_listener = Rc::clone(&calls);
        let guard = hub.subscribe(move |_| {
            *calls_in_listener.borrow_mut() += 1;
            slot_in_listener.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(guard);

        hub.emit(&1);
        hub.emit(&2);
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn panicking_listener_does_not_lose_registrations() {
        let hub = EventHub::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _failing = hub.subscribe(|value| {
            if *value == 1 {
                panic!("listener failure");
            }
        });
        let sink = Rc::clone(&seen);
        let _recording = hub.subscribe(move |value| sink.borrow_mut().push(*value));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| hub.emit(&1)));
        assert!(result.is_err());

        hub.emit(&2);
        assert_eq!(*seen.borrow(), vec![2]);
        assert_eq!(hub.listener_count(), 2);
    }

    #[test]
    fn guard_outliving_hub_is_harmless() {
        let hub = EventHub::<u32>::new();
        let guard = hub.subscribe(|_| {});
        drop(hub);
        guard.cancel();
    }
}
