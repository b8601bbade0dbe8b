//! The shared, single-threaded cart-open flag.

use crate::error::ConfigurationError;
use crate::state::CartState;
use dioxus_logger::tracing::{debug, info};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn(CartState)>;

#[derive(Default)]
struct Inner {
    state: CartState,
    /// Bumped by every trigger and by teardown. Only the latest ticket resets.
    generation: u64,
    torn_down: bool,
    next_listener_id: u64,
    listeners: Vec<(u64, Listener)>,
    /// Transitions waiting for delivery; set while a fan-out is in progress.
    queued: VecDeque<CartState>,
    publishing: bool,
}

/// Proof that a trigger happened, handed to whoever schedules the reset.
///
/// A ticket only resets the signal that issued it, and only while no later
/// trigger has superseded it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetTicket {
    generation: u64,
}

impl ResetTicket {
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

/// A fire-and-auto-reset boolean shared by one provider subtree.
///
/// Clones share the same underlying state. Every transition is delivered
/// synchronously to all current subscribers. Once [`CartSignal::teardown`] has
/// run, reads and triggers fail with [`ConfigurationError`] and outstanding
/// tickets become no-ops.
#[derive(Clone, Default)]
pub struct CartSignal(Rc<RefCell<Inner>>);

impl CartSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value. No side effects.
    pub fn state(&self) -> Result<CartState, ConfigurationError> {
        let inner = self.0.borrow();
        if inner.torn_down {
            return Err(ConfigurationError::outside_scope("state"));
        }
        Ok(inner.state)
    }

    /// Raises `should_open` and returns the ticket the auto-reset must present.
    ///
    /// Subscribers are notified only on the false -> true transition; a
    /// trigger while already open just supersedes the previous ticket.
    pub fn trigger_open(&self) -> Result<ResetTicket, ConfigurationError> {
        let (ticket, changed) = {
            let mut inner = self.0.borrow_mut();
            if inner.torn_down {
                drop(inner);
                return Err(ConfigurationError::outside_scope("trigger_open"));
            }
            inner.generation += 1;
            let changed = !inner.state.should_open;
            inner.state = CartState::OPEN;
            (
                ResetTicket {
                    generation: inner.generation,
                },
                changed,
            )
        };

        if changed {
            debug!("cart signal raised (generation {})", ticket.generation);
            self.publish(CartState::OPEN);
        } else {
            debug!("cart signal re-armed (generation {})", ticket.generation);
        }
        Ok(ticket)
    }

    /// Lowers `should_open` if `ticket` is still the latest one.
    ///
    /// Returns `false` for stale tickets and after teardown.
    pub fn expire(&self, ticket: ResetTicket) -> bool {
        {
            let mut inner = self.0.borrow_mut();
            if inner.torn_down
                || ticket.generation != inner.generation
                || !inner.state.should_open
            {
                return false;
            }
            inner.state = CartState::CLOSED;
        }

        debug!("cart signal reset (generation {})", ticket.generation);
        self.publish(CartState::CLOSED);
        true
    }

    /// Registers `listener` for every future transition.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or the signal is torn down.
    pub fn subscribe(&self, listener: impl Fn(CartState) + 'static) -> Subscription {
        let mut inner = self.0.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        if !inner.torn_down {
            inner.listeners.push((id, Rc::new(listener)));
        }
        Subscription {
            signal: Rc::downgrade(&self.0),
            id,
        }
    }

    /// Ends the owning scope. Idempotent.
    pub fn teardown(&self) {
        let listeners = {
            let mut inner = self.0.borrow_mut();
            if inner.torn_down {
                return;
            }
            inner.torn_down = true;
            inner.generation += 1;
            std::mem::take(&mut inner.listeners)
        };
        info!(
            "cart signal torn down, dropping {} subscriber(s)",
            listeners.len()
        );
        // listeners may own subscriptions to this signal; drop them unborrowed
        drop(listeners);
    }

    pub fn is_torn_down(&self) -> bool {
        self.0.borrow().torn_down
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.borrow().listeners.len()
    }

    /// Delivers `state` to every subscriber, in transition order.
    ///
    /// A listener that causes another transition while being notified only
    /// queues it; the queue is drained after the current value has reached
    /// every subscriber of the snapshot.
    fn publish(&self, state: CartState) {
        {
            let mut inner = self.0.borrow_mut();
            inner.queued.push_back(state);
            if inner.publishing {
                return;
            }
            inner.publishing = true;
        }

        loop {
            let next = {
                let mut inner = self.0.borrow_mut();
                if inner.torn_down {
                    inner.queued.clear();
                }
                match inner.queued.pop_front() {
                    Some(next) => Some((
                        next,
                        inner
                            .listeners
                            .iter()
                            .map(|(_, listener)| Rc::clone(listener))
                            .collect::<Vec<Listener>>(),
                    )),
                    None => {
                        inner.publishing = false;
                        None
                    }
                }
            };
            let Some((next, listeners)) = next else {
                break;
            };

            for listener in listeners {
                if self.0.borrow().torn_down {
                    break;
                }
                listener(next);
            }
        }
    }
}

impl PartialEq for CartSignal {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CartSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.borrow();
        f.debug_struct("CartSignal")
            .field("state", &inner.state)
            .field("generation", &inner.generation)
            .field("torn_down", &inner.torn_down)
            .field("subscribers", &inner.listeners.len())
            .finish()
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    signal: Weak<RefCell<Inner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.signal.upgrade() {
            inner
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}
