//! Provider scope for hosts that do not bring their own context mechanism.
//!
//! A [`CartScope`] owns one [`CartSignal`] for as long as it lives. Code that
//! has a [`CartHandle`] uses it directly; code deeper in the call tree can
//! reach the innermost entered scope through [`current`], [`get_state`] and
//! [`trigger_open`], which fail with [`ConfigurationError`] when no scope is
//! entered on this thread.

use crate::auto_reset::AutoReset;
use crate::error::ConfigurationError;
use crate::signal::{CartSignal, ResetTicket, Subscription};
use crate::state::CartState;
use dioxus_logger::tracing::info;
use futures::channel::mpsc::{self, UnboundedSender};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::time::Duration;

thread_local! {
    static PROVIDERS: RefCell<Vec<CartHandle>> = const { RefCell::new(Vec::new()) };
}

/// Producer/consumer access to a scope's signal.
#[derive(Clone, Debug)]
pub struct CartHandle {
    signal: CartSignal,
    tickets: UnboundedSender<ResetTicket>,
}

impl CartHandle {
    pub fn state(&self) -> Result<CartState, ConfigurationError> {
        self.signal.state()
    }

    /// Raises the signal and hands the reset ticket to the scope's driver.
    ///
    /// Fails without touching the signal when the driver returned by
    /// [`CartScope::new`] has been dropped, since nothing would lower it.
    pub fn trigger_open(&self) -> Result<(), ConfigurationError> {
        self.signal.state()?;
        if self.tickets.is_closed() {
            return Err(ConfigurationError::reset_not_running("trigger_open"));
        }
        let ticket = self.signal.trigger_open()?;
        if self.tickets.unbounded_send(ticket).is_err() {
            self.signal.expire(ticket);
            return Err(ConfigurationError::reset_not_running("trigger_open"));
        }
        Ok(())
    }

    pub fn subscribe(&self, listener: impl Fn(CartState) + 'static) -> Subscription {
        self.signal.subscribe(listener)
    }

    pub fn signal(&self) -> &CartSignal {
        &self.signal
    }
}

/// Owns a signal for the lifetime of a subtree. Dropping it tears the signal
/// down and stops the auto-reset driver.
#[derive(Debug)]
pub struct CartScope {
    handle: CartHandle,
}

impl CartScope {
    /// Creates the scope and the driver that the host must spawn on its
    /// event loop.
    #[must_use = "the AutoReset driver must be spawned or triggers will fail"]
    pub fn new(reset_delay: Duration) -> (Self, AutoReset) {
        let signal = CartSignal::new();
        let (tickets, rx) = mpsc::unbounded();
        info!("cart provider scope created, reset delay {:?}", reset_delay);
        let scope = Self {
            handle: CartHandle {
                signal: signal.clone(),
                tickets,
            },
        };
        (scope, AutoReset::new(signal, reset_delay, rx))
    }

    pub fn handle(&self) -> CartHandle {
        self.handle.clone()
    }

    /// Makes this scope the innermost provider on the current thread until
    /// the guard is dropped.
    pub fn enter(&self) -> EnteredScope<'_> {
        let depth = PROVIDERS.with(|providers| {
            let mut providers = providers.borrow_mut();
            providers.push(self.handle.clone());
            providers.len() - 1
        });
        EnteredScope {
            depth,
            _scope: PhantomData,
        }
    }
}

impl Drop for CartScope {
    fn drop(&mut self) {
        self.handle.signal.teardown();
        self.handle.tickets.close_channel();
    }
}

/// Guard returned by [`CartScope::enter`].
///
/// Guards must be dropped in the reverse order they were created.
#[must_use = "the scope is exited as soon as the guard is dropped"]
pub struct EnteredScope<'a> {
    depth: usize,
    // borrows the scope and pins the guard to the thread it entered on
    _scope: PhantomData<(&'a CartScope, *const ())>,
}

impl Drop for EnteredScope<'_> {
    fn drop(&mut self) {
        PROVIDERS.with(|providers| {
            let mut providers = providers.borrow_mut();
            debug_assert_eq!(
                providers.len(),
                self.depth + 1,
                "cart scopes exited out of order"
            );
            providers.truncate(self.depth);
        });
    }
}

/// The innermost entered scope on this thread.
pub fn current() -> Result<CartHandle, ConfigurationError> {
    lookup("current")
}

/// Reads the innermost scope's signal.
pub fn get_state() -> Result<CartState, ConfigurationError> {
    lookup("get_state")?.state()
}

/// Triggers the innermost scope's signal.
pub fn trigger_open() -> Result<(), ConfigurationError> {
    lookup("trigger_open")?.trigger_open()
}

fn lookup(operation: &'static str) -> Result<CartHandle, ConfigurationError> {
    PROVIDERS
        .with(|providers| providers.borrow().last().cloned())
        .ok_or_else(|| ConfigurationError::outside_scope(operation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_RESET_DELAY;
    use tokio::task::{self, LocalSet};
    use tokio::time;

    async fn settle() {
        for _ in 0..8 {
            task::yield_now().await;
        }
    }

    #[test]
    fn free_functions_fail_without_scope() {
        assert_eq!(
            get_state(),
            Err(ConfigurationError::OutsideProviderScope {
                operation: "get_state"
            })
        );
        assert_eq!(
            trigger_open(),
            Err(ConfigurationError::OutsideProviderScope {
                operation: "trigger_open"
            })
        );
        assert!(current().is_err());
    }

    #[test]
    fn failed_trigger_leaves_other_scopes_untouched() {
        let (scope, _driver) = CartScope::new(DEFAULT_RESET_DELAY);
        let handle = scope.handle();

        assert!(trigger_open().is_err());
        assert_eq!(handle.state(), Ok(CartState::CLOSED));
    }

    #[test]
    fn entered_scope_serves_free_functions() {
        let (scope, _driver) = CartScope::new(DEFAULT_RESET_DELAY);
        {
            let _entered = scope.enter();
            assert_eq!(get_state(), Ok(CartState::CLOSED));
            trigger_open().unwrap();
            assert_eq!(get_state(), Ok(CartState::OPEN));
        }
        assert!(get_state().is_err());
        assert_eq!(scope.handle().state(), Ok(CartState::OPEN));
    }

    #[test]
    fn innermost_scope_wins() {
        let (outer, _outer_driver) = CartScope::new(DEFAULT_RESET_DELAY);
        let (inner, _inner_driver) = CartScope::new(DEFAULT_RESET_DELAY);

        let _outer_guard = outer.enter();
        {
            let _inner_guard = inner.enter();
            trigger_open().unwrap();
        }

        assert_eq!(inner.handle().state(), Ok(CartState::OPEN));
        assert_eq!(outer.handle().state(), Ok(CartState::CLOSED));
        assert_eq!(current().unwrap().signal(), outer.handle().signal());
    }

    #[test]
    fn dropped_scope_rejects_leftover_handles() {
        let (scope, _driver) = CartScope::new(DEFAULT_RESET_DELAY);
        let handle = scope.handle();
        drop(scope);

        assert!(handle.state().is_err());
        assert!(handle.trigger_open().is_err());
    }

    #[test]
    fn trigger_without_driver_fails_and_stays_closed() {
        let (scope, driver) = CartScope::new(DEFAULT_RESET_DELAY);
        let handle = scope.handle();
        drop(driver);

        assert_eq!(
            handle.trigger_open(),
            Err(ConfigurationError::ResetNotRunning {
                operation: "trigger_open"
            })
        );
        assert_eq!(handle.state(), Ok(CartState::CLOSED));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "cart scopes exited out of order")]
    fn exiting_outer_scope_first_is_caught() {
        let (outer, _outer_driver) = CartScope::new(DEFAULT_RESET_DELAY);
        let (inner, _inner_driver) = CartScope::new(DEFAULT_RESET_DELAY);

        let outer_guard = outer.enter();
        let _inner_guard = inner.enter();
        drop(outer_guard);
    }

    #[tokio::test(start_paused = true)]
    async fn open_then_auto_reset_after_one_hundred_ms() {
        LocalSet::new()
            .run_until(async {
                let (scope, driver) = CartScope::new(DEFAULT_RESET_DELAY);
                task::spawn_local(driver.run(time::sleep));
                settle().await;

                let _entered = scope.enter();
                assert_eq!(get_state(), Ok(CartState { should_open: false }));

                trigger_open().unwrap();
                assert_eq!(get_state(), Ok(CartState { should_open: true }));

                settle().await;
                time::advance(Duration::from_millis(100)).await;
                settle().await;
                assert_eq!(get_state(), Ok(CartState { should_open: false }));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_scope_cancels_pending_reset() {
        LocalSet::new()
            .run_until(async {
                let (scope, driver) = CartScope::new(DEFAULT_RESET_DELAY);
                let handle = scope.handle();
                let resets = std::rc::Rc::new(std::cell::Cell::new(0));
                let counter = std::rc::Rc::clone(&resets);
                let _sub = handle.subscribe(move |s| {
                    if !s.should_open {
                        counter.set(counter.get() + 1);
                    }
                });
                let running = task::spawn_local(driver.run(time::sleep));
                settle().await;

                handle.trigger_open().unwrap();
                settle().await;
                drop(scope);

                // the driver sees the closed channel and exits without resetting
                running.await.unwrap();
                time::advance(Duration::from_millis(200)).await;
                assert_eq!(resets.get(), 0);
                assert!(handle.signal().is_torn_down());
            })
            .await;
    }
}
