//! The scheduled reset that lowers the cart signal after a fixed delay.

use crate::signal::{CartSignal, ResetTicket};
use dioxus_logger::tracing::debug;
use futures::channel::mpsc::UnboundedReceiver;
use futures::future::{self, Either};
use futures::StreamExt;
use std::future::Future;
use std::pin::pin;
use std::time::Duration;

enum Wake {
    Elapsed,
    Rearmed(ResetTicket),
    Closed,
}

/// Drives the auto-reset for one [`CartSignal`].
///
/// Tickets arrive over a channel, one per trigger. The timer is armed by the
/// first ticket and re-armed by every ticket that arrives before it fires, so
/// the signal lowers exactly `delay` after the most recent trigger.
///
/// The future is meant to be owned by the provider scope: dropping it cancels
/// the pending reset.
#[must_use = "the reset only happens while `run` is being polled"]
pub struct AutoReset {
    signal: CartSignal,
    delay: Duration,
    tickets: UnboundedReceiver<ResetTicket>,
}

impl AutoReset {
    pub fn new(
        signal: CartSignal,
        delay: Duration,
        tickets: UnboundedReceiver<ResetTicket>,
    ) -> Self {
        Self {
            signal,
            delay,
            tickets,
        }
    }

    /// Runs until the ticket channel closes or the signal is torn down.
    ///
    /// `sleep` is the host's timer, e.g. `tokio::time::sleep` natively or
    /// `gloo_timers::future::sleep` in the browser.
    pub async fn run<S, F>(mut self, sleep: S)
    where
        S: Fn(Duration) -> F,
        F: Future<Output = ()>,
    {
        let Some(mut armed) = self.tickets.next().await else {
            return;
        };

        loop {
            if self.signal.is_torn_down() {
                break;
            }

            let wake = {
                let timer = pin!(sleep(self.delay));
                match future::select(timer, self.tickets.next()).await {
                    Either::Left(_) => Wake::Elapsed,
                    Either::Right((Some(ticket), _)) => Wake::Rearmed(ticket),
                    Either::Right((None, _)) => Wake::Closed,
                }
            };

            match wake {
                Wake::Rearmed(ticket) => {
                    debug!(
                        "auto-reset re-armed for generation {}",
                        ticket.generation()
                    );
                    armed = ticket;
                }
                Wake::Elapsed => {
                    self.signal.expire(armed);
                    if self.signal.is_torn_down() {
                        break;
                    }
                    match self.tickets.next().await {
                        Some(ticket) => armed = ticket,
                        None => break,
                    }
                }
                Wake::Closed => break,
            }
        }
        debug!("auto-reset driver stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CartState;
    use futures::channel::mpsc;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tokio::task::{self, LocalSet};
    use tokio::time;

    const DELAY: Duration = Duration::from_millis(100);

    async fn settle() {
        for _ in 0..8 {
            task::yield_now().await;
        }
    }

    async fn advance(ms: u64) {
        time::advance(Duration::from_millis(ms)).await;
        settle().await;
    }

    fn spawn_driver(signal: &CartSignal) -> mpsc::UnboundedSender<ResetTicket> {
        let (tx, rx) = mpsc::unbounded();
        task::spawn_local(AutoReset::new(signal.clone(), DELAY, rx).run(time::sleep));
        tx
    }

    fn trigger(signal: &CartSignal, tx: &mpsc::UnboundedSender<ResetTicket>) {
        let ticket = signal.trigger_open().unwrap();
        tx.unbounded_send(ticket).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn resets_exactly_after_delay() {
        LocalSet::new()
            .run_until(async {
                let signal = CartSignal::new();
                let tx = spawn_driver(&signal);
                settle().await;

                trigger(&signal, &tx);
                settle().await;
                assert_eq!(signal.state(), Ok(CartState::OPEN));

                advance(99).await;
                assert_eq!(signal.state(), Ok(CartState::OPEN));

                advance(1).await;
                assert_eq!(signal.state(), Ok(CartState::CLOSED));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn retrigger_extends_open_window() {
        LocalSet::new()
            .run_until(async {
                let signal = CartSignal::new();
                let seen = Rc::new(RefCell::new(Vec::new()));
                let sink = Rc::clone(&seen);
                let _sub = signal.subscribe(move |s| sink.borrow_mut().push(s.should_open));
                let tx = spawn_driver(&signal);
                settle().await;

                trigger(&signal, &tx);
                settle().await;
                advance(60).await;

                trigger(&signal, &tx);
                settle().await;

                // past the first trigger's deadline, still inside the second's
                advance(60).await;
                assert_eq!(signal.state(), Ok(CartState::OPEN));

                advance(39).await;
                assert_eq!(signal.state(), Ok(CartState::OPEN));

                advance(1).await;
                assert_eq!(signal.state(), Ok(CartState::CLOSED));
                assert_eq!(*seen.borrow(), vec![true, false]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn opens_again_after_reset() {
        LocalSet::new()
            .run_until(async {
                let signal = CartSignal::new();
                let tx = spawn_driver(&signal);
                settle().await;

                trigger(&signal, &tx);
                settle().await;
                advance(100).await;
                assert_eq!(signal.state(), Ok(CartState::CLOSED));

                trigger(&signal, &tx);
                settle().await;
                assert_eq!(signal.state(), Ok(CartState::OPEN));
                advance(100).await;
                assert_eq!(signal.state(), Ok(CartState::CLOSED));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_channel_closes() {
        LocalSet::new()
            .run_until(async {
                let signal = CartSignal::new();
                let (tx, rx) = mpsc::unbounded();
                let driver = task::spawn_local(AutoReset::new(signal.clone(), DELAY, rx).run(time::sleep));

                trigger(&signal, &tx);
                drop(tx);

                // the pending reset is abandoned along with the channel
                driver.await.unwrap();
                assert_eq!(signal.state(), Ok(CartState::OPEN));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_during_pending_reset_is_silent() {
        LocalSet::new()
            .run_until(async {
                let signal = CartSignal::new();
                let (tx, rx) = mpsc::unbounded();
                let driver = task::spawn_local(AutoReset::new(signal.clone(), DELAY, rx).run(time::sleep));
                settle().await;

                trigger(&signal, &tx);
                settle().await;
                signal.teardown();
                advance(150).await;

                // the timer fired into a dead scope: no mutation, driver exits
                assert!(signal.is_torn_down());
                assert!(signal.state().is_err());
                driver.await.unwrap();
                drop(tx);
            })
            .await;
    }
}
