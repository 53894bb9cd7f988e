//! Interrupting long waits.
//!
//! A blocking poll loop spends nearly all its time asleep, but it also makes
//! network calls which may take a while. Cancelling sets a flag, which can be
//! checked between steps, and sends a message on a channel, which wakes up
//! anybody sleeping in `Cancellation::wait`.

use crossbeam::channel::{self, after, never, Receiver, Sender, TrySendError};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use crate::prelude::*;

/// Used to cancel a `Cancellation`. Can be cloned and sent to other threads.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    sender: Sender<()>,
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Request cancellation. Calling this more than once has no further
    /// effect.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        match self.sender.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => {}
            Err(TrySendError::Disconnected(())) => {
                trace!("cancellation requested after the waiter went away");
            }
        }
    }
}

/// The receiving side of a cancellation request.
#[derive(Clone, Debug)]
pub struct Cancellation {
    receiver: Receiver<()>,
    cancelled: Arc<AtomicBool>,
}

impl Cancellation {
    /// Create a new cancellation, and a handle which can trigger it.
    pub fn new() -> (CancelHandle, Cancellation) {
        let (sender, receiver) = channel::bounded(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = CancelHandle {
            sender,
            cancelled: cancelled.clone(),
        };
        (handle, Cancellation { receiver, cancelled })
    }

    /// A cancellation which will never fire.
    pub fn never() -> Cancellation {
        Cancellation {
            receiver: never(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Has cancellation been requested? Never blocks, and stays `true` once
    /// it becomes `true`.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Create a cancellation which fires when the user presses Control-C.
    ///
    /// This spawns a background thread which lives until the signal arrives
    /// or the process exits.
    pub fn on_ctrl_c() -> Result<Cancellation> {
        let (handle, cancellation) = Cancellation::new();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("could not create signal-handling runtime")?;
        thread::Builder::new()
            .name("ctrl-c".to_owned())
            .spawn(move || match runtime.block_on(tokio::signal::ctrl_c()) {
                Ok(()) => {
                    debug!("received Control-C");
                    handle.cancel();
                }
                Err(err) => error!("could not listen for Control-C: {}", err),
            })
            .context("could not create signal-handling thread")?;
        Ok(cancellation)
    }

    /// Sleep for `duration`, returning early with `true` if we're cancelled.
    pub fn wait(&self, duration: Duration) -> bool {
        if self.is_cancelled() {
            return true;
        }
        let deadline = Instant::now() + duration;
        crossbeam::select! {
            recv(self.receiver) -> msg => match msg {
                Ok(()) => true,
                Err(_) => {
                    // Every handle was dropped, so nobody can cancel us now.
                    thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    false
                }
            },
            recv(after(duration)) -> _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_runs_to_completion() {
        let started = Instant::now();
        assert!(!Cancellation::never().wait(Duration::from_millis(20)));
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn cancel_interrupts_wait() {
        let (handle, cancellation) = Cancellation::new();
        handle.cancel();
        handle.cancel();
        let started = Instant::now();
        assert!(cancellation.wait(Duration::from_secs(60)));
        assert!(started.elapsed() < Duration::from_secs(30));
    }

    #[test]
    fn cancellation_is_sticky() {
        let (handle, cancellation) = Cancellation::new();
        let clone = cancellation.clone();
        assert!(!cancellation.is_cancelled());
        handle.cancel();
        assert!(cancellation.is_cancelled());
        assert!(cancellation.wait(Duration::from_secs(60)));
        assert!(cancellation.wait(Duration::from_secs(60)));
        assert!(clone.is_cancelled());
        assert!(clone.wait(Duration::from_secs(60)));
        assert!(!Cancellation::never().is_cancelled());
    }

    #[test]
    fn cancel_from_another_thread() {
        let (handle, cancellation) = Cancellation::new();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            handle.cancel();
        });
        assert!(cancellation.wait(Duration::from_secs(60)));
        canceller.join().expect("canceller panicked");
    }

    #[test]
    fn dropped_handle_does_not_cancel() {
        let (handle, cancellation) = Cancellation::new();
        drop(handle);
        let started = Instant::now();
        assert!(!cancellation.wait(Duration::from_millis(20)));
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
