//! Single-slot debounce timer

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};

/// Owns at most one pending sleep
///
/// Scheduling replaces (and aborts) the previous sleep. A sleep that already
/// fired before it was cancelled still delivers its message, so the receiver
/// must check the message's token.
#[derive(Debug, Default)]
pub(crate) struct DebounceTimer {
    pending: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Deliver `message` on `tx` after `delay`, replacing any pending delivery
    pub(crate) fn schedule<T>(&mut self, delay: Duration, tx: mpsc::UnboundedSender<T>, message: T)
    where
        T: Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the coordinator stopped
            let _ = tx.send(message);
        }));
    }

    /// Abort the pending delivery, if any
    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a delivery is scheduled and has not yet run
    #[cfg(test)]
    pub(crate) fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn delivers_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = DebounceTimer::new();

        timer.schedule(Duration::from_millis(500), tx, 1);
        assert!(timer.is_pending());

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_replaces_pending() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = DebounceTimer::new();

        timer.schedule(Duration::from_millis(500), tx.clone(), 1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        timer.schedule(Duration::from_millis(500), tx, 2);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(rx.try_recv().ok(), Some(2));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_delivery() {
        let (tx, mut rx) = mpsc::unbounded_channel::<u32>();
        let mut timer = DebounceTimer::new();

        timer.schedule(Duration::from_millis(500), tx, 1);
        timer.cancel();
        assert!(!timer.is_pending());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }
}
