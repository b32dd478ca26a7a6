//! External cancellation plumbing.

use std::sync::Arc;
use tokio::sync::watch;

/// A cloneable cancellation handle.
///
/// The generation client races every backend call and every backoff
/// wait against this signal; once fired, the in-flight operation
/// surfaces a distinct cancelled state instead of a generation error.
///
/// # Examples
///
/// ```
/// use crammer_client::CancelSignal;
///
/// let signal = CancelSignal::new();
/// let handle = signal.clone();
/// handle.cancel();
/// assert!(signal.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancelSignal {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl CancelSignal {
    /// Creates an unfired signal.
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Fire the signal. Idempotent; wakes every waiter.
    pub fn cancel(&self) {
        let _ = self.sender.send(true);
    }

    /// Whether the signal has fired.
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once the signal fires. Resolves immediately if it
    /// already has.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            // Sender gone without firing; cancellation can no longer
            // happen, so park forever and let the raced branch win.
            std::future::pending::<()>().await;
        }
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fires_across_clones() {
        let signal = CancelSignal::new();
        let clone = signal.clone();
        assert!(!clone.is_cancelled());

        signal.cancel();
        assert!(clone.is_cancelled());
        // Must resolve promptly once fired.
        clone.cancelled().await;
    }
}
