//! Request cancellation
//!
//! An [`AbortController`] owns the right to cancel; every [`AbortSignal`]
//! cloned from it observes the cancellation.

use tokio::sync::watch;

/// Owning side of a cancellation pair
#[derive(Debug)]
pub struct AbortController {
    tx: watch::Sender<bool>,
}

impl AbortController {
    /// Create a controller and its signal
    pub fn new() -> (Self, AbortSignal) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, AbortSignal { rx })
    }

    /// Abort every request watching this controller's signal
    pub fn abort(&self) {
        self.tx.send_replace(true);
    }

    /// Whether `abort` has been called
    pub fn is_aborted(&self) -> bool {
        *self.tx.borrow()
    }

    /// Another signal for this controller
    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            rx: self.tx.subscribe(),
        }
    }
}

/// Observing side of a cancellation pair
#[derive(Debug, Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<bool>,
}

impl AbortSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Whether the owning controller has aborted
    pub fn is_aborted(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the owning controller aborts
    ///
    /// Pends forever if the controller is dropped without aborting.
    pub async fn aborted(&self) {
        let mut rx = self.rx.clone();
        let closed = rx.wait_for(|aborted| *aborted).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_abort_reaches_all_signals() {
        let (controller, signal) = AbortController::new();
        let other = controller.signal();
        assert!(!signal.is_aborted());

        controller.abort();

        assert!(controller.is_aborted());
        assert!(signal.is_aborted());
        assert!(other.is_aborted());
        tokio::time::timeout(Duration::from_secs(1), signal.aborted())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_never_signal_does_not_fire() {
        let signal = AbortSignal::never();
        assert!(!signal.is_aborted());
        let waited = tokio::time::timeout(Duration::from_millis(20), signal.aborted()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_dropped_controller_does_not_fire() {
        let (controller, signal) = AbortController::new();
        drop(controller);
        let waited = tokio::time::timeout(Duration::from_millis(20), signal.aborted()).await;
        assert!(waited.is_err());
    }
}
