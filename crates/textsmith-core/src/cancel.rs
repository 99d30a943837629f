//! Cooperative cancellation for in-flight dispatches.
//!
//! A [`CancelHandle`] owns the sender side of a `tokio::sync::watch` channel;
//! every [`CancelToken`] cloned from it observes the flag. Adapters race their
//! HTTP futures and retry sleeps against [`CancelToken::cancelled`].

use tokio::sync::watch;

/// Trigger side, kept by the caller.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Observer side, threaded through adapter calls.
#[derive(Clone, Debug)]
pub struct CancelToken {
    /// `None` for a token that can never fire.
    rx: Option<watch::Receiver<bool>>,
}

impl CancelHandle {
    pub fn new() -> (Self, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, CancelToken { rx: Some(rx) })
    }

    pub fn cancel(&self) {
        // send_replace never fails, even with every receiver gone.
        self.tx.send_replace(true);
    }

    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: Some(self.tx.subscribe()),
        }
    }
}

impl CancelToken {
    /// A token that is never cancelled.
    pub fn none() -> Self {
        Self { rx: None }
    }

    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Resolves once cancellation is requested. Pends forever otherwise.
    pub async fn cancelled(&self) {
        let Some(mut rx) = self.rx.clone() else {
            return std::future::pending().await;
        };
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Handle dropped without cancelling.
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::none()
    }
}
