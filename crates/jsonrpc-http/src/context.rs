//! Per-call cancellation and deadlines.
//!
//! A `CallContext` is passed to every call. The HTTP exchange races against
//! it; whichever fires first (cancel signal or deadline) drops the in-flight
//! request future, which closes the underlying connection.

use std::future::pending;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::RpcClientError;

/// Cancellation signal plus optional deadline for a call.
///
/// Cheap to clone; clones observe the same cancel signal.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Handle that cancels every context derived from [`CallContext::with_cancel`].
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl CallContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Expire `timeout` from now. An earlier existing deadline is kept.
    ///
    /// A timeout too large to represent as an instant adds no deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Expire at `deadline`. An earlier existing deadline is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Attach a fresh cancel signal, replacing any previous one.
    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        self.cancel = Some(rx);
        (self, CancelHandle { tx })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Why the context is already done, if it is.
    pub fn err(&self) -> Option<RpcClientError> {
        if self.cancel.as_ref().is_some_and(|rx| *rx.borrow()) {
            return Some(RpcClientError::Cancelled);
        }
        if self.deadline.is_some_and(|d| d <= Instant::now()) {
            return Some(RpcClientError::DeadlineExceeded);
        }
        None
    }

    /// Resolves once the context is cancelled or its deadline passes.
    ///
    /// Never resolves for a background context, or after the `CancelHandle`
    /// is dropped without cancelling and no deadline is set.
    pub async fn done(&self) -> RpcClientError {
        let cancelled = async {
            if let Some(mut rx) = self.cancel.clone() {
                let signalled = rx.wait_for(|cancelled| *cancelled).await.is_ok();
                if signalled {
                    return;
                }
            }
            pending::<()>().await
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => RpcClientError::Cancelled,
            _ = expired => RpcClientError::DeadlineExceeded,
        }
    }
}
