//! Per-operation cancellation and deadlines.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, SearchError};

/// Carries cancellation and an optional deadline through one operation.
///
/// Every store round trip of the operation runs through [`step`](Self::step),
/// which refuses to start once the context is cancelled or expired and
/// abandons an in-flight query when either happens.
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl OperationContext {
    /// A context that never expires and is cancelled only through its own token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-owned token; cancelling it cancels this operation.
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            cancel: token,
            deadline: None,
        }
    }

    /// Expire `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run one step of the operation under this context.
    pub async fn step<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let guarded = async {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => Err(SearchError::Cancelled),
                result = operation => result,
            }
        };

        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Err(SearchError::DeadlineExceeded),
            Some(deadline) => tokio::time::timeout_at(deadline, guarded)
                .await
                .map_err(|_| SearchError::DeadlineExceeded)?,
            None => guarded.await,
        }
    }
}
