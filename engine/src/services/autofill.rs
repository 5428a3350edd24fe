//! Debounced, cancellation-safe autofill lookups.
//!
//! One coordinator instance backs one input field. Every keystroke calls
//! `on_query_changed`; the coordinator guarantees at most one lookup per
//! debounce window and that a superseded request can never overwrite a newer
//! one. Staleness is decided by cancellation-token identity, not by shared
//! mutable flags: each query gets its own token, and a completed lookup
//! re-checks its token under the coordinator lock before emitting. A stale
//! success and a stale error are dropped the same way.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::error::AppError;
use crate::models::suggestion::{Suggestion, SuggestionKind};
use crate::repositories::SuggestionLookupTrait;

/// Result of the newest completed lookup.
#[derive(Debug)]
pub struct AutofillOutcome {
    pub kind: SuggestionKind,
    pub query: String,
    pub result: Result<Vec<Suggestion>, AppError>,
}

pub struct AutofillCoordinator {
    lookup: Arc<dyn SuggestionLookupTrait>,
    debounce: Duration,
    /// Parent of every per-query token; cancelled on drop so no orphaned
    /// lookup outlives the coordinator.
    root: CancellationToken,
    /// Token of the newest query. Supersession (cancel + replace) and the
    /// emit-side staleness check both run under this lock, so a stale task
    /// cannot slip its result out between being superseded and sending.
    current: Arc<Mutex<Option<CancellationToken>>>,
    outcomes: mpsc::UnboundedSender<AutofillOutcome>,
}

impl AutofillCoordinator {
    pub fn new(
        lookup: Arc<dyn SuggestionLookupTrait>,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<AutofillOutcome>) {
        let (outcomes, receiver) = mpsc::unbounded_channel();
        (
            Self {
                lookup,
                debounce,
                root: CancellationToken::new(),
                current: Arc::new(Mutex::new(None)),
                outcomes,
            },
            receiver,
        )
    }

    /// Called on every keystroke. Supersedes any pending or in-flight
    /// lookup and schedules a new one after the debounce delay.
    pub async fn on_query_changed(&self, kind: SuggestionKind, text: impl Into<String>) {
        let text = text.into();
        let mut current = self.current.lock().await;
        if let Some(previous) = current.take() {
            previous.cancel();
        }

        if text.trim().is_empty() {
            // Nothing to look up; report cleared suggestions immediately.
            let _ = self.outcomes.send(AutofillOutcome {
                kind,
                query: text,
                result: Ok(Vec::new()),
            });
            return;
        }

        let token = self.root.child_token();
        *current = Some(token.clone());
        drop(current);

        let lookup = Arc::clone(&self.lookup);
        let outcomes = self.outcomes.clone();
        let registry = Arc::clone(&self.current);
        let debounce = self.debounce;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(debounce) => {}
            }
            let result = lookup.lookup_by_prefix(kind, &text).await;

            let _guard = registry.lock().await;
            if token.is_cancelled() {
                // Superseded while the lookup was in flight; expected, not
                // an error, so neither a success nor a failure is surfaced.
                return;
            }
            if let Err(err) = &result {
                tracing::debug!(query = %text, error = %err, "autofill lookup failed");
            }
            // The receiver side may already be torn down; that only means
            // nobody is listening anymore.
            let _ = outcomes.send(AutofillOutcome {
                kind,
                query: text,
                result,
            });
        });
    }
}

impl Drop for AutofillCoordinator {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
