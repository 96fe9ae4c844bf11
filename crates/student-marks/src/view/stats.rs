use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::client::CollectionClient;
use crate::records::MarkStats;

#[derive(Debug, Clone, PartialEq)]
pub enum StatsState {
    Loading,
    Ready(MarkStats),
    Failed(String),
}

/// Whether a refresh wrote its result into the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    Discarded,
}

/// Shared stats panel state. Clones observe the same state.
#[derive(Debug, Clone)]
pub struct StatsView {
    state: Arc<Mutex<StatsState>>,
}

impl Default for StatsView {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsView {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StatsState::Loading)),
        }
    }

    pub fn snapshot(&self) -> StatsState {
        self.lock().clone()
    }

    /// Fetch stats and apply them unless `cancel` fired first.
    ///
    /// Nothing is written before the request settles, and the token is re-checked under the
    /// state lock, so a view torn down mid-flight keeps whatever it showed before.
    pub async fn refresh(
        &self,
        client: &CollectionClient,
        cancel: &CancellationToken,
    ) -> RefreshOutcome {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return RefreshOutcome::Discarded,
            result = client.stats() => result,
        };

        let mut state = self.lock();
        if cancel.is_cancelled() {
            return RefreshOutcome::Discarded;
        }

        *state = match result {
            Ok(stats) => StatsState::Ready(stats),
            Err(err) => StatsState::Failed(err.to_string()),
        };
        RefreshOutcome::Applied
    }

    fn lock(&self) -> MutexGuard<'_, StatsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
