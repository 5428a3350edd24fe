use std::sync::Arc;

use crate::config::Config;
use crate::repositories::{SessionRepositoryTrait, SuggestionLookupTrait};
use crate::services::{CutoffSweeper, SessionService};
use crate::utils::clock::Clock;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionService>,
    pub sweeper: Arc<CutoffSweeper>,
    pub repo: Arc<dyn SessionRepositoryTrait>,
    pub lookup: Arc<dyn SuggestionLookupTrait>,
    pub clock: Arc<dyn Clock>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn SessionRepositoryTrait>,
        lookup: Arc<dyn SuggestionLookupTrait>,
        clock: Arc<dyn Clock>,
        config: Config,
    ) -> Self {
        let sessions = Arc::new(SessionService::new(Arc::clone(&repo), Arc::clone(&clock)));
        let sweeper = Arc::new(CutoffSweeper::new(
            Arc::clone(&repo),
            Arc::clone(&clock),
            config.time_zone,
            config.cutoff_time,
        ));
        Self {
            sessions,
            sweeper,
            repo,
            lookup,
            clock,
            config,
        }
    }
}
