pub mod aggregate;
pub mod autofill;
pub mod session;
pub mod sweeper;
pub mod tracker;

pub use aggregate::{summarize_sessions, GroupTotals, WorkSummary};
pub use autofill::{AutofillCoordinator, AutofillOutcome};
pub use session::SessionService;
pub use sweeper::{CutoffSweeper, SweepFailure, SweepReport};
pub use tracker::{SessionTracker, TrackerSnapshot, TrackerState};
