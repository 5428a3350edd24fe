pub mod session;
pub mod suggestion_lookup;

pub use session::{SessionRepository, SessionRepositoryTrait};
pub use suggestion_lookup::SuggestionLookupTrait;
