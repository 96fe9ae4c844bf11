//! Owned client-side views over the collection store.

mod roster;
mod stats;
mod students;

pub use roster::StudentRoster;
pub use stats::{RefreshOutcome, StatsState, StatsView};
pub use students::StudentsView;
