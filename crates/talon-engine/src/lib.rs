//! Search and evaluation for talon.

pub mod eval;
pub mod search;
pub mod time;

pub use eval::evaluate;
pub use search::control::{SearchControl, SharedSignals, Signal, StopSource};
pub use search::report::{ReportedScore, Reporter, SearchInfo};
pub use search::{SearchLimits, SearchOptions, SearchResult, Searcher};
pub use time::{limits_from_go, move_budget};
