mod errors;
mod lending_manager;

pub use errors::{LendingError, Result};
pub use lending_manager::{LendingManager, LoanOutcome};
