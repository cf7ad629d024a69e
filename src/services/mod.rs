pub mod pipeline;
pub mod run_state;
pub mod traits;

pub use pipeline::{Pipeline, RunReport, run_from_file};
pub use run_state::RunState;
pub use traits::{Notifier, QuoteSink, QuoteSource};
