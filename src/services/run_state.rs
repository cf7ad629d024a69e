use strum_macros::Display;

/// Stages of a single pipeline run, in order.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    Start,
    ConfigLoaded,
    Fetched,
    Written,
    Notified,
    Done,
    Aborted,
}

impl RunState {
    /// The state a successful step moves to. Terminal states have none.
    pub fn next(&self) -> Option<RunState> {
        match self {
            RunState::Start => Some(RunState::ConfigLoaded),
            RunState::ConfigLoaded => Some(RunState::Fetched),
            RunState::Fetched => Some(RunState::Written),
            RunState::Written => Some(RunState::Notified),
            RunState::Notified => Some(RunState::Done),
            RunState::Done | RunState::Aborted => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Aborted)
    }
}
