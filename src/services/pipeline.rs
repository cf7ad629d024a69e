use std::path::Path;

use derive_getters::Getters;
use tracing::{error, info};

use super::{Notifier, QuoteSink, QuoteSource, RunState};
use crate::{
    api::MarketstackApi, config::AppConfig, db::PostgresWarehouse, error::PipelineError,
    notify::SmtpNotifier,
};

/// Outcome of one run. The fetched quote is not kept.
#[derive(Debug, Getters)]
pub struct RunReport {
    state: RunState,
    aborted_from: Option<RunState>,
    error: Option<PipelineError>,
    rows_written: u64,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.state == RunState::Done
    }
}

/// Tracks the state machine of a run and logs every transition.
struct Run {
    state: RunState,
    rows_written: u64,
}

impl Run {
    fn start() -> Self {
        info!(state = %RunState::Start, "Pipeline run started");
        Self {
            state: RunState::Start,
            rows_written: 0,
        }
    }

    fn advance(&mut self) {
        if let Some(next) = self.state.next() {
            info!(from = %self.state, state = %next, "Step completed");
            self.state = next;
        }
    }

    fn abort(self, error: PipelineError) -> RunReport {
        error!(
            state = %self.state,
            kind = error.kind(),
            rows_written = self.rows_written,
            "Pipeline run aborted: {}",
            error
        );

        RunReport {
            state: RunState::Aborted,
            aborted_from: Some(self.state),
            error: Some(error),
            rows_written: self.rows_written,
        }
    }

    fn finish(mut self) -> RunReport {
        self.advance();
        info!(state = %self.state, rows_written = self.rows_written, "Pipeline run finished");

        RunReport {
            state: self.state,
            aborted_from: None,
            error: None,
            rows_written: self.rows_written,
        }
    }
}

/// Fetch, load, notify. One quote per run, strictly in that order.
pub struct Pipeline<S, W, N> {
    source: S,
    sink: W,
    notifier: N,
}

impl Pipeline<MarketstackApi, PostgresWarehouse, SmtpNotifier> {
    pub fn from_config(config: AppConfig) -> Result<Self, PipelineError> {
        let (api, database, smtp, email) = config.into_parts();
        Ok(Self::new(
            MarketstackApi::new(api)?,
            PostgresWarehouse::new(database),
            SmtpNotifier::new(smtp, email),
        ))
    }
}

impl<S, W, N> Pipeline<S, W, N>
where
    S: QuoteSource,
    W: QuoteSink,
    N: Notifier,
{
    pub fn new(source: S, sink: W, notifier: N) -> Self {
        Self {
            source,
            sink,
            notifier,
        }
    }

    /// Runs with configuration already in hand, so the run begins at `ConfigLoaded`.
    pub async fn execute(&self) -> RunReport {
        let mut run = Run::start();
        run.advance();
        self.drive(run).await
    }

    async fn drive(&self, mut run: Run) -> RunReport {
        let quote = match self.source.fetch_latest().await {
            Ok(quote) => quote,
            Err(e) => return run.abort(e.into()),
        };
        run.advance();

        match self.sink.append(&quote).await {
            Ok(rows) => run.rows_written += rows,
            Err(e) => return run.abort(e),
        }
        drop(quote);
        run.advance();

        // The row is committed at this point; a failed email does not undo it.
        if let Err(e) = self.notifier.notify().await {
            return run.abort(e.into());
        }
        run.advance();

        run.finish()
    }
}

/// Loads configuration from `path` and runs the production pipeline once.
pub async fn run_from_file(path: &Path, db_section: &str) -> RunReport {
    let mut run = Run::start();

    let config = match AppConfig::load(path, db_section) {
        Ok(config) => config,
        Err(e) => return run.abort(e.into()),
    };
    run.advance();

    match Pipeline::from_config(config) {
        Ok(pipeline) => pipeline.drive(run).await,
        Err(e) => run.abort(e),
    }
}
