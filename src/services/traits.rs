use async_trait::async_trait;

use crate::{
    error::{FetchError, NotifyError, PipelineError},
    models::QuoteRecord,
};

/// Produces the one quote a run loads.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_latest(&self) -> Result<QuoteRecord, FetchError>;
}

/// Appends a quote as a new row and returns the number of rows inserted.
///
/// Fails with [`PipelineError::Connection`] when nothing could be written and
/// [`PipelineError::Write`] when the insert was rolled back.
#[async_trait]
pub trait QuoteSink: Send + Sync {
    async fn append(&self, quote: &QuoteRecord) -> Result<u64, PipelineError>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self) -> Result<(), NotifyError>;
}
