pub mod init;
pub mod utils;
pub mod write;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use tracing::info;

pub use utils::TargetTable;

use crate::{config::DatabaseConfig, error::PipelineError, models::QuoteRecord, services::QuoteSink};

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Postgres-protocol warehouse (Postgres or Redshift). Every append opens its
/// own connection and closes it before returning.
#[derive(Clone, Debug)]
pub struct PostgresWarehouse {
    config: DatabaseConfig,
}

impl PostgresWarehouse {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    pub fn target(&self) -> TargetTable {
        TargetTable::new(self.config.schema().clone(), self.config.table().clone())
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(self.config.host())
            .port(*self.config.port())
            .username(self.config.user())
            .password(self.config.pwd())
            .database(self.config.dbname())
            .options([("search_path", self.config.schema().as_str())])
    }

    pub async fn connect(&self) -> Result<PgPool, PipelineError> {
        info!(
            url = %self.config.redacted_url(),
            schema = %self.config.schema(),
            "Connecting to warehouse"
        );

        let connection = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(CONNECT_TIMEOUT)
            .connect_with(self.connect_options())
            .await
            .map_err(PipelineError::Connection)?;

        info!("Warehouse connection established");
        Ok(connection)
    }

    pub async fn load_quote(&self, quote: &QuoteRecord) -> Result<u64, PipelineError> {
        let connection = self.connect().await?;
        let target = self.target();

        let result = write::append_quote(quote, &target, &connection).await;
        connection.close().await;

        let rows = result.map_err(PipelineError::Write)?;
        info!(table = %target.qualified(), rows, "Quote appended");

        Ok(rows)
    }
}

#[async_trait]
impl QuoteSink for PostgresWarehouse {
    async fn append(&self, quote: &QuoteRecord) -> Result<u64, PipelineError> {
        self.load_quote(quote).await
    }
}
