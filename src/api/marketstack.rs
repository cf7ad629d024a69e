use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::{
    api::{
        marketstack_dto::MarketstackEodDto,
        utils::{build_url, make_request, redact_access_key},
    },
    config::ApiConfig,
    error::FetchError,
    models::QuoteRecord,
    services::QuoteSource,
};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct MarketstackApi {
    client: Client,
    base_url: String,
    symbol: String,
    api_key: String,
}

impl MarketstackApi {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: ApiConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url().clone(),
            symbol: config.symbol().clone(),
            api_key: config.key().clone(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/eod/latest", self.symbol)
    }

    pub async fn get_latest_eod(&self) -> Result<QuoteRecord, FetchError> {
        let url = build_url(&self.base_url, &self.endpoint(), &self.api_key)?;
        info!(url = %redact_access_key(&url), "Fetching latest EOD quote");

        let res = make_request(&self.client, url).await?;
        let dto = serde_json::from_value::<MarketstackEodDto>(res)?;
        let quote = dto.into_record()?;

        info!(
            symbol = %quote.symbol(),
            date = %quote.date(),
            close = %quote.close(),
            "Quote fetched"
        );

        Ok(quote)
    }
}

#[async_trait]
impl QuoteSource for MarketstackApi {
    async fn fetch_latest(&self) -> Result<QuoteRecord, FetchError> {
        self.get_latest_eod().await
    }
}
