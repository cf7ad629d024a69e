use serde::Deserialize;
use serde_json::Number;

use crate::{
    api::utils::{parse_date, parse_decimal, parse_text, parse_volume},
    error::FetchError,
    models::QuoteRecord,
};

/// Body of `GET /tickers/{symbol}/eod/latest`. Every field is optional here so
/// that a missing one is reported by name instead of as a serde error.
#[derive(Debug, Deserialize)]
pub struct MarketstackEodDto {
    open: Option<Number>,
    high: Option<Number>,
    low: Option<Number>,
    close: Option<Number>,
    volume: Option<Number>,
    symbol: Option<String>,
    date: Option<String>,
}

impl MarketstackEodDto {
    pub fn into_record(self) -> Result<QuoteRecord, FetchError> {
        Ok(QuoteRecord::new(
            parse_decimal("open", self.open)?,
            parse_decimal("high", self.high)?,
            parse_decimal("low", self.low)?,
            parse_decimal("close", self.close)?,
            parse_volume("volume", self.volume)?,
            parse_text("symbol", self.symbol)?,
            parse_date("date", self.date)?,
        ))
    }
}
