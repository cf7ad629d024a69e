use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

/// One end-of-day quote, shaped the way it lands in the warehouse.
#[derive(Clone, Debug, Eq, PartialEq, Getters, new)]
pub struct QuoteRecord {
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: i64,
    symbol: String,
    date: NaiveDate,
}
