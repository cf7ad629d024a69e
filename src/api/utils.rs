use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde_json::{Number, Value};

use crate::error::FetchError;

pub const ACCESS_KEY_PARAM: &str = "access_key";

pub fn build_url(base_url: &str, endpoint: &str, api_key: &str) -> Result<Url, FetchError> {
    let raw = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    Url::parse_with_params(&raw, &[(ACCESS_KEY_PARAM, api_key)])
        .map_err(|e| FetchError::Url(format!("{}: {}", raw, e)))
}

/// Renders `url` with the access key replaced by `***`.
pub fn redact_access_key(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == ACCESS_KEY_PARAM {
                String::from("***")
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

pub async fn make_request(client: &Client, url: Url) -> Result<Value, FetchError> {
    // reqwest errors carry the full URL, access key included
    let res = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.without_url()))?;

    let status = res.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let text = res
        .text()
        .await
        .map_err(|e| FetchError::Network(e.without_url()))?;
    let data = serde_json::from_str::<Value>(&text)?;

    Ok(data)
}

pub fn parse_decimal(field: &'static str, value: Option<Number>) -> Result<Decimal, FetchError> {
    let text = value.ok_or(FetchError::MissingField(field))?.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| FetchError::InvalidField { field, value: text })
}

/// Marketstack reports volume as a float (`1000.0`); only integral values are accepted.
pub fn parse_volume(field: &'static str, value: Option<Number>) -> Result<i64, FetchError> {
    let number = value.ok_or(FetchError::MissingField(field))?;
    if let Some(volume) = number.as_i64() {
        return Ok(volume);
    }

    number
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
        .ok_or_else(|| FetchError::InvalidField {
            field,
            value: number.to_string(),
        })
}

pub fn parse_text(field: &'static str, value: Option<String>) -> Result<String, FetchError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(FetchError::MissingField(field))
}

/// Accepts `2024-01-01`, RFC 3339 and Marketstack's `2024-01-01T00:00:00+0000`.
pub fn parse_date(field: &'static str, value: Option<String>) -> Result<NaiveDate, FetchError> {
    let text = parse_text(field, value)?;

    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(&text).map(|dt| dt.date_naive()))
        .or_else(|_| {
            DateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%z").map(|dt| dt.date_naive())
        })
        .map_err(|_| FetchError::InvalidField { field, value: text })
}
