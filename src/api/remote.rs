use super::{Assistant, DailySeries, ForecastPoint, ForecastSeries, MarketFeed, Quote};
use crate::error::{FetchError, FetchResult};
use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

const QUOTE_PATH: &str = "/api/quote";
const DAILY_PATH: &str = "/api/daily";
const PREDICT_PATH: &str = "/api/predict";
const GLOSSARY_PATH: &str = "/api/glossary";
const CHAT_PATH: &str = "/api/chat";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Concatenate a base URL and an absolute path, dropping trailing slashes
/// from the base.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim().trim_end_matches('/'), path)
}

// Backend response structures
#[derive(Debug, Deserialize)]
struct RawQuote {
    price: f64,
    change: f64,
    change_percent: f64,
    ts: i64,
}

#[derive(Debug, Deserialize)]
struct RawDaily {
    labels: Vec<String>,
    closes: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    forecast: Vec<RawForecastPoint>,
}

#[derive(Debug, Deserialize)]
struct RawForecastPoint {
    ds: String,
    yhat: f64,
    yhat_lower: f64,
    yhat_upper: f64,
}

#[derive(Debug, Deserialize)]
struct RawGlossary {
    definition: String,
}

/// Sentiment scores attached to a chat reply. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Sentiment {
    #[serde(rename = "FinBERT Label", default)]
    pub label: Option<String>,
    #[serde(rename = "FinBERT Confidence", default)]
    pub confidence: Option<f64>,
    #[serde(rename = "FinBERT Scores", default)]
    pub scores: BTreeMap<String, f64>,
    #[serde(rename = "VADER Compound", default)]
    pub compound: Option<f64>,
}

impl Sentiment {
    pub fn summary(&self) -> String {
        let breakdown = self
            .scores
            .iter()
            .map(|(k, v)| format!("{}: {:.1}%", k, v * 100.0))
            .collect::<Vec<_>>()
            .join(", ");
        let label = self.label.as_deref().unwrap_or("n/a");
        let confidence = self
            .confidence
            .map(|c| format!("{:.3}", c))
            .unwrap_or_else(|| "n/a".to_string());
        let compound = self
            .compound
            .map(|c| format!("{:.3}", c))
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "FinBERT: {} (Conf: {}) [{}] VADER: {}",
            label, confidence, breakdown, compound
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub sentiment: Sentiment,
}

fn error_field(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Normalize a raw HTTP result into `T` or a `FetchError`.
///
/// An explicit `error` field wins over everything else; a non-2xx status
/// without one is reported with its body text.
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> FetchResult<T> {
    let value: Option<Value> = serde_json::from_str(body).ok();
    if let Some(message) = value.as_ref().and_then(error_field) {
        return Err(FetchError::server(Some(status), message));
    }
    if !(200..300).contains(&status) {
        let text = body.trim();
        let message = if text.is_empty() {
            status.to_string()
        } else {
            format!("{} {}", status, text)
        };
        return Err(FetchError::server(Some(status), message));
    }
    let value = value.ok_or_else(|| FetchError::Malformed("body is not JSON".to_string()))?;
    Ok(serde_json::from_value(value)?)
}

pub fn parse_quote(symbol: &str, status: u16, body: &str) -> FetchResult<Quote> {
    let raw: RawQuote = decode(status, body)?;
    let timestamp = DateTime::from_timestamp(raw.ts, 0)
        .ok_or_else(|| FetchError::Malformed(format!("timestamp out of range: {}", raw.ts)))?;
    Ok(Quote {
        symbol: symbol.to_string(),
        price: raw.price,
        change: raw.change,
        change_percent: raw.change_percent,
        timestamp,
        meta: None,
    })
}

pub fn parse_daily(symbol: &str, status: u16, body: &str) -> FetchResult<DailySeries> {
    let raw: RawDaily = decode(status, body)?;
    if raw.labels.len() != raw.closes.len() {
        return Err(FetchError::Malformed(format!(
            "{} labels for {} closes",
            raw.labels.len(),
            raw.closes.len()
        )));
    }
    if raw.closes.is_empty() {
        return Err(FetchError::Malformed("empty daily series".to_string()));
    }
    Ok(DailySeries {
        symbol: symbol.to_string(),
        labels: raw.labels,
        closes: raw.closes,
    })
}

pub fn parse_prediction(
    symbol: &str,
    horizon: u32,
    status: u16,
    body: &str,
) -> FetchResult<ForecastSeries> {
    let raw: RawForecast = decode(status, body)?;
    if raw.forecast.len() != horizon as usize {
        return Err(FetchError::Malformed(format!(
            "expected {} forecast points, got {}",
            horizon,
            raw.forecast.len()
        )));
    }
    let points = raw
        .forecast
        .into_iter()
        .map(|p| ForecastPoint {
            label: p.ds,
            estimate: p.yhat,
            lower: p.yhat_lower,
            upper: p.yhat_upper,
        })
        .collect();
    Ok(ForecastSeries {
        symbol: symbol.to_string(),
        horizon,
        points,
    })
}

pub fn parse_glossary(status: u16, body: &str) -> FetchResult<String> {
    let raw: RawGlossary = decode(status, body)?;
    Ok(raw.definition)
}

pub fn parse_chat(status: u16, body: &str) -> FetchResult<ChatReply> {
    decode(status, body)
}

/// HTTP client for the dashboard backend.
pub struct RemoteQuoteClient {
    client: Client,
    base_url: String,
}

impl RemoteQuoteClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> FetchResult<(u16, String)> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(%url, ?query, "GET");
        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

#[async_trait]
impl MarketFeed for RemoteQuoteClient {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn fetch_quote(&self, symbol: &str) -> FetchResult<Quote> {
        let (status, body) = self.get(QUOTE_PATH, &[("symbol", symbol)]).await?;
        parse_quote(symbol, status, &body)
    }

    async fn fetch_daily(&self, symbol: &str) -> FetchResult<DailySeries> {
        let (status, body) = self
            .get(DAILY_PATH, &[("symbol", symbol), ("outputsize", "compact")])
            .await?;
        parse_daily(symbol, status, &body)
    }

    async fn fetch_prediction(&self, symbol: &str, horizon: u32) -> FetchResult<ForecastSeries> {
        let days = horizon.to_string();
        let (status, body) = self
            .get(PREDICT_PATH, &[("symbol", symbol), ("days", days.as_str())])
            .await?;
        parse_prediction(symbol, horizon, status, &body)
    }
}

#[async_trait]
impl Assistant for RemoteQuoteClient {
    async fn lookup_term(&self, term: &str) -> FetchResult<String> {
        let (status, body) = self.get(GLOSSARY_PATH, &[("term", term)]).await?;
        parse_glossary(status, &body)
    }

    async fn chat(&self, message: &str) -> FetchResult<ChatReply> {
        let url = join_url(&self.base_url, CHAT_PATH);
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_chat(status, &body)
    }
}
