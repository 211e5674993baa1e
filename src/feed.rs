//! feed.rs
//!
//! Client for the public ISS position feed. The feed answers with
//! `{ "iss_position": { "latitude": "..", "longitude": ".." }, "timestamp": .., "message": ".." }`
//! and has been seen sending coordinates both as strings and as numbers.

use std::future::Future;

use chrono::{DateTime, Utc};
use reqwest::header::USER_AGENT;
use serde::Deserialize;

use crate::config::FEED_USER_AGENT;
use crate::coords::GeoPosition;
use crate::error::{FeedError, Result};

/// One decoded answer from the feed
#[derive(Debug, Clone, PartialEq)]
pub struct IssReport {
    pub position: GeoPosition,
    pub timestamp: Option<DateTime<Utc>>,
    pub message: Option<String>,
}

/// Anything that can produce the current ISS position
pub trait PositionSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<IssReport>> + Send;
}

// raw wire types
#[derive(Deserialize)]
struct IssNow {
    iss_position: RawPosition,
    // never needed for the fix, so any shape is tolerated
    #[serde(default)]
    timestamp: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct RawPosition {
    latitude: Coordinate,
    longitude: Coordinate,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn value(self, field: &'static str) -> Result<f64> {
        let (value, text) = match self {
            Coordinate::Number(value) => (Some(value), None),
            Coordinate::Text(text) => (text.trim().parse::<f64>().ok(), Some(text)),
        };

        // NaN and infinities parse fine but cannot be placed on the globe
        match value {
            Some(value) if value.is_finite() => Ok(value),
            _ => Err(FeedError::Coordinate {
                field,
                value: text.unwrap_or_else(|| value.map(|v| v.to_string()).unwrap_or_default()),
            }),
        }
    }
}

// unix seconds as an integer, float or numeric string
fn timestamp_from(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    let secs = match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))?,
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?
        }
        _ => return None,
    };
    DateTime::from_timestamp(secs, 0)
}

/// Decode a feed body into a report
pub fn parse_report(body: &str) -> Result<IssReport> {
    let raw: IssNow = serde_json::from_str(body)?;

    let position = GeoPosition::new(
        raw.iss_position.latitude.value("latitude")?,
        raw.iss_position.longitude.value("longitude")?,
    );

    Ok(IssReport {
        position,
        timestamp: raw.timestamp.as_ref().and_then(timestamp_from),
        message: raw.message.and_then(|m| match m {
            serde_json::Value::String(text) => Some(text),
            _ => None,
        }),
    })
}

/// HTTP client for the open-notify style feed
#[derive(Clone)]
pub struct OpenNotifyClient {
    client: reqwest::Client,
    url: String,
}

impl OpenNotifyClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PositionSource for OpenNotifyClient {
    async fn fetch(&self) -> Result<IssReport> {
        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, FEED_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.text().await?;
        parse_report(&body)
    }
}
