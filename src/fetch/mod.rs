// src/fetch/mod.rs

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument, trace};
use url::Url;

use crate::error::FetchError;

pub mod types;

pub use types::{TimeSlot, VisitorResponse, ZoneSeries};

use types::{record_guid, RawVisitorResponse};

const CHART_DATA_PATH: &str = "/borders/chart-data";
const MODE: &str = "halfhour";

/// Builds `http://{host}/borders/chart-data?mode=halfhour&date=..&objects=..`.
/// `date` is passed through untouched.
pub fn chart_data_url(host: &str, date: &str, guids: &[String]) -> Result<Url, FetchError> {
    let mut url = Url::parse(&format!("http://{}{}", host, CHART_DATA_PATH)).map_err(|source| {
        FetchError::InvalidHost {
            host: host.to_string(),
            source,
        }
    })?;
    url.query_pairs_mut()
        .append_pair("mode", MODE)
        .append_pair("date", date)
        .append_pair("objects", &guids.join(","));
    Ok(url)
}

/// Decode and validate a chart-data body: `data` must be a non-empty array.
/// Only records of `selected` zones are decoded; the rest are skipped unread.
pub fn parse_visitors_response(body: &str) -> Result<VisitorResponse, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    match value.get("data") {
        Some(Value::Array(items)) if items.is_empty() => return Err(FetchError::EmptyData),
        Some(Value::Array(_)) => {}
        _ => {
            return Err(FetchError::Malformed(
                "response must contain a 'data' array".to_string(),
            ))
        }
    }
    let raw: RawVisitorResponse =
        serde_json::from_value(value).map_err(|e| FetchError::Malformed(e.to_string()))?;

    let total = raw.data.len();
    let data = raw
        .data
        .into_iter()
        .filter(|record| {
            record_guid(record).map_or(false, |guid| raw.selected.iter().any(|s| s == guid))
        })
        .map(serde_json::from_value::<ZoneSeries>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| FetchError::Malformed(e.to_string()))?;
    trace!(records = total, kept = data.len(), "selected records decoded");

    Ok(VisitorResponse {
        picker_date: raw.picker_date,
        selected: raw.selected,
        data,
    })
}

/// HTTP client bound to one API host, with a single bounded wait per request.
#[derive(Debug, Clone)]
pub struct VisitorClient {
    client: Client,
    host: String,
}

impl VisitorClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(host: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            host: host.into(),
        })
    }

    /// One GET for half-hour counts of `guids` on `date`. No retries.
    #[instrument(level = "info", skip(self, guids), fields(host = %self.host, zones = guids.len()))]
    pub async fn fetch_visitors(
        &self,
        date: &str,
        guids: &[String],
    ) -> Result<VisitorResponse, FetchError> {
        let url = chart_data_url(&self.host, date, guids)?;
        info!("requesting visitor data from {} for {}", self.host, date);
        debug!(%url, "GET");

        let request_err = |source: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            source,
        };
        let body = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_err)?
            .error_for_status()
            .map_err(request_err)?
            .text()
            .await
            .map_err(request_err)?;
        debug!(bytes = body.len(), "response body read");

        let response = parse_visitors_response(&body)?;
        info!(
            zones = response.data.len(),
            selected = response.selected.len(),
            "visitor data received"
        );
        Ok(response)
    }
}
