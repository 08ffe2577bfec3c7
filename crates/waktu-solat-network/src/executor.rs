//! Request execution and response classification.
//!
//! The API reports failure through two independent channels: the HTTP status
//! and an in-body `{"status": "error"}` marker that may arrive with a `200`.
//! Every response is checked for both, in this order:
//!
//! 1. transport failure → [`WaktuSolatError::Network`]
//! 2. status >= 400 → [`WaktuSolatError::Api`]
//! 3. status < 400 with an error marker → [`WaktuSolatError::Api`]
//! 4. otherwise the parsed JSON, or [`WaktuSolatError::Decode`] if it is not JSON

use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};
use waktu_solat_types::{parse_json, ApiErrorPayload, FromJson};

use crate::error::{Result, WaktuSolatError};
use crate::transport::{RawResponse, Transport};

/// Placeholder used in error messages when a failing body is not UTF-8.
pub const NON_UTF8_BODY: &str = "<non-UTF8 response body>";

/// Optional `year`/`month` filter of the prayer-time endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl MonthQuery {
    pub fn new(year: Option<i32>, month: Option<u32>) -> Self {
        Self { year, month }
    }

    /// Query pairs for the values that are set, `year` first.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        if let Some(month) = self.month {
            pairs.push(("month", month.to_string()));
        }
        pairs
    }
}

/// Issues GET requests against a fixed base URL and classifies the outcome.
#[derive(Debug, Clone)]
pub struct RequestExecutor<T> {
    base_url: Url,
    transport: T,
}

impl<T: Transport> RequestExecutor<T> {
    pub fn new(base_url: Url, transport: T) -> Self {
        Self { base_url, transport }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Appends `segments` to the base path and adds the query pairs.
    ///
    /// Each segment is percent-encoded on its own, so a zone code containing
    /// `/` or `?` cannot change the shape of the request.
    pub fn build_url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                WaktuSolatError::invalid_config(format!("base URL {} cannot take a path", self.base_url))
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Performs the request and returns the response JSON on success.
    pub async fn get_json(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Value> {
        let url = self.build_url(segments, query)?;
        debug!(%url, "GET");

        let response = self.transport.get(url.clone()).await.map_err(|e| {
            warn!(%url, error = %e, "request failed before a response was received");
            WaktuSolatError::network(e)
        })?;
        debug!(%url, status = response.status, bytes = response.body.len(), "response received");

        classify(&response).inspect_err(|e| match e {
            WaktuSolatError::Api { status_code, message, .. } => {
                warn!(%url, status = status_code, api_message = %message, "API reported an error");
            }
            other => debug!(%url, error = %other, "response could not be used"),
        })
    }
}

/// Classifies a received response (outcomes 2 to 4 of the module docs).
pub fn classify(response: &RawResponse) -> Result<Value> {
    let status_code = response.status;

    if status_code >= 400 {
        let payload = parse_json(&response.body)
            .ok()
            .and_then(|v| ApiErrorPayload::from_json(&v).ok());
        return Err(match payload {
            Some(payload) => api_error(status_code, payload),
            None => WaktuSolatError::Api {
                status_code,
                message: format!(
                    "request failed with status {}, body: {}",
                    status_code,
                    response.text().unwrap_or(NON_UTF8_BODY)
                ),
                payload: None,
            },
        });
    }

    let value = parse_json(&response.body)?;

    if ApiErrorPayload::is_error_marker(&value) {
        return Err(match ApiErrorPayload::from_json(&value) {
            Ok(payload) => api_error(status_code, payload),
            // Marker without a usable message: surface the body as-is.
            Err(_) => WaktuSolatError::Api {
                status_code,
                message: response.text().unwrap_or(NON_UTF8_BODY).to_string(),
                payload: None,
            },
        });
    }

    Ok(value)
}

fn api_error(status_code: u16, payload: ApiErrorPayload) -> WaktuSolatError {
    WaktuSolatError::Api {
        status_code,
        message: payload.message().to_string(),
        payload: Some(payload),
    }
}
