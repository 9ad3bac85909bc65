// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking client for the remote transactions/categories API.
//!
//! Two error policies are applied by return type:
//!
//! * read paths (`list_*`, `dashboard_summary`) never fail. They return a
//!   [`Listing`] (or an `Option`) so the dashboard always has something to
//!   render, and log what went wrong.
//! * write paths (`create_*`, `delete_*`) return [`ApiResult`] and the caller
//!   has to surface the error to the user.

use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{Category, NewCategory, NewTransaction, Summary, Transaction};
use crate::utils::http_client;

const CATEGORIES: &str = "categories";
const TRANSACTIONS: &str = "transactions";
const SUMMARY: &str = "dashboard/summary";

/// Result of a read path. `items` is always renderable; `failure` records
/// why it may be empty.
#[derive(Debug)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub failure: Option<ApiError>,
}

impl<T> Listing<T> {
    pub fn ok(items: Vec<T>) -> Self {
        Self {
            items,
            failure: None,
        }
    }

    pub fn degraded(err: ApiError) -> Self {
        Self {
            items: Vec::new(),
            failure: Some(err),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.failure.is_some()
    }

    /// `"<what> unavailable: <reason>"` when the read degraded.
    pub fn warning(&self, what: &str) -> Option<String> {
        self.failure
            .as_ref()
            .map(|e| format!("{} unavailable: {}", what, e))
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

pub struct ApiClient {
    base: Url,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base = Url::parse(trimmed).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            base,
            http: http_client(timeout)?,
        })
    }

    pub fn from_config(cfg: &ApiConfig) -> ApiResult<Self> {
        Self::new(&cfg.base_url, Duration::from_secs(cfg.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    pub fn list_categories(&self) -> Listing<Category> {
        self.list(CATEGORIES)
    }

    pub fn create_category(&self, payload: &NewCategory) -> ApiResult<Option<Category>> {
        self.create(CATEGORIES, payload)
    }

    pub fn delete_category(&self, id: &str) -> ApiResult<()> {
        self.remove(CATEGORIES, id)
    }

    pub fn list_transactions(&self) -> Listing<Transaction> {
        self.list(TRANSACTIONS)
    }

    pub fn create_transaction(&self, payload: &NewTransaction) -> ApiResult<Option<Transaction>> {
        self.create(TRANSACTIONS, payload)
    }

    pub fn delete_transaction(&self, id: &str) -> ApiResult<()> {
        self.remove(TRANSACTIONS, id)
    }

    /// Server-side totals. Informational only; `None` when the endpoint is
    /// missing, failing, or returns something that is not a summary object
    /// (see [`decode_summary`]).
    pub fn dashboard_summary(&self) -> Option<Summary> {
        let outcome = self
            .url(&[SUMMARY])
            .and_then(|url| send(self.http.get(url)))
            .and_then(|body| match body {
                Some(text) => serde_json::from_str::<Value>(&text).map_err(ApiError::from),
                None => Ok(Value::Null),
            });
        match outcome {
            Ok(v) => decode_summary(v),
            Err(e) => {
                warn!("GET /{} failed: {}", SUMMARY, e);
                None
            }
        }
    }

    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?;
            path.pop_if_empty();
            for seg in segments {
                path.extend(seg.split('/').filter(|s| !s.is_empty()));
            }
        }
        Ok(url)
    }

    fn list<T: DeserializeOwned>(&self, resource: &str) -> Listing<T> {
        let outcome = self.url(&[resource]).and_then(|url| {
            debug!("GET {}", url);
            send(self.http.get(url))
        });
        let body = match outcome {
            Ok(Some(text)) => serde_json::from_str::<Value>(&text).map_err(ApiError::from),
            Ok(None) => Ok(Value::Null),
            Err(e) => Err(e),
        };
        match body {
            Ok(v) => Listing::ok(decode_list(v)),
            Err(e) => {
                warn!("GET /{} failed: {}", resource, e);
                Listing::degraded(e)
            }
        }
    }

    fn create<P: Serialize, T: DeserializeOwned>(
        &self,
        resource: &str,
        payload: &P,
    ) -> ApiResult<Option<T>> {
        let url = self.url(&[resource])?;
        debug!("POST {}", url);
        let body = send(self.http.post(url).json(payload))?;
        Ok(body.and_then(|text| match serde_json::from_str::<Value>(&text) {
            Ok(v) => decode_entity(v),
            Err(e) => {
                debug!("POST /{} returned a non-JSON body: {}", resource, e);
                None
            }
        }))
    }

    fn remove(&self, resource: &str, id: &str) -> ApiResult<()> {
        let mut url = self.url(&[resource])?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .push(id);
        debug!("DELETE {}", url);
        send(self.http.delete(url))?;
        Ok(())
    }
}

/// Send a request and return its body text. Non-success statuses become
/// [`ApiError::Status`]; 204 and empty bodies are `None`.
fn send(req: RequestBuilder) -> ApiResult<Option<String>> {
    let resp: Response = req.send()?;
    let status = resp.status();
    let text = resp.text()?;
    if !status.is_success() {
        return Err(ApiError::from_status(status, &text));
    }
    if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(text))
}

/// Normalise a list response body.
///
/// Exactly two shapes are accepted: a bare JSON array, or an object whose
/// `data` field is an array. Any other shape decodes to an empty list.
/// Elements that do not decode as `T` are skipped; the rest survive.
pub fn decode_list<T: DeserializeOwned>(body: Value) -> Vec<T> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                debug!("list response has no data array");
                return Vec::new();
            }
        },
        _ => {
            debug!("list response is neither an array nor an object");
            return Vec::new();
        }
    };
    items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value(item) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("skipping list element {}: {}", idx, e);
                None
            }
        })
        .collect()
}

/// Decode a single entity sent either bare or wrapped in `{data: {...}}`.
pub fn decode_entity<T: DeserializeOwned>(body: Value) -> Option<T> {
    let inner = match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data @ Value::Object(_)) => data,
            Some(other) => {
                map.insert("data".to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        _ => return None,
    };
    serde_json::from_value(inner).ok()
}

/// Decode a summary body, bare or under `data`. An object carrying none of
/// `totalIncome`, `totalExpense` or `balance` is not a summary.
pub fn decode_summary(body: Value) -> Option<Summary> {
    const FIELDS: [&str; 3] = ["totalIncome", "totalExpense", "balance"];
    let body = match body {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_))) => {
            map.remove("data")?
        }
        other => other,
    };
    let obj = body.as_object()?;
    if !FIELDS.iter().any(|f| obj.contains_key(*f)) {
        debug!("summary response has none of {:?}", FIELDS);
        return None;
    }
    decode_entity(body)
}
