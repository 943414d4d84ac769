//! IP geolocation via an HTTP batch lookup service
//!
//! This module resolves the source IPs of login events against the
//! ip-api.com batch endpoint. Queries are deduplicated, then submitted in
//! chunks of at most 25 (the service's per-request cap), one request at a
//! time to stay inside the service's rate limits.

use crate::config::LookupConfig;
use crate::models::LoginEvent;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Maximum number of queries per batch request, imposed by the service.
pub const BATCH_SIZE: usize = 25;

/// Errors that can occur during batch lookups
///
/// Only transport-level faults surface here: connection failures, timeouts,
/// and undecodable success bodies. A non-success HTTP status is recorded as
/// a chunk-level error entry in the result stream instead.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A single IP address wrapped for submission to the lookup service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQuery {
    pub query: String,
}

impl LocationQuery {
    pub fn new(ip: impl Into<String>) -> Self {
        LocationQuery { query: ip.into() }
    }
}

/// One entry of the lookup service's response
///
/// Successful entries echo the submitted IP in `query` and carry the
/// location fields. A chunk whose request failed outright contributes a
/// single entry holding only `error`, with no `query`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationResult {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, rename = "regionName")]
    pub region_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LocationResult {
    /// Entry recorded for an entire failed batch
    pub fn batch_error(message: impl Into<String>) -> Self {
        LocationResult {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

/// Client for the geolocation batch endpoint
///
/// One reqwest client is built up front and reused for every chunk.
pub struct GeoLookupClient {
    client: Client,
    endpoint: String,
}

impl GeoLookupClient {
    /// Create a new lookup client from the lookup configuration
    pub fn new(config: &LookupConfig) -> Self {
        GeoLookupClient {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build()
                .unwrap_or_default(),
            endpoint: config.endpoint.clone(),
        }
    }

    /// Resolve the locations of every distinct source IP in `events`
    ///
    /// Extracts each event's ClientIP, drops empty values, deduplicates
    /// while preserving first-seen order, and submits the survivors to the
    /// batch endpoint. Returns the raw result sequence, successes and
    /// chunk-level error entries intermixed.
    pub async fn resolve_events(
        &self,
        events: &[LoginEvent],
    ) -> Result<Vec<LocationResult>, LookupError> {
        let ips: Vec<String> = events
            .iter()
            .map(|event| event.client_ip.clone())
            .filter(|ip| !ip.is_empty())
            .collect();

        let queries: Vec<LocationQuery> = dedup_first_seen(&ips)
            .into_iter()
            .map(LocationQuery::new)
            .collect();

        log::debug!(
            "Resolving {} unique IP(s) from {} event(s)",
            queries.len(),
            events.len()
        );

        self.batch_lookup(&queries).await
    }

    /// Submit `queries` to the lookup service in chunks of [`BATCH_SIZE`]
    ///
    /// Chunks are sent strictly one after another; each request completes
    /// before the next is issued. A non-success response is downgraded to a
    /// single error entry for that chunk and processing continues, so the
    /// returned sequence may be shorter than the query list.
    pub async fn batch_lookup(
        &self,
        queries: &[LocationQuery],
    ) -> Result<Vec<LocationResult>, LookupError> {
        let mut results = Vec::with_capacity(queries.len());

        for batch in queries.chunks(BATCH_SIZE) {
            let response = self
                .client
                .post(&self.endpoint)
                .json(batch)
                .send()
                .await?;

            if response.status().is_success() {
                let mut batch_results: Vec<LocationResult> = response.json().await?;
                results.append(&mut batch_results);
                continue;
            }

            let status = response.status();
            let body = response.text().await?;
            log::warn!(
                "Batch lookup returned {} for {} quer(ies): {}",
                status,
                batch.len(),
                body
            );
            results.push(LocationResult::batch_error(body));
        }

        Ok(results)
    }
}

/// Reduce `values` to its unique set, preserving first-seen order
pub fn dedup_first_seen(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for value in values {
        if seen.insert(value) {
            unique.push(value.clone());
        }
    }
    unique
}
