//! Per-endpoint outcome counters.
//!
//! [`Stats`] is built once at startup and shared through `AppState`. The timer
//! middleware records every response; `GET /stats` serves a snapshot.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use std::time::Duration;

use axum::http::StatusCode;
use serde::Serialize;

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
pub fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Coarse classification of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    BadRequest,
    NotFound,
    Conflict,
    Timeout,
    InternalError,
}

impl Outcome {
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => Outcome::NotFound,
            StatusCode::CONFLICT => Outcome::Conflict,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Outcome::Timeout,
            s if s.is_server_error() => Outcome::InternalError,
            s if s.is_client_error() => Outcome::BadRequest,
            _ => Outcome::Success,
        }
    }
}

/// Counters for a single endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointStats {
    pub success: u64,
    pub bad_request: u64,
    pub not_found: u64,
    pub conflict: u64,
    pub timeout: u64,
    pub internal_error: u64,
    pub requests: u64,
    pub total_elapsed_ms: u64,
}

impl EndpointStats {
    fn record(&mut self, outcome: Outcome, elapsed: Duration) {
        let counter = match outcome {
            Outcome::Success => &mut self.success,
            Outcome::BadRequest => &mut self.bad_request,
            Outcome::NotFound => &mut self.not_found,
            Outcome::Conflict => &mut self.conflict,
            Outcome::Timeout => &mut self.timeout,
            Outcome::InternalError => &mut self.internal_error,
        };
        *counter += 1;
        self.requests += 1;
        self.total_elapsed_ms = self.total_elapsed_ms.saturating_add(elapsed_ms(elapsed));
    }
}

/// Serializable view of [`Stats`], keyed by `"<METHOD> <route>"`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub service: String,
    pub env: String,
    pub host: String,
    pub endpoints: BTreeMap<String, EndpointStats>,
}

/// Outcome counters labelled with the service identity.
#[derive(Debug)]
pub struct Stats {
    service: String,
    env: String,
    host: String,
    endpoints: RwLock<HashMap<String, EndpointStats>>,
}

impl Stats {
    pub fn new(service: impl Into<String>, env: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            env: env.into(),
            host: host.into(),
            endpoints: RwLock::new(HashMap::new()),
        }
    }

    /// Records one response for `endpoint`.
    pub fn record(&self, endpoint: &str, status: StatusCode, elapsed: Duration) {
        let outcome = Outcome::from_status(status);
        // A panic while holding the lock leaves the counters usable.
        let mut endpoints = self
            .endpoints
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        endpoints
            .entry(endpoint.to_string())
            .or_default()
            .record(outcome, elapsed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let endpoints = self
            .endpoints
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        StatsSnapshot {
            service: self.service.clone(),
            env: self.env.clone(),
            host: self.host.clone(),
            endpoints: endpoints
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Logs the final counters. Called once after the server stops.
    pub fn shutdown(&self) {
        let snapshot = self.snapshot();
        let requests: u64 = snapshot.endpoints.values().map(|e| e.requests).sum();
        match serde_json::to_string(&snapshot.endpoints) {
            Ok(endpoints) => tracing::info!(
                service = %snapshot.service,
                env = %snapshot.env,
                requests,
                endpoints = %endpoints,
                "Final request stats"
            ),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize final request stats"),
        }
    }
}
