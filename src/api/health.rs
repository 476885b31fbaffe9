//! Health endpoints for liveness and readiness probes
//!
//! Readiness checks the user store (the database in the postgres backend)
//! and the media root. A missing media root only degrades the service, since
//! the directory is created on the first upload.

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<ComponentCheck>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    fn status_code(self) -> StatusCode {
        match self {
            Self::Healthy | Self::Degraded => StatusCode::OK,
            Self::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ComponentCheck {
    pub name: &'static str,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

impl ComponentCheck {
    fn new(name: &'static str, started: Instant, outcome: Result<(), (HealthStatus, String)>) -> Self {
        let (status, message) = match outcome {
            Ok(()) => (HealthStatus::Healthy, None),
            Err((status, message)) => (status, Some(message)),
        };

        Self {
            name,
            status,
            message,
            latency_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// The worst status among the checks
fn overall(checks: &[ComponentCheck]) -> HealthStatus {
    checks
        .iter()
        .map(|c| c.status)
        .max()
        .unwrap_or(HealthStatus::Healthy)
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: VERSION,
        checks: Vec::new(),
    })
}

/// GET /ready
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let checks = vec![check_user_store(&state).await, check_media_root(&state).await];
    let status = overall(&checks);

    let response = HealthResponse {
        status,
        version: VERSION,
        checks,
    };

    (status.status_code(), Json(response))
}

/// GET /live
pub async fn live_check() -> StatusCode {
    StatusCode::OK
}

async fn check_user_store(state: &AppState) -> ComponentCheck {
    let started = Instant::now();

    let outcome = state
        .user_service
        .count()
        .await
        .map(|_| ())
        .map_err(|e| (HealthStatus::Unhealthy, e.to_string()));

    ComponentCheck::new("user_store", started, outcome)
}

async fn check_media_root(state: &AppState) -> ComponentCheck {
    let started = Instant::now();
    let root = &state.media.root;

    let outcome = match tokio::fs::metadata(root).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err((
            HealthStatus::Unhealthy,
            format!("{} is not a directory", root.display()),
        )),
        Err(_) => Err((
            HealthStatus::Degraded,
            format!("{} does not exist yet", root.display()),
        )),
    };

    ComponentCheck::new("media_root", started, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(status: HealthStatus) -> ComponentCheck {
        ComponentCheck {
            name: "component",
            status,
            message: None,
            latency_ms: 0,
        }
    }

    #[test]
    fn test_overall_is_worst_status() {
        assert_eq!(overall(&[]), HealthStatus::Healthy);
        assert_eq!(
            overall(&[check(HealthStatus::Healthy), check(HealthStatus::Degraded)]),
            HealthStatus::Degraded
        );
        assert_eq!(
            overall(&[check(HealthStatus::Unhealthy), check(HealthStatus::Degraded)]),
            HealthStatus::Unhealthy
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(HealthStatus::Degraded.status_code(), StatusCode::OK);
        assert_eq!(
            HealthStatus::Unhealthy.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_response_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Degraded,
            version: "1.0.0",
            checks: vec![ComponentCheck {
                name: "media_root",
                status: HealthStatus::Degraded,
                message: Some("media does not exist yet".to_string()),
                latency_ms: 1,
            }],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["checks"][0]["name"], "media_root");

        let bare = HealthResponse {
            status: HealthStatus::Healthy,
            version: "1.0.0",
            checks: Vec::new(),
        };
        let json = serde_json::to_string(&bare).unwrap();
        assert!(!json.contains("checks"));
    }
}
