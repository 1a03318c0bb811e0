//! Health probe endpoints
//!
//! - /health - service identity and version
//! - /health/ready - readiness: the directory store must be reachable
//! - /health/live - liveness: answers whenever the process is up

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

const SERVICE_NAME: &str = "provider-directory-backend";

/// Probe response
#[derive(Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<StoreStatus>,
}

/// Reachability of the directory store
#[derive(Serialize)]
pub struct StoreStatus {
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

fn report(status: &'static str, database: Option<StoreStatus>) -> HealthReport {
    HealthReport {
        status,
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        database,
    }
}

/// Basic health check
pub async fn health_check() -> Json<HealthReport> {
    Json(report("ok", None))
}

/// Readiness probe: 503 until the store answers
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthReport>, (StatusCode, Json<HealthReport>)> {
    match db::health_check(state.db()).await {
        Ok(()) => Ok(Json(report(
            "ready",
            Some(StoreStatus {
                reachable: true,
                detail: None,
            }),
        ))),
        Err(e) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(report(
                "not_ready",
                Some(StoreStatus {
                    reachable: false,
                    detail: Some(e.to_string()),
                }),
            )),
        )),
    }
}

/// Liveness probe: no dependencies consulted
pub async fn liveness_check() -> Json<HealthReport> {
    Json(report("alive", None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_service_identity() {
        let response = health_check().await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.service, "provider-directory-backend");
        assert!(!response.version.is_empty());
        assert!(response.database.is_none());
    }

    #[tokio::test]
    async fn test_liveness_ignores_dependencies() {
        let response = liveness_check().await;
        assert_eq!(response.status, "alive");
        assert!(response.database.is_none());
    }
}
