//! Health probes
//!
//! `/health` and `/health/live` answer as long as the process runs;
//! `/health/ready` pings the database and flips to 503 when the pool
//! cannot serve a query.

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Body returned by every probe
#[derive(Serialize)]
pub struct ProbeBody {
    pub status: &'static str,
    pub version: &'static str,
    /// Database check outcome; only the readiness probe fills this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl ProbeBody {
    fn bare(status: &'static str) -> Self {
        Self {
            status,
            version: VERSION,
            database: None,
        }
    }
}

/// GET /health
pub async fn health_check() -> Json<ProbeBody> {
    Json(ProbeBody::bare("healthy"))
}

/// GET /health/live
pub async fn liveness_check() -> Json<ProbeBody> {
    Json(ProbeBody::bare("alive"))
}

/// GET /health/ready
///
/// 503 with the failure detail when the database is unreachable.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ProbeBody>, (StatusCode, Json<ProbeBody>)> {
    match db::health_check(state.db()).await {
        Ok(()) => Ok(Json(ProbeBody {
            status: "ready",
            version: VERSION,
            database: Some("healthy".to_string()),
        })),
        Err(e) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ProbeBody {
                status: "not_ready",
                version: VERSION,
                database: Some(e.to_string()),
            }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_probe_reports_healthy() {
        let body = health_check().await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.version, VERSION);
        assert!(body.database.is_none());
    }

    #[tokio::test]
    async fn test_liveness_needs_no_dependencies() {
        let body = liveness_check().await;
        assert_eq!(body.status, "alive");
    }

    #[test]
    fn test_bare_body_omits_database_field() {
        let json = serde_json::to_string(&ProbeBody::bare("healthy")).unwrap();
        assert!(!json.contains("database"));
    }
}
