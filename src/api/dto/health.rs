//! Body of `GET /health`.

use serde::Serialize;

/// `"healthy"` when every check passes, `"degraded"` otherwise.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

/// The catalogue depends on PostgreSQL only.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

/// Outcome of one dependency check: `"ok"` or `"error"` with a short reason.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: &'static str,
    pub message: &'static str,
}

impl CheckStatus {
    pub fn ok(message: &'static str) -> Self {
        Self {
            status: "ok",
            message,
        }
    }

    pub fn error(message: &'static str) -> Self {
        Self {
            status: "error",
            message,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
