//! DTO for the health check endpoint.

use serde::Serialize;

/// Static liveness payload. No dependency checks by design: the endpoint
/// answers "is the process up", not "are the backends up".
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}
