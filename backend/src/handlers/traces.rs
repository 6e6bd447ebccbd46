use axum::{extract::State, http::StatusCode, Json};
use shared::Trace;
use std::sync::Arc;
use tracing::error;

use crate::{db, AppState};

/// Distinct version-to-version call edges observed in invocations
pub async fn list_traces(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<Trace>>, StatusCode> {
    let mut conn = app_state.db_pool.get().map_err(|e| {
        error!("Failed to get database connection: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let traces = db::load_traces(&mut conn).map_err(|e| {
        error!("Failed to load traces: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(traces))
}
