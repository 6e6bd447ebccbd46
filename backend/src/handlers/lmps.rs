use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::LmpRecord;
use std::sync::Arc;
use tracing::error;

use crate::{db, AppState};

/// Every stored version of every program
pub async fn list_lmps(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<LmpRecord>>, StatusCode> {
    let mut conn = app_state.db_pool.get().map_err(|e| {
        error!("Failed to get database connection: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let records = db::load_lmp_records(&mut conn, None).map_err(|e| {
        error!("Failed to load LMPs: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(records))
}

/// Every stored version of one program
pub async fn get_lmp(
    State(app_state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<LmpRecord>>, StatusCode> {
    let mut conn = app_state.db_pool.get().map_err(|e| {
        error!("Failed to get database connection: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let records = db::load_lmp_records(&mut conn, Some(&name)).map_err(|e| {
        error!("Failed to load LMP {}: {}", name, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    if records.is_empty() {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(records))
}
