use crate::{
    dto::{ApiError, DriverDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use tracing::{error, info};

/// Runs a single driver lookup through the pipeline's resolver.
pub async fn debug_driver(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DriverDto>, ApiError> {
    info!("Debug lookup for personnel code {code}");
    let pipeline = state.pipeline.clone();
    let lookup_code = code.clone();
    let lookup = tokio::task::spawn_blocking(move || {
        pipeline.identity().driver_document(&lookup_code)
    })
    .await
    .map_err(|err| {
        error!("Lookup task failed: {err}");
        ApiError::internal("lookup task failed")
    })?;
    Ok(Json(DriverDto::from(code, lookup)))
}
