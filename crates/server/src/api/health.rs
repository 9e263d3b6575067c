use crate::{dto::HealthDto, state::AppState};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roleta::store;
use std::sync::Arc;
use tracing::error;

pub async fn health_db(State(state): State<Arc<AppState>>) -> Response {
    let Some(database) = state.database.clone() else {
        let body = HealthDto::unavailable("database not configured");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response();
    };

    let checked = tokio::task::spawn_blocking(move || -> Result<u64, store::Error> {
        database.ping()?;
        database.personnel_count()
    })
    .await;

    match checked {
        Ok(Ok(count)) => Json(HealthDto::connected(count)).into_response(),
        Ok(Err(err)) => {
            error!("Database health check failed: {err}");
            let body = HealthDto::unavailable(err.to_string());
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
        Err(err) => {
            error!("Health check task failed: {err}");
            let body = HealthDto::unavailable("health check task failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}
