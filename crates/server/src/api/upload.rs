use crate::{dto::ApiError, state::AppState};
use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use futures_util::StreamExt;
use std::{path::Path, sync::Arc};
use tempfile::TempDir;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{error, info};

const UPLOAD_FIELD: &str = "file";

pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    // One directory per request, removed when `workdir` drops.
    let workdir = TempDir::new().map_err(|err| {
        error!("Failed to create work dir: {err}");
        ApiError::internal("could not prepare upload")
    })?;
    let input = workdir.path().join("input.xml");
    let output = workdir.path().join("output.csv");

    let mut received = false;
    while let Some(field) = multipart.next_field().await.map_err(|err| {
        error!("Failed to read multipart body: {err}");
        ApiError::bad_request("malformed multipart body")
    })? {
        if field.name() == Some(UPLOAD_FIELD) {
            let size = save_field(field, &input).await?;
            info!("Received upload of {size} bytes");
            received = true;
            break;
        }
    }
    if !received {
        return Err(ApiError::bad_request(format!(
            "missing multipart field {UPLOAD_FIELD:?}"
        )));
    }

    let pipeline = state.pipeline.clone();
    let report = tokio::task::spawn_blocking(move || pipeline.convert(&input, &output))
        .await
        .map_err(|err| {
            error!("Conversion task failed: {err}");
            ApiError::internal("conversion task failed")
        })?
        .map_err(|err| {
            error!("Failed to convert upload: {err}");
            ApiError::internal(err.to_string())
        })?;

    let body = tokio::fs::read(&report).await.map_err(|err| {
        error!("Failed to read report: {err}");
        ApiError::internal("could not read report")
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=output.csv",
            ),
        ],
        body,
    )
        .into_response())
}

async fn save_field(mut field: axum::extract::multipart::Field<'_>, path: &Path) -> Result<usize, ApiError> {
    let mut file = File::create(path).await.map_err(|err| {
        error!("Failed to create file: {err}");
        ApiError::internal("could not store upload")
    })?;
    let mut size = 0;
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|err| {
            error!("Failed to read chunk: {err}");
            ApiError::bad_request("upload interrupted")
        })?;
        size += data.len();
        file.write_all(&data).await.map_err(|err| {
            error!("Failed to write to file: {err}");
            ApiError::internal("could not store upload")
        })?;
    }
    file.flush().await.map_err(|err| {
        error!("Failed to flush file: {err}");
        ApiError::internal("could not store upload")
    })?;
    Ok(size)
}
