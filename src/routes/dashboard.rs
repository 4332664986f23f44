use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    extract::multipart::MultipartError,
    http::{Method, StatusCode},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    config::Config,
    error::AppError,
    models::DashboardReport,
    services::file_processor,
    AppState,
};

/// Multipart field carrying the workbook.
const FILE_FIELD: &str = "file";

pub fn routes(config: &Config) -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/dashboard/upload", post(upload_dashboard))
        .layer(DefaultBodyLimit::max(config.max_file_size))
        .layer(cors)
}

struct Upload {
    file_name: Option<String>,
    data: bytes::Bytes,
}

#[axum::debug_handler]
async fn upload_dashboard(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<DashboardReport>, AppError> {
    let start = std::time::Instant::now();

    let upload = read_upload(multipart).await?;
    tracing::info!(
        "Received upload {:?}, size: {}KB",
        upload.file_name,
        upload.data.len() / 1024
    );

    if let Some(name) = &upload.file_name {
        if !name.to_lowercase().ends_with(".xlsx") {
            tracing::error!("Unsupported file type: {}", name);
            return Err(AppError::InvalidInput("Only XLSX files are supported".to_string()));
        }
    }

    let report = file_processor::process_upload(
        upload.data,
        upload.file_name,
        state.config.preview_rows,
    )?;

    tracing::info!("Total processing completed in {:?}", start.elapsed());
    Ok(Json(report))
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            tracing::debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;
        return Ok(Upload { file_name, data });
    }

    Err(AppError::InvalidInput(format!("No file provided in field '{}'", FILE_FIELD)))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::InvalidInput(err.body_text())
    }
}
