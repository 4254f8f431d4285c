use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use uuid::Uuid;

use blog_core::asset;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Cover-image ingestion route.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/uploads", post(upload_image))
        // Transport cap sits above the guard ceiling so oversize files get
        // the typed rejection instead of a bare 413.
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
}

/// Ingest a cover image: validate size and media type, then hand the
/// bytes to the asset store and return the URL it assigns.
async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<Value>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let media_type = field
            .content_type()
            .ok_or_else(|| {
                ApiError::BadRequest("file field is missing a content type".to_string())
            })?
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read upload: {e}")))?;

        asset::validate_upload(bytes.len() as u64, &media_type)?;

        let extension = asset::extension_for(&media_type).unwrap_or("bin");
        let file_name = format!("{}.{extension}", Uuid::new_v4());
        let url = state
            .asset_store()
            .store(&file_name, &media_type, &bytes)
            .await?;
        tracing::info!(%url, size = bytes.len(), "cover image ingested");
        return Ok(Json(json!({ "url": url })));
    }

    Err(ApiError::BadRequest("missing file field".to_string()))
}
