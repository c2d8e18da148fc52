// handlers/categories/show.rs - GET /categories/:id handler

use axum::extract::Path;

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ItineraryService;

use super::CategoryResponse;

/// GET /categories/:id - Retrieve a single category
pub async fn category_show(Path(id): Path<i64>) -> ApiResult<CategoryResponse> {
    let service = ItineraryService::new().await?;
    let category = service.get_category(id).await?;

    Ok(ApiResponse::success(CategoryResponse::from(category)))
}
