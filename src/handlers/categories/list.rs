// handlers/categories/list.rs - GET /categories handler

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ItineraryService;

use super::CategoryResponse;

/// GET /categories - List all categories
pub async fn category_list() -> ApiResult<Vec<CategoryResponse>> {
    let service = ItineraryService::new().await?;
    let categories = service.list_categories().await?;

    Ok(ApiResponse::success(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}
