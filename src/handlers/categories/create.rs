// handlers/categories/create.rs - POST /categories handler

use axum::{Extension, Json};
use serde::Deserialize;

use crate::api::require;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::ItineraryService;

use super::CategoryResponse;

/// POST /categories - Create an event category
///
/// Expected Input:
/// ```json
/// {
///   "name": "Business"
/// }
/// ```
pub async fn category_create(
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<CreateCategoryRequest>,
) -> ApiResult<CategoryResponse> {
    current.require()?;

    let name = require("name", payload.name)?;

    let service = ItineraryService::new().await?;
    let category = service.create_category(name).await?;

    Ok(ApiResponse::created(CategoryResponse::from(category)))
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
}
