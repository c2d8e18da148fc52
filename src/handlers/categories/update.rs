// handlers/categories/update.rs - PUT /categories/:id handler

use axum::{extract::Path, Extension, Json};
use serde::Deserialize;

use crate::api::require;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::ItineraryService;

use super::CategoryResponse;

/// PUT /categories/:id - Rename a category
pub async fn category_update(
    Path(id): Path<i64>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> ApiResult<CategoryResponse> {
    current.require()?;

    let name = require("name", payload.name)?;

    let service = ItineraryService::new().await?;
    let category = service.update_category(id, name).await?;

    Ok(ApiResponse::success(CategoryResponse::from(category)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
}
