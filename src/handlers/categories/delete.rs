// handlers/categories/delete.rs - DELETE /categories/:id handler

use axum::{extract::Path, Extension};

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::ItineraryService;

/// DELETE /categories/:id - Remove a category
///
/// Events referencing it are kept and simply lose their category.
pub async fn category_delete(
    Path(id): Path<i64>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<()> {
    current.require()?;

    let service = ItineraryService::new().await?;
    service.delete_category(id).await?;

    Ok(ApiResponse::<()>::no_content())
}
