pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

pub use create::category_create;
pub use delete::category_delete;
pub use list::category_list;
pub use show::category_show;
pub use update::category_update;

use serde::Serialize;

use crate::database::models::Category;

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}
