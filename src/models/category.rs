//! Category model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book category (reference data)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// New category, used by the fixture seeder
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
}
