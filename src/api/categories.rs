//! Category reference data endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{category::Category, form::SelectOption},
    AppState,
};

/// List categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Categories ordered by name", body = Vec<Category>)
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.categories.list().await?;
    Ok(Json(categories))
}

/// Category selection list
#[utoipa::path(
    get,
    path = "/categories/options",
    tag = "categories",
    responses(
        (status = 200, description = "Category id/name pairs", body = Vec<SelectOption>)
    )
)]
pub async fn category_options(State(state): State<AppState>) -> AppResult<Json<Vec<SelectOption>>> {
    let options = state.services.categories.options(None).await?;
    Ok(Json(options))
}
