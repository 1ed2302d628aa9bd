//! Author endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorListing, CreateAuthor, UpdateAuthor},
        form::AuthorForm,
        listing::ListQuery,
    },
    AppState,
};

/// List authors with sorting and first-name search
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(ListQuery),
    responses(
        (status = 200, description = "Author listing", body = AuthorListing)
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AuthorListing>> {
    let listing = state.services.authors.list(&query).await?;
    Ok(Json(listing))
}

/// Get author details
#[utoipa::path(
    get,
    path = "/authors/details/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.get(id).await?;
    Ok(Json(author))
}

/// Empty author form
#[utoipa::path(
    get,
    path = "/authors/create",
    tag = "authors",
    responses(
        (status = 200, description = "Author form", body = AuthorForm)
    )
)]
pub async fn create_author_form(State(state): State<AppState>) -> Json<AuthorForm> {
    Json(state.services.authors.create_form())
}

/// Create an author
#[utoipa::path(
    post,
    path = "/authors/create",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid author", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Json(data): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let author = state.services.authors.create(&data).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

/// Author form filled with the current row
#[utoipa::path(
    get,
    path = "/authors/edit/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author form", body = AuthorForm),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn edit_author_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorForm>> {
    let form = state.services.authors.edit_form(id).await?;
    Ok(Json(form))
}

/// Update an author
#[utoipa::path(
    post,
    path = "/authors/edit/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 400, description = "Invalid author", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found or id mismatch", body = crate::error::ErrorResponse),
        (status = 500, description = "Concurrent modification", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.update(id, &data).await?;
    Ok(Json(author))
}

/// Author shown for delete confirmation
#[utoipa::path(
    get,
    path = "/authors/delete/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author to delete", body = Author),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author_confirm(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.get(id).await?;
    Ok(Json(author))
}

/// Delete an author
#[utoipa::path(
    post,
    path = "/authors/delete/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted (or already absent)"),
        (status = 422, description = "Author has publications", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.authors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
