//! Publication endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        form::PublicationForm,
        listing::ListQuery,
        publication::{
            CreatePublication, Publication, PublicationDetails, PublicationListing,
            UpdatePublication,
        },
    },
    AppState,
};

/// List publications with author and book, sorting and author search
#[utoipa::path(
    get,
    path = "/publications",
    tag = "publications",
    params(ListQuery),
    responses(
        (status = 200, description = "Publication listing", body = PublicationListing)
    )
)]
pub async fn list_publications(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PublicationListing>> {
    let listing = state.services.publications.list(&query).await?;
    Ok(Json(listing))
}

/// Get publication details
#[utoipa::path(
    get,
    path = "/publications/details/{id}",
    tag = "publications",
    params(("id" = i32, Path, description = "Publication ID")),
    responses(
        (status = 200, description = "Publication details", body = PublicationDetails),
        (status = 404, description = "Publication not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_publication(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PublicationDetails>> {
    let publication = state.services.publications.get(id).await?;
    Ok(Json(publication))
}

/// Empty publication form with author and book lists
#[utoipa::path(
    get,
    path = "/publications/create",
    tag = "publications",
    responses(
        (status = 200, description = "Publication form", body = PublicationForm)
    )
)]
pub async fn create_publication_form(
    State(state): State<AppState>,
) -> AppResult<Json<PublicationForm>> {
    let form = state.services.publications.create_form().await?;
    Ok(Json(form))
}

/// Create a publication
#[utoipa::path(
    post,
    path = "/publications/create",
    tag = "publications",
    request_body = CreatePublication,
    responses(
        (status = 201, description = "Publication created", body = Publication),
        (status = 400, description = "Unknown author or book", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_publication(
    State(state): State<AppState>,
    Json(data): Json<CreatePublication>,
) -> AppResult<(StatusCode, Json<Publication>)> {
    let publication = state.services.publications.create(&data).await?;
    Ok((StatusCode::CREATED, Json(publication)))
}

/// Publication form filled with the current row
#[utoipa::path(
    get,
    path = "/publications/edit/{id}",
    tag = "publications",
    params(("id" = i32, Path, description = "Publication ID")),
    responses(
        (status = 200, description = "Publication form", body = PublicationForm),
        (status = 404, description = "Publication not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn edit_publication_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PublicationForm>> {
    let form = state.services.publications.edit_form(id).await?;
    Ok(Json(form))
}

/// Update a publication
#[utoipa::path(
    post,
    path = "/publications/edit/{id}",
    tag = "publications",
    params(("id" = i32, Path, description = "Publication ID")),
    request_body = UpdatePublication,
    responses(
        (status = 200, description = "Publication updated", body = Publication),
        (status = 404, description = "Publication not found or id mismatch", body = crate::error::ErrorResponse),
        (status = 500, description = "Concurrent modification", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_publication(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdatePublication>,
) -> AppResult<Json<Publication>> {
    let publication = state.services.publications.update(id, &data).await?;
    Ok(Json(publication))
}

/// Publication shown for delete confirmation
#[utoipa::path(
    get,
    path = "/publications/delete/{id}",
    tag = "publications",
    params(("id" = i32, Path, description = "Publication ID")),
    responses(
        (status = 200, description = "Publication to delete", body = PublicationDetails),
        (status = 404, description = "Publication not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_publication_confirm(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PublicationDetails>> {
    let publication = state.services.publications.get(id).await?;
    Ok(Json(publication))
}

/// Delete a publication
#[utoipa::path(
    post,
    path = "/publications/delete/{id}",
    tag = "publications",
    params(("id" = i32, Path, description = "Publication ID")),
    responses(
        (status = 204, description = "Publication deleted (or already absent)")
    )
)]
pub async fn delete_publication(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.publications.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
