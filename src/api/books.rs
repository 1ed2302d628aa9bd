//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookDetails, BookFilterForm, BookListing, CreateBook, UpdateBook},
        form::BookForm,
        listing::ListQuery,
    },
    AppState,
};

/// List books with their category, sorting and title search
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(ListQuery),
    responses(
        (status = 200, description = "Book listing", body = BookListing)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<BookListing>> {
    let listing = state.services.books.list(&query).await?;
    Ok(Json(listing))
}

/// Filter books by title and category selection
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookFilterForm,
    responses(
        (status = 200, description = "Filtered books", body = BookListing),
        (status = 400, description = "Malformed category selection", body = crate::error::ErrorResponse)
    )
)]
pub async fn filter_books(
    State(state): State<AppState>,
    Json(form): Json<BookFilterForm>,
) -> AppResult<Json<BookListing>> {
    let listing = state.services.books.filter(&form).await?;
    Ok(Json(listing))
}

/// Get book details with category
#[utoipa::path(
    get,
    path = "/books/details/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetails>> {
    let book = state.services.books.get(id).await?;
    Ok(Json(book))
}

/// Empty book form with the category list
#[utoipa::path(
    get,
    path = "/books/create",
    tag = "books",
    responses(
        (status = 200, description = "Book form", body = BookForm)
    )
)]
pub async fn create_book_form(State(state): State<AppState>) -> AppResult<Json<BookForm>> {
    let form = state.services.books.create_form().await?;
    Ok(Json(form))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books/create",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid book", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(data): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.create(&data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Book form filled with the current row
#[utoipa::path(
    get,
    path = "/books/edit/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book form", body = BookForm),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn edit_book_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookForm>> {
    let form = state.services.books.edit_form(id).await?;
    Ok(Json(form))
}

/// Update a book
#[utoipa::path(
    post,
    path = "/books/edit/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid book", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found or id mismatch", body = crate::error::ErrorResponse),
        (status = 500, description = "Concurrent modification", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.update(id, &data).await?;
    Ok(Json(book))
}

/// Book shown for delete confirmation
#[utoipa::path(
    get,
    path = "/books/delete/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book to delete", body = BookDetails),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book_confirm(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetails>> {
    let book = state.services.books.get(id).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    post,
    path = "/books/delete/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted (or already absent)"),
        (status = 422, description = "Book has publications", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
