//! API handlers for the library catalog REST endpoints

pub mod authors;
pub mod books;
pub mod categories;
pub mod health;
pub mod openapi;
pub mod publications;

use axum::{
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authors
        .route("/authors", get(authors::list_authors))
        .route("/authors/details/:id", get(authors::get_author))
        .route(
            "/authors/create",
            get(authors::create_author_form).post(authors::create_author),
        )
        .route(
            "/authors/edit/:id",
            get(authors::edit_author_form).post(authors::update_author),
        )
        .route(
            "/authors/delete/:id",
            get(authors::delete_author_confirm).post(authors::delete_author),
        )
        // Books
        .route("/books", get(books::list_books).post(books::filter_books))
        .route("/books/details/:id", get(books::get_book))
        .route(
            "/books/create",
            get(books::create_book_form).post(books::create_book),
        )
        .route(
            "/books/edit/:id",
            get(books::edit_book_form).post(books::update_book),
        )
        .route(
            "/books/delete/:id",
            get(books::delete_book_confirm).post(books::delete_book),
        )
        // Publications
        .route("/publications", get(publications::list_publications))
        .route("/publications/details/:id", get(publications::get_publication))
        .route(
            "/publications/create",
            get(publications::create_publication_form).post(publications::create_publication),
        )
        .route(
            "/publications/edit/:id",
            get(publications::edit_publication_form).post(publications::update_publication),
        )
        .route(
            "/publications/delete/:id",
            get(publications::delete_publication_confirm)
                .post(publications::delete_publication),
        )
        // Categories
        .route("/categories", get(categories::list_categories))
        .route("/categories/options", get(categories::category_options))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
