//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, categories, health, publications};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Catalog API",
        version = "1.0.0",
        description = "Authors, books, categories and publications REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author_form,
        authors::create_author,
        authors::edit_author_form,
        authors::update_author,
        authors::delete_author_confirm,
        authors::delete_author,
        // Books
        books::list_books,
        books::filter_books,
        books::get_book,
        books::create_book_form,
        books::create_book,
        books::edit_book_form,
        books::update_book,
        books::delete_book_confirm,
        books::delete_book,
        // Publications
        publications::list_publications,
        publications::get_publication,
        publications::create_publication_form,
        publications::create_publication,
        publications::edit_publication_form,
        publications::update_publication,
        publications::delete_publication_confirm,
        publications::delete_publication,
        // Categories
        categories::list_categories,
        categories::category_options,
    ),
    components(
        schemas(
            // Shared
            crate::models::listing::SortDirection,
            crate::models::form::SelectOption,
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            crate::models::author::AuthorListing,
            crate::models::form::AuthorForm,
            // Books
            crate::models::book::Book,
            crate::models::book::BookDetails,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::BookListing,
            crate::models::book::BookFilterForm,
            crate::models::book::CategorySelection,
            crate::models::form::BookForm,
            // Categories
            crate::models::category::Category,
            // Publications
            crate::models::publication::Publication,
            crate::models::publication::PublicationDetails,
            crate::models::publication::CreatePublication,
            crate::models::publication::UpdatePublication,
            crate::models::publication::PublicationListing,
            crate::models::form::PublicationForm,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book catalog management"),
        (name = "categories", description = "Category reference data"),
        (name = "publications", description = "Author/book publication records")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_catalog_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/authors",
            "/authors/edit/{id}",
            "/books",
            "/books/delete/{id}",
            "/publications/details/{id}",
            "/categories/options",
            "/ready",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {}", expected);
        }
    }
}
