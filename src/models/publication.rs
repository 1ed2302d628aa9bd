//! Publication model: an author published a book on a date

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use utoipa::ToSchema;
use validator::Validate;

use super::author::Author;
use super::book::Book;
use super::listing::SortKey;

/// Publication record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Publication {
    pub id: i32,
    pub published_date: DateTime<Utc>,
    pub author_id: i32,
    pub book_id: i32,
    pub row_version: i32,
}

/// Publication with author and book loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PublicationDetails {
    pub id: i32,
    pub published_date: DateTime<Utc>,
    pub author_id: i32,
    pub book_id: i32,
    pub row_version: i32,
    pub author: Author,
    pub book: Book,
}

impl<'r> FromRow<'r, PgRow> for PublicationDetails {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let author_id: i32 = row.try_get("author_id")?;
        let book_id: i32 = row.try_get("book_id")?;
        Ok(Self {
            id: row.try_get("id")?,
            published_date: row.try_get("published_date")?,
            author_id,
            book_id,
            row_version: row.try_get("row_version")?,
            author: Author {
                id: author_id,
                first_name: row.try_get("author_first_name")?,
                last_name: row.try_get("author_last_name")?,
                age: row.try_get("author_age")?,
                email: row.try_get("author_email")?,
                phone: row.try_get("author_phone")?,
                row_version: row.try_get("author_row_version")?,
            },
            book: Book {
                id: book_id,
                title: row.try_get("book_title")?,
                description: row.try_get("book_description")?,
                price: row.try_get("book_price")?,
                category_id: row.try_get("book_category_id")?,
                row_version: row.try_get("book_row_version")?,
            },
        })
    }
}

/// Create publication request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePublication {
    pub published_date: DateTime<Utc>,
    pub author_id: i32,
    pub book_id: i32,
}

/// Update publication request; `id` must match the path
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdatePublication {
    pub id: i32,
    pub row_version: i32,
    pub published_date: DateTime<Utc>,
    pub author_id: i32,
    pub book_id: i32,
}

/// Publication listing
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicationListing {
    pub publications: Vec<PublicationDetails>,
    pub current_sort: Option<String>,
    pub search_string: Option<String>,
    pub sort_links: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublicationSortKey {
    PublishedDate,
    #[default]
    AuthorFirstName,
    BookTitle,
}

impl SortKey for PublicationSortKey {
    const STEMS: &'static [(&'static str, Self)] = &[
        ("publishedDate", PublicationSortKey::PublishedDate),
        ("published_date", PublicationSortKey::PublishedDate),
        ("author", PublicationSortKey::AuthorFirstName),
        ("author_first_name", PublicationSortKey::AuthorFirstName),
        ("book", PublicationSortKey::BookTitle),
        ("book_title", PublicationSortKey::BookTitle),
    ];
    const TIE_BREAKER: &'static str = "p.id";

    fn column(self) -> &'static str {
        match self {
            PublicationSortKey::PublishedDate => "p.published_date",
            PublicationSortKey::AuthorFirstName => "a.first_name",
            PublicationSortKey::BookTitle => "b.title",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listing::SortOrder;

    #[test]
    fn test_default_sort_is_author_first_name() {
        let order = SortOrder::<PublicationSortKey>::parse(None);
        assert_eq!(order.order_by(), "a.first_name ASC, p.id ASC");
    }

    #[test]
    fn test_snake_case_aliases() {
        let order = SortOrder::<PublicationSortKey>::parse(Some("book_title_desc"));
        assert_eq!(order.key, PublicationSortKey::BookTitle);
        assert_eq!(order.token(), "book_desc");

        let order = SortOrder::<PublicationSortKey>::parse(Some("published_date_asc"));
        assert_eq!(order.key, PublicationSortKey::PublishedDate);
    }

    #[test]
    fn test_links_use_camel_case_stems() {
        let links = SortOrder::<PublicationSortKey>::links(Some("publishedDate_asc"));
        assert_eq!(links.len(), 3);
        assert_eq!(links["publishedDate"], "publishedDate_desc");
        assert_eq!(links["author"], "author_asc");
        assert_eq!(links["book"], "book_asc");
    }
}
