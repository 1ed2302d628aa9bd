//! Author model and related types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::listing::SortKey;
use super::validation::not_blank;

/// Author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub age: i32,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Optimistic concurrency token, bumped on every update
    pub row_version: i32,
}

/// Create author request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub first_name: String,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub last_name: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub age: i32,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Update author request; `id` must match the path
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    pub id: i32,
    /// Version read when the edit form was loaded
    pub row_version: i32,
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub first_name: String,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub last_name: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub age: i32,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Author listing
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorListing {
    pub authors: Vec<Author>,
    pub current_sort: Option<String>,
    pub search_string: Option<String>,
    /// Next sort token per column
    pub sort_links: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorSortKey {
    #[default]
    FirstName,
    LastName,
    Age,
}

impl SortKey for AuthorSortKey {
    const STEMS: &'static [(&'static str, Self)] = &[
        ("firstName", AuthorSortKey::FirstName),
        ("first_name", AuthorSortKey::FirstName),
        ("lastName", AuthorSortKey::LastName),
        ("last_name", AuthorSortKey::LastName),
        ("age", AuthorSortKey::Age),
    ];
    const TIE_BREAKER: &'static str = "a.id";

    fn column(self) -> &'static str {
        match self {
            AuthorSortKey::FirstName => "a.first_name",
            AuthorSortKey::LastName => "a.last_name",
            AuthorSortKey::Age => "a.age",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listing::SortOrder;

    fn valid_author() -> CreateAuthor {
        CreateAuthor {
            first_name: "Jane".to_string(),
            last_name: Some("Austen".to_string()),
            age: 41,
            email: Some("jane@example.com".to_string()),
            phone: None,
        }
    }

    #[test]
    fn test_valid_author() {
        assert!(valid_author().validate().is_ok());
    }

    #[test]
    fn test_first_name_required() {
        let mut author = valid_author();
        author.first_name = "  ".to_string();
        assert!(author.validate().is_err());
    }

    #[test]
    fn test_name_length() {
        let mut author = valid_author();
        author.last_name = Some("x".repeat(101));
        assert!(author.validate().is_err());

        let mut author = valid_author();
        author.first_name = "x".repeat(100);
        assert!(author.validate().is_ok());
    }

    #[test]
    fn test_email_format() {
        let mut author = valid_author();
        author.email = Some("not-an-email".to_string());
        assert!(author.validate().is_err());
    }

    #[test]
    fn test_sort_tokens() {
        let order = SortOrder::<AuthorSortKey>::parse(Some("lastName_desc"));
        assert_eq!(order.order_by(), "a.last_name DESC, a.id ASC");

        let order = SortOrder::<AuthorSortKey>::parse(Some("first_name_desc"));
        assert_eq!(order.key, AuthorSortKey::FirstName);

        let order = SortOrder::<AuthorSortKey>::parse(Some("bogus"));
        assert_eq!(order.order_by(), "a.first_name ASC, a.id ASC");
    }
}
