//! Book model, joined read shape and the combined listing filter

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use utoipa::ToSchema;
use validator::Validate;

use super::category::Category;
use super::form::SelectOption;
use super::listing::{search_term, SortKey};
use super::validation::{currency, not_blank};
use crate::{
    config::MultiCategoryFilter,
    error::{AppError, AppResult},
};

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub category_id: i32,
    pub row_version: i32,
}

/// Book with its category loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub category_id: i32,
    pub row_version: i32,
    pub category: Category,
}

impl<'r> FromRow<'r, PgRow> for BookDetails {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let category_id: i32 = row.try_get("category_id")?;
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            category_id,
            row_version: row.try_get("row_version")?,
            category: Category {
                id: category_id,
                name: row.try_get("category_name")?,
            },
        })
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub title: String,
    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "must be at most 255 characters")
    )]
    pub description: String,
    #[validate(custom(function = "currency"))]
    #[schema(value_type = String)]
    pub price: Decimal,
    pub category_id: i32,
}

/// Update book request; `id` must match the path
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    pub id: i32,
    pub row_version: i32,
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub title: String,
    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "must be at most 255 characters")
    )]
    pub description: String,
    #[validate(custom(function = "currency"))]
    #[schema(value_type = String)]
    pub price: Decimal,
    pub category_id: i32,
}

/// Book listing; `categories` feeds the filter form and is absent for an
/// unfiltered filter submission
#[derive(Debug, Serialize, ToSchema)]
pub struct BookListing {
    pub books: Vec<BookDetails>,
    pub categories: Option<Vec<SelectOption>>,
    pub current_sort: Option<String>,
    pub search_string: Option<String>,
    pub sort_links: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookSortKey {
    #[default]
    Title,
    Description,
    Price,
    CategoryName,
}

impl SortKey for BookSortKey {
    const STEMS: &'static [(&'static str, Self)] = &[
        ("title", BookSortKey::Title),
        ("description", BookSortKey::Description),
        ("price", BookSortKey::Price),
        ("category", BookSortKey::CategoryName),
        ("category_name", BookSortKey::CategoryName),
    ];
    const TIE_BREAKER: &'static str = "b.id";

    fn column(self) -> &'static str {
        match self {
            BookSortKey::Title => "b.title",
            BookSortKey::Description => "b.description",
            BookSortKey::Price => "b.price",
            BookSortKey::CategoryName => "c.name",
        }
    }
}

/// Category field of the book filter form: one id, several ids, or the
/// raw multi-value text (`"1,2,3"`)
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CategorySelection {
    One(i32),
    Many(Vec<i32>),
    Raw(String),
}

impl CategorySelection {
    pub fn ids(&self) -> AppResult<Vec<i32>> {
        let mut ids = match self {
            CategorySelection::One(id) => vec![*id],
            CategorySelection::Many(ids) => ids.clone(),
            CategorySelection::Raw(raw) => raw
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .map(|part| {
                    part.parse::<i32>().map_err(|_| {
                        AppError::Validation(format!("category: '{}' is not a category id", part))
                    })
                })
                .collect::<AppResult<Vec<i32>>>()?,
        };
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }
}

/// Book filter form (`POST /books`)
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookFilterForm {
    pub search_string: Option<String>,
    pub category: Option<CategorySelection>,
}

/// Resolved book filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    /// Every book, in insertion order, without the category list
    Unfiltered,
    Filtered {
        search: Option<String>,
        /// Empty means any category
        category_ids: Vec<i32>,
    },
}

impl BookFilter {
    pub fn resolve(form: &BookFilterForm, mode: MultiCategoryFilter) -> AppResult<Self> {
        let search = search_term(form.search_string.as_deref()).map(str::to_string);
        let ids = match &form.category {
            Some(selection) => selection.ids()?,
            None => Vec::new(),
        };

        let filter = match (search, ids.len(), mode) {
            (search, 1, _) => BookFilter::Filtered {
                search,
                category_ids: ids,
            },
            (None, 0, _) => BookFilter::Unfiltered,
            (Some(search), 0, MultiCategoryFilter::AnyOf) => BookFilter::Filtered {
                search: Some(search),
                category_ids: Vec::new(),
            },
            (search, _, MultiCategoryFilter::AnyOf) => BookFilter::Filtered {
                search,
                category_ids: ids,
            },
            (Some(search), n, MultiCategoryFilter::SearchOnly) if n > 1 => {
                BookFilter::Filtered {
                    search: Some(search),
                    category_ids: Vec::new(),
                }
            }
            (_, _, MultiCategoryFilter::SearchOnly) => BookFilter::Unfiltered,
        };
        Ok(filter)
    }
}
