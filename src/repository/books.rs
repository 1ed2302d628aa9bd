//! Books repository. Every read joins the book's category.

use sqlx::{Pool, Postgres};

use super::{contains_condition, count_references, lost_update, map_fk_violation, row_exists, where_clause};
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookDetails, BookFilter, BookSortKey, CreateBook, UpdateBook},
        listing::SortOrder,
    },
};

const BOOK_DETAILS_SELECT: &str = r#"
    SELECT b.id, b.title, b.description, b.price, b.category_id, b.row_version,
           c.name AS category_name
    FROM books b
    JOIN categories c ON c.id = b.category_id
"#;

const BOOK_RETURNING: &str = "RETURNING id, title, description, price, category_id, row_version";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List books with their category, optionally filtered on title
    pub async fn list(
        &self,
        sort: &SortOrder<BookSortKey>,
        search: Option<&str>,
    ) -> AppResult<Vec<BookDetails>> {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(term) = search {
            params.push(term.to_string());
            conditions.push(contains_condition("b.title", params.len()));
        }

        let query = format!(
            "{} {} ORDER BY {}",
            BOOK_DETAILS_SELECT,
            where_clause(&conditions),
            sort.order_by()
        );

        let mut builder = sqlx::query_as::<_, BookDetails>(&query);
        for param in &params {
            builder = builder.bind(param);
        }
        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Books matching the combined title/category filter, in insertion order
    pub async fn filter(&self, filter: &BookFilter) -> AppResult<Vec<BookDetails>> {
        let (search, category_ids) = match filter {
            BookFilter::Unfiltered => (None, &[][..]),
            BookFilter::Filtered {
                search,
                category_ids,
            } => (search.as_deref(), category_ids.as_slice()),
        };

        let mut conditions = Vec::new();
        let mut idx = 0;
        if search.is_some() {
            idx += 1;
            conditions.push(contains_condition("b.title", idx));
        }
        if !category_ids.is_empty() {
            idx += 1;
            conditions.push(format!("b.category_id = ANY(${})", idx));
        }

        let query = format!(
            "{} {} ORDER BY b.id",
            BOOK_DETAILS_SELECT,
            where_clause(&conditions)
        );

        let mut builder = sqlx::query_as::<_, BookDetails>(&query);
        if let Some(term) = search {
            builder = builder.bind(term);
        }
        if !category_ids.is_empty() {
            builder = builder.bind(category_ids);
        }
        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get book with its category by ID
    pub async fn get_details(&self, id: i32) -> AppResult<BookDetails> {
        let query = format!("{} WHERE b.id = $1", BOOK_DETAILS_SELECT);
        sqlx::query_as::<_, BookDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Get the bare book row by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, description, price, category_id, row_version FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// `(id, title)` pairs for selection controls
    pub async fn options(&self) -> AppResult<Vec<(i32, String)>> {
        let rows = sqlx::query_as::<_, (i32, String)>("SELECT id, title FROM books ORDER BY title, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        row_exists(&self.pool, "books", id).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create a book
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let query = format!(
            "INSERT INTO books (title, description, price, category_id) VALUES ($1, $2, $3, $4) {}",
            BOOK_RETURNING
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&data.title)
            .bind(&data.description)
            .bind(data.price)
            .bind(data.category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                map_fk_violation(e, || {
                    AppError::Validation(format!("category_id: category {} does not exist", data.category_id))
                })
            })
    }

    /// Update a book if it still carries the version the caller read
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let query = format!(
            r#"
            UPDATE books SET
                title = $1,
                description = $2,
                price = $3,
                category_id = $4,
                row_version = row_version + 1
            WHERE id = $5 AND row_version = $6
            {}
            "#,
            BOOK_RETURNING
        );
        let updated = sqlx::query_as::<_, Book>(&query)
            .bind(&data.title)
            .bind(&data.description)
            .bind(data.price)
            .bind(data.category_id)
            .bind(id)
            .bind(data.row_version)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                map_fk_violation(e, || {
                    AppError::Validation(format!("category_id: category {} does not exist", data.category_id))
                })
            })?;

        match updated {
            Some(book) => Ok(book),
            None => Err(lost_update("Book", id, self.exists(id).await?)),
        }
    }

    /// Delete a book; deleting an absent book is not an error
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let publications = count_references(&self.pool, "publications", "book_id", id).await?;
        if publications > 0 {
            return Err(AppError::BusinessRule(format!(
                "Book {} has {} publication(s)",
                id, publications
            )));
        }

        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_fk_violation(e, || AppError::BusinessRule(format!("Book {} has publications", id)))
            })?;
        Ok(())
    }
}
