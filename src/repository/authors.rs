//! Authors repository

use sqlx::{Pool, Postgres};

use super::{contains_condition, count_references, lost_update, map_fk_violation, row_exists, where_clause};
use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorSortKey, CreateAuthor, UpdateAuthor},
        listing::SortOrder,
    },
};

const AUTHOR_COLUMNS: &str = "a.id, a.first_name, a.last_name, a.age, a.email, a.phone, a.row_version";

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List authors, optionally filtered on first name
    pub async fn list(
        &self,
        sort: &SortOrder<AuthorSortKey>,
        search: Option<&str>,
    ) -> AppResult<Vec<Author>> {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(term) = search {
            params.push(term.to_string());
            conditions.push(contains_condition("a.first_name", params.len()));
        }

        let query = format!(
            "SELECT {} FROM authors a {} ORDER BY {}",
            AUTHOR_COLUMNS,
            where_clause(&conditions),
            sort.order_by()
        );

        let mut builder = sqlx::query_as::<_, Author>(&query);
        for param in &params {
            builder = builder.bind(param);
        }
        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        let query = format!("SELECT {} FROM authors a WHERE a.id = $1", AUTHOR_COLUMNS);
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// `(id, first_name)` pairs for selection controls
    pub async fn options(&self) -> AppResult<Vec<(i32, String)>> {
        let rows = sqlx::query_as::<_, (i32, String)>(
            "SELECT id, first_name FROM authors ORDER BY first_name, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        row_exists(&self.pool, "authors", id).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create an author
    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, last_name, age, email, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, age, email, phone, row_version
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.age)
        .bind(&data.email)
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update an author if it still carries the version the caller read
    pub async fn update(&self, id: i32, data: &UpdateAuthor) -> AppResult<Author> {
        let updated = sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors SET
                first_name = $1,
                last_name = $2,
                age = $3,
                email = $4,
                phone = $5,
                row_version = row_version + 1
            WHERE id = $6 AND row_version = $7
            RETURNING id, first_name, last_name, age, email, phone, row_version
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.age)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(id)
        .bind(data.row_version)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(author) => Ok(author),
            None => Err(lost_update("Author", id, self.exists(id).await?)),
        }
    }

    /// Delete an author; deleting an absent author is not an error
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let publications = count_references(&self.pool, "publications", "author_id", id).await?;
        if publications > 0 {
            return Err(AppError::BusinessRule(format!(
                "Author {} has {} publication(s)",
                id, publications
            )));
        }

        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_fk_violation(e, || {
                    AppError::BusinessRule(format!("Author {} has publications", id))
                })
            })?;
        Ok(())
    }
}
