//! Publications repository. Every read joins the author and the book.

use sqlx::{Pool, Postgres};

use super::{contains_condition, lost_update, map_fk_violation, row_exists, where_clause};
use crate::{
    error::{AppError, AppResult},
    models::{
        listing::SortOrder,
        publication::{
            CreatePublication, Publication, PublicationDetails, PublicationSortKey,
            UpdatePublication,
        },
    },
};

const PUBLICATION_DETAILS_SELECT: &str = r#"
    SELECT p.id, p.published_date, p.author_id, p.book_id, p.row_version,
           a.first_name AS author_first_name, a.last_name AS author_last_name,
           a.age AS author_age, a.email AS author_email, a.phone AS author_phone,
           a.row_version AS author_row_version,
           b.title AS book_title, b.description AS book_description, b.price AS book_price,
           b.category_id AS book_category_id, b.row_version AS book_row_version
    FROM publications p
    JOIN authors a ON a.id = p.author_id
    JOIN books b ON b.id = p.book_id
"#;

const PUBLICATION_RETURNING: &str = "RETURNING id, published_date, author_id, book_id, row_version";

fn missing_reference(author_id: i32, book_id: i32) -> AppError {
    AppError::Validation(format!(
        "author_id/book_id: author {} or book {} does not exist",
        author_id, book_id
    ))
}

#[derive(Clone)]
pub struct PublicationsRepository {
    pool: Pool<Postgres>,
}

impl PublicationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List publications, optionally filtered on the author's first name
    pub async fn list(
        &self,
        sort: &SortOrder<PublicationSortKey>,
        search: Option<&str>,
    ) -> AppResult<Vec<PublicationDetails>> {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(term) = search {
            params.push(term.to_string());
            conditions.push(contains_condition("a.first_name", params.len()));
        }

        let query = format!(
            "{} {} ORDER BY {}",
            PUBLICATION_DETAILS_SELECT,
            where_clause(&conditions),
            sort.order_by()
        );

        let mut builder = sqlx::query_as::<_, PublicationDetails>(&query);
        for param in &params {
            builder = builder.bind(param);
        }
        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get publication with author and book by ID
    pub async fn get_details(&self, id: i32) -> AppResult<PublicationDetails> {
        let query = format!("{} WHERE p.id = $1", PUBLICATION_DETAILS_SELECT);
        sqlx::query_as::<_, PublicationDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Publication {} not found", id)))
    }

    /// Get the bare publication row by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Publication> {
        sqlx::query_as::<_, Publication>(
            "SELECT id, published_date, author_id, book_id, row_version FROM publications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Publication {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        row_exists(&self.pool, "publications", id).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM publications")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create a publication
    pub async fn create(&self, data: &CreatePublication) -> AppResult<Publication> {
        let query = format!(
            "INSERT INTO publications (published_date, author_id, book_id) VALUES ($1, $2, $3) {}",
            PUBLICATION_RETURNING
        );
        sqlx::query_as::<_, Publication>(&query)
            .bind(data.published_date)
            .bind(data.author_id)
            .bind(data.book_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, || missing_reference(data.author_id, data.book_id)))
    }

    /// Update a publication if it still carries the version the caller read
    pub async fn update(&self, id: i32, data: &UpdatePublication) -> AppResult<Publication> {
        let query = format!(
            r#"
            UPDATE publications SET
                published_date = $1,
                author_id = $2,
                book_id = $3,
                row_version = row_version + 1
            WHERE id = $4 AND row_version = $5
            {}
            "#,
            PUBLICATION_RETURNING
        );
        let updated = sqlx::query_as::<_, Publication>(&query)
            .bind(data.published_date)
            .bind(data.author_id)
            .bind(data.book_id)
            .bind(id)
            .bind(data.row_version)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, || missing_reference(data.author_id, data.book_id)))?;

        match updated {
            Some(publication) => Ok(publication),
            None => Err(lost_update("Publication", id, self.exists(id).await?)),
        }
    }

    /// Delete a publication; deleting an absent publication is not an error
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM publications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
