//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod categories;
pub mod publications;

use sqlx::{Pool, Postgres};

use crate::error::{AppError, AppResult};

/// Postgres error code for a foreign key violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub categories: categories::CategoriesRepository,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub publications: publications::PublicationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            categories: categories::CategoriesRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            publications: publications::PublicationsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// `WHERE` clause from a list of conditions, empty when there are none
pub(crate) fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

/// Case-insensitive substring condition on `column` for parameter `$idx`
pub(crate) fn contains_condition(column: &str, idx: usize) -> String {
    format!("POSITION(LOWER(${}) IN LOWER({})) > 0", idx, column)
}

/// Error for a version-guarded write that matched no row.
///
/// The row either disappeared (concurrent delete, reported as not found)
/// or was changed by another writer since it was read.
pub(crate) fn lost_update(entity: &str, id: i32, still_exists: bool) -> AppError {
    if still_exists {
        AppError::ConcurrencyConflict(format!(
            "{} {} was modified by another writer",
            entity, id
        ))
    } else {
        AppError::NotFound(format!("{} {} not found", entity, id))
    }
}

/// Whether a row with `id` exists in `table`
pub(crate) async fn row_exists(pool: &Pool<Postgres>, table: &str, id: i32) -> AppResult<bool> {
    let query = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", table);
    let exists: bool = sqlx::query_scalar(&query).bind(id).fetch_one(pool).await?;
    Ok(exists)
}

/// Number of rows in `table` whose `column` references `id`
pub(crate) async fn count_references(
    pool: &Pool<Postgres>,
    table: &str,
    column: &str,
    id: i32,
) -> AppResult<i64> {
    let query = format!("SELECT COUNT(*) FROM {} WHERE {} = $1", table, column);
    let count: i64 = sqlx::query_scalar(&query).bind(id).fetch_one(pool).await?;
    Ok(count)
}

/// Map a foreign key violation raised by the database to `on_violation`
pub(crate) fn map_fk_violation(err: sqlx::Error, on_violation: impl FnOnce() -> AppError) -> AppError {
    let is_fk_violation = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == FOREIGN_KEY_VIOLATION)
        .unwrap_or(false);
    if is_fk_violation {
        on_violation()
    } else {
        AppError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_clause() {
        assert_eq!(where_clause(&[]), "");
        assert_eq!(
            where_clause(&["a = $1".to_string(), "b = $2".to_string()]),
            "WHERE a = $1 AND b = $2"
        );
    }

    #[test]
    fn test_contains_condition() {
        assert_eq!(
            contains_condition("a.first_name", 1),
            "POSITION(LOWER($1) IN LOWER(a.first_name)) > 0"
        );
    }

    #[test]
    fn test_lost_update_after_delete_is_not_found() {
        assert!(matches!(lost_update("Author", 3, false), AppError::NotFound(_)));
    }

    #[test]
    fn test_lost_update_on_live_row_is_conflict() {
        assert!(matches!(
            lost_update("Author", 3, true),
            AppError::ConcurrencyConflict(_)
        ));
    }

    #[test]
    fn test_non_database_error_is_kept() {
        let err = map_fk_violation(sqlx::Error::RowNotFound, || {
            AppError::Validation("unused".to_string())
        });
        assert!(matches!(err, AppError::Database(_)));
    }
}
