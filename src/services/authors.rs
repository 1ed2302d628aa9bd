//! Author query service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorListing, AuthorSortKey, CreateAuthor, UpdateAuthor},
        form::AuthorForm,
        listing::{ListQuery, SortOrder},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List authors with sorting and first-name search
    pub async fn list(&self, query: &ListQuery) -> AppResult<AuthorListing> {
        let sort = SortOrder::<AuthorSortKey>::parse(query.sort_order.as_deref());
        let search = query.search_term();
        let authors = self.repository.authors.list(&sort, search).await?;

        Ok(AuthorListing {
            authors,
            current_sort: query.sort_order.clone(),
            search_string: search.map(str::to_string),
            sort_links: SortOrder::<AuthorSortKey>::links(query.sort_order.as_deref()),
        })
    }

    pub async fn get(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub fn create_form(&self) -> AuthorForm {
        AuthorForm { author: None }
    }

    pub async fn edit_form(&self, id: i32) -> AppResult<AuthorForm> {
        let author = self.repository.authors.get_by_id(id).await?;
        Ok(AuthorForm {
            author: Some(author),
        })
    }

    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        data.validate()?;
        let author = self.repository.authors.create(data).await?;
        tracing::info!(author_id = author.id, "Author created");
        Ok(author)
    }

    /// Update an author.
    ///
    /// A body whose `id` differs from the path is rejected as not found
    /// before anything is validated or written.
    pub async fn update(&self, id: i32, data: &UpdateAuthor) -> AppResult<Author> {
        if id != data.id {
            return Err(AppError::NotFound(format!(
                "Author {} does not match request body id {}",
                id, data.id
            )));
        }
        data.validate()?;

        let author = self.repository.authors.update(id, data).await.map_err(|e| {
            if let AppError::NotFound(_) = e {
                tracing::warn!(author_id = id, "Author vanished before update");
            }
            e
        })?;
        tracing::info!(author_id = id, row_version = author.row_version, "Author updated");
        Ok(author)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await?;
        tracing::info!(author_id = id, "Author deleted");
        Ok(())
    }
}
