//! Publication query service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        form::{PublicationForm, SelectOption},
        listing::{ListQuery, SortOrder},
        publication::{
            CreatePublication, Publication, PublicationDetails, PublicationListing,
            PublicationSortKey, UpdatePublication,
        },
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct PublicationsService {
    repository: Repository,
}

impl PublicationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List publications with sorting and author first-name search
    pub async fn list(&self, query: &ListQuery) -> AppResult<PublicationListing> {
        let sort = SortOrder::<PublicationSortKey>::parse(query.sort_order.as_deref());
        let search = query.search_term();
        let publications = self.repository.publications.list(&sort, search).await?;

        Ok(PublicationListing {
            publications,
            current_sort: query.sort_order.clone(),
            search_string: search.map(str::to_string),
            sort_links: SortOrder::<PublicationSortKey>::links(query.sort_order.as_deref()),
        })
    }

    pub async fn get(&self, id: i32) -> AppResult<PublicationDetails> {
        self.repository.publications.get_details(id).await
    }

    pub async fn create_form(&self) -> AppResult<PublicationForm> {
        self.form(None).await
    }

    pub async fn edit_form(&self, id: i32) -> AppResult<PublicationForm> {
        let publication = self.repository.publications.get_by_id(id).await?;
        self.form(Some(publication)).await
    }

    pub async fn create(&self, data: &CreatePublication) -> AppResult<Publication> {
        data.validate()?;
        self.ensure_references(data.author_id, data.book_id).await?;
        let publication = self.repository.publications.create(data).await?;
        tracing::info!(
            publication_id = publication.id,
            author_id = publication.author_id,
            book_id = publication.book_id,
            "Publication created"
        );
        Ok(publication)
    }

    /// Update a publication; a body `id` different from the path is not found
    pub async fn update(&self, id: i32, data: &UpdatePublication) -> AppResult<Publication> {
        if id != data.id {
            return Err(AppError::NotFound(format!(
                "Publication {} does not match request body id {}",
                id, data.id
            )));
        }
        data.validate()?;
        self.ensure_references(data.author_id, data.book_id).await?;

        let publication = self.repository.publications.update(id, data).await?;
        tracing::info!(
            publication_id = id,
            row_version = publication.row_version,
            "Publication updated"
        );
        Ok(publication)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.publications.delete(id).await?;
        tracing::info!(publication_id = id, "Publication deleted");
        Ok(())
    }

    async fn form(&self, publication: Option<Publication>) -> AppResult<PublicationForm> {
        let author_rows = self.repository.authors.options().await?;
        let book_rows = self.repository.books.options().await?;
        let (author_id, book_id) = match &publication {
            Some(p) => (Some(p.author_id), Some(p.book_id)),
            None => (None, None),
        };

        Ok(PublicationForm {
            publication,
            authors: SelectOption::from_rows(author_rows, author_id),
            books: SelectOption::from_rows(book_rows, book_id),
        })
    }

    async fn ensure_references(&self, author_id: i32, book_id: i32) -> AppResult<()> {
        if !self.repository.authors.exists(author_id).await? {
            return Err(AppError::Validation(format!(
                "author_id: author {} does not exist",
                author_id
            )));
        }
        if !self.repository.books.exists(book_id).await? {
            return Err(AppError::Validation(format!(
                "book_id: book {} does not exist",
                book_id
            )));
        }
        Ok(())
    }
}
