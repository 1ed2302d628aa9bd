//! Book query service

use validator::Validate;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{
        book::{
            Book, BookDetails, BookFilter, BookFilterForm, BookListing, BookSortKey, CreateBook,
            UpdateBook,
        },
        form::BookForm,
        listing::{ListQuery, SortOrder},
    },
    repository::Repository,
};

use super::categories::CategoriesService;

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    categories: CategoriesService,
    config: CatalogConfig,
}

impl BooksService {
    pub fn new(
        repository: Repository,
        categories: CategoriesService,
        config: CatalogConfig,
    ) -> Self {
        Self {
            repository,
            categories,
            config,
        }
    }

    /// List books with sorting and title search
    pub async fn list(&self, query: &ListQuery) -> AppResult<BookListing> {
        let sort = SortOrder::<BookSortKey>::parse(query.sort_order.as_deref());
        let search = query.search_term();
        let books = self.repository.books.list(&sort, search).await?;
        let categories = self.categories.options(None).await?;

        Ok(BookListing {
            books,
            categories: Some(categories),
            current_sort: query.sort_order.clone(),
            search_string: search.map(str::to_string),
            sort_links: SortOrder::<BookSortKey>::links(query.sort_order.as_deref()),
        })
    }

    /// Apply the combined title/category filter form
    pub async fn filter(&self, form: &BookFilterForm) -> AppResult<BookListing> {
        let filter = BookFilter::resolve(form, self.config.multi_category_filter)?;
        tracing::debug!(?filter, "Filtering books");

        let books = self.repository.books.filter(&filter).await?;
        let (categories, search_string) = match &filter {
            BookFilter::Unfiltered => (None, None),
            BookFilter::Filtered { search, .. } => {
                (Some(self.categories.options(None).await?), search.clone())
            }
        };

        Ok(BookListing {
            books,
            categories,
            current_sort: None,
            search_string,
            sort_links: SortOrder::<BookSortKey>::links(None),
        })
    }

    pub async fn get(&self, id: i32) -> AppResult<BookDetails> {
        self.repository.books.get_details(id).await
    }

    pub async fn create_form(&self) -> AppResult<BookForm> {
        Ok(BookForm {
            book: None,
            categories: self.categories.options(None).await?,
        })
    }

    pub async fn edit_form(&self, id: i32) -> AppResult<BookForm> {
        let book = self.repository.books.get_by_id(id).await?;
        let categories = self.categories.options(Some(book.category_id)).await?;
        Ok(BookForm {
            book: Some(book),
            categories,
        })
    }

    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()?;
        self.ensure_category(data.category_id).await?;
        let book = self.repository.books.create(data).await?;
        tracing::info!(book_id = book.id, "Book created");
        Ok(book)
    }

    /// Update a book; a body `id` different from the path is not found
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        if id != data.id {
            return Err(AppError::NotFound(format!(
                "Book {} does not match request body id {}",
                id, data.id
            )));
        }
        data.validate()?;
        self.ensure_category(data.category_id).await?;

        let book = self.repository.books.update(id, data).await?;
        tracing::info!(book_id = id, row_version = book.row_version, "Book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }

    async fn ensure_category(&self, category_id: i32) -> AppResult<()> {
        if !self.repository.categories.exists(category_id).await? {
            return Err(AppError::Validation(format!(
                "category_id: category {} does not exist",
                category_id
            )));
        }
        Ok(())
    }
}
