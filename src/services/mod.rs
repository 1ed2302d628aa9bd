//! Business logic services

pub mod authors;
pub mod books;
pub mod categories;
pub mod publications;
pub mod seed;

use crate::{config::CatalogConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub categories: categories::CategoriesService,
    pub publications: publications::PublicationsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, catalog_config: CatalogConfig) -> Self {
        let categories = categories::CategoriesService::new(repository.clone());
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(
                repository.clone(),
                categories.clone(),
                catalog_config,
            ),
            categories,
            publications: publications::PublicationsService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }

    /// Fill empty tables with fixture data
    pub async fn seed(&self, config: &crate::config::SeedConfig) -> AppResult<()> {
        seed::run(&self.repository, config).await
    }
}
