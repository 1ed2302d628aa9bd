//! Category reference data

use crate::{
    error::AppResult,
    models::{category::Category, form::SelectOption},
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    /// Selection list for book forms, marking `selected` if given
    pub async fn options(&self, selected: Option<i32>) -> AppResult<Vec<SelectOption>> {
        let rows = self.repository.categories.options().await?;
        Ok(SelectOption::from_rows(rows, selected))
    }
}
