//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod category;
pub mod form;
pub mod listing;
pub mod publication;
pub mod validation;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookDetails};
pub use category::Category;
pub use form::SelectOption;
pub use listing::{ListQuery, SortOrder};
pub use publication::{Publication, PublicationDetails};
