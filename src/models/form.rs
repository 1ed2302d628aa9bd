//! Form payloads handed to the presentation layer

use serde::Serialize;
use utoipa::ToSchema;

use super::{author::Author, book::Book, publication::Publication};

/// Entry of a selection control (id → label)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SelectOption {
    pub value: i32,
    pub text: String,
    pub selected: bool,
}

impl SelectOption {
    /// Build options from `(id, label)` rows, marking `selected` if present
    pub fn from_rows(rows: Vec<(i32, String)>, selected: Option<i32>) -> Vec<Self> {
        rows.into_iter()
            .map(|(value, text)| SelectOption {
                value,
                text,
                selected: Some(value) == selected,
            })
            .collect()
    }
}

/// Author create/edit form; `author` is set when editing
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorForm {
    pub author: Option<Author>,
}

/// Book create/edit form
#[derive(Debug, Serialize, ToSchema)]
pub struct BookForm {
    pub book: Option<Book>,
    pub categories: Vec<SelectOption>,
}

/// Publication create/edit form
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicationForm {
    pub publication: Option<Publication>,
    pub authors: Vec<SelectOption>,
    pub books: Vec<SelectOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_marks_selected() {
        let options = SelectOption::from_rows(
            vec![(1, "Fiction".to_string()), (2, "History".to_string())],
            Some(2),
        );
        assert!(!options[0].selected);
        assert!(options[1].selected);

        let options = SelectOption::from_rows(vec![(1, "Fiction".to_string())], None);
        assert!(!options[0].selected);
    }
}
