use bookfinder_store::Entity;
use serde::{Deserialize, Serialize};

/// A catalogued title and how many of its copies are on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier for the book
    pub id: u64,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Year the book was published
    pub publication_year: i32,
    /// Free-form genre label
    pub genre: String,
    /// Copies not currently on loan; negative when over-lent
    pub available_copies: i32,
}

impl Entity for Book {
    const KIND: &'static str = "book";

    fn id(&self) -> u64 {
        self.id
    }
}

/// Request body for creating or replacing a book.
///
/// Every field is optional on the wire. `id` is ignored on replace, where the
/// path parameter wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookInput {
    pub id: Option<u64>,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub genre: String,
    pub available_copies: i32,
}

impl BookInput {
    pub fn into_book(self, id: u64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            publication_year: self.publication_year,
            genre: self.genre,
            available_copies: self.available_copies,
        }
    }
}
