use bookfinder_http::error::AppError;
use bookfinder_store::StoreError;
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

/// Failures of library operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    #[error("book {0} not found")]
    BookNotFound(u64),

    #[error("book titled '{0}' not found")]
    TitleNotFound(String),

    #[error("member {0} not found")]
    MemberNotFound(u64),

    #[error("borrowing record {0} not found")]
    RecordNotFound(u64),

    /// Only raised under strict loans.
    #[error("book {book_id} has no copies available ({available_copies} on shelf)")]
    NoCopiesAvailable { book_id: u64, available_copies: i32 },

    /// Only raised under strict loans.
    #[error("borrowing record {record_id} was already returned on {returned_on}")]
    AlreadyReturned {
        record_id: u64,
        returned_on: NaiveDate,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, LibraryError>;

impl From<LibraryError> for AppError {
    fn from(err: LibraryError) -> Self {
        let message = err.to_string();
        match err {
            LibraryError::BookNotFound(_)
            | LibraryError::TitleNotFound(_)
            | LibraryError::MemberNotFound(_)
            | LibraryError::RecordNotFound(_) => AppError::not_found(message),
            LibraryError::NoCopiesAvailable {
                book_id,
                available_copies,
            } => AppError::conflict(
                vec![json!({ "bookId": book_id, "availableCopies": available_copies })],
                message,
            ),
            LibraryError::AlreadyReturned {
                record_id,
                returned_on,
            } => AppError::conflict(
                vec![json!({ "recordId": record_id, "returnDate": returned_on })],
                message,
            ),
            LibraryError::Store(StoreError::IdsExhausted { kind, max }) => {
                AppError::conflict(vec![json!({ "kind": kind, "maxId": max })], message)
            }
        }
    }
}
