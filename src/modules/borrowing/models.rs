use bookfinder_store::Entity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One loan of one book to one member.
///
/// Created on borrow and stamped with a return date on return; never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingRecord {
    pub id: u64,
    pub book_id: u64,
    pub member_id: u64,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl BorrowingRecord {
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }
}

impl Entity for BorrowingRecord {
    const KIND: &'static str = "borrowing_record";

    fn id(&self) -> u64 {
        self.id
    }
}

/// Request body for `POST /borrow`. Dates are stamped by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    #[serde(default)]
    pub id: Option<u64>,
    pub book_id: u64,
    pub member_id: u64,
}
