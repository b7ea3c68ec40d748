use std::sync::Arc;

use bookfinder_kernel::settings::LibrarySettings;
use bookfinder_store::Registry;
use chrono::{Days, NaiveDate};
use parking_lot::Mutex;

use super::clock::Clock;
use super::error::{LibraryError, Result};
use crate::modules::books::models::{Book, BookInput};
use crate::modules::borrowing::models::{BorrowRequest, BorrowingRecord};
use crate::modules::members::models::{Member, MemberInput};

/// Lending rules applied by [`LibraryService::borrow`] and
/// [`LibraryService::return_book`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanPolicy {
    pub loan_period_days: u32,
    pub strict: bool,
}

impl LoanPolicy {
    pub fn due_date(&self, borrowed_on: NaiveDate) -> NaiveDate {
        borrowed_on
            .checked_add_days(Days::new(u64::from(self.loan_period_days)))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        LoanPolicy::from(&LibrarySettings::default())
    }
}

impl From<&LibrarySettings> for LoanPolicy {
    fn from(settings: &LibrarySettings) -> Self {
        Self {
            loan_period_days: settings.loan_period_days,
            strict: settings.strict_loans,
        }
    }
}

/// Books, members and loans, plus the borrow/return workflow over them.
///
/// Constructed once per process and shared behind an `Arc`.
pub struct LibraryService {
    books: Registry<Book>,
    members: Registry<Member>,
    records: Registry<BorrowingRecord>,
    policy: LoanPolicy,
    clock: Arc<dyn Clock>,
    // Serializes borrow/return so a record change and its copy count move together.
    loans: Mutex<()>,
}

impl LibraryService {
    pub fn new(policy: LoanPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            books: Registry::new(),
            members: Registry::new(),
            records: Registry::new(),
            policy,
            clock,
            loans: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> LoanPolicy {
        self.policy
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ==================== Books ====================

    pub fn list_books(&self) -> Vec<Book> {
        self.books.list()
    }

    pub fn book(&self, id: u64) -> Result<Book> {
        self.books.get(id).ok_or(LibraryError::BookNotFound(id))
    }

    /// Exact, case-sensitive title match; the first one wins.
    pub fn book_by_title(&self, title: &str) -> Result<Book> {
        self.books
            .find(|book| book.title == title)
            .ok_or_else(|| LibraryError::TitleNotFound(title.to_string()))
    }

    pub fn add_book(&self, input: BookInput) -> Result<Book> {
        let requested = input.id;
        let book = self.books.create(requested, |id| input.into_book(id))?;
        tracing::info!(book_id = book.id, title = %book.title, "book added");
        Ok(book)
    }

    /// Replace every field of book `id`; the id itself is kept.
    pub fn update_book(&self, id: u64, input: BookInput) -> Result<Book> {
        let book = input.into_book(id);
        if !self.books.replace(book.clone()) {
            return Err(LibraryError::BookNotFound(id));
        }
        tracing::info!(book_id = id, "book updated");
        Ok(book)
    }

    pub fn delete_book(&self, id: u64) -> Result<()> {
        if self.books.remove(id) == 0 {
            return Err(LibraryError::BookNotFound(id));
        }
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }

    // ==================== Members ====================

    pub fn list_members(&self) -> Vec<Member> {
        self.members.list()
    }

    pub fn member(&self, id: u64) -> Result<Member> {
        self.members.get(id).ok_or(LibraryError::MemberNotFound(id))
    }

    pub fn add_member(&self, input: MemberInput) -> Result<Member> {
        let requested = input.id;
        let member = self.members.create(requested, |id| input.into_member(id))?;
        tracing::info!(member_id = member.id, "member added");
        Ok(member)
    }

    pub fn update_member(&self, id: u64, input: MemberInput) -> Result<Member> {
        let member = input.into_member(id);
        if !self.members.replace(member.clone()) {
            return Err(LibraryError::MemberNotFound(id));
        }
        tracing::info!(member_id = id, "member updated");
        Ok(member)
    }

    pub fn delete_member(&self, id: u64) -> Result<()> {
        if self.members.remove(id) == 0 {
            return Err(LibraryError::MemberNotFound(id));
        }
        tracing::info!(member_id = id, "member deleted");
        Ok(())
    }

    // ==================== Loans ====================

    pub fn list_records(&self) -> Vec<BorrowingRecord> {
        self.records.list()
    }

    pub fn record(&self, id: u64) -> Result<BorrowingRecord> {
        self.records.get(id).ok_or(LibraryError::RecordNotFound(id))
    }

    /// Open a loan dated today and take one copy of the book off the shelf.
    ///
    /// Outside strict mode neither the book nor the member has to exist and
    /// the copy count may go negative.
    pub fn borrow(&self, request: BorrowRequest) -> Result<BorrowingRecord> {
        let _loans = self.loans.lock();

        if self.policy.strict {
            let book = self.book(request.book_id)?;
            self.member(request.member_id)?;
            if book.available_copies <= 0 {
                return Err(LibraryError::NoCopiesAvailable {
                    book_id: book.id,
                    available_copies: book.available_copies,
                });
            }
        }

        let borrow_date = self.clock.today();
        let due_date = self.policy.due_date(borrow_date);
        let record = self.records.create(request.id, |id| BorrowingRecord {
            id,
            book_id: request.book_id,
            member_id: request.member_id,
            borrow_date,
            due_date,
            return_date: None,
        })?;

        match self
            .books
            .modify(record.book_id, |book| book.available_copies -= 1)
        {
            Some(book) => tracing::info!(
                record_id = record.id,
                book_id = book.id,
                member_id = record.member_id,
                available_copies = book.available_copies,
                %due_date,
                "book borrowed"
            ),
            None => tracing::warn!(
                record_id = record.id,
                book_id = record.book_id,
                "loan recorded for a book missing from the catalogue"
            ),
        }

        Ok(record)
    }

    /// Close a loan on `return_date` and put the copy back on the shelf.
    ///
    /// Outside strict mode a second return overwrites the date and adds
    /// another copy.
    pub fn return_book(&self, record_id: u64, return_date: NaiveDate) -> Result<BorrowingRecord> {
        let _loans = self.loans.lock();

        let existing = self.record(record_id)?;
        if let Some(returned_on) = existing.return_date {
            if self.policy.strict {
                return Err(LibraryError::AlreadyReturned {
                    record_id,
                    returned_on,
                });
            }
            tracing::warn!(record_id, %returned_on, "record returned again");
        }

        let record = self
            .records
            .modify(record_id, |record| record.return_date = Some(return_date))
            .ok_or(LibraryError::RecordNotFound(record_id))?;

        match self
            .books
            .modify(record.book_id, |book| book.available_copies += 1)
        {
            Some(book) => tracing::info!(
                record_id,
                book_id = book.id,
                available_copies = book.available_copies,
                %return_date,
                "book returned"
            ),
            None => tracing::warn!(
                record_id,
                book_id = record.book_id,
                "returned book missing from the catalogue"
            ),
        }

        Ok(record)
    }

    /// [`LibraryService::return_book`] dated today.
    pub fn return_today(&self, record_id: u64) -> Result<BorrowingRecord> {
        self.return_book(record_id, self.clock.today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::clock::FixedClock;
    use bookfinder_store::StoreError;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service_on(today: NaiveDate, strict: bool) -> LibraryService {
        LibraryService::new(
            LoanPolicy {
                loan_period_days: 14,
                strict,
            },
            Arc::new(FixedClock::new(today)),
        )
    }

    fn book_input(id: Option<u64>, title: &str, copies: i32) -> BookInput {
        BookInput {
            id,
            title: title.to_string(),
            author: "Ursula K. Le Guin".to_string(),
            publication_year: 1969,
            genre: "sf".to_string(),
            available_copies: copies,
        }
    }

    fn member_input(name: &str, email: &str) -> MemberInput {
        MemberInput {
            name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    fn loan(book_id: u64, member_id: u64) -> BorrowRequest {
        BorrowRequest {
            id: None,
            book_id,
            member_id,
        }
    }

    #[test]
    fn created_book_reads_back_equal() {
        let library = service_on(day(2024, 5, 1), false);
        let created = library.add_book(book_input(Some(1), "The Dispossessed", 2)).unwrap();

        assert_eq!(library.book(1).unwrap(), created);
        assert_eq!(library.book_by_title("The Dispossessed").unwrap(), created);
        assert_eq!(
            library.book_by_title("the dispossessed"),
            Err(LibraryError::TitleNotFound("the dispossessed".into()))
        );
    }

    #[test]
    fn exhausted_ids_are_reported_not_wrapped() {
        let library = service_on(day(2024, 5, 1), false);
        library
            .add_book(book_input(Some(u64::MAX), "The Last", 1))
            .unwrap();

        let err = library.add_book(book_input(None, "One Too Many", 1)).unwrap_err();
        assert_eq!(
            err,
            LibraryError::Store(StoreError::IdsExhausted {
                kind: "book",
                max: u64::MAX
            })
        );
        assert_eq!(library.list_books().len(), 1);
    }

    #[test]
    fn deleted_book_is_not_found() {
        let library = service_on(day(2024, 5, 1), false);
        library.add_book(book_input(Some(1), "Lathe of Heaven", 1)).unwrap();

        library.delete_book(1).unwrap();
        assert_eq!(library.book(1), Err(LibraryError::BookNotFound(1)));
        assert_eq!(library.delete_book(1), Err(LibraryError::BookNotFound(1)));
    }

    #[test]
    fn update_book_forces_the_path_id() {
        let library = service_on(day(2024, 5, 1), false);
        library.add_book(book_input(Some(4), "Draft", 1)).unwrap();

        let updated = library
            .update_book(4, book_input(Some(77), "Final", 5))
            .unwrap();
        assert_eq!(updated.id, 4);
        assert_eq!(library.book(4).unwrap().title, "Final");
        assert!(library.book(77).is_err());
        assert_eq!(
            library.update_book(5, book_input(None, "Ghost", 0)),
            Err(LibraryError::BookNotFound(5))
        );
    }

    #[test]
    fn updating_a_member_leaves_others_alone() {
        let library = service_on(day(2024, 5, 1), false);
        let ann = library.add_member(member_input("Ann", "ann@x.com")).unwrap();
        let bob = library.add_member(member_input("Bob", "bob@x.com")).unwrap();

        let renamed = library
            .update_member(ann.id, member_input("Anne", "anne@x.com"))
            .unwrap();

        assert_eq!(library.member(ann.id).unwrap(), renamed);
        assert_eq!(library.member(bob.id).unwrap(), bob);
        assert_eq!(library.list_members().len(), 2);
    }

    #[test]
    fn borrow_then_return_restores_copies() {
        let borrowed_on = day(2024, 3, 10);
        let library = service_on(borrowed_on, false);
        library.add_book(book_input(Some(1), "Earthsea", 3)).unwrap();
        let member = library.add_member(member_input("A", "a@x.com")).unwrap();

        let record = library.borrow(loan(1, member.id)).unwrap();
        assert_eq!(record.borrow_date, borrowed_on);
        assert_eq!(record.due_date, day(2024, 3, 24));
        assert_eq!(record.return_date, None);
        assert_eq!(library.book(1).unwrap().available_copies, 2);
        assert_eq!(library.list_records(), vec![record.clone()]);

        let returned = library.return_book(record.id, day(2024, 3, 15)).unwrap();
        assert_eq!(returned.return_date, Some(day(2024, 3, 15)));
        assert!(library.record(record.id).unwrap().is_returned());
        assert_eq!(library.book(1).unwrap().available_copies, 3);
    }

    #[test]
    fn permissive_mode_allows_overdraw_and_double_return() {
        let library = service_on(day(2024, 1, 1), false);
        library.add_book(book_input(Some(1), "Tehanu", 0)).unwrap();

        let record = library.borrow(loan(1, 42)).unwrap();
        assert_eq!(library.book(1).unwrap().available_copies, -1);

        library.return_book(record.id, day(2024, 1, 2)).unwrap();
        let again = library.return_book(record.id, day(2024, 1, 3)).unwrap();
        assert_eq!(again.return_date, Some(day(2024, 1, 3)));
        assert_eq!(library.book(1).unwrap().available_copies, 1);
    }

    #[test]
    fn permissive_mode_records_loans_of_unknown_books() {
        let library = service_on(day(2024, 1, 1), false);
        let record = library.borrow(loan(9, 9)).unwrap();
        assert_eq!(record.book_id, 9);
        assert!(library.list_books().is_empty());
    }

    #[test]
    fn strict_mode_enforces_loan_invariants() {
        let library = service_on(day(2024, 1, 1), true);
        library.add_book(book_input(Some(1), "Tehanu", 1)).unwrap();
        let member = library.add_member(member_input("A", "a@x.com")).unwrap();

        assert_eq!(
            library.borrow(loan(2, member.id)),
            Err(LibraryError::BookNotFound(2))
        );
        assert_eq!(
            library.borrow(loan(1, 99)),
            Err(LibraryError::MemberNotFound(99))
        );

        let record = library.borrow(loan(1, member.id)).unwrap();
        assert_eq!(
            library.borrow(loan(1, member.id)),
            Err(LibraryError::NoCopiesAvailable {
                book_id: 1,
                available_copies: 0
            })
        );

        library.return_book(record.id, day(2024, 1, 5)).unwrap();
        assert_eq!(
            library.return_book(record.id, day(2024, 1, 6)),
            Err(LibraryError::AlreadyReturned {
                record_id: record.id,
                returned_on: day(2024, 1, 5)
            })
        );
        assert_eq!(library.book(1).unwrap().available_copies, 1);
    }

    #[test]
    fn returning_an_unknown_record_is_not_found() {
        let library = service_on(day(2024, 1, 1), false);
        assert_eq!(
            library.return_today(5),
            Err(LibraryError::RecordNotFound(5))
        );
    }

    #[test]
    fn loan_period_follows_policy() {
        let policy = LoanPolicy {
            loan_period_days: 21,
            strict: false,
        };
        assert_eq!(policy.due_date(day(2024, 12, 20)), day(2025, 1, 10));
        assert_eq!(LoanPolicy::default().loan_period_days, 14);
    }
}
