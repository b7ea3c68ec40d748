//! Library state and the rules that move it: entity bookkeeping plus the
//! borrow/return workflow.

pub mod clock;
pub mod error;
pub mod service;

use std::sync::Arc;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::LibraryError;
pub use service::{LibraryService, LoanPolicy};

/// Handle shared by every HTTP module.
pub type SharedLibrary = Arc<LibraryService>;
