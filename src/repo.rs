use chrono::{DateTime, Utc};
use std::error::Error;
use std::future::Future;

use crate::filter::BookFilter;
use crate::models::{Book, BookChanges};
use crate::validation::ValidationError;

/// Result of applying changes to a stored book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Book),
    NotFound,
    /// The merged book would break a validation rule; nothing was written
    Rejected(ValidationError),
}

pub trait BookRepo {
    type Error: Error + Send + Sync + 'static;

    /// Books matching `filter`, in insertion order
    fn list_books(
        &self,
        filter: BookFilter,
    ) -> impl Future<Output = Result<Vec<Book>, Self::Error>> + Send;

    fn get_book(&self, id: String) -> impl Future<Output = Result<Option<Book>, Self::Error>> + Send;

    fn insert_book(&self, book: Book) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Merges `changes` over the stored book with this ID
    fn update_book(
        &self,
        id: String,
        changes: BookChanges,
        updated_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<UpdateOutcome, Self::Error>> + Send;

    /// Returns true if the book existed and was deleted, false otherwise
    fn delete_book(&self, id: String) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
