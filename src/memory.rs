use chrono::{DateTime, Utc};
use std::convert::Infallible;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::filter::BookFilter;
use crate::models::{Book, BookChanges};
use crate::repo::{BookRepo, UpdateOutcome};
use crate::store::BookStore;
use crate::validation::merged_details;

/// Process-lifetime book repository. Clones share the same store.
#[derive(Clone, Default)]
pub struct InMemoryBookRepo {
    store: Arc<RwLock<BookStore>>,
}

impl InMemoryBookRepo {
    pub fn new() -> Self {
        InMemoryBookRepo::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Store mutations are single Vec calls, so a poisoned lock still guards a
    // consistent store.
    fn read(&self) -> RwLockReadGuard<'_, BookStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BookStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BookRepo for InMemoryBookRepo {
    type Error = Infallible;

    async fn list_books(&self, filter: BookFilter) -> Result<Vec<Book>, Infallible> {
        let store = self.read();
        let books = store
            .filter(|book| filter.matches(book))
            .into_iter()
            .cloned()
            .collect();

        Ok(books)
    }

    async fn get_book(&self, id: String) -> Result<Option<Book>, Infallible> {
        Ok(self.read().find(&id).cloned())
    }

    async fn insert_book(&self, book: Book) -> Result<(), Infallible> {
        self.write().append(book);
        Ok(())
    }

    async fn update_book(
        &self,
        id: String,
        changes: BookChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<UpdateOutcome, Infallible> {
        let mut store = self.write();

        let Some(index) = store.find_index(&id) else {
            return Ok(UpdateOutcome::NotFound);
        };
        let Some(existing) = store.get(index).cloned() else {
            return Ok(UpdateOutcome::NotFound);
        };

        let details = match merged_details(changes, &existing.details) {
            Ok(details) => details,
            Err(reason) => return Ok(UpdateOutcome::Rejected(reason)),
        };

        let updated = existing.revise(details, updated_at);
        store.replace_at(index, updated.clone());

        Ok(UpdateOutcome::Updated(updated))
    }

    async fn delete_book(&self, id: String) -> Result<bool, Infallible> {
        let mut store = self.write();

        let deleted = match store.find_index(&id) {
            Some(index) => {
                store.remove_at(index);
                true
            }
            None => false,
        };

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::BoolFilter;
    use crate::models::BookDetails;
    use crate::validation::ValidationError;
    use serde_json::json;

    fn details(name: &str, page_count: u32, read_page: u32, reading: bool) -> BookDetails {
        BookDetails {
            name: name.to_string(),
            year: Some(json!(2010)),
            author: Some(json!("Andrea Hirata")),
            summary: None,
            publisher: Some(json!("Gramedia")),
            page_count,
            read_page,
            reading,
        }
    }

    fn changes(name: &str) -> BookChanges {
        BookChanges {
            name: name.to_string(),
            year: None,
            author: None,
            summary: None,
            publisher: None,
            page_count: None,
            read_page: None,
            reading: None,
        }
    }

    async fn insert(repo: &InMemoryBookRepo, id: &str, details: BookDetails) {
        repo.insert_book(Book::new(id.to_string(), details, Utc::now()))
            .await
            .unwrap();
    }

    async fn get(repo: &InMemoryBookRepo, id: &str) -> Book {
        repo.get_book(id.to_string()).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn clones_share_one_store() {
        let repo = InMemoryBookRepo::new();
        let other = repo.clone();

        insert(&repo, "a", details("Laskar Pelangi", 10, 0, false)).await;

        assert_eq!(other.len(), 1);
        assert!(other.get_book("a".to_string()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_merges_in_place() {
        let repo = InMemoryBookRepo::new();
        insert(&repo, "a", details("Laskar Pelangi", 10, 0, false)).await;
        insert(&repo, "b", details("Bumi Manusia", 10, 0, false)).await;
        let original = get(&repo, "a").await;

        let later = original.inserted_at + chrono::Duration::seconds(5);
        let update = BookChanges {
            read_page: Some(10),
            reading: Some(true),
            ..changes("Sang Pemimpi")
        };
        let outcome = repo.update_book("a".to_string(), update, later).await.unwrap();

        let UpdateOutcome::Updated(updated) = outcome else {
            panic!("expected the book to be updated, got {outcome:?}");
        };
        assert_eq!(updated, get(&repo, "a").await);
        assert_eq!(updated.id, "a");
        assert_eq!(updated.details.name, "Sang Pemimpi");
        assert_eq!(updated.details.publisher, Some(json!("Gramedia")));
        assert_eq!(updated.details.year, Some(json!(2010)));
        assert!(updated.details.reading);
        assert!(updated.finished);
        assert_eq!(updated.inserted_at, original.inserted_at);
        assert_eq!(updated.updated_at, later);

        let all = repo.list_books(BookFilter::default()).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|book| book.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn update_of_unknown_id_changes_nothing() {
        let repo = InMemoryBookRepo::new();
        insert(&repo, "a", details("Laskar Pelangi", 10, 0, false)).await;

        let outcome = repo
            .update_book("zzz".to_string(), changes("Other"), Utc::now())
            .await
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::NotFound);
        assert_eq!(get(&repo, "a").await.details.name, "Laskar Pelangi");
    }

    #[tokio::test]
    async fn update_breaking_page_range_is_not_written() {
        let repo = InMemoryBookRepo::new();
        insert(&repo, "a", details("Laskar Pelangi", 10, 3, false)).await;

        let update = BookChanges {
            read_page: Some(11),
            ..changes("Laskar Pelangi")
        };
        let outcome = repo.update_book("a".to_string(), update, Utc::now()).await.unwrap();

        assert_eq!(
            outcome,
            UpdateOutcome::Rejected(ValidationError::InvalidPageRange)
        );
        assert_eq!(get(&repo, "a").await.details.read_page, 3);
    }

    #[tokio::test]
    async fn delete_removes_once() {
        let repo = InMemoryBookRepo::new();
        insert(&repo, "a", details("Laskar Pelangi", 10, 0, false)).await;
        insert(&repo, "b", details("Bumi Manusia", 10, 0, false)).await;

        assert!(repo.delete_book("a".to_string()).await.unwrap());
        assert_eq!(repo.len(), 1);
        assert!(!repo.delete_book("a".to_string()).await.unwrap());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn list_applies_filter() {
        let repo = InMemoryBookRepo::new();
        insert(&repo, "a", details("Laskar Pelangi", 10, 3, true)).await;
        insert(&repo, "b", details("Bumi Manusia", 10, 10, false)).await;

        let filter = BookFilter {
            reading: Some(BoolFilter::Is(true)),
            ..BookFilter::default()
        };
        let reading = repo.list_books(filter).await.unwrap();

        assert_eq!(reading.len(), 1);
        assert_eq!(reading[0].id, "a");
    }
}
