use crate::models::Book;

/// Ordered, in-memory collection of books. Order is insertion order.
#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        BookStore::default()
    }

    pub fn append(&mut self, book: Book) {
        self.books.push(book);
    }

    pub fn find_index(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    /// Returns the book previously held at `index`.
    ///
    /// Panics if `index` is out of bounds.
    pub fn replace_at(&mut self, index: usize, book: Book) -> Book {
        std::mem::replace(&mut self.books[index], book)
    }

    /// Panics if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Book {
        self.books.remove(index)
    }

    pub fn filter<P>(&self, mut predicate: P) -> Vec<&Book>
    where
        P: FnMut(&Book) -> bool,
    {
        self.books.iter().filter(|book| predicate(book)).collect()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
