//! In-memory book catalog.
//!
//! The catalog owns an insertion-ordered `Vec<Book>` behind a single mutex.
//! Each operation holds the lock for its whole scan-and-mutate sequence, so
//! concurrent creates never observe the same "last id".

use thiserror::Error;
use tokio::sync::Mutex;

use super::models::{Book, BookId, BookRequest};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("book {0} not found")]
    NotFound(BookId),
}

pub struct Catalog {
    books: Mutex<Vec<Book>>,
}

impl Catalog {
    /// Empty catalog; the first created book gets id 1.
    pub fn new() -> Self {
        Self::from_books(Vec::new())
    }

    pub fn from_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
        }
    }

    /// Catalog holding the five built-in seed books (ids 1..=5).
    pub fn seeded() -> Self {
        Self::from_books(seed_books())
    }

    pub async fn len(&self) -> usize {
        self.books.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.lock().await.is_empty()
    }

    pub async fn list_all(&self) -> Vec<Book> {
        self.books.lock().await.clone()
    }

    /// First book with a matching id.
    pub async fn get_by_id(&self, id: BookId) -> Result<Book, CatalogError> {
        let books = self.books.lock().await;
        books
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    /// Books whose rating equals `rating` exactly, in catalog order.
    pub async fn get_by_rating(&self, rating: f64) -> Vec<Book> {
        let books = self.books.lock().await;
        books
            .iter()
            .filter(|book| book.rating == rating)
            .cloned()
            .collect()
    }

    /// Books published in `year`, in catalog order.
    pub async fn get_by_published_date(&self, year: i32) -> Vec<Book> {
        let books = self.books.lock().await;
        books
            .iter()
            .filter(|book| book.published_date == year)
            .cloned()
            .collect()
    }

    /// Append a new book with id `last.id + 1` (or 1 when empty).
    /// Any id carried by the request is ignored.
    pub async fn create(&self, request: BookRequest) -> Book {
        let mut books = self.books.lock().await;
        let id = books.last().map_or(1, |last| last.id + 1);
        let book = Book::from_request(id, request);
        books.push(book.clone());

        tracing::info!(book_id = id, title = %book.title, "book created");
        book
    }

    /// Replace every slot holding `id` in place; returns how many were replaced.
    pub async fn update(&self, id: BookId, request: BookRequest) -> Result<usize, CatalogError> {
        let mut books = self.books.lock().await;
        let mut replaced = 0;

        for slot in books.iter_mut().filter(|book| book.id == id) {
            *slot = Book::from_request(id, request.clone());
            replaced += 1;
        }

        if replaced == 0 {
            tracing::debug!(book_id = id, "update target missing");
            return Err(CatalogError::NotFound(id));
        }
        if replaced > 1 {
            tracing::warn!(book_id = id, replaced, "duplicate ids replaced during update");
        }

        tracing::info!(book_id = id, "book updated");
        Ok(replaced)
    }

    /// Remove the first book holding `id`; remaining ids are not renumbered.
    pub async fn delete(&self, id: BookId) -> Result<Book, CatalogError> {
        let mut books = self.books.lock().await;
        let position = books
            .iter()
            .position(|book| book.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        let removed = books.remove(position);

        tracing::info!(book_id = id, "book deleted");
        Ok(removed)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_books() -> Vec<Book> {
    vec![
        Book::new(
            1,
            "Computer Science Pro",
            "meow",
            "A very nice book about cs",
            4.5,
            2012,
        ),
        Book::new(
            2,
            "Environment Science Pro",
            "meow1",
            "A very nice book about evs",
            4.0,
            2015,
        ),
        Book::new(
            3,
            "FastAPI",
            "meowmeow",
            "A very nice book about fastapi",
            3.5,
            2021,
        ),
        Book::new(4, "DSA", "Charles", "A very nice book about dsa", 5.0, 2012),
        Book::new(5, "HP1", "Author 1", "Book description", 2.0, 2001),
    ]
}
