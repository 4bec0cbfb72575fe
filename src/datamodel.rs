use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Book {
    pub id: i32,
    pub name: String,
    /// Not checked against the author collection.
    pub author_id: i32,
}

pub static SEED_AUTHORS: &[&str] = &["J. K. Rowling", "J. R. R. Tolkien", "Brent Weeks"];

pub static SEED_BOOKS: &[(&str, i32)] = &[
    ("Harry Potter and the Chamber of Secrets", 1),
    ("Harry Potter and the Prisoner of Azkaban", 1),
    ("Harry Potter and the Goblet of Fire", 1),
    ("The Fellowship of the Ring", 2),
    ("The Two Towers", 2),
    ("The Return of the King", 2),
    ("The Way of Shadows", 3),
    ("Beyond the Shadows", 3),
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("no {0} ids left to assign")]
    IdsExhausted(&'static str),
}

/// An append-only sequence of records with its own id counter.
///
/// Ids run from 1 up to `i32::MAX - 1`; appends past that fail.
struct Collection<T> {
    records: Vec<T>,
    next_id: i32,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Collection<T> {
    /// Takes records whose ids are already `1..=n`.
    fn from_records(records: Vec<T>) -> Self {
        let next_id = records.len() as i32 + 1;
        Self { records, next_id }
    }

    fn push_with(
        &mut self,
        kind: &'static str,
        make: impl FnOnce(i32) -> T,
    ) -> Result<T, StoreError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(StoreError::IdsExhausted(kind))?;

        let record = make(id);
        self.records.push(record.clone());
        Ok(record)
    }

    fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.records.iter().find(|r| predicate(r)).cloned()
    }
}

/// In-memory store holding every author and book for the lifetime of the process.
///
/// Each collection sits behind its own lock, so appends to one collection are
/// serialized and ids stay unique under concurrent requests.
#[derive(Default)]
pub struct Library {
    authors: Mutex<Collection<Author>>,
    books: Mutex<Collection<Book>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // every critical section is a single scan or push, so a poisoned lock
    // still guards consistent data
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Library {
    /// A store filled with the fixed startup records.
    pub fn seeded() -> Self {
        let authors = (1..)
            .zip(SEED_AUTHORS)
            .map(|(id, name)| Author {
                id,
                name: (*name).to_owned(),
            })
            .collect();
        let books = (1..)
            .zip(SEED_BOOKS)
            .map(|(id, (name, author_id))| Book {
                id,
                name: (*name).to_owned(),
                author_id: *author_id,
            })
            .collect();

        Self {
            authors: Mutex::new(Collection::from_records(authors)),
            books: Mutex::new(Collection::from_records(books)),
        }
    }

    /// First author with the given id. `None` matches nothing.
    pub fn author(&self, id: Option<i32>) -> Option<Author> {
        let id = id?;
        lock(&self.authors).find(|author| author.id == id)
    }

    pub fn authors(&self) -> Vec<Author> {
        lock(&self.authors).records.clone()
    }

    /// First book with the given id. `None` matches nothing.
    pub fn book(&self, id: Option<i32>) -> Option<Book> {
        let id = id?;
        lock(&self.books).find(|book| book.id == id)
    }

    pub fn books(&self) -> Vec<Book> {
        lock(&self.books).records.clone()
    }

    /// Groups the books of several authors in one scan.
    ///
    /// Every requested id gets an entry, empty if the author has no books.
    /// Books keep their store order.
    pub fn books_by_authors(&self, author_ids: &[i32]) -> HashMap<i32, Vec<Book>> {
        let mut grouped: HashMap<i32, Vec<Book>> =
            author_ids.iter().map(|id| (*id, Vec::new())).collect();

        for book in &lock(&self.books).records {
            if let Some(books) = grouped.get_mut(&book.author_id) {
                books.push(book.clone());
            }
        }
        grouped
    }

    pub fn add_author(&self, name: &str) -> Result<Author, StoreError> {
        let author = lock(&self.authors).push_with("author", |id| Author {
            id,
            name: name.to_owned(),
        })?;
        tracing::info!(id = author.id, name = %author.name, "added author");
        Ok(author)
    }

    pub fn add_book(&self, name: &str, author_id: i32) -> Result<Book, StoreError> {
        let book = lock(&self.books).push_with("book", |id| Book {
            id,
            name: name.to_owned(),
            author_id,
        })?;
        tracing::info!(id = book.id, name = %book.name, author_id, "added book");
        Ok(book)
    }
}
