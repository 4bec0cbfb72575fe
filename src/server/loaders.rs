use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::Context;

use crate::datamodel::Library;

use super::dataloader::{BatchFuture, BatchLoader, DataLoader};
use super::schema::Book;

pub(crate) trait Loaders {
    async fn load_books(&self, author_id: i32) -> async_graphql::Result<Vec<Book>>;

    /// Forgets cached `Author.books` lists after the book collection changed.
    fn forget_books(&self);
}

impl Loaders for Context<'_> {
    async fn load_books(&self, author_id: i32) -> async_graphql::Result<Vec<Book>> {
        let loader = self.data::<DataLoader<BooksByAuthor>>()?;
        Ok(loader.load(author_id).await)
    }

    fn forget_books(&self) {
        if let Ok(loader) = self.data::<DataLoader<BooksByAuthor>>() {
            loader.clear();
        }
    }
}

/// Resolves the books of many authors with a single scan over the store.
pub struct BooksByAuthor {
    library: Arc<Library>,
}

impl BooksByAuthor {
    pub fn new(library: Arc<Library>) -> Self {
        Self { library }
    }
}

impl BatchLoader for BooksByAuthor {
    type K = i32;
    type V = Vec<Book>;

    fn load_batch(&mut self, keys: Vec<Self::K>) -> BatchFuture<Self::K, Self::V> {
        let library = self.library.clone();
        Box::pin(async move {
            library
                .books_by_authors(&keys)
                .into_iter()
                .map(|(author_id, books)| {
                    let books: Vec<Book> = books.into_iter().map(Book::from).collect();
                    (author_id, books)
                })
                .collect::<HashMap<_, _>>()
        })
    }
}
