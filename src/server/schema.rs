use std::sync::Arc;

use async_graphql::{ComplexObject, Context, EmptySubscription, Object, Schema, SimpleObject};

use crate::datamodel::{self, Library};

use super::loaders::Loaders;

pub type LibrarySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Resolver behavior that can be changed at startup.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaOptions {
    /// Resolve `Book.author` by the book's `authorID`.
    ///
    /// Off by default: the field then looks the author up without a key and is always null.
    pub link_book_authors: bool,
}

pub fn build_schema(library: Arc<Library>, options: SchemaOptions) -> LibrarySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(library)
        .data(options)
        .finish()
}

fn library<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<Library>> {
    ctx.data::<Arc<Library>>()
}

/// This represents a book written by an author
#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Book {
    id: i32,
    name: String,
    #[graphql(name = "authorID")]
    author_id: i32,
}

impl From<datamodel::Book> for Book {
    fn from(book: datamodel::Book) -> Self {
        Self {
            id: book.id,
            name: book.name,
            author_id: book.author_id,
        }
    }
}

#[ComplexObject]
impl Book {
    async fn author(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Author>> {
        let options = ctx.data::<SchemaOptions>()?;
        let key = options.link_book_authors.then_some(self.author_id);
        Ok(library(ctx)?.author(key).map(Author::from))
    }
}

/// This represents a author of a book
#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Author {
    id: i32,
    name: String,
}

impl From<datamodel::Author> for Author {
    fn from(author: datamodel::Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
        }
    }
}

#[ComplexObject]
impl Author {
    async fn books(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<Option<Book>>>> {
        let books = ctx.load_books(self.id).await?;
        Ok(Some(books.into_iter().map(Some).collect()))
    }
}

/// Root Query
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// A Single Book
    async fn book(
        &self,
        ctx: &Context<'_>,
        id: Option<i32>,
    ) -> async_graphql::Result<Option<Book>> {
        Ok(library(ctx)?.book(id).map(Book::from))
    }

    /// List of Books
    async fn books(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<Option<Book>>>> {
        let books = library(ctx)?.books();
        Ok(Some(books.into_iter().map(|b| Some(b.into())).collect()))
    }

    /// A Single Author
    async fn author(
        &self,
        ctx: &Context<'_>,
        id: Option<i32>,
    ) -> async_graphql::Result<Option<Author>> {
        Ok(library(ctx)?.author(id).map(Author::from))
    }

    /// List of Authors
    async fn authors(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<Option<Author>>>> {
        let authors = library(ctx)?.authors();
        Ok(Some(authors.into_iter().map(|a| Some(a.into())).collect()))
    }
}

/// Root Mutation
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Add a book
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        name: String,
        #[graphql(name = "authorID")] author_id: i32,
    ) -> async_graphql::Result<Option<Book>> {
        let book = library(ctx)?.add_book(&name, author_id)?;
        // mutation fields run in order; later ones must see this book
        ctx.forget_books();
        Ok(Some(book.into()))
    }

    /// Add an author
    async fn add_author(
        &self,
        ctx: &Context<'_>,
        name: String,
    ) -> async_graphql::Result<Option<Author>> {
        Ok(Some(library(ctx)?.add_author(&name)?.into()))
    }
}
