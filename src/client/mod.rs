use cynic::http::{CynicReqwestError, ReqwestExt};
use cynic::serde;
use reqwest::Url;

pub struct Client {
    client: reqwest::Client,
    url: Url,
}

impl Client {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Sends a query or mutation operation.
    pub async fn run<Query, Input>(
        &self,
        op: cynic::Operation<Query, Input>,
    ) -> Result<cynic::GraphQlResponse<Query>, CynicReqwestError>
    where
        Input: serde::Serialize,
        Query: serde::de::DeserializeOwned + 'static,
    {
        self.client.post(self.url.clone()).run_graphql(op).await
    }
}

#[cynic::schema("library")]
mod schema {}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct Catalogue {
    pub authors: Option<Vec<Option<AuthorWithBooks>>>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Author")]
pub struct AuthorWithBooks {
    pub id: i32,
    pub name: String,
    pub books: Option<Vec<Option<Book>>>,
}

#[derive(cynic::QueryFragment, Debug, PartialEq)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

#[derive(cynic::QueryFragment, Debug, PartialEq)]
pub struct Book {
    pub id: i32,
    pub name: String,
    #[cynic(rename = "authorID")]
    pub author_id: i32,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct BookByIdVariables {
    pub id: Option<i32>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "BookByIdVariables")]
pub struct BookById {
    #[arguments(id: $id)]
    pub book: Option<Book>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct AddAuthorVariables {
    pub name: String,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "AddAuthorVariables")]
pub struct AddAuthor {
    #[arguments(name: $name)]
    pub add_author: Option<Author>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct AddBookVariables {
    pub name: String,
    pub author_id: i32,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "AddBookVariables")]
pub struct AddBook {
    #[arguments(name: $name, authorID: $author_id)]
    pub add_book: Option<Book>,
}
