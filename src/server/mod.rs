use std::sync::Arc;

use anyhow::Context as _;
use async_graphql::http::GraphiQLSource;
use async_graphql::{Request, Response};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;

use crate::config::Config;
use crate::datamodel::Library;

mod dataloader;
mod loaders;
mod schema;

use dataloader::DataLoader;
use loaders::BooksByAuthor;
pub use schema::{LibrarySchema, SchemaOptions, build_schema};

pub const GRAPHQL_PATH: &str = "/graphql";

#[derive(Clone)]
pub struct AppState {
    schema: LibrarySchema,
    library: Arc<Library>,
}

impl AppState {
    pub fn new(library: Arc<Library>, options: SchemaOptions) -> Self {
        let schema = build_schema(library.clone(), options);
        Self { schema, library }
    }

    /// Runs one GraphQL request with a fresh set of per-request loaders.
    pub async fn execute(&self, req: impl Into<Request>) -> Response {
        let books_by_author = DataLoader::new(BooksByAuthor::new(self.library.clone()));
        let req: Request = req.into();
        let req = req.data(books_by_author.clone());

        books_by_author.wrap(self.schema.execute(req)).await
    }
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

#[axum::debug_handler]
async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.execute(req.into_inner()).await.into()
}

pub fn make_app(state: AppState) -> Router {
    Router::new()
        .route(GRAPHQL_PATH, get(graphiql).post(graphql_handler))
        .with_state(state)
}

pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = AppState::new(Arc::new(Library::seeded()), config.schema_options());
    let app = make_app(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("serving GraphQL on http://{addr}{GRAPHQL_PATH}");

    axum::serve(listener, app).await?;
    Ok(())
}
