use async_graphql::{EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Extension, response::Html};

pub use crate::modules::time_tracking::adapters::inbound::graphql::{MutationRoot, QueryRoot};
pub use crate::shell::state::AppState;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub const ENDPOINT: &str = "/gql";

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

pub async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

pub async fn graphiql() -> Html<String> {
    use async_graphql::http::GraphiQLSource;
    Html(GraphiQLSource::build().endpoint(ENDPOINT).finish())
}
