// Composition root for the time_tracking bounded context.
//
// Responsibilities
// - Read config from environment.
// - Instantiate the in-memory adapters and the seeded catalog.
// - Wire adapters into use case handlers and expose them over HTTP and GraphQL.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
