// Composition root.
//
// Reads configuration, picks the document store implementation and wires every use case
// handler into the HTTP router and the GraphQL schema.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
