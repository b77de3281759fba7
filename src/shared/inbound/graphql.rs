use async_graphql::{Context, Error, ErrorExtensions, Result as GqlResult};

use crate::shared::auth::session::Session;
use crate::shared::core::errors::ApplicationError;

/// Session attached to the GraphQL request by the HTTP layer.
pub fn session<'a>(context: &Context<'a>) -> GqlResult<&'a Session> {
    context
        .data::<Session>()
        .map_err(|_| to_gql_error(ApplicationError::Unauthorized("missing session".into())))
}

/// Same message and status as the JSON API, carried as an error extension.
pub fn to_gql_error(error: ApplicationError) -> Error {
    let status = error.status();
    let message = if status.is_server_error() {
        tracing::error!("graphql request failed: {error}");
        "Internal server error".to_string()
    } else {
        error.to_string()
    };
    Error::new(message).extend_with(|_, extensions| extensions.set("status", status.as_u16()))
}
