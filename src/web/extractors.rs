use super::error;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::response::Response;
use std::future::Future;
use std::pin::Pin;

/// Row id taken from the single `:id` segment of the route.
///
/// A segment that is not an `i64` cannot name a row, so it answers with the
/// not-found page instead of axum's plain-text path rejection.
pub struct Id(pub i64);

impl<S> FromRequestParts<S> for Id
where
    S: Send + Sync,
{
    type Rejection = Response;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 S,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let extracted = Path::<i64>::from_request_parts(parts, state).await;
            match extracted {
                Ok(Path(id)) => Ok(Id(id)),
                Err(rejection) => {
                    tracing::debug!("Unparseable id in {}: {}", parts.uri.path(), rejection);
                    Err(error::not_found())
                }
            }
        })
    }
}
