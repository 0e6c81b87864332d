use crate::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Marks a 404 response whose body is replaced by the rendered not-found page.
#[derive(Debug, Clone, Copy)]
pub struct NotFoundPage;

pub fn not_found() -> Response {
    let mut response = StatusCode::NOT_FOUND.into_response();
    response.extensions_mut().insert(NotFoundPage);
    response
}

pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::NotFound { .. } => StatusCode::NOT_FOUND,
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::Conflict(_) => StatusCode::CONFLICT,
        Error::Database(_) | Error::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.0.downcast_ref::<Error>() {
            Some(err) if err.is_not_found() => not_found(),
            Some(err) if err.is_rejection() => (status_for(err), err.to_string()).into_response(),
            _ => {
                tracing::error!("Application error: {:?}", self.0);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
