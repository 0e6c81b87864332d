pub mod home;
pub mod posts;
pub mod tags;
pub mod users;

use super::error::{self, status_for, AppResult};
use super::flash::{self, Flash};
use super::state::AppState;
use crate::Error;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::CookieJar;
use tera::Context;

pub async fn not_found() -> Response {
    error::not_found()
}

/// Renders `template` and sends it along with the (possibly updated) cookie jar.
fn page(state: &AppState, jar: CookieJar, template: &str, ctx: &Context) -> AppResult<Response> {
    let html = state.templates.render(template, ctx)?;
    Ok((jar, Html(html)).into_response())
}

/// Shows the form again with the reason the write was refused.
fn rejected(
    state: &AppState,
    jar: CookieJar,
    template: &str,
    ctx: &mut Context,
    err: &Error,
) -> AppResult<Response> {
    tracing::warn!("Rejected write: {}", err);
    ctx.insert("flash", &Some(Flash::error(err.to_string())));
    let html = state.templates.render(template, ctx)?;
    Ok((status_for(err), jar, Html(html)).into_response())
}

/// `302 Found` to `location`, leaving a success message for the next page.
fn redirect_with(jar: CookieJar, location: &str, message: String) -> Response {
    let jar = flash::push(jar, Flash::success(message));
    (
        StatusCode::FOUND,
        jar,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}
