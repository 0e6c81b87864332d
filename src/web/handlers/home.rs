use super::page;
use crate::services::posts;
use crate::web::error::AppResult;
use crate::web::flash;
use crate::web::state::AppState;
use axum::extract::State;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use std::sync::Arc;

pub async fn index(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Response> {
    let posts = posts::list_recent_posts(&state.db, state.config.content.recent_posts)?;

    let (jar, flash) = flash::take(jar);
    let mut ctx = state.context(flash);
    ctx.insert("posts", &posts);

    page(&state, jar, "home.html", &ctx)
}
