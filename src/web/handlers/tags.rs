use super::{page, redirect_with, rejected};
use crate::models::{SaveTag, TagWithPosts};
use crate::services::{posts, tags};
use crate::web::error::AppResult;
use crate::web::extractors::Id;
use crate::web::flash;
use crate::web::state::AppState;
use axum::extract::State;
use axum::response::Response;
use axum_extra::extract::{CookieJar, Form};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TagForm {
    #[serde(default)]
    name: String,
    /// Checked post ids; the field repeats once per box.
    #[serde(default)]
    posts: Vec<i64>,
}

impl From<&TagWithPosts> for TagForm {
    fn from(tag: &TagWithPosts) -> Self {
        Self {
            name: tag.tag.name.clone(),
            posts: tag.post_ids(),
        }
    }
}

impl TagForm {
    fn to_input(&self) -> SaveTag {
        SaveTag {
            name: self.name.clone(),
            post_ids: self.posts.clone(),
        }
    }
}

pub async fn index(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Response> {
    let tags = tags::list_tags(&state.db)?;

    let (jar, flash) = flash::take(jar);
    let mut ctx = state.context(flash);
    ctx.insert("tags", &tags);

    page(&state, jar, "tags/index.html", &ctx)
}

pub async fn new_tag(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Response> {
    let all_posts = posts::list_posts(&state.db)?;

    let (jar, flash) = flash::take(jar);
    let mut ctx = state.context(flash);
    ctx.insert("all_posts", &all_posts);
    ctx.insert("form", &TagForm::default());

    page(&state, jar, "tags/new.html", &ctx)
}

pub async fn create_tag(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<TagForm>,
) -> AppResult<Response> {
    match tags::create_tag(&state.db, form.to_input()) {
        Ok(tag) => Ok(redirect_with(
            jar,
            "/tags",
            format!("Tag '{}' added!", tag.name),
        )),
        Err(e) if e.is_rejection() => {
            let all_posts = posts::list_posts(&state.db)?;

            let mut ctx = state.context(None);
            ctx.insert("all_posts", &all_posts);
            ctx.insert("form", &form);
            rejected(&state, jar, "tags/new.html", &mut ctx, &e)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn show_tag(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Id(id): Id,
) -> AppResult<Response> {
    let tag = tags::get_tag(&state.db, id)?;

    let (jar, flash) = flash::take(jar);
    let mut ctx = state.context(flash);
    ctx.insert("tag", &tag);

    page(&state, jar, "tags/show.html", &ctx)
}

pub async fn edit_tag(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Id(id): Id,
) -> AppResult<Response> {
    let tag = tags::get_tag(&state.db, id)?;
    let all_posts = posts::list_posts(&state.db)?;

    let (jar, flash) = flash::take(jar);
    let mut ctx = state.context(flash);
    ctx.insert("tag_id", &tag.tag.id);
    ctx.insert("all_posts", &all_posts);
    ctx.insert("form", &TagForm::from(&tag));

    page(&state, jar, "tags/edit.html", &ctx)
}

pub async fn update_tag(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Id(id): Id,
    Form(form): Form<TagForm>,
) -> AppResult<Response> {
    match tags::update_tag(&state.db, id, form.to_input()) {
        Ok(tag) => Ok(redirect_with(
            jar,
            "/tags",
            format!("Tag '{}' edited!", tag.name),
        )),
        Err(e) if e.is_rejection() => {
            let all_posts = posts::list_posts(&state.db)?;

            let mut ctx = state.context(None);
            ctx.insert("tag_id", &id);
            ctx.insert("all_posts", &all_posts);
            ctx.insert("form", &form);
            rejected(&state, jar, "tags/edit.html", &mut ctx, &e)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_tag(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Id(id): Id,
) -> AppResult<Response> {
    let tag = tags::delete_tag(&state.db, id)?;

    Ok(redirect_with(
        jar,
        "/tags",
        format!("Tag '{}' deleted!", tag.name),
    ))
}
