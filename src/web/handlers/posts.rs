use super::{page, redirect_with, rejected};
use crate::models::{CreatePost, PostWithTags, UpdatePost};
use crate::services::{posts, tags, users};
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
pub struct PostForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    /// Checked tag ids; the field repeats once per box.
    #[serde(default)]
    tags: Vec<i64>,
}

impl From<&PostWithTags> for PostForm {
    fn from(post: &PostWithTags) -> Self {
        Self {
            title: post.post.title.clone(),
            content: post.post.content.clone(),
            tags: post.tag_ids(),
        }
    }
}

pub async fn new_post(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Id(user_id): Id,
) -> AppResult<Response> {
    let user = users::get_user(&state.db, user_id)?;
    let all_tags = tags::list_tags(&state.db)?;

    let (jar, flash) = flash::take(jar);
    let mut ctx = state.context(flash);
    ctx.insert("user", &user);
    ctx.insert("full_name", &user.full_name());
    ctx.insert("all_tags", &all_tags);
    ctx.insert("form", &PostForm::default());

    page(&state, jar, "posts/new.html", &ctx)
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Id(user_id): Id,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let input = CreatePost {
        title: form.title.clone(),
        content: form.content.clone(),
        tag_ids: form.tags.clone(),
    };

    match posts::create_post(&state.db, user_id, input) {
        Ok(post) => Ok(redirect_with(
            jar,
            &format!("/users/{}", user_id),
            format!("Post '{}' added!", post.title),
        )),
        Err(e) if e.is_rejection() => {
            let user = users::get_user(&state.db, user_id)?;
            let all_tags = tags::list_tags(&state.db)?;

            let mut ctx = state.context(None);
            ctx.insert("user", &user);
            ctx.insert("full_name", &user.full_name());
            ctx.insert("all_tags", &all_tags);
            ctx.insert("form", &form);
            rejected(&state, jar, "posts/new.html", &mut ctx, &e)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn show_post(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Id(id): Id,
) -> AppResult<Response> {
    let post = posts::get_post(&state.db, id)?;

    let (jar, flash) = flash::take(jar);
    let mut ctx = state.context(flash);
    ctx.insert("post", &post);

    page(&state, jar, "posts/show.html", &ctx)
}

pub async fn edit_post(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Id(id): Id,
) -> AppResult<Response> {
    let post = posts::get_post(&state.db, id)?;
    let all_tags = tags::list_tags(&state.db)?;

    let (jar, flash) = flash::take(jar);
    let mut ctx = state.context(flash);
    ctx.insert("post", &post);
    ctx.insert("all_tags", &all_tags);
    ctx.insert("form", &PostForm::from(&post));

    page(&state, jar, "posts/edit.html", &ctx)
}

pub async fn update_post(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Id(id): Id,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let input = UpdatePost {
        title: form.title.clone(),
        content: form.content.clone(),
        tag_ids: form.tags.clone(),
    };

    match posts::update_post(&state.db, id, input) {
        Ok(post) => Ok(redirect_with(
            jar,
            &format!("/users/{}", post.user_id),
            format!("Post '{}' edited!", post.title),
        )),
        Err(e) if e.is_rejection() => {
            let post = posts::get_post(&state.db, id)?;
            let all_tags = tags::list_tags(&state.db)?;

            let mut ctx = state.context(None);
            ctx.insert("post", &post);
            ctx.insert("all_tags", &all_tags);
            ctx.insert("form", &form);
            rejected(&state, jar, "posts/edit.html", &mut ctx, &e)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Id(id): Id,
) -> AppResult<Response> {
    let post = posts::delete_post(&state.db, id)?;

    Ok(redirect_with(
        jar,
        &format!("/users/{}", post.user_id),
        format!("Post '{}' deleted!", post.title),
    ))
}
