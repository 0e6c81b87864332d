use super::{page, redirect_with, rejected};
use crate::models::{CreateUser, UpdateUser, User};
use crate::services::users;
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
pub struct UserForm {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    img_url: String,
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            img_url: user.img_url.clone(),
        }
    }
}

pub async fn index(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Response> {
    let users = users::list_users(&state.db)?;

    let (jar, flash) = flash::take(jar);
    let mut ctx = state.context(flash);
    ctx.insert("users", &users);

    page(&state, jar, "users/index.html", &ctx)
}

pub async fn new_user(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Response> {
    let (jar, flash) = flash::take(jar);
    let mut ctx = state.context(flash);
    ctx.insert("form", &UserForm::default());

    page(&state, jar, "users/new.html", &ctx)
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<UserForm>,
) -> AppResult<Response> {
    let input = CreateUser {
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        img_url: Some(form.img_url.clone()),
    };

    match users::create_user(&state.db, input) {
        Ok(user) => Ok(redirect_with(
            jar,
            "/users",
            format!("User {} added!", user.full_name()),
        )),
        Err(e) if e.is_rejection() => {
            let mut ctx = state.context(None);
            ctx.insert("form", &form);
            rejected(&state, jar, "users/new.html", &mut ctx, &e)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn show_user(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Id(id): Id,
) -> AppResult<Response> {
    let user = users::get_user_with_posts(&state.db, id)?;

    let (jar, flash) = flash::take(jar);
    let mut ctx = state.context(flash);
    ctx.insert("user", &user);

    page(&state, jar, "users/show.html", &ctx)
}

pub async fn edit_user(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Id(id): Id,
) -> AppResult<Response> {
    let user = users::get_user(&state.db, id)?;

    let (jar, flash) = flash::take(jar);
    let mut ctx = state.context(flash);
    ctx.insert("user_id", &user.id);
    ctx.insert("form", &UserForm::from(&user));

    page(&state, jar, "users/edit.html", &ctx)
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Id(id): Id,
    Form(form): Form<UserForm>,
) -> AppResult<Response> {
    let input = UpdateUser {
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        img_url: form.img_url.clone(),
    };

    match users::update_user(&state.db, id, input) {
        Ok(user) => Ok(redirect_with(
            jar,
            "/users",
            format!("User {} edited!", user.full_name()),
        )),
        Err(e) if e.is_rejection() => {
            let mut ctx = state.context(None);
            ctx.insert("user_id", &id);
            ctx.insert("form", &form);
            rejected(&state, jar, "users/edit.html", &mut ctx, &e)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Id(id): Id,
) -> AppResult<Response> {
    let user = users::delete_user(&state.db, id)?;

    Ok(redirect_with(
        jar,
        "/users",
        format!("User {} deleted!", user.full_name()),
    ))
}
