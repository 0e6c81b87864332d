use crate::error::require;
use crate::models::{CreateUser, PostSummary, UpdateUser, User, UserWithPosts, DEFAULT_IMG_URL};
use crate::services::{associations, posts};
use crate::{Database, Error, Result};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

const USER_COLUMNS: &str = "id, first_name, last_name, img_url";

pub fn list_users(db: &Database) -> Result<Vec<User>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM users ORDER BY last_name, first_name",
        USER_COLUMNS
    ))?;
    let users = stmt
        .query_map([], row_to_user)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(users)
}

pub fn get_user(db: &Database, id: i64) -> Result<User> {
    let conn = db.get()?;
    fetch_user(&conn, id)
}

pub fn get_user_with_posts(db: &Database, id: i64) -> Result<UserWithPosts> {
    let conn = db.get()?;
    let user = fetch_user(&conn, id)?;
    let posts: Vec<PostSummary> = posts::posts_for_user(&conn, id)?
        .iter()
        .map(PostSummary::from)
        .collect();

    Ok(UserWithPosts {
        full_name: user.full_name(),
        user,
        posts,
    })
}

pub fn create_user(db: &Database, input: CreateUser) -> Result<User> {
    require("First name", &input.first_name)?;
    require("Last name", &input.last_name)?;

    let img_url = input
        .img_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_IMG_URL.to_string());

    let conn = db.get()?;
    conn.execute(
        "INSERT INTO users (first_name, last_name, img_url) VALUES (?, ?, ?)",
        (&input.first_name, &input.last_name, &img_url),
    )?;

    let user = User {
        id: conn.last_insert_rowid(),
        first_name: input.first_name,
        last_name: input.last_name,
        img_url,
    };
    tracing::info!(user_id = user.id, "Created user {}", user.full_name());
    Ok(user)
}

/// Overwrites every mutable field. An empty image URL is kept empty here;
/// the placeholder only applies at creation.
pub fn update_user(db: &Database, id: i64, input: UpdateUser) -> Result<User> {
    require("First name", &input.first_name)?;
    require("Last name", &input.last_name)?;

    let conn = db.get()?;
    let updated = conn.execute(
        "UPDATE users SET first_name = ?, last_name = ?, img_url = ? WHERE id = ?",
        (&input.first_name, &input.last_name, &input.img_url, id),
    )?;
    if updated == 0 {
        return Err(Error::not_found("User", id));
    }

    Ok(User {
        id,
        first_name: input.first_name,
        last_name: input.last_name,
        img_url: input.img_url,
    })
}

/// Removes the user together with their posts and those posts' tag edges.
pub fn delete_user(db: &Database, id: i64) -> Result<User> {
    let mut conn = db.get()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let user = fetch_user(&tx, id)?;

    let post_ids: Vec<i64> = posts::posts_for_user(&tx, id)?
        .iter()
        .map(|p| p.id)
        .collect();
    for post_id in &post_ids {
        associations::clear(&tx, associations::Side::Post, *post_id)?;
    }
    tx.execute("DELETE FROM posts WHERE user_id = ?", [id])?;
    tx.execute("DELETE FROM users WHERE id = ?", [id])?;

    tx.commit()?;

    tracing::info!(
        user_id = id,
        posts = post_ids.len(),
        "Deleted user {}",
        user.full_name()
    );
    Ok(user)
}

pub(crate) fn fetch_user(conn: &Connection, id: i64) -> Result<User> {
    conn.query_row(
        &format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS),
        [id],
        row_to_user,
    )
    .optional()?
    .ok_or_else(|| Error::not_found("User", id))
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        img_url: row.get(3)?,
    })
}
