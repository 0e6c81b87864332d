use crate::error::require;
use crate::models::{CreatePost, Post, PostSummary, PostWithTags, Tag, UpdatePost, UserSummary};
use crate::services::associations::{self, Side};
use crate::services::users::fetch_user;
use crate::{Database, Error, Result};
use chrono::SecondsFormat;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

const POST_COLUMNS: &str = "id, title, content, created_at, user_id";

/// Newest posts first, each with its author and tags.
pub fn list_recent_posts(db: &Database, limit: usize) -> Result<Vec<PostWithTags>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM posts ORDER BY created_at DESC, id DESC LIMIT ?",
        POST_COLUMNS
    ))?;
    let posts = stmt
        .query_map([limit as i64], row_to_post)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    posts.into_iter().map(|p| enrich_post(&conn, p)).collect()
}

pub fn list_posts(db: &Database) -> Result<Vec<PostSummary>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM posts ORDER BY created_at DESC, id DESC",
        POST_COLUMNS
    ))?;
    let posts = stmt
        .query_map([], row_to_post)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(posts.iter().map(PostSummary::from).collect())
}

pub fn get_post(db: &Database, id: i64) -> Result<PostWithTags> {
    let conn = db.get()?;
    let post = fetch_post(&conn, id)?;
    enrich_post(&conn, post)
}

pub fn create_post(db: &Database, user_id: i64, input: CreatePost) -> Result<Post> {
    require("Title", &input.title)?;
    require("Content", &input.content)?;

    let mut conn = db.get()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    fetch_user(&tx, user_id)?;

    let created_at = chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    tx.execute(
        "INSERT INTO posts (title, content, created_at, user_id) VALUES (?, ?, ?, ?)",
        (&input.title, &input.content, &created_at, user_id),
    )?;
    let id = tx.last_insert_rowid();
    associations::replace_post_tags(&tx, id, &input.tag_ids)?;

    tx.commit()?;

    tracing::info!(post_id = id, user_id, "Created post '{}'", input.title);
    Ok(Post {
        id,
        title: input.title,
        content: input.content,
        created_at,
        user_id,
    })
}

/// Rewrites title, content and the full tag set. Owner and creation time never change.
pub fn update_post(db: &Database, id: i64, input: UpdatePost) -> Result<Post> {
    require("Title", &input.title)?;
    require("Content", &input.content)?;

    let mut conn = db.get()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let current = fetch_post(&tx, id)?;
    tx.execute(
        "UPDATE posts SET title = ?, content = ? WHERE id = ?",
        (&input.title, &input.content, id),
    )?;
    associations::replace_post_tags(&tx, id, &input.tag_ids)?;

    tx.commit()?;

    Ok(Post {
        title: input.title,
        content: input.content,
        ..current
    })
}

pub fn delete_post(db: &Database, id: i64) -> Result<Post> {
    let mut conn = db.get()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let post = fetch_post(&tx, id)?;
    associations::clear(&tx, Side::Post, id)?;
    tx.execute("DELETE FROM posts WHERE id = ?", [id])?;

    tx.commit()?;

    tracing::info!(post_id = id, "Deleted post '{}'", post.title);
    Ok(post)
}

pub(crate) fn posts_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Post>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM posts WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        POST_COLUMNS
    ))?;
    let posts = stmt
        .query_map([user_id], row_to_post)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(posts)
}

pub(crate) fn posts_for_tag(conn: &Connection, tag_id: i64) -> Result<Vec<PostSummary>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT p.id, p.title, p.content, p.created_at, p.user_id
        FROM posts p
        JOIN posts_tags pt ON p.id = pt.post_id
        WHERE pt.tag_id = ?
        ORDER BY p.created_at DESC, p.id DESC
        "#,
    )?;
    let posts = stmt
        .query_map([tag_id], row_to_post)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(posts.iter().map(PostSummary::from).collect())
}

fn fetch_post(conn: &Connection, id: i64) -> Result<Post> {
    conn.query_row(
        &format!("SELECT {} FROM posts WHERE id = ?", POST_COLUMNS),
        [id],
        row_to_post,
    )
    .optional()?
    .ok_or_else(|| Error::not_found("Post", id))
}

fn row_to_post(row: &rusqlite::Row) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: row.get(3)?,
        user_id: row.get(4)?,
    })
}

fn enrich_post(conn: &Connection, post: Post) -> Result<PostWithTags> {
    let mut tag_stmt = conn.prepare(
        "SELECT t.id, t.name FROM tags t JOIN posts_tags pt ON t.id = pt.tag_id WHERE pt.post_id = ? ORDER BY t.name",
    )?;
    let tags: Vec<Tag> = tag_stmt
        .query_map([post.id], |row| {
            Ok(Tag {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let author = UserSummary::from(&fetch_user(conn, post.user_id)?);

    Ok(PostWithTags { post, author, tags })
}
