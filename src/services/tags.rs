use crate::error::{is_unique_violation, require};
use crate::models::{SaveTag, Tag, TagWithPosts};
use crate::services::associations::{self, Side};
use crate::services::posts::posts_for_tag;
use crate::{Database, Error, Result};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

pub fn list_tags(db: &Database) -> Result<Vec<Tag>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare("SELECT id, name FROM tags ORDER BY name")?;
    let tags = stmt
        .query_map([], row_to_tag)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(tags)
}

pub fn get_tag(db: &Database, id: i64) -> Result<TagWithPosts> {
    let conn = db.get()?;
    let tag = fetch_tag(&conn, id)?;
    let posts = posts_for_tag(&conn, id)?;
    Ok(TagWithPosts { tag, posts })
}

pub fn create_tag(db: &Database, input: SaveTag) -> Result<Tag> {
    require("Tag name", &input.name)?;

    let mut conn = db.get()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    tx.execute("INSERT INTO tags (name) VALUES (?)", [&input.name])
        .map_err(|e| name_taken(e, &input.name))?;
    let id = tx.last_insert_rowid();
    associations::replace_tag_posts(&tx, id, &input.post_ids)?;

    tx.commit()?;

    tracing::info!(tag_id = id, "Created tag '{}'", input.name);
    Ok(Tag {
        id,
        name: input.name,
    })
}

pub fn update_tag(db: &Database, id: i64, input: SaveTag) -> Result<Tag> {
    require("Tag name", &input.name)?;

    let mut conn = db.get()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    fetch_tag(&tx, id)?;
    tx.execute("UPDATE tags SET name = ? WHERE id = ?", (&input.name, id))
        .map_err(|e| name_taken(e, &input.name))?;
    associations::replace_tag_posts(&tx, id, &input.post_ids)?;

    tx.commit()?;

    Ok(Tag {
        id,
        name: input.name,
    })
}

/// Removes the tag and its edges. Tagged posts are left alone.
pub fn delete_tag(db: &Database, id: i64) -> Result<Tag> {
    let mut conn = db.get()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let tag = fetch_tag(&tx, id)?;
    associations::clear(&tx, Side::Tag, id)?;
    tx.execute("DELETE FROM tags WHERE id = ?", [id])?;

    tx.commit()?;

    tracing::info!(tag_id = id, "Deleted tag '{}'", tag.name);
    Ok(tag)
}

fn fetch_tag(conn: &Connection, id: i64) -> Result<Tag> {
    conn.query_row("SELECT id, name FROM tags WHERE id = ?", [id], row_to_tag)
        .optional()?
        .ok_or_else(|| Error::not_found("Tag", id))
}

fn row_to_tag(row: &rusqlite::Row) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn name_taken(err: rusqlite::Error, name: &str) -> Error {
    if is_unique_violation(&err) {
        Error::Conflict(format!("A tag named '{}' already exists", name))
    } else {
        Error::Database(err)
    }
}
