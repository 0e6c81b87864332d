//! Post↔tag edges in `posts_tags`.
//!
//! Edits always hand over the complete id set for one side. The rows are
//! rewritten by diffing against what is stored, so untouched edges stay put.

use crate::Result;
use rusqlite::{params_from_iter, Connection};
use std::collections::BTreeSet;

/// Which end of the association owns the id set being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Post,
    Tag,
}

impl Side {
    fn column(self) -> &'static str {
        match self {
            Self::Post => "post_id",
            Self::Tag => "tag_id",
        }
    }

    fn other_column(self) -> &'static str {
        match self {
            Self::Post => "tag_id",
            Self::Tag => "post_id",
        }
    }

    fn other_table(self) -> &'static str {
        match self {
            Self::Post => "tags",
            Self::Tag => "posts",
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct EdgeDiff {
    pub added: Vec<i64>,
    pub removed: Vec<i64>,
}

impl EdgeDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

pub fn diff(current: &BTreeSet<i64>, requested: &BTreeSet<i64>) -> EdgeDiff {
    EdgeDiff {
        added: requested.difference(current).copied().collect(),
        removed: current.difference(requested).copied().collect(),
    }
}

pub fn replace_post_tags(conn: &Connection, post_id: i64, tag_ids: &[i64]) -> Result<EdgeDiff> {
    replace(conn, Side::Post, post_id, tag_ids)
}

pub fn replace_tag_posts(conn: &Connection, tag_id: i64, post_ids: &[i64]) -> Result<EdgeDiff> {
    replace(conn, Side::Tag, tag_id, post_ids)
}

/// Deletes every edge touching `id` on the given side.
pub fn clear(conn: &Connection, side: Side, id: i64) -> Result<usize> {
    let sql = format!("DELETE FROM posts_tags WHERE {} = ?", side.column());
    Ok(conn.execute(&sql, [id])?)
}

fn replace(conn: &Connection, side: Side, owner_id: i64, requested: &[i64]) -> Result<EdgeDiff> {
    let requested = existing_ids(conn, side.other_table(), requested)?;
    let current = current_ids(conn, side, owner_id)?;
    let diff = diff(&current, &requested);

    if !diff.removed.is_empty() {
        let sql = format!(
            "DELETE FROM posts_tags WHERE {} = ? AND {} = ?",
            side.column(),
            side.other_column()
        );
        let mut stmt = conn.prepare(&sql)?;
        for id in &diff.removed {
            stmt.execute((owner_id, id))?;
        }
    }

    if !diff.added.is_empty() {
        let sql = format!(
            "INSERT INTO posts_tags ({}, {}) VALUES (?, ?)",
            side.column(),
            side.other_column()
        );
        let mut stmt = conn.prepare(&sql)?;
        for id in &diff.added {
            stmt.execute((owner_id, id))?;
        }
    }

    tracing::debug!(
        owner_id,
        added = diff.added.len(),
        removed = diff.removed.len(),
        "Rewrote {} associations",
        side.column()
    );

    Ok(diff)
}

fn current_ids(conn: &Connection, side: Side, owner_id: i64) -> Result<BTreeSet<i64>> {
    let sql = format!(
        "SELECT {} FROM posts_tags WHERE {} = ?",
        side.other_column(),
        side.column()
    );
    let mut stmt = conn.prepare(&sql)?;
    let ids = stmt
        .query_map([owner_id], |row| row.get(0))?
        .collect::<std::result::Result<BTreeSet<i64>, _>>()?;
    Ok(ids)
}

/// Keeps only the ids that name a row in `table`; unknown ids are dropped.
fn existing_ids(conn: &Connection, table: &str, ids: &[i64]) -> Result<BTreeSet<i64>> {
    if ids.is_empty() {
        return Ok(BTreeSet::new());
    }

    let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
    let sql = format!("SELECT id FROM {} WHERE id IN ({})", table, placeholders);
    let mut stmt = conn.prepare(&sql)?;
    let found = stmt
        .query_map(params_from_iter(ids.iter()), |row| row.get(0))?
        .collect::<std::result::Result<BTreeSet<i64>, _>>()?;
    Ok(found)
}
