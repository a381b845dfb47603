use crate::models::{PostRow, UserRow};
use crate::Database;
use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row};

const POST_COLUMNS: &str = "SELECT p.id, p.title, p.body, p.created, p.author_id, u.username, p.rating
     FROM post p
     JOIN user u ON p.author_id = u.id";

impl Database {
    // -- Users --

    /// Returns false when `username` is already taken.
    pub fn create_user(&self, id: &str, username: &str, password_hash: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let res = conn.execute(
                "INSERT INTO user (id, username, password) VALUES (?1, ?2, ?3)",
                (id, username, password_hash),
            );
            match res {
                Ok(_) => Ok(true),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
                {
                    Ok(false)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Posts --

    /// Insert a post with rating 0 and return its id.
    pub fn insert_post(&self, author_id: &str, title: &str, body: &str) -> Result<i64> {
        let created = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO post (author_id, created, title, body) VALUES (?1, ?2, ?3, ?4)",
                (author_id, &created, title, body),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_post(&self, id: i64) -> Result<Option<PostRow>> {
        self.with_conn(|conn| query_post(conn, id))
    }

    /// Every post, newest first.
    pub fn list_posts(&self) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{POST_COLUMNS} ORDER BY p.created DESC, p.id DESC"
            ))?;

            let rows = stmt
                .query_map([], post_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Returns false if no post has `id`.
    pub fn update_post(&self, id: i64, title: &str, body: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE post SET title = ?1, body = ?2 WHERE id = ?3",
                (title, body, id),
            )?;
            Ok(changed > 0)
        })
    }

    /// Removes the post; its marks go with it through the cascade.
    pub fn delete_post(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM post WHERE id = ?1", [id])?;
            Ok(changed > 0)
        })
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, username, password, created_at FROM user WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

pub(crate) fn query_post(conn: &Connection, id: i64) -> Result<Option<PostRow>> {
    let mut stmt = conn.prepare(&format!("{POST_COLUMNS} WHERE p.id = ?1"))?;
    let row = stmt.query_row([id], post_from_row).optional()?;
    Ok(row)
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        created: row.get(3)?,
        author_id: row.get(4)?,
        username: row.get(5)?,
        rating: row.get(6)?,
    })
}
