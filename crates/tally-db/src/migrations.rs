use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS user (
            id          TEXT PRIMARY KEY,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS post (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            author_id   TEXT NOT NULL REFERENCES user(id),
            created     TEXT NOT NULL,
            title       TEXT NOT NULL,
            body        TEXT NOT NULL DEFAULT '',
            rating      INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_post_created
            ON post(created);

        -- One mark per (post, user). No row means no vote.
        CREATE TABLE IF NOT EXISTS user_marks (
            id_post     INTEGER NOT NULL REFERENCES post(id) ON DELETE CASCADE,
            id_user     TEXT NOT NULL REFERENCES user(id),
            mark        INTEGER NOT NULL CHECK (mark IN (1, -1)),
            PRIMARY KEY (id_post, id_user)
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
