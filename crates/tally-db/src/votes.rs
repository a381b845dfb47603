use anyhow::{Result, anyhow, bail};
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use tally_types::vote::{Direction, Mark, Transition};

use crate::Database;
use crate::models::VoteRecord;

impl Database {
    /// Apply one like/dislike from `user_id` to `post_id`.
    ///
    /// The mark write and the rating update share one transaction, so a
    /// failure between them leaves neither applied. Returns `None` when the
    /// post does not exist.
    pub fn apply_vote(
        &self,
        post_id: i64,
        user_id: &str,
        direction: Direction,
    ) -> Result<Option<VoteRecord>> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let exists = tx
                .query_row("SELECT 1 FROM post WHERE id = ?1", [post_id], |_| Ok(()))
                .optional()?
                .is_some();
            if !exists {
                return Ok(None);
            }

            let current = query_mark(&tx, post_id, user_id)?;
            let transition = Transition::plan(current, direction);

            match transition {
                Transition::Insert { mark, .. } => {
                    tx.execute(
                        "INSERT INTO user_marks (id_post, id_user, mark) VALUES (?1, ?2, ?3)",
                        rusqlite::params![post_id, user_id, mark.value()],
                    )?;
                }
                Transition::Delete { .. } => {
                    tx.execute(
                        "DELETE FROM user_marks WHERE id_post = ?1 AND id_user = ?2",
                        rusqlite::params![post_id, user_id],
                    )?;
                }
                Transition::Noop => {
                    debug!("Vote on post {} by {} is a repeat, nothing to do", post_id, user_id);
                }
            }

            if transition.delta() != 0 {
                let changed = tx.execute(
                    "UPDATE post SET rating = rating + ?1 WHERE id = ?2",
                    rusqlite::params![transition.delta(), post_id],
                )?;
                if changed != 1 {
                    bail!("Rating update touched {} rows for post {}", changed, post_id);
                }
            }

            let rating: i64 =
                tx.query_row("SELECT rating FROM post WHERE id = ?1", [post_id], |r| r.get(0))?;

            tx.commit()?;

            Ok(Some(VoteRecord {
                transition,
                rating,
                mark: transition.resulting_mark(current),
            }))
        })
    }
}

fn query_mark(conn: &Connection, post_id: i64, user_id: &str) -> Result<Option<Mark>> {
    let value: Option<i64> = conn
        .query_row(
            "SELECT mark FROM user_marks WHERE id_post = ?1 AND id_user = ?2",
            rusqlite::params![post_id, user_id],
            |row| row.get(0),
        )
        .optional()?;

    value
        .map(|v| {
            Mark::from_value(v)
                .ok_or_else(|| anyhow!("Invalid mark {} on post {} for user {}", v, post_id, user_id))
        })
        .transpose()
}
