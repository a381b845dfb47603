//! Rows as read from SQLite, before conversion to the `tally-types` models.

use tally_types::vote::{Mark, Transition};

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

/// A post joined with its author's username.
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created: String,
    pub author_id: String,
    pub username: String,
    pub rating: i64,
}

/// Result of applying one vote inside its transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteRecord {
    pub transition: Transition,
    pub rating: i64,
    pub mark: Option<Mark>,
}
