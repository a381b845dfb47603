use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A published post together with its author's username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created: DateTime<Utc>,
    pub author_id: Uuid,
    pub username: String,
    pub rating: i64,
}
