use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::vote::{Mark, VoteOutcome};

// -- JWT Claims --

/// JWT claims issued at login and carried by every authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub username: String,
    pub token: String,
}

// -- Posts --

pub const TITLE_REQUIRED: &str = "Title is required.";

/// Create/update form as submitted by the client.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostForm {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

impl PostForm {
    pub fn validate(self) -> Result<NewPost, &'static str> {
        if self.title.is_empty() {
            return Err(TITLE_REQUIRED);
        }
        Ok(NewPost {
            title: self.title,
            body: self.body.unwrap_or_default(),
        })
    }
}

/// User-visible message returned where a page would have flashed one.
#[derive(Debug, Serialize, Deserialize)]
pub struct FlashResponse {
    pub flash: String,
}

// -- Votes --

#[derive(Debug, Serialize, Deserialize)]
pub struct VoteResponse {
    pub post_id: i64,
    pub outcome: VoteOutcome,
    pub rating: i64,
    pub mark: Option<Mark>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_rejected() {
        let form = PostForm { title: String::new(), body: Some("text".into()) };
        assert_eq!(form.validate(), Err(TITLE_REQUIRED));
    }

    #[test]
    fn missing_body_becomes_empty() {
        let form: PostForm = serde_json::from_str(r#"{"title":"Hello"}"#).unwrap();
        let post = form.validate().unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.body, "");
    }

    #[test]
    fn unknown_fields_rejected() {
        let res = serde_json::from_str::<PostForm>(r#"{"title":"a","author_id":"x"}"#);
        assert!(res.is_err());
    }
}
