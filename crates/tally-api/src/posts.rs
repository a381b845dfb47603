use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tracing::{info, warn};
use uuid::Uuid;

use tally_db::models::PostRow;
use tally_types::api::{Claims, PostForm};
use tally_types::models::Post;

use crate::error::AppError;
use crate::{AppState, with_db};

/// How a handler intends to use the post it loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Edit or delete: only the author gets through.
    Author,
    /// Voting never checks ownership; authors may vote on their own posts.
    Vote,
    /// Plain read.
    Read,
}

/// Load a post and enforce ownership for author-only operations.
pub async fn get_post(
    state: &AppState,
    id: i64,
    caller: &Claims,
    access: Access,
) -> Result<Post, AppError> {
    let row = with_db(state, move |db| db.get_post(id))
        .await?
        .ok_or(AppError::NotFound(id))?;
    let post = to_post(row);

    if access == Access::Author && post.author_id != caller.sub {
        warn!("User {} denied author access to post {}", caller.username, id);
        return Err(AppError::Forbidden);
    }

    Ok(post)
}

pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = with_db(&state, |db| db.list_posts()).await?;
    let posts: Vec<Post> = rows.into_iter().map(to_post).collect();
    Ok(Json(posts))
}

pub async fn create_form() -> Json<PostForm> {
    Json(PostForm {
        title: String::new(),
        body: Some(String::new()),
    })
}

pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(form): Json<PostForm>,
) -> Result<impl IntoResponse, AppError> {
    let new_post = form.validate().map_err(|msg| AppError::Validation(msg.into()))?;

    let author_id = claims.sub.to_string();
    let id = with_db(&state, move |db| {
        db.insert_post(&author_id, &new_post.title, &new_post.body)
    })
    .await?;

    info!("Post {} created by {}", id, claims.username);
    Ok(Redirect::to("/"))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let post = get_post(&state, id, &claims, Access::Read).await?;
    Ok(Json(post))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let post = get_post(&state, id, &claims, Access::Author).await?;
    Ok(Json(post))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(claims): Extension<Claims>,
    Json(form): Json<PostForm>,
) -> Result<impl IntoResponse, AppError> {
    get_post(&state, id, &claims, Access::Author).await?;

    let post = form.validate().map_err(|msg| AppError::Validation(msg.into()))?;

    let updated = with_db(&state, move |db| db.update_post(id, &post.title, &post.body)).await?;
    if !updated {
        return Err(AppError::NotFound(id));
    }

    info!("Post {} updated by {}", id, claims.username);
    Ok(Redirect::to("/"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    get_post(&state, id, &claims, Access::Author).await?;

    let deleted = with_db(&state, move |db| db.delete_post(id)).await?;
    if !deleted {
        return Err(AppError::NotFound(id));
    }

    info!("Post {} deleted by {}", id, claims.username);
    Ok(Redirect::to("/"))
}

fn to_post(row: PostRow) -> Post {
    Post {
        author_id: row.author_id.parse().unwrap_or_else(|e| {
            warn!("Corrupt author_id '{}' on post {}: {}", row.author_id, row.id, e);
            Uuid::default()
        }),
        created: chrono::DateTime::parse_from_rfc3339(&row.created)
            .map(|dt| dt.to_utc())
            .unwrap_or_else(|e| {
                warn!("Corrupt created '{}' on post {}: {}", row.created, row.id, e);
                chrono::DateTime::default()
            }),
        id: row.id,
        title: row.title,
        body: row.body,
        username: row.username,
        rating: row.rating,
    }
}
