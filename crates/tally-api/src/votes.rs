use axum::{
    Extension, Json,
    extract::{Path, State},
};
use tracing::{debug, info};

use tally_types::api::{Claims, VoteResponse};
use tally_types::vote::{Direction, VoteOutcome};

use crate::error::AppError;
use crate::posts::{Access, get_post};
use crate::{AppState, with_db};

pub async fn like(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<VoteResponse>, AppError> {
    apply_vote(&state, id, &claims, Direction::Like).await.map(Json)
}

pub async fn dislike(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<VoteResponse>, AppError> {
    apply_vote(&state, id, &claims, Direction::Dislike).await.map(Json)
}

/// Run the like/dislike transition for `caller` on post `post_id`.
pub async fn apply_vote(
    state: &AppState,
    post_id: i64,
    caller: &Claims,
    direction: Direction,
) -> Result<VoteResponse, AppError> {
    get_post(state, post_id, caller, Access::Vote).await?;

    let user_id = caller.sub.to_string();
    let record = with_db(state, move |db| db.apply_vote(post_id, &user_id, direction))
        .await?
        .ok_or(AppError::NotFound(post_id))?;

    let outcome = record.transition.outcome();
    let flash = match outcome {
        VoteOutcome::AlreadyMarked => {
            debug!("{} repeated {:?} on post {}", caller.username, direction, post_id);
            Some(direction.already_marked_message().to_string())
        }
        VoteOutcome::Marked | VoteOutcome::Withdrawn => {
            info!(
                "{} {:?} post {}: {:?}, rating now {}",
                caller.username, direction, post_id, outcome, record.rating
            );
            None
        }
    };

    Ok(VoteResponse {
        post_id,
        outcome,
        rating: record.rating,
        mark: record.mark,
        flash,
    })
}
