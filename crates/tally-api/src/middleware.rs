use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, Validation, decode};

use tally_types::api::Claims;

use crate::AppState;
use crate::error::AppError;

/// Extract and validate JWT from Authorization header.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::Unauthorized)?;

    let claims = decode_token(&state.jwt_secret, bearer.token())?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized)?;

    Ok(token_data.claims)
}
