use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::{SaltString, rand_core::OsRng}};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::info;
use uuid::Uuid;

use tally_types::api::{Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use crate::error::AppError;
use crate::{AppState, with_db};

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Validate input
    let name_len = req.username.chars().count();
    if !(3..=32).contains(&name_len) {
        return Err(AppError::BadRequest("Username must be 3-32 characters.".into()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest("Password must be at least 8 characters.".into()));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Password hashing failed: {}", e))?
        .to_string();

    let user_id = Uuid::new_v4();

    // The UNIQUE constraint decides, so concurrent registrations of one name
    // cannot both succeed.
    let username = req.username.clone();
    let created = with_db(&state, move |db| {
        db.create_user(&user_id.to_string(), &username, &password_hash)
    })
    .await?;
    if !created {
        return Err(AppError::Conflict(format!("User {} is already registered.", req.username)));
    }

    info!("Registered user {} ({})", req.username, user_id);

    let token = create_token(&state.jwt_secret, user_id, &req.username)?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id, token })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = req.username.clone();
    let user = with_db(&state, move |db| db.get_user_by_username(&username))
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Verify password
    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| anyhow::anyhow!("Stored hash for {} is unreadable: {}", user.username, e))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)?;

    let user_id: Uuid = user.id.parse().map_err(anyhow::Error::from)?;

    let token = create_token(&state.jwt_secret, user_id, &user.username)?;

    Ok(Json(LoginResponse {
        user_id,
        username: user.username,
        token,
    }))
}

/// Issue a 30-day HS256 token for `user_id`.
pub fn create_token(secret: &str, user_id: Uuid, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::decode_token;

    #[test]
    fn token_roundtrip() {
        let id = Uuid::new_v4();
        let token = create_token("secret", id, "alice").unwrap();

        let claims = decode_token("secret", &token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = create_token("secret", Uuid::new_v4(), "alice").unwrap();
        assert!(matches!(decode_token("other", &token), Err(AppError::Unauthorized)));
    }
}
