use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use internhub_db::Database;
use internhub_types::api::{Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use internhub_types::models::UserType;

use crate::applications::StatusPolicy;
use crate::error::{ApiError, ApiResult};
use crate::run_blocking;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
    /// Transition validation for application status updates. Permissive by
    /// default; swap in a stricter policy without touching call sites.
    pub status_policy: StatusPolicy,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    // Validate input
    if req.email.is_empty() || req.password.is_empty() || req.user_type.is_empty() {
        return Err(ApiError::BadRequest(
            "email, password and user_type are required".into(),
        ));
    }
    if !req.email.contains('@') {
        return Err(ApiError::BadRequest("email is not valid".into()));
    }
    if req.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "password must be at least 8 characters".into(),
        ));
    }
    let user_type: UserType = req
        .user_type
        .parse()
        .map_err(|_| ApiError::BadRequest("user_type must be 'Student' or 'Company'".into()))?;

    let state_check = state.clone();
    let email = req.email.clone();
    let taken = run_blocking(move || Ok(state_check.db.get_user_by_email(&email)?.is_some())).await?;
    if taken {
        return Err(ApiError::Conflict("Email already exists".into()));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("password hash failed: {}", e)))?
        .to_string();

    let user_id = Uuid::new_v4();

    let db = state.clone();
    let uid = user_id.to_string();
    run_blocking(move || {
        db.db.create_user(
            &uid,
            &req.email,
            &password_hash,
            user_type,
            req.location.as_deref(),
            req.description.as_deref(),
            req.profile_pic.as_deref(),
        )?;
        // Role-specific profile row created alongside the account
        match user_type {
            UserType::Student => db.db.create_student(
                &uid,
                req.first_name.as_deref().unwrap_or(""),
                req.last_name.as_deref().unwrap_or(""),
            )?,
            UserType::Company => db
                .db
                .create_company(&uid, req.company_name.as_deref().unwrap_or(""))?,
        }
        Ok(())
    })
    .await?;

    // Log the user in immediately
    let token = create_token(&state.jwt_secret, user_id, user_type)
        .map_err(ApiError::Internal)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id,
            user_type,
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let email = req.email.clone();
    let user = run_blocking(move || Ok(db.db.get_user_by_email(&email)?))
        .await?
        .ok_or(ApiError::Unauthenticated)?;

    // Verify password
    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("corrupt password hash: {}", e)))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::Unauthenticated)?;

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("corrupt user id '{}': {}", user.id, e)))?;
    let user_type: UserType = user.user_type.parse().map_err(|_| {
        ApiError::Internal(anyhow::anyhow!("corrupt user_type '{}'", user.user_type))
    })?;

    let token = create_token(&state.jwt_secret, user_id, user_type)
        .map_err(ApiError::Internal)?;

    Ok(Json(LoginResponse {
        user_id,
        email: user.email,
        user_type,
        token,
    }))
}

fn create_token(secret: &str, user_id: Uuid, user_type: UserType) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        user_type,
        exp: (chrono::Utc::now() + chrono::Duration::days(7)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
