use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use super::{
    dto::{LoginRequest, RegisterRequest},
    jwt::JwtKeys,
    password::{hash_password_blocking, verify_dummy_blocking, verify_password_blocking},
    repo_types::User,
};
use crate::{
    error::{AppError, FieldError},
    store::Store,
};

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_PASSWORD_CHARS: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalizes the request in place and reports every invalid field.
pub fn validate_registration(req: &mut RegisterRequest) -> Result<(), AppError> {
    req.name = req.name.trim().to_string();
    req.email = normalize_email(&req.email);

    let mut errors = Vec::new();
    if req.name.chars().count() < MIN_NAME_CHARS {
        errors.push(FieldError::new("name", "Name must be at least 2 characters"));
    }
    if !is_valid_email(&req.email) {
        errors.push(FieldError::new("email", "Please provide a valid email"));
    }
    if req.password.chars().count() < MIN_PASSWORD_CHARS {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

pub fn validate_login(req: &mut LoginRequest) -> Result<(), AppError> {
    req.email = normalize_email(&req.email);

    let mut errors = Vec::new();
    if !is_valid_email(&req.email) {
        errors.push(FieldError::new("email", "Please provide a valid email"));
    }
    if req.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Creates the account and issues its first session token.
pub async fn register(
    store: &dyn Store,
    keys: &JwtKeys,
    mut req: RegisterRequest,
) -> Result<(User, String), AppError> {
    validate_registration(&mut req)?;

    let hash = hash_password_blocking(req.password).await?;
    let user = match store.create_user(&req.name, &req.email, &hash).await {
        Ok(u) => u,
        Err(e) => {
            warn!(email = %req.email, error = %e, "registration rejected");
            return Err(e.into());
        }
    };

    let token = keys.sign(user.id)?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((user, token))
}

/// Unknown email and wrong password both yield `InvalidCredentials`.
pub async fn login(
    store: &dyn Store,
    keys: &JwtKeys,
    mut req: LoginRequest,
) -> Result<(User, String), AppError> {
    validate_login(&mut req)?;

    let Some(user) = store.find_user_by_email(&req.email).await? else {
        warn!(email = %req.email, "login unknown email");
        verify_dummy_blocking(req.password).await;
        return Err(AppError::InvalidCredentials);
    };

    let ok = verify_password_blocking(req.password, user.password_hash.clone()).await?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let token = keys.sign(user.id)?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((user, token))
}

/// Resolves a bearer token to a user that still exists.
pub async fn resolve_token(
    store: &dyn Store,
    keys: &JwtKeys,
    token: &str,
) -> Result<User, AppError> {
    let claims = match keys.verify(token) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "invalid or expired token");
            return Err(AppError::Auth("Invalid token.".into()));
        }
    };

    match store.find_user_by_id(claims.sub).await? {
        Some(user) => Ok(user),
        None => {
            warn!(user_id = %claims.sub, "token for missing user");
            Err(AppError::Auth("Invalid token.".into()))
        }
    }
}
