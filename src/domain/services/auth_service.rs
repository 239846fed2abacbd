use std::sync::Arc;
use crate::domain::{
    models::user::{normalize_email, NewUser, User},
    ports::UserRepository,
    services::{password, token::TokenIssuer},
};
use crate::error::AppError;
use tracing::info;

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: &str) -> Self {
        Self { users, tokens: TokenIssuer::new(jwt_secret) }
    }

    pub async fn register(&self, email: &str, raw_password: &str) -> Result<(User, String), AppError> {
        let email = normalize_email(email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".into()));
        }

        let password_hash = password::hash_password(raw_password)?;
        let user = self.users.register(&NewUser::new(email, password_hash)).await?;

        info!(user_id = %user.id, role = %user.role, "Registered user");

        let token = self.tokens.issue(&user)?;
        Ok((user, token))
    }

    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, raw_password: &str) -> Result<(User, String), AppError> {
        let email = normalize_email(email);
        let user = self.users.find_by_email(&email).await?
            .ok_or(AppError::InvalidCredentials)?;

        if !password::verify_password(raw_password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        info!("User logged in: {}", user.id);

        let token = self.tokens.issue(&user)?;
        Ok((user, token))
    }

    /// Verifies the token and loads the principal as currently stored, so role
    /// and guild changes apply without waiting for the token to expire.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let claims = self.tokens.verify(token)?;
        self.users.find_by_id(&claims.sub).await?
            .ok_or(AppError::Unauthorized)
    }
}
