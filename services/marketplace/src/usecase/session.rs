use std::sync::Arc;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::DateTime;
use uuid::Uuid;

use stagehand_auth_types::token::{IssuedToken, issue_access_token, validate_access_token};
use stagehand_core::error::ValidationErrors;
use stagehand_domain::policy::Principal;
use stagehand_domain::user::{UserRole, UserStatus};

use crate::domain::repository::{ArtistProfileLookup, Repository, UserLookup};
use crate::domain::types::{ArtistProfile, User};
use crate::error::MarketplaceError;
use crate::usecase::parse_enum;
use crate::usecase::user::{UserParams, check_password, normalize_email, register_user};

/// Argon2id PHC string for `password`.
pub fn hash_password(password: &str) -> Result<String, MarketplaceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| MarketplaceError::Internal(anyhow::anyhow!("hash password: {e}")))
}

/// `false` for a wrong password and for an unparseable digest alike.
pub fn verify_password(password: &str, digest: &str) -> bool {
    PasswordHash::new(digest).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

/// Login response expiry, e.g. `03-01-2026 14:05` (UTC).
pub fn format_expiry(exp: u64) -> String {
    i64::try_from(exp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%m-%d-%Y %H:%M").to_string())
        .unwrap_or_default()
}

fn sign(user: &User, secret: &str, ttl_secs: u64) -> Result<IssuedToken, MarketplaceError> {
    issue_access_token(user.id, secret, ttl_secs)
        .map_err(|e| MarketplaceError::Internal(anyhow::Error::new(e).context("sign access token")))
}

// ── Authenticate ─────────────────────────────────────────────────────────────

pub struct AuthenticateUseCase<R> {
    pub repo: R,
    pub jwt_secret: Arc<str>,
}

impl<R> AuthenticateUseCase<R>
where
    R: Repository<User> + ArtistProfileLookup,
{
    /// Resolve a bearer token to a live principal. Every failure is the same
    /// `Unauthenticated`.
    pub async fn execute(&self, token: &str) -> Result<Principal, MarketplaceError> {
        let info = validate_access_token(token, &self.jwt_secret)
            .map_err(|_| MarketplaceError::Unauthenticated)?;
        let user = Repository::<User>::find_by_id(&self.repo, info.user_id)
            .await?
            .ok_or(MarketplaceError::Unauthenticated)?;
        let artist_profile_id = if user.role == UserRole::Artist {
            self.repo.find_by_user_id(user.id).await?.map(|p| p.id)
        } else {
            None
        };
        Ok(Principal::new(user.id, user.role, artist_profile_id))
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub token: IssuedToken,
}

pub struct LoginUseCase<R: UserLookup> {
    pub repo: R,
    pub jwt_secret: Arc<str>,
    pub token_ttl_secs: u64,
}

impl<R: UserLookup> LoginUseCase<R> {
    pub async fn execute(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutput, MarketplaceError> {
        let user = self
            .repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(MarketplaceError::InvalidCredentials)?;
        if !verify_password(password, &user.password_digest) {
            return Err(MarketplaceError::InvalidCredentials);
        }
        let token = sign(&user, &self.jwt_secret, self.token_ttl_secs)?;
        Ok(LoginOutput { user, token })
    }
}

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupUseCase<R> {
    pub repo: R,
    pub jwt_secret: Arc<str>,
    pub token_ttl_secs: u64,
}

impl<R> SignupUseCase<R>
where
    R: Repository<User> + Repository<ArtistProfile> + UserLookup + ArtistProfileLookup,
{
    /// Self-service registration. Only email, password, confirmation and
    /// role are read; an `admin` role becomes `customer`.
    pub async fn execute(&self, params: UserParams) -> Result<LoginOutput, MarketplaceError> {
        let mut errors = ValidationErrors::new();
        let role = parse_enum::<UserRole>(&mut errors, "role", params.role.as_deref())
            .unwrap_or_default()
            .for_signup();
        let params = UserParams {
            email: params.email,
            password: params.password,
            password_confirmation: params.password_confirmation,
            ..UserParams::default()
        };
        let user = register_user(
            &self.repo,
            Uuid::now_v7(),
            params,
            role,
            UserStatus::Active,
            errors,
        )
        .await?;
        let token = sign(&user, &self.jwt_secret, self.token_ttl_secs)?;
        Ok(LoginOutput { user, token })
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: Option<String>,
    pub new_password_confirmation: Option<String>,
}

pub struct ChangePasswordUseCase<R: Repository<User>> {
    pub repo: R,
}

impl<R: Repository<User>> ChangePasswordUseCase<R> {
    pub async fn execute(
        &self,
        principal: &Principal,
        input: ChangePasswordInput,
    ) -> Result<(), MarketplaceError> {
        let mut user = self
            .repo
            .find_by_id(principal.user_id)
            .await?
            .ok_or(MarketplaceError::Unauthenticated)?;
        if !verify_password(&input.current_password, &user.password_digest) {
            return Err(MarketplaceError::IncorrectPassword);
        }

        let mut errors = ValidationErrors::new();
        check_password(
            &mut errors,
            input.new_password.as_deref(),
            input.new_password_confirmation.as_deref(),
            true,
        );
        errors.into_result()?;

        let password = input.new_password.unwrap_or_default();
        user.password_digest = hash_password(&password)?;
        user.updated_at = chrono::Utc::now();
        self.repo.update(&user).await
    }
}
