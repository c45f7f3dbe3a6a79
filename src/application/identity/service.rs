//! User management service — application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, GetUsersDto, UpdateUserDto, User,
    UserRepositoryInterface, UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::validations::{
    validate_address, validate_email, validate_name, validate_password,
};
use crate::shared::PaginatedResult;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// User service — orchestrates all identity / user-management use-cases.
pub struct UserService {
    repo: Arc<dyn UserRepositoryInterface>,
    jwt_config: JwtConfig,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepositoryInterface>, jwt_config: JwtConfig) -> Self {
        Self { repo, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate user by email + password and return a JWT.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let normalized = email.trim().to_lowercase();

        let user = self.repo.get_user_by_email(&normalized).await?;

        let Some(user) = user else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(&user.id, &user.name, user.role.as_str(), &self.jwt_config)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        info!(user_id = %user.id, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Self-service registration. New accounts always get the regular role.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        address: &str,
    ) -> DomainResult<User> {
        self.create_user(CreateUserDto {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            address: address.to_string(),
            role: Some(UserRole::User),
        })
        .await
    }

    /// Create a user with any role (admin path; registration funnels here).
    pub async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        validate_name(&dto.name)?;
        validate_email(&dto.email)?;
        validate_password(&dto.password)?;
        validate_address(&dto.address)?;

        let normalized_email = dto.email.trim().to_lowercase();

        if self.repo.get_user_by_email(&normalized_email).await?.is_some() {
            return Err(DomainError::Conflict(
                "An account with this email already exists".into(),
            ));
        }

        let user = self
            .repo
            .create_user(CreateUserDto {
                name: dto.name.trim().to_string(),
                email: normalized_email,
                password: dto.password,
                address: dto.address.trim().to_string(),
                role: dto.role,
            })
            .await?;

        info!(user_id = %user.id, role = user.role.as_str(), "New user created");
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// List users with search, filtering, sorting and pagination.
    pub async fn list_users(&self, dto: GetUsersDto) -> DomainResult<PaginatedResult<User>> {
        self.repo.list_users(dto).await
    }

    pub async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        self.repo.get_user_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.repo.get_user_by_email(email).await
    }

    pub async fn count_users(&self) -> DomainResult<u64> {
        self.repo.count_users().await
    }

    pub async fn count_users_by_role(&self, role: &UserRole) -> DomainResult<u64> {
        self.repo.count_users_by_role(role).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Update user profile fields (name, email, address, role).
    pub async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        if let Some(ref name) = dto.name {
            validate_name(name)?;
        }
        if let Some(ref email) = dto.email {
            validate_email(email)?;
        }
        if let Some(ref address) = dto.address {
            validate_address(address)?;
        }

        self.repo.update_user(id, dto).await
    }

    /// Change a user's password. Verifies the current password first.
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        validate_password(new_password)?;

        let user = self
            .repo
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;

        let valid = verify_password(current_password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid current password".into()));
        }

        let new_hash = hash_password(new_password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        self.repo.update_user_password(user_id, &new_hash).await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    /// Delete a user by ID.
    pub async fn delete_user(&self, id: &str) -> DomainResult<()> {
        self.repo.delete_user(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }
}
