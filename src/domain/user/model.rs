use chrono::{DateTime, Utc};

/// User role
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    StoreOwner,
    User,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::StoreOwner => "store_owner",
            Self::User => "user",
        }
    }

    /// Parse a role string; unknown values fall back to the regular role.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => Self::Admin,
            "store_owner" => Self::StoreOwner,
            _ => Self::User,
        }
    }
}

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
