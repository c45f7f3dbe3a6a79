//! Field validation rules shared by registration and admin user management.
//!
//! These mirror the account rules enforced in the web client so the API
//! rejects bad input even when called directly.

use crate::shared::types::{DomainError, DomainResult};

/// Full name: 20-60 characters, non-blank.
pub fn validate_name(name: &str) -> DomainResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation("Name is required".into()));
    }
    let length = trimmed.chars().count();
    if length < 20 {
        return Err(DomainError::Validation(
            "Name must be at least 20 characters".into(),
        ));
    }
    if length > 60 {
        return Err(DomainError::Validation(
            "Name must not exceed 60 characters".into(),
        ));
    }
    Ok(())
}

/// Email: non-blank, single '@' with a dotted domain, no whitespace.
pub fn validate_email(email: &str) -> DomainResult<()> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation("Email is required".into()));
    }
    let well_formed = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.chars().any(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    };
    if !well_formed {
        return Err(DomainError::Validation(
            "Please enter a valid email address".into(),
        ));
    }
    Ok(())
}

/// Password: 8-16 characters with at least one uppercase letter and one
/// special character.
pub fn validate_password(password: &str) -> DomainResult<()> {
    if password.is_empty() {
        return Err(DomainError::Validation("Password is required".into()));
    }
    let length = password.chars().count();
    if length < 8 {
        return Err(DomainError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }
    if length > 16 {
        return Err(DomainError::Validation(
            "Password must not exceed 16 characters".into(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(DomainError::Validation(
            "Password must contain at least one uppercase letter".into(),
        ));
    }
    if !password.chars().any(|c| "!@#$%^&*(),.?\":{}|<>".contains(c)) {
        return Err(DomainError::Validation(
            "Password must contain at least one special character".into(),
        ));
    }
    Ok(())
}

/// Address: non-blank, at most 400 characters.
pub fn validate_address(address: &str) -> DomainResult<()> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation("Address is required".into()));
    }
    if trimmed.chars().count() > 400 {
        return Err(DomainError::Validation(
            "Address must not exceed 400 characters".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_length_bounds() {
        assert!(validate_name("Short Name").is_err());
        assert!(validate_name("A Perfectly Valid Customer Name").is_ok());
        assert!(validate_name(&"x".repeat(61)).is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("user name@example.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn password_rules() {
        assert!(validate_password("Valid@123").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("nouppercase@1").is_err());
        assert!(validate_password("NoSpecial123").is_err());
        assert!(validate_password("WayTooLongPassword@123").is_err());
    }

    #[test]
    fn length_rules_count_characters_not_bytes() {
        // Each of these sits on a boundary a byte count would misjudge.
        assert!(validate_name(&"ä".repeat(60)).is_ok());
        assert!(validate_name(&"ä".repeat(61)).is_err());
        assert!(validate_address(&"ü".repeat(400)).is_ok());
        assert!(validate_password("Pässword@1234567").is_ok());
    }

    #[test]
    fn address_bounds() {
        assert!(validate_address("42 Main Street").is_ok());
        assert!(validate_address("   ").is_err());
        assert!(validate_address(&"a".repeat(401)).is_err());
    }
}
