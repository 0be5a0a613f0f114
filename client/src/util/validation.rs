//! Form validation run before any network call.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

/// Minimum password length accepted by the auth backend.
pub const PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Trimmed value, or `Required(field)` when nothing is left.
pub fn required(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed.to_owned())
}

pub fn title(raw: &str) -> Result<String, ValidationError> {
    required("Title", raw)
}

pub fn display_name(raw: &str) -> Result<String, ValidationError> {
    required("Display name", raw)
}

/// `local@domain.tld` with no whitespace.
pub fn is_valid_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !raw.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

/// Check an email/password pair. Returns the trimmed email.
pub fn credentials(email: &str, password: &str) -> Result<String, ValidationError> {
    let email = required("Email", email)?;
    if password.is_empty() {
        return Err(ValidationError::Required("Password"));
    }
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ValidationError::TooShort { field: "Password", min: PASSWORD_MIN_LEN });
    }
    Ok(email)
}
