//! Field checks shared by create/update paths.

use crate::errors::ModelError;

/// True when the value is missing or only whitespace.
pub fn is_blank(v: &str) -> bool {
    v.trim().is_empty()
}

/// Fail with `msg` if any of the given values is blank.
pub fn require_all(values: &[&str], msg: &str) -> Result<(), ModelError> {
    if values.iter().any(|v| is_blank(v)) {
        return Err(ModelError::Validation(msg.to_string()));
    }
    Ok(())
}

/// Slugs are lowercase ASCII words joined by single hyphens: `web-development`.
pub fn validate_slug(slug: &str) -> Result<(), ModelError> {
    let ok = !slug.is_empty()
        && slug.len() <= 255
        && slug.split('-').all(|part| {
            !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        });
    if !ok {
        return Err(ModelError::Validation(
            "Slug may only contain lowercase letters, digits and single hyphens".into(),
        ));
    }
    Ok(())
}

/// Minimal shape check: one `@` with something on both sides and a dot in the domain.
pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.contains('@') && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(ModelError::Validation("Invalid email address".into()));
    }
    Ok(())
}

/// Treat empty optional text as absent.
pub fn non_empty(v: Option<String>) -> Option<String> {
    v.and_then(|s| if is_blank(&s) { None } else { Some(s) })
}
