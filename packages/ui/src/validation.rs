//! Form validation for the auth screens.
//!
//! Validation runs entirely on the client and short-circuits submission:
//! a rejected form makes no backend call. The returned strings are shown
//! next to the field they belong to.

/// Minimum plausible email length (`a@b.c`).
pub const EMAIL_MIN_LENGTH: usize = 5;

/// Minimum password length enforced on sign-up. Sign-in accepts anything
/// non-empty and lets the backend decide.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Check an email address. `Ok` or the message to show on the field.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.is_empty() {
        return Err("Email is required");
    }
    if email.len() < EMAIL_MIN_LENGTH {
        return Err("Email is too short");
    }
    if !has_email_shape(email) {
        return Err("Please enter a valid email address");
    }
    Ok(())
}

/// Check a password. Sign-up (`enforce_min_length`) additionally requires
/// [`PASSWORD_MIN_LENGTH`] characters.
pub fn validate_password(password: &str, enforce_min_length: bool) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Password is required");
    }
    if enforce_min_length && password.len() < PASSWORD_MIN_LENGTH {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

/// `local@domain.tld`: exactly one `@`, no whitespace, non-empty local
/// part, and a dot inside the domain with non-empty parts on both sides.
fn has_email_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plausible_addresses() {
        for email in [
            "a@b.c",
            "doctor@clinic.example",
            "first.last@sub.domain.co",
            "user+tag@host.io",
        ] {
            assert_eq!(validate_email(email), Ok(()), "{email}");
        }
    }

    #[test]
    fn test_rejects_empty_and_short() {
        assert_eq!(validate_email(""), Err("Email is required"));
        assert_eq!(validate_email("a@b."), Err("Email is too short"));
        assert_eq!(validate_email("a@bc"), Err("Email is too short"));
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for email in [
            "plainaddress",
            "missing@tld",
            "two@@signs.example",
            "spaces in@side.example",
            "trailing@dot.",
            "@no-local.example",
            "no-domain@.example",
        ] {
            assert_eq!(
                validate_email(email),
                Err("Please enter a valid email address"),
                "{email}"
            );
        }
    }

    #[test]
    fn test_password_rules_differ_by_mode() {
        assert_eq!(validate_password("", false), Err("Password is required"));
        assert_eq!(validate_password("", true), Err("Password is required"));

        // Sign-in lets the backend judge short passwords.
        assert_eq!(validate_password("abc", false), Ok(()));
        assert_eq!(
            validate_password("abc", true),
            Err("Password must be at least 6 characters")
        );
        assert_eq!(validate_password("abcdef", true), Ok(()));
    }
}
