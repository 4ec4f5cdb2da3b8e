//! Account identifier normalization.
//!
//! Every read and write path of the tracker keys its table through
//! [`normalize_identifier`], so `User@Example.com` and `user@example.com`
//! always share one entry.

/// Case-fold an account identifier into its table key.
///
/// No trimming or validation is applied. Empty and malformed identifiers are
/// tracked like any other string; validating them is the caller's concern.
///
/// # Examples
///
/// ```rust
/// use turnstile_core::identifier::normalize_identifier;
///
/// assert_eq!(normalize_identifier("User@Example.COM"), "user@example.com");
/// ```
pub fn normalize_identifier(identifier: &str) -> String {
    identifier.to_lowercase()
}
