//! Slug utilities for wedding identifiers.
//!
//! ## Summary
//! A wedding is addressed by a human-readable slug (`trang-chien-2026`). Slugs are
//! lowercase ASCII alphanumerics separated by single hyphens and never change once
//! the wedding row exists.

/// Generate a URL-safe slug from a name.
///
/// Converts to lowercase, replaces spaces and special characters with hyphens,
/// collapses multiple hyphens, and trims edge hyphens.
///
/// Examples:
/// - "Trang Chien 2026" -> "trang-chien-2026"
/// - "Anh & Em" -> "anh-em"
#[must_use]
pub fn generate_slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Returns true when `slug` is already in canonical form.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && generate_slug(slug) == slug
}
