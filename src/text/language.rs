//! Language code helpers.
//!
//! Language codes are plain strings (e.g. "en", "ru"). Keys written through
//! the normalizing mutation paths of `MultilingualText` go through
//! [`normalize`], so lookups against them must use lowercase codes.

/// English. Carried as the `second` language by the legacy wire shape.
pub const EN: &str = "en";

/// Russian. Carried as the `display` language by the legacy wire shape.
pub const RU: &str = "ru";

/// Normalize a language code to its stored form (lowercase).
///
/// # Example
/// ```
/// use multilingual_text::language::normalize;
///
/// assert_eq!(normalize("EN"), "en");
/// ```
pub fn normalize(code: &str) -> String {
    code.to_lowercase()
}
