//! Viewing context consumed by context resolution.
//!
//! `MultilingualText` does not know concrete context types; anything that
//! can answer the four questions of [`TranslationContext`] can drive a
//! resolution pass (request contexts, user profiles, test doubles).

use crate::text::language::{self, EN, RU};

/// Resolution policy supplied by the caller.
pub trait TranslationContext {
    /// Preferred language for the `display` value.
    fn display_lang(&self) -> &str;

    /// Language consulted for `display` when the preferred one has no text.
    fn fallback_lang(&self) -> &str;

    /// Language for the `second` value. No fallback applies.
    fn second_lang(&self) -> &str;

    /// Whether the raw translation map survives resolution.
    ///
    /// When `false`, resolution discards the map and only `display`/`second`
    /// remain on the value.
    fn translation_list(&self) -> bool;
}

impl<C: TranslationContext + ?Sized> TranslationContext for &C {
    fn display_lang(&self) -> &str {
        (**self).display_lang()
    }

    fn fallback_lang(&self) -> &str {
        (**self).fallback_lang()
    }

    fn second_lang(&self) -> &str {
        (**self).second_lang()
    }

    fn translation_list(&self) -> bool {
        (**self).translation_list()
    }
}

/// A plain, owned viewing context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewContext {
    display: String,
    fallback: String,
    second: String,
    translation_list: bool,
}

impl ViewContext {
    /// Create a context showing `display` with `fallback` and `second` both
    /// set to English, keeping the translation list.
    pub fn new(display: &str) -> Self {
        Self {
            display: language::normalize(display),
            fallback: EN.to_string(),
            second: EN.to_string(),
            translation_list: true,
        }
    }

    /// Set the fallback language
    pub fn with_fallback(mut self, fallback: &str) -> Self {
        self.fallback = language::normalize(fallback);
        self
    }

    /// Set the secondary language
    pub fn with_second(mut self, second: &str) -> Self {
        self.second = language::normalize(second);
        self
    }

    /// Keep or drop the raw translation map after resolution
    pub fn with_translation_list(mut self, keep: bool) -> Self {
        self.translation_list = keep;
        self
    }
}

impl Default for ViewContext {
    /// Russian display, English fallback and second language: the pairing
    /// the legacy wire shape encodes.
    fn default() -> Self {
        Self::new(RU)
    }
}

impl TranslationContext for ViewContext {
    fn display_lang(&self) -> &str {
        &self.display
    }

    fn fallback_lang(&self) -> &str {
        &self.fallback
    }

    fn second_lang(&self) -> &str {
        &self.second
    }

    fn translation_list(&self) -> bool {
        self.translation_list
    }
}
