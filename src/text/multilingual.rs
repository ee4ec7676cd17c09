//! The multilingual text value type.
//!
//! A `MultilingualText` stores every language variant of a string in its
//! translation map, plus a `display`/`second` projection derived from that
//! map by resolving it against a [`TranslationContext`].

use crate::text::context::TranslationContext;
use crate::text::language;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

/// Map from language code to text.
pub type Translations = BTreeMap<String, String>;

/// Whether a value has already been resolved against a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// `display`/`second` have not been derived by a resolution pass
    #[default]
    Unresolved,
    /// A resolution pass ran; further passes are no-ops
    Resolved,
}

/// A string available in several languages.
///
/// `translations` is the source of truth. `display` and `second` are derived
/// by [`apply_translation_ctx`](Self::apply_translation_ctx) and overwritten
/// wholesale on every pass.
///
/// Equality ignores the resolution state, so a value that went through a
/// response pipeline compares equal to an expected value built by hand.
#[derive(Debug, Clone, Default)]
pub struct MultilingualText {
    pub(crate) display: String,
    pub(crate) second: String,
    pub(crate) translations: Option<Translations>,
    pub(crate) resolution: Resolution,
}

impl MultilingualText {
    /// Create a value with a single translation.
    ///
    /// The key is stored as given.
    pub fn new(lang: impl Into<String>, text: impl Into<String>) -> Self {
        let mut translations = Translations::new();
        translations.insert(lang.into(), text.into());

        Self {
            translations: Some(translations),
            ..Self::default()
        }
    }

    /// Make sure the translation map exists (possibly empty).
    pub fn init(&mut self) -> &mut Self {
        self.translations.get_or_insert_with(Translations::new);
        self
    }

    /// Return the value to its empty state: no map, no projection, unresolved.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // ==================== Accessors ====================

    /// Resolved primary text. Empty until resolved.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Resolved secondary text. Empty until resolved.
    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn set_display(&mut self, display: impl Into<String>) -> &mut Self {
        self.display = display.into();
        self
    }

    pub fn set_second(&mut self, second: impl Into<String>) -> &mut Self {
        self.second = second.into();
        self
    }

    /// The translation map, or `None` when unset.
    pub fn translations(&self) -> Option<&Translations> {
        self.translations.as_ref()
    }

    /// `true` when the translation map is absent (as opposed to empty).
    pub fn is_unset(&self) -> bool {
        self.translations.is_none()
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution == Resolution::Resolved
    }

    // ==================== Mutation ====================

    /// Overwrite entries with those of `other`, lowercasing keys.
    pub fn update(&mut self, other: &MultilingualText) {
        let translations = self.translations.get_or_insert_with(Translations::new);

        for (lang, text) in other.entries() {
            translations.insert(language::normalize(lang), text.clone());
        }
    }

    /// Append `other`'s text onto existing entries, lowercasing keys.
    ///
    /// A missing entry behaves as an empty string.
    pub fn add(&mut self, other: &MultilingualText) {
        let translations = self.translations.get_or_insert_with(Translations::new);

        for (lang, text) in other.entries() {
            translations
                .entry(language::normalize(lang))
                .or_default()
                .push_str(text);
        }
    }

    /// Set a single entry.
    ///
    /// Unlike [`update`](Self::update) and [`add`](Self::add), the key is
    /// stored exactly as given. Existing consumers depend on this, so callers
    /// that want normalized keys must pass lowercase codes.
    pub fn add_translate(&mut self, lang: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.translations
            .get_or_insert_with(Translations::new)
            .insert(lang.into(), text.into());
        self
    }

    /// Build a new value whose texts are `f` applied to this value's texts.
    ///
    /// Keys are lowercased. The projection is not carried over. A value with
    /// no entries maps to the empty (unset) value.
    pub fn map<F>(&self, mut f: F) -> MultilingualText
    where
        F: FnMut(&str) -> String,
    {
        if self.entries().next().is_none() {
            return MultilingualText::default();
        }

        let translations = self
            .entries()
            .map(|(lang, text)| (language::normalize(lang), f(text.as_str())))
            .collect();

        MultilingualText {
            translations: Some(translations),
            ..MultilingualText::default()
        }
    }

    /// Join `other` onto a copy of this value.
    ///
    /// The copy keeps this value's translations but drops its projection and
    /// resolution state. For each entry of `other` (key lowercased), a missing
    /// entry is inserted as is and an existing one gets `separator` + text
    /// appended.
    pub fn join(&self, other: &MultilingualText, separator: &str) -> MultilingualText {
        let mut joined = self.clone();
        joined.clear_context().reset_resolution();

        let translations = joined.translations.get_or_insert_with(Translations::new);

        for (lang, text) in other.entries() {
            match translations.entry(language::normalize(lang)) {
                Entry::Occupied(mut existing) => {
                    let existing = existing.get_mut();
                    existing.push_str(separator);
                    existing.push_str(text);
                }
                Entry::Vacant(slot) => {
                    slot.insert(text.clone());
                }
            }
        }

        joined
    }

    /// Trim whitespace around every text and return the resulting [`len`](Self::len).
    ///
    /// Goes through [`map`](Self::map), so keys are lowercased and the
    /// projection is dropped.
    pub fn trim(&mut self) -> usize {
        *self = self.map(|text| text.trim().to_string());
        self.len()
    }

    // ==================== Queries ====================

    /// `true` when no translation has any text.
    pub fn is_empty(&self) -> bool {
        self.entries().all(|(_, text)| text.is_empty())
    }

    /// `true` when there is source text or an already resolved projection.
    pub fn has_translation(&self) -> bool {
        !self.is_empty() || !self.display.is_empty() || !self.second.is_empty()
    }

    /// Longest text across all translations, in characters.
    pub fn len(&self) -> usize {
        self.entries()
            .map(|(_, text)| text.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Text for `lang` (exact key), or an empty string.
    pub fn get_translate(&self, lang: &str) -> &str {
        self.translations
            .as_ref()
            .and_then(|translations| translations.get(lang))
            .map(String::as_str)
            .unwrap_or("")
    }

    // ==================== Context Resolution ====================

    /// Derive `display` and `second` from the translation map.
    ///
    /// Runs at most once per value: an already resolved value, or one with
    /// no translation map, is returned untouched. `display` takes the
    /// context's display language when it has text, otherwise the fallback
    /// language (one level only). `second` takes the second language with no
    /// fallback. When the context does not keep the translation list, the
    /// map is discarded afterwards.
    pub fn apply_translation_ctx<C>(&mut self, ctx: &C) -> &mut Self
    where
        C: TranslationContext + ?Sized,
    {
        if self.is_resolved() {
            debug!("Translation context already applied, skipping");
            return self;
        }

        let Some(translations) = self.translations.as_ref() else {
            return self;
        };

        let lookup = |lang: &str| translations.get(lang).cloned().unwrap_or_default();

        let display = match translations.get(ctx.display_lang()) {
            Some(text) if !text.is_empty() => text.clone(),
            _ => lookup(ctx.fallback_lang()),
        };
        let second = lookup(ctx.second_lang());

        trace!(
            display_lang = ctx.display_lang(),
            fallback_lang = ctx.fallback_lang(),
            second_lang = ctx.second_lang(),
            "Resolved multilingual text"
        );

        self.display = display;
        self.second = second;
        self.resolution = Resolution::Resolved;

        if !ctx.translation_list() {
            self.translations = None;
        }

        self
    }

    /// Resolve again under `ctx`, even if the value was already resolved.
    ///
    /// A value whose map was discarded by an earlier pass has nothing to
    /// resolve from; it is left as it was, still resolved.
    pub fn reapply_translation_ctx<C>(&mut self, ctx: &C) -> &mut Self
    where
        C: TranslationContext + ?Sized,
    {
        if self.is_unset() {
            return self;
        }

        self.reset_resolution();
        self.apply_translation_ctx(ctx)
    }

    /// Clear `display` and `second`. The map and resolution state are kept.
    pub fn clear_context(&mut self) -> &mut Self {
        self.display.clear();
        self.second.clear();
        self
    }

    /// Mark the value as unresolved without touching its contents.
    pub fn reset_resolution(&mut self) -> &mut Self {
        self.resolution = Resolution::Unresolved;
        self
    }

    // ==================== Comparison ====================

    /// Compare contents (translations and projection), ignoring the
    /// resolution state.
    pub fn eq_ignoring_resolution(&self, other: &MultilingualText) -> bool {
        self.translations == other.translations
            && self.display == other.display
            && self.second == other.second
    }

    fn entries(&self) -> impl Iterator<Item = (&String, &String)> {
        self.translations.iter().flatten()
    }
}

impl PartialEq for MultilingualText {
    fn eq(&self, other: &Self) -> bool {
        self.eq_ignoring_resolution(other)
    }
}

impl Eq for MultilingualText {}

impl From<Translations> for MultilingualText {
    /// Keys are lowercased.
    fn from(translations: Translations) -> Self {
        translations.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for MultilingualText
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let translations = iter
            .into_iter()
            .map(|(lang, text)| (language::normalize(lang.as_ref()), text.into()))
            .collect();

        Self {
            translations: Some(translations),
            ..Self::default()
        }
    }
}

/// Formats the translation map as JSON (`null` when unset), for logs.
impl fmt::Display for MultilingualText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.translations).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
