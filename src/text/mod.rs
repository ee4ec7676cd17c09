//! Multilingual text value type.
//!
//! # Architecture
//!
//! - `multilingual`: The `MultilingualText` value, its mutation operations and
//!   context resolution
//! - `context`: The `TranslationContext` trait consumed by resolution, plus a
//!   plain `ViewContext` implementation
//! - `wire`: Current and legacy wire shapes, and the decoder unifying them
//! - `language`: Language code normalization
//!
//! # Example
//!
//! ```
//! use multilingual_text::{MultilingualText, ViewContext};
//!
//! let mut name = MultilingualText::new("en", "Hello");
//! name.add_translate("ru", "Привет");
//!
//! name.apply_translation_ctx(&ViewContext::new("ru"));
//! assert_eq!(name.display(), "Привет");
//! assert_eq!(name.second(), "Hello");
//! ```

mod context;
pub mod language;
mod multilingual;
mod wire;

pub use context::{TranslationContext, ViewContext};
pub use multilingual::{MultilingualText, Resolution, Translations};
pub use wire::{decode_wire, WireText};
