// Library exports for integration tests and the CLI
pub mod config;
pub mod error;
pub mod text;

pub use error::DecodeError;
pub use text::{
    decode_wire, language, MultilingualText, Resolution, TranslationContext, Translations,
    ViewContext, WireText,
};
