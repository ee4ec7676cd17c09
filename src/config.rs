use crate::text::{language, ViewContext};
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Resolution languages
    pub display_lang: String,
    pub fallback_lang: String,
    pub second_lang: String,

    // Keep the raw translation map in resolved output
    pub translation_list: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            display_lang: lang_var("MLTEXT_DISPLAY_LANG", "ru"),
            fallback_lang: lang_var("MLTEXT_FALLBACK_LANG", "en"),
            second_lang: lang_var("MLTEXT_SECOND_LANG", "en"),

            translation_list: match std::env::var("MLTEXT_TRANSLATION_LIST") {
                Ok(value) => parse_flag(&value)
                    .with_context(|| format!("Invalid MLTEXT_TRANSLATION_LIST: '{}'", value))?,
                Err(_) => true,
            },
        })
    }

    /// Build the viewing context described by this configuration
    pub fn view_context(&self) -> ViewContext {
        ViewContext::new(&self.display_lang)
            .with_fallback(&self.fallback_lang)
            .with_second(&self.second_lang)
            .with_translation_list(self.translation_list)
    }
}

fn lang_var(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| language::normalize(&v))
        .unwrap_or_else(|| default.to_string())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => bail!("expected true/false, got '{}'", other),
    }
}
