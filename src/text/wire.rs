//! Wire representation of `MultilingualText`.
//!
//! Encoding always emits the current shape:
//!
//! ```json
//! { "display": "...", "second": "...", "translate": { "<lang>": "..." } }
//! ```
//!
//! Decoding also accepts the legacy shape, where `translate` carries only the
//! fixed `en`/`ru` keys. Decoding is split in two: serde only produces a
//! [`WireText`], and [`decode_wire`] turns that into the value type, so the
//! shape rules can be exercised with in-memory structures.

use crate::error::DecodeError;
use crate::text::language::{EN, RU};
use crate::text::multilingual::{MultilingualText, Translations};
use serde::de::{value::MapAccessDeserializer, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Structural form of a payload, before any shape rules are applied.
///
/// `null` and missing fields are both `None`; `null` texts inside
/// `translate` are kept as `None` and read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WireText {
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub second: Option<String>,
    #[serde(default)]
    pub translate: Option<BTreeMap<String, Option<String>>>,
}

/// The legacy payload: `translate` holds only `en` and `ru`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LegacyTranslate {
    en: String,
    ru: String,
}

impl LegacyTranslate {
    /// Strict match against the legacy schema.
    ///
    /// Matches when the map has no keys besides `en`/`ru` and at least one of
    /// them carries text.
    fn detect(translate: &BTreeMap<String, Option<String>>) -> Option<Self> {
        if translate.keys().any(|lang| lang != EN && lang != RU) {
            return None;
        }

        let text = |lang: &str| translate.get(lang).cloned().flatten().unwrap_or_default();
        let legacy = Self {
            en: text(EN),
            ru: text(RU),
        };

        if legacy.en.is_empty() && legacy.ru.is_empty() {
            return None;
        }

        Some(legacy)
    }

    fn into_text(self) -> MultilingualText {
        let mut translations = Translations::new();
        if !self.en.is_empty() {
            translations.insert(EN.to_string(), self.en.clone());
        }
        if !self.ru.is_empty() {
            translations.insert(RU.to_string(), self.ru.clone());
        }

        MultilingualText {
            display: self.ru,
            second: self.en,
            translations: Some(translations),
            ..MultilingualText::default()
        }
    }
}

/// Turn a structurally valid payload into a value.
///
/// The legacy shape is tried first and, when it matches, wins outright: the
/// top-level `display`/`second` are ignored. Otherwise `translate` is taken
/// as the translation map, with `ru`/`en` backfilled from a non-empty
/// `display`/`second` when absent, and an empty `display`/`second` filled
/// from `ru`/`en`.
pub fn decode_wire(wire: WireText) -> MultilingualText {
    if let Some(legacy) = wire.translate.as_ref().and_then(LegacyTranslate::detect) {
        debug!("Decoding legacy en/ru translate shape");
        return legacy.into_text();
    }

    let mut display = wire.display.unwrap_or_default();
    let mut second = wire.second.unwrap_or_default();

    let mut translations: Translations = wire
        .translate
        .unwrap_or_default()
        .into_iter()
        .map(|(lang, text)| (lang, text.unwrap_or_default()))
        .collect();

    if !display.is_empty() {
        translations
            .entry(RU.to_string())
            .or_insert_with(|| display.clone());
    }
    if !second.is_empty() {
        translations
            .entry(EN.to_string())
            .or_insert_with(|| second.clone());
    }

    if display.is_empty() {
        if let Some(ru) = translations.get(RU) {
            display = ru.clone();
        }
    }
    if second.is_empty() {
        if let Some(en) = translations.get(EN) {
            second = en.clone();
        }
    }

    MultilingualText {
        display,
        second,
        translations: Some(translations),
        ..MultilingualText::default()
    }
}

#[derive(Serialize)]
struct WireTextRef<'a> {
    display: &'a str,
    second: &'a str,
    translate: &'a Option<Translations>,
}

impl Serialize for MultilingualText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireTextRef {
            display: &self.display,
            second: &self.second,
            translate: &self.translations,
        }
        .serialize(serializer)
    }
}

/// Accepts only a map; positional (sequence) payloads are rejected.
struct MultilingualTextVisitor;

impl<'de> Visitor<'de> for MultilingualTextVisitor {
    type Value = MultilingualText;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a multilingual text object")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        WireText::deserialize(MapAccessDeserializer::new(map)).map(decode_wire)
    }
}

impl<'de> Deserialize<'de> for MultilingualText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MultilingualTextVisitor)
    }
}

impl MultilingualText {
    /// Decode a JSON payload in either wire shape.
    pub fn from_json(payload: &str) -> Result<Self, DecodeError> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        Self::from_value(value)
    }

    /// Decode an already parsed JSON value in either wire shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DecodeError> {
        let kind = match &value {
            serde_json::Value::Object(_) => None,
            serde_json::Value::Array(_) => Some("array"),
            serde_json::Value::String(_) => Some("string"),
            serde_json::Value::Number(_) => Some("number"),
            serde_json::Value::Bool(_) => Some("boolean"),
            serde_json::Value::Null => Some("null"),
        };
        if let Some(kind) = kind {
            return Err(DecodeError::NotAnObject(kind));
        }

        let wire: WireText = serde_json::from_value(value)?;
        Ok(decode_wire(wire))
    }

    /// Encode in the current wire shape.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(translate: &[(&str, Option<&str>)]) -> WireText {
        WireText {
            translate: Some(
                translate
                    .iter()
                    .map(|(lang, text)| (lang.to_string(), text.map(str::to_string)))
                    .collect(),
            ),
            ..WireText::default()
        }
    }

    // ==================== Legacy Shape Tests ====================

    #[test]
    fn test_legacy_shape_detected() {
        let text = decode_wire(wire(&[("en", Some("Hi")), ("ru", Some("Привет"))]));

        assert_eq!(text.get_translate("en"), "Hi");
        assert_eq!(text.get_translate("ru"), "Привет");
        assert_eq!(text.display(), "Привет");
        assert_eq!(text.second(), "Hi");
    }

    #[test]
    fn test_legacy_ignores_top_level_fields() {
        let mut payload = wire(&[("en", Some("Hi")), ("ru", Some("Привет"))]);
        payload.display = Some("Other".to_string());
        payload.second = Some("Another".to_string());

        let text = decode_wire(payload);
        assert_eq!(text.display(), "Привет");
        assert_eq!(text.second(), "Hi");
    }

    #[test]
    fn test_legacy_drops_empty_side() {
        let text = decode_wire(wire(&[("en", Some("Hi")), ("ru", Some(""))]));

        let translations = text.translations().expect("map should be set");
        assert_eq!(translations.len(), 1);
        assert_eq!(text.get_translate("en"), "Hi");
        assert_eq!(text.display(), "");
        assert_eq!(text.second(), "Hi");
    }

    #[test]
    fn test_legacy_single_key() {
        let text = decode_wire(wire(&[("ru", Some("Привет"))]));
        assert_eq!(text.display(), "Привет");
        assert_eq!(text.second(), "");
        assert_eq!(text.translations().map(|t| t.len()), Some(1));
    }

    #[test]
    fn test_extra_key_is_not_legacy() {
        let mut payload = wire(&[
            ("en", Some("Hi")),
            ("ru", Some("Привет")),
            ("fr", Some("Salut")),
        ]);
        payload.display = Some("Top".to_string());

        let text = decode_wire(payload);
        assert_eq!(text.get_translate("fr"), "Salut");
        assert_eq!(text.display(), "Top");
        assert_eq!(text.second(), "Hi");
    }

    #[test]
    fn test_all_empty_legacy_falls_through() {
        let mut payload = wire(&[("en", Some("")), ("ru", None)]);
        payload.display = Some("Top".to_string());

        let text = decode_wire(payload);
        assert_eq!(text.display(), "Top");
        assert_eq!(text.get_translate("en"), "");
        // present-but-empty ru is not backfilled
        assert_eq!(text.get_translate("ru"), "");
        assert!(text.translations().is_some_and(|t| t.contains_key("ru")));
    }

    // ==================== Generic Shape Tests ====================

    #[test]
    fn test_generic_backfills_map_from_fields() {
        let payload = WireText {
            display: Some("Привет".to_string()),
            second: Some("Hello".to_string()),
            translate: Some(BTreeMap::from([("de".to_string(), Some("Hallo".to_string()))])),
        };

        let text = decode_wire(payload);
        assert_eq!(text.get_translate("ru"), "Привет");
        assert_eq!(text.get_translate("en"), "Hello");
        assert_eq!(text.get_translate("de"), "Hallo");
    }

    #[test]
    fn test_generic_backfills_fields_from_map() {
        let text = decode_wire(wire(&[
            ("en", Some("Hello")),
            ("ru", Some("Привет")),
            ("de", Some("Hallo")),
        ]));
        assert_eq!(text.display(), "Привет");
        assert_eq!(text.second(), "Hello");
    }

    #[test]
    fn test_generic_missing_translate() {
        let text = decode_wire(WireText::default());
        assert!(!text.is_unset());
        assert!(text.translations().is_some_and(|t| t.is_empty()));
        assert_eq!(text.display(), "");
    }

    #[test]
    fn test_decoded_value_is_unresolved() {
        let text = decode_wire(wire(&[("en", Some("Hi"))]));
        assert!(!text.is_resolved());
    }

    // ==================== Serde Tests ====================

    #[test]
    fn test_serialize_current_shape() {
        let mut text = MultilingualText::new("en", "Hello");
        text.set_display("Hello");

        assert_eq!(
            serde_json::to_value(&text).unwrap(),
            json!({ "display": "Hello", "second": "", "translate": { "en": "Hello" } })
        );
    }

    #[test]
    fn test_serialize_unset_translate_is_null() {
        assert_eq!(
            serde_json::to_value(MultilingualText::default()).unwrap(),
            json!({ "display": "", "second": "", "translate": null })
        );
    }

    #[test]
    fn test_deserialize_via_serde() {
        let text: MultilingualText =
            serde_json::from_str(r#"{"translate":{"en":"Hi","ru":"Привет"}}"#).unwrap();
        assert_eq!(text.display(), "Привет");
    }

    #[test]
    fn test_deserialize_rejects_sequence() {
        let result = serde_json::from_str::<MultilingualText>(r#"["Top","Sec",{"de":"Hallo"}]"#);
        assert!(result.is_err());

        let result = serde_json::from_value::<MultilingualText>(json!("Hi"));
        assert!(result.is_err());
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let text =
            MultilingualText::from_json(r#"{"display":null,"translate":{"de":null}}"#).unwrap();
        assert_eq!(text.display(), "");
        assert_eq!(text.get_translate("de"), "");
    }

    // ==================== Error Tests ====================

    #[test]
    fn test_malformed_json() {
        let err = MultilingualText::from_json("{\"display\":").unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn test_wrong_field_type() {
        let err = MultilingualText::from_json(r#"{"display": 5}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));

        let err = MultilingualText::from_json(r#"{"translate": {"en": ["x"]}}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn test_not_an_object() {
        let err = MultilingualText::from_json(r#"["Hi"]"#).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject("array")));

        let err = MultilingualText::from_value(json!("Hi")).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject("string")));
    }

    #[test]
    fn test_to_json_roundtrip() {
        let mut text = MultilingualText::new("en", "Hello");
        text.update(&MultilingualText::new("DE", "Hallo"));

        let encoded = text.to_json().unwrap();
        let decoded = MultilingualText::from_json(&encoded).unwrap();
        assert_eq!(decoded.translations(), text.translations());
    }
}
