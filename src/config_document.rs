use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::chat_generator::ChatGenerator;
use crate::config_value::VariableValue;

/// Chat options as a JSON document.
/// Expecting JSON like:
/// ```JSON
/// {
///     "key": "XYZ123456",
///     "widget": "button",
///     "align": { "x": "left", "y": "side", "offset_x": 20, "offset_y": 120 },
///     "rating": { "type": "advanced", "comment": true },
///     "google_analytics": { "key": "UA-123456", "options": { "cookieDomain": ".foo.bar" } },
///     "variables": [
///         { "id": "orderTotal", "label": "Total orders", "value": 150 }
///     ]
/// }
/// ```
///
/// Enum-like fields stay plain strings here and are checked by the
/// generator's setters, so a bad document reports the same errors as
/// direct API use.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfigDocument {
    pub key: Option<String>,
    #[serde(default)]
    pub cookie_domain: Option<String>,
    #[serde(default)]
    pub charset: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub widget: Option<String>,
    #[serde(default)]
    pub align: Option<AlignSection>,
    #[serde(default)]
    pub rating: Option<RatingSection>,
    #[serde(default = "default_true")]
    pub send_email_transcript: bool,
    #[serde(default)]
    pub hide_widget: bool,
    #[serde(default)]
    pub google_analytics: Option<GoogleAnalyticsSection>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub variables: Vec<VariableEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AlignSection {
    pub x: String,
    pub y: String,
    pub offset_x: i32,
    pub offset_y: i32,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RatingSection {
    #[serde(rename = "type", default = "default_rating_type")]
    pub rating_type: String,
    #[serde(default)]
    pub comment: bool,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleAnalyticsSection {
    pub key: String,
    /// Option values must be strings. Key order is kept as written.
    #[serde(default)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VariableEntry {
    pub id: String,
    pub label: String,
    pub value: serde_json::Value, // converted in `variable_value`
}

fn default_true() -> bool {
    true
}

fn default_rating_type() -> String {
    "simple".to_string()
}

impl ChatConfigDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .with_context(|| "Invalid JSON: expected an object describing chat options")
    }

    /// Runs the matching setters on `chat`. Stops at the first rejected
    /// section; sections before it have already been applied.
    pub fn apply(&self, chat: &mut ChatGenerator) -> Result<()> {
        if let Some(key) = &self.key {
            chat.set_key(key.as_str());
        }
        if let Some(domain) = &self.cookie_domain {
            chat.set_cookie_domain(domain.as_str());
        }
        if let Some(charset) = &self.charset {
            chat.set_charset(charset.as_str());
        }
        if let Some(language) = &self.language {
            chat.set_language(language.as_str());
        }

        if let Some(widget) = &self.widget {
            chat.set_widget(widget).with_context(|| "Invalid `widget` option")?;
        }

        if let Some(align) = &self.align {
            chat.set_align(&align.x, &align.y, align.offset_x, align.offset_y)
                .with_context(|| "Invalid `align` section")?;
        }

        if let Some(rating) = &self.rating {
            chat.enable_rating(&rating.rating_type, rating.comment)
                .with_context(|| "Invalid `rating` section")?;
        }

        if !self.send_email_transcript {
            chat.disable_send_email_transcript();
        }
        if self.hide_widget {
            chat.hide_widget();
        }

        if let Some(ga) = &self.google_analytics {
            let options = ga_options(&ga.options)
                .with_context(|| "Invalid `google_analytics` section")?;
            chat.set_google_analytics(ga.key.as_str(), options);
        }

        if let Some(name) = &self.name {
            chat.set_name(name.as_str());
        }
        if let Some(email) = &self.email {
            chat.set_email(email.as_str());
        }

        for var in &self.variables {
            let value = variable_value(&var.value)
                .with_context(|| format!("Invalid value for variable `{}`", var.id))?;
            chat.set_variable(var.id.as_str(), var.label.as_str(), value);
        }

        tracing::debug!(
            target: "smartsupp",
            variables = self.variables.len(),
            "chat options applied from document"
        );
        Ok(())
    }
}

/// Parses a JSON document and builds a generator from it.
pub fn chat_generator_from_json(json: &str) -> Result<ChatGenerator> {
    let doc = ChatConfigDocument::from_json(json)?;
    let mut chat = ChatGenerator::new();
    doc.apply(&mut chat)?;
    Ok(chat)
}

fn ga_options(
    options: &serde_json::Map<String, serde_json::Value>,
) -> Result<Vec<(String, String)>> {
    options
        .iter()
        .map(|(k, v)| match v {
            serde_json::Value::String(s) => Ok((k.clone(), s.clone())),
            other => bail!("Option `{}` must be a string (found {})", k, other),
        })
        .collect()
}

fn variable_value(value: &serde_json::Value) -> Result<VariableValue> {
    use serde_json::Value;

    Ok(match value {
        Value::String(s) => VariableValue::Str(s.clone()),
        Value::Bool(b) => VariableValue::Bool(*b),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => VariableValue::Int(i),
            // Above i64::MAX: keep the exact digits.
            (None, Some(u), _) => VariableValue::Str(u.to_string()),
            (None, None, Some(f)) => VariableValue::Dec(f),
            (None, None, None) => VariableValue::Str(n.to_string()),
        },
        other => bail!("Expected a string, number or boolean (found {})", other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_types::{AlignX, AlignY, RatingType, Widget};

    #[test]
    fn minimal_document() {
        let chat = chat_generator_from_json(r#"{ "key": "XYZ123456" }"#).unwrap();
        assert_eq!(chat.key(), Some("XYZ123456"));
        assert!(chat.send_email_transcript());
        assert_eq!(chat.widget(), Widget::Widget);
    }

    #[test]
    fn full_document() {
        let json = r#"{
            "key": "XYZ123456",
            "cookie_domain": ".foo.bar",
            "charset": "utf-32",
            "language": "cs",
            "widget": "button",
            "align": { "x": "left", "y": "side", "offset_x": 20, "offset_y": 120 },
            "rating": { "type": "advanced", "comment": true },
            "send_email_transcript": false,
            "hide_widget": true,
            "google_analytics": { "key": "UA-123456", "options": { "cookieDomain": ".foo.bar" } },
            "name": "Johny Depp",
            "email": "johny@depp.com",
            "variables": [
                { "id": "orderTotal", "label": "Total orders", "value": 150 },
                { "id": "ratio", "label": "Ratio", "value": 0.5 },
                { "id": "vip", "label": "VIP", "value": true }
            ]
        }"#;
        let chat = chat_generator_from_json(json).unwrap();

        assert_eq!(chat.cookie_domain(), Some(".foo.bar"));
        assert_eq!(chat.charset(), "utf-32");
        assert_eq!(chat.language(), "cs");
        assert_eq!(chat.widget(), Widget::Button);
        let align = chat.alignment().unwrap();
        assert_eq!(align.align_x, AlignX::Left);
        assert_eq!(align.align_y, AlignY::Side);
        assert_eq!(align.offset_x, "20");
        assert_eq!(chat.rating().rating_type, RatingType::Advanced);
        assert!(chat.rating().comment);
        assert!(!chat.send_email_transcript());
        assert!(chat.is_widget_hidden());
        assert_eq!(chat.ga_key(), Some("UA-123456"));
        assert_eq!(
            chat.ga_options().unwrap(),
            &[("cookieDomain".to_string(), ".foo.bar".to_string())]
        );
        assert_eq!(chat.name(), Some("Johny Depp"));
        assert_eq!(chat.email(), Some("johny@depp.com"));

        let values: Vec<_> = chat.variables().iter().map(|v| v.value.clone()).collect();
        assert_eq!(
            values,
            vec![
                VariableValue::Int(150),
                VariableValue::Dec(0.5),
                VariableValue::Bool(true)
            ]
        );
    }

    #[test]
    fn rating_type_defaults_to_simple() {
        let chat = chat_generator_from_json(r#"{ "key": "k", "rating": {} }"#).unwrap();
        assert!(chat.rating().enabled);
        assert_eq!(chat.rating().rating_type, RatingType::Simple);
    }

    #[test]
    fn bad_widget_keeps_setter_message() {
        let err = chat_generator_from_json(r#"{ "key": "k", "widget": "foo" }"#).unwrap_err();
        assert_eq!(err.to_string(), "Invalid `widget` option");
        assert_eq!(
            err.root_cause().to_string(),
            "Widget value foo is not allowed value. You can use only one of values: button, widget."
        );
    }

    #[test]
    fn bad_align_is_reported() {
        let json = r#"{ "align": { "x": "left", "y": "top", "offset_x": 1, "offset_y": 2 } }"#;
        let err = chat_generator_from_json(json).unwrap_err();
        assert!(format!("{err:#}").contains("AllignY value top"));
    }

    #[test]
    fn nested_variable_value_is_rejected() {
        let json = r#"{ "variables": [ { "id": "a", "label": "A", "value": [1, 2] } ] }"#;
        let err = chat_generator_from_json(json).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for variable `a`");
    }

    #[test]
    fn ga_options_keep_document_order() {
        let json = r#"{
            "key": "k",
            "google_analytics": { "key": "UA-1", "options": { "zeta": "1", "alpha": "2" } }
        }"#;
        let chat = chat_generator_from_json(json).unwrap();
        let keys: Vec<_> = chat.ga_options().unwrap().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn non_string_ga_option_is_rejected() {
        let json = r#"{ "google_analytics": { "key": "UA-1", "options": { "anonymizeIp": true } } }"#;
        let err = chat_generator_from_json(json).unwrap_err();
        assert_eq!(err.to_string(), "Invalid `google_analytics` section");
    }

    #[test]
    fn huge_integers_keep_their_digits() {
        let json = r#"{ "variables": [ { "id": "big", "label": "Big", "value": 18446744073709551615 } ] }"#;
        let chat = chat_generator_from_json(json).unwrap();
        assert_eq!(
            chat.variables()[0].value,
            VariableValue::Str("18446744073709551615".to_string())
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(ChatConfigDocument::from_json(r#"{ "keys": "x" }"#).is_err());
        assert!(ChatConfigDocument::from_json("not json").is_err());
    }
}
