//! Declarative field validation for inbound form and JSON payloads.
//!
//! A form is a list of [`Field`]s, each carrying an ordered list of [`Rule`]s.
//! The first failing rule stops that field's chain, so every field reports at
//! most one message. Validation is pure: it never touches the store.

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

pub mod contact;
pub mod inquiry;
pub mod newsletter;

pub use contact::{ApiContactForm, ContactForm};
pub use inquiry::ProjectInquiryForm;
pub use newsletter::NewsletterForm;

/// Named string fields as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: HashMap<String, String>,
}

impl Payload {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Flattens a JSON object. Returns `None` for anything that is not an
    /// object. Nulls, arrays and nested objects count as absent.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let fields = object
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    serde_json::Value::Number(n) => n.to_string(),
                    _ => return None,
                };
                Some((key.clone(), text))
            })
            .collect();
        Some(Self { fields })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reads a checkbox-style flag. Absent means false.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(|raw| {
            !matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "" | "false" | "0" | "off" | "no"
            )
        })
    }
}

impl From<HashMap<String, String>> for Payload {
    fn from(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Present and non-blank after trimming.
    Required { message: Option<&'static str> },

    /// Inclusive bounds on the character count.
    Length {
        min: Option<usize>,
        max: Option<usize>,
        message: Option<&'static str>,
    },

    Email { message: Option<&'static str> },

    /// Absent or blank ends the chain successfully.
    Optional,
}

impl Rule {
    pub const REQUIRED: Self = Self::Required { message: None };
    pub const EMAIL: Self = Self::Email { message: None };

    #[must_use]
    pub const fn required(message: &'static str) -> Self {
        Self::Required {
            message: Some(message),
        }
    }

    #[must_use]
    pub const fn between(min: usize, max: usize) -> Self {
        Self::Length {
            min: Some(min),
            max: Some(max),
            message: None,
        }
    }

    #[must_use]
    pub const fn at_most(max: usize) -> Self {
        Self::Length {
            min: None,
            max: Some(max),
            message: None,
        }
    }

    #[must_use]
    pub const fn email(message: &'static str) -> Self {
        Self::Email {
            message: Some(message),
        }
    }

    /// Replaces the default failure message.
    #[must_use]
    pub const fn with_message(self, message: &'static str) -> Self {
        match self {
            Self::Required { .. } => Self::Required {
                message: Some(message),
            },
            Self::Length { min, max, .. } => Self::Length {
                min,
                max,
                message: Some(message),
            },
            Self::Email { .. } => Self::Email {
                message: Some(message),
            },
            Self::Optional => Self::Optional,
        }
    }

    fn check(&self, label: &str, raw: Option<&str>) -> Result<bool, String> {
        let blank = raw.is_none_or(|v| v.trim().is_empty());
        match *self {
            Self::Optional => Ok(!blank),
            Self::Required { message } => {
                if blank {
                    Err(message.map_or_else(|| format!("{label} is required"), str::to_string))
                } else {
                    Ok(true)
                }
            }
            Self::Length { min, max, message } => {
                let len = raw.unwrap_or_default().chars().count();
                let too_short = min.is_some_and(|min| len < min);
                let too_long = max.is_some_and(|max| len > max);
                if too_short || too_long {
                    Err(message.map_or_else(|| length_message(label, min, max), str::to_string))
                } else {
                    Ok(true)
                }
            }
            Self::Email { message } => {
                if is_valid_email(raw.unwrap_or_default()) {
                    Ok(true)
                } else {
                    Err(message.map_or_else(
                        || format!("{label} must be a valid email address"),
                        str::to_string,
                    ))
                }
            }
        }
    }
}

fn length_message(label: &str, min: Option<usize>, max: Option<usize>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{label} must be between {min} and {max} characters"),
        (Some(min), None) => format!("{label} must be at least {min} characters"),
        (None, Some(max)) => format!("{label} must be at most {max} characters"),
        (None, None) => format!("{label} has an invalid length"),
    }
}

/// `local@domain` with at least one dot in the domain and no empty labels.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s.]+(?:\.[^@\s.]+)+$").expect("Invalid email regex")
    });
    re.is_match(value)
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub rules: &'static [Rule],
}

impl Field {
    /// Runs the rule chain. `Ok(None)` means an optional field was left blank.
    pub fn validate(&self, raw: Option<&str>) -> Result<Option<String>, FieldError> {
        for rule in self.rules {
            match rule.check(self.label, raw) {
                Ok(true) => {}
                Ok(false) => return Ok(None),
                Err(message) => {
                    return Err(FieldError {
                        field: self.name,
                        message,
                    });
                }
            }
        }
        Ok(raw.map(str::to_string))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Failures in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    #[must_use]
    pub fn for_field(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == name)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}

/// Collects per-field results for one payload.
pub struct Validator<'a> {
    payload: &'a Payload,
    errors: FormErrors,
}

impl<'a> Validator<'a> {
    #[must_use]
    pub fn new(payload: &'a Payload) -> Self {
        Self {
            payload,
            errors: FormErrors::default(),
        }
    }

    /// The accepted value, or `None` when the field failed or was an empty
    /// optional field.
    pub fn value(&mut self, field: &Field) -> Option<String> {
        match field.validate(self.payload.get(field.name)) {
            Ok(value) => value,
            Err(error) => {
                self.errors.push(error);
                None
            }
        }
    }

    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.payload.flag(name)
    }

    pub fn finish(self) -> Result<(), FormErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(errors = %self.errors, "Payload failed validation");
            Err(self.errors)
        }
    }
}

/// A typed value set built from a validated payload.
pub trait Form: Sized {
    fn validate(payload: &Payload) -> Result<Self, FormErrors>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: Field = Field {
        name: "name",
        label: "Name",
        rules: &[Rule::required("Name is required"), Rule::between(2, 5)],
    };

    const NICKNAME: Field = Field {
        name: "nickname",
        label: "Nickname",
        rules: &[Rule::Optional, Rule::at_most(3)],
    };

    #[test]
    fn test_required_rejects_blank() {
        for raw in [None, Some(""), Some("   "), Some("\t\n")] {
            let err = NAME.validate(raw).unwrap_err();
            assert_eq!(err.field, "name");
            assert_eq!(err.message, "Name is required");
        }
    }

    #[test]
    fn test_required_default_message_names_field() {
        let field = Field {
            name: "budget",
            label: "Budget",
            rules: &[Rule::REQUIRED],
        };
        assert_eq!(field.validate(None).unwrap_err().message, "Budget is required");
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        assert!(NAME.validate(Some("a")).is_err());
        assert!(NAME.validate(Some("ab")).is_ok());
        assert!(NAME.validate(Some("abcde")).is_ok());
        assert_eq!(
            NAME.validate(Some("abcdef")).unwrap_err().message,
            "Name must be between 2 and 5 characters"
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(NAME.validate(Some("ééééé")).is_ok());
    }

    #[test]
    fn test_custom_length_message() {
        const CODE: Field = Field {
            name: "code",
            label: "Code",
            rules: &[Rule::between(1, 2).with_message("Too long")],
        };
        assert_eq!(CODE.validate(Some("abc")).unwrap_err().message, "Too long");
    }

    #[test]
    fn test_optional_skips_remaining_rules_when_blank() {
        assert_eq!(NICKNAME.validate(None), Ok(None));
        assert_eq!(NICKNAME.validate(Some("  ")), Ok(None));
        assert_eq!(NICKNAME.validate(Some("abc")), Ok(Some("abc".to_string())));
        assert_eq!(
            NICKNAME.validate(Some("abcd")).unwrap_err().message,
            "Nickname must be at most 3 characters"
        );
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b..com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@b.com."));
    }

    #[test]
    fn test_flag_parsing() {
        let payload = Payload::from_pairs([
            ("a", "y"),
            ("b", "false"),
            ("c", ""),
            ("d", "on"),
            ("e", "0"),
        ]);
        assert!(payload.flag("a"));
        assert!(!payload.flag("b"));
        assert!(!payload.flag("c"));
        assert!(payload.flag("d"));
        assert!(!payload.flag("e"));
        assert!(!payload.flag("missing"));
    }

    #[test]
    fn test_payload_from_json() {
        let value = serde_json::json!({
            "name": "A",
            "newsletter": true,
            "count": 3,
            "nothing": null,
            "nested": {"x": 1}
        });
        let payload = Payload::from_json(&value).unwrap();
        assert_eq!(payload.get("name"), Some("A"));
        assert_eq!(payload.get("newsletter"), Some("true"));
        assert_eq!(payload.get("count"), Some("3"));
        assert_eq!(payload.get("nothing"), None);
        assert_eq!(payload.get("nested"), None);

        assert!(Payload::from_json(&serde_json::json!(["a"])).is_none());
        assert!(Payload::from_json(&serde_json::json!("text")).is_none());
    }

    #[test]
    fn test_validator_collects_in_order() {
        let payload = Payload::from_pairs([("nickname", "toolong")]);
        let mut v = Validator::new(&payload);
        assert_eq!(v.value(&NAME), None);
        assert_eq!(v.value(&NICKNAME), None);
        let errors = v.finish().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first().unwrap().field, "name");
        assert!(errors.for_field("nickname").is_some());
    }
}
