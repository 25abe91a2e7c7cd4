//! Input and output types for one cover-letter form session.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Stylistic register requested for the letter. Drives prompt wording and the
/// fallback adjective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Tone {
    #[default]
    Formal,
    Friendly,
    Confident,
    Enthusiastic,
}

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::Formal,
        Tone::Friendly,
        Tone::Confident,
        Tone::Enthusiastic,
    ];

    /// Case-insensitive label lookup. Unknown labels fall back to `Formal`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(label))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "Formal",
            Tone::Friendly => "Friendly",
            Tone::Confident => "Confident",
            Tone::Enthusiastic => "Enthusiastic",
        }
    }

    /// The lowercase form used inline in prompt and letter text.
    pub fn lowercase(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl From<String> for Tone {
    fn from(label: String) -> Self {
        Tone::from_label(&label)
    }
}

/// Gemini API key supplied by the user. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Empty strings mean "no key".
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Everything the form collects. Lives for one request and is never stored.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Candidate experience, free text, any length.
    pub background: String,
    pub job_description: String,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default, deserialize_with = "deserialize_api_key")]
    pub api_key: Option<ApiKey>,
}

fn deserialize_api_key<'de, D>(deserializer: D) -> Result<Option<ApiKey>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(ApiKey::new))
}

impl ApplicationInput {
    /// Required-field check. No format validation beyond non-blank.
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("background", &self.background),
            ("job_description", &self.job_description),
        ];

        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(AppError::Validation(format!("{field} is required"))),
            None => Ok(()),
        }
    }
}

/// Which path produced the letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterSource {
    Generated,
    TemplateNoApiKey,
    TemplateAfterError,
}

/// Terminal output of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    pub letter_text: String,
    /// Advisory only; the letter is usable either way.
    pub info_message: Option<String>,
    pub source: LetterSource,
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_input;
    use super::*;

    #[test]
    fn test_tone_default_is_formal() {
        assert_eq!(Tone::default(), Tone::Formal);
    }

    #[test]
    fn test_tone_from_label_is_case_insensitive() {
        assert_eq!(Tone::from_label("friendly"), Tone::Friendly);
        assert_eq!(Tone::from_label(" CONFIDENT "), Tone::Confident);
        assert_eq!(Tone::from_label("Enthusiastic"), Tone::Enthusiastic);
    }

    #[test]
    fn test_unknown_tone_falls_back_to_formal() {
        assert_eq!(Tone::from_label("Sarcastic"), Tone::Formal);
        let tone: Tone = serde_json::from_str(r#""whimsical""#).unwrap();
        assert_eq!(tone, Tone::Formal);
    }

    #[test]
    fn test_tone_lowercase() {
        assert_eq!(Tone::Enthusiastic.lowercase(), "enthusiastic");
    }

    #[test]
    fn test_input_deserializes_with_defaults() {
        let json = r#"{
            "name": "Ada", "email": "a@b.c", "phone": "1",
            "background": "bg", "job_description": "jd"
        }"#;
        let input: ApplicationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.tone, Tone::Formal);
        assert!(input.api_key.is_none());
    }

    #[test]
    fn test_empty_api_key_is_absent() {
        let json = r#"{
            "name": "Ada", "email": "a@b.c", "phone": "1",
            "background": "bg", "job_description": "jd",
            "tone": "Friendly", "api_key": ""
        }"#;
        let input: ApplicationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.tone, Tone::Friendly);
        assert!(input.api_key.is_none());
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret-key-123").unwrap();
        let printed = format!("{key:?}");
        assert!(!printed.contains("super-secret"));
        assert_eq!(key.expose(), "super-secret-key-123");
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        assert!(sample_input().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_field() {
        let mut input = sample_input();
        input.job_description = "   ".to_string();
        match input.validate() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "job_description is required"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
