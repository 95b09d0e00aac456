use serde_json::Value;

use crate::Error;

/// Minimum prompt length, counted after trimming surrounding whitespace.
pub const MIN_PROMPT_CHARS: usize = 3;
/// Maximum prompt length, counted on the untrimmed text.
pub const MAX_PROMPT_CHARS: usize = 500;

pub(crate) const PROMPT_TOO_SHORT: &str = "Prompt is too short or missing";
pub(crate) const PROMPT_TOO_LONG: &str = "Prompt is too long";

/// A prompt that passed validation.
///
/// The text is kept exactly as the caller sent it; trimming only applies to
/// the length check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Validate a prompt taken from a JSON payload.
    ///
    /// `null`, numbers, objects and any other non-string value count as a
    /// missing prompt.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::String(text) => Self::parse(text),
            _ => Err(Error::validation(PROMPT_TOO_SHORT)),
        }
    }

    /// Validate a prompt string.
    pub fn parse(text: &str) -> Result<Self, Error> {
        if text.trim().chars().count() < MIN_PROMPT_CHARS {
            return Err(Error::validation(PROMPT_TOO_SHORT));
        }
        if text.chars().count() > MAX_PROMPT_CHARS {
            return Err(Error::validation(PROMPT_TOO_LONG));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Prompt {
    type Error = Error;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::parse(text)
    }
}

impl TryFrom<String> for Prompt {
    type Error = Error;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(result: Result<Prompt, Error>) -> String {
        match result {
            Err(Error::Validation(message)) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_short_prompts_rejected() {
        assert_eq!(message(Prompt::parse("a")), PROMPT_TOO_SHORT);
        assert_eq!(message(Prompt::parse("")), PROMPT_TOO_SHORT);
        assert_eq!(message(Prompt::parse("  ab \n")), PROMPT_TOO_SHORT);
    }

    #[test]
    fn test_boundaries() {
        assert!(Prompt::parse("abc").is_ok());
        assert!(Prompt::parse(&"x".repeat(MAX_PROMPT_CHARS)).is_ok());
        assert_eq!(
            message(Prompt::parse(&"x".repeat(MAX_PROMPT_CHARS + 1))),
            PROMPT_TOO_LONG
        );
    }

    #[test]
    fn test_length_is_checked_untrimmed() {
        // 498 visible characters padded to 502 with whitespace.
        let padded = format!("  {}  ", "y".repeat(498));
        assert_eq!(message(Prompt::parse(&padded)), PROMPT_TOO_LONG);
    }

    #[test]
    fn test_multibyte_characters_count_once() {
        let prompt = "猫".repeat(MAX_PROMPT_CHARS);
        assert!(Prompt::parse(&prompt).is_ok());
        assert!(Prompt::parse("猫猫猫").is_ok());
    }

    #[test]
    fn test_original_text_preserved() {
        let prompt = Prompt::parse("  a red fox  ").unwrap();
        assert_eq!(prompt.as_str(), "  a red fox  ");
    }

    #[test]
    fn test_non_string_values_rejected() {
        for value in [json!(null), json!(42), json!(["a cat"]), json!({"text": "a cat"}), json!(true)] {
            assert_eq!(message(Prompt::from_value(&value)), PROMPT_TOO_SHORT);
        }
        assert!(Prompt::from_value(&json!("a cat on a mat")).is_ok());
    }
}
