//! Post content validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::DomainError;

/// Maximum post length in Unicode code points.
pub const MAX_CONTENT_CHARS: usize = 280;

// Extended_Pictographic covers the pictographs themselves; Emoji_Component
// admits the pieces multi-codepoint emoji are assembled from (ZWJ, variation
// selectors, skin tones, regional indicators, keycap parts).
static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\p{Extended_Pictographic}|\p{Emoji_Component})+$").expect("emoji pattern")
});

/// Validate post content: non-empty, at most 280 code points, emoji only.
///
/// Returns the field-level message for the first violated rule.
pub fn validate(content: &str) -> Result<(), DomainError> {
    if content.is_empty() {
        return Err(DomainError::InvalidInput(
            "content must not be empty".to_string(),
        ));
    }

    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(DomainError::InvalidInput(format!(
            "content must be at most {MAX_CONTENT_CHARS} characters"
        )));
    }

    if !EMOJI_RE.is_match(content) {
        return Err(DomainError::InvalidInput(
            "only emoji are allowed".to_string(),
        ));
    }

    Ok(())
}
