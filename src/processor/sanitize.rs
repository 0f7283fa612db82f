//! Character filtering for the `data` field.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Maximum length of `processed_data` in characters.
pub const PROCESSED_DATA_MAX_CHARS: usize = 50;

/// Number of copies the legacy service concatenated.
pub const LEGACY_REPEAT_COUNT: usize = 100;

/// Separator the legacy service appended after every copy.
pub const LEGACY_SEPARATOR: char = '|';

/// How `processed_data` is built from the sanitized value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum SanitizeMode {
    /// Sanitize once and truncate.
    #[default]
    #[strum(serialize = "single")]
    Single,
    /// Legacy output: `value|` repeated 100 times, then truncated.
    #[strum(serialize = "legacy_repeat")]
    LegacyRepeat,
}

/// Whether a character survives sanitization.
#[inline]
pub fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_')
}

/// Keep ASCII letters, digits, space, `-` and `_`, in their original order.
pub fn sanitize(input: &str) -> String {
    input.chars().filter(|&c| is_allowed(c)).collect()
}

/// Build `processed_data` for a raw `data` value.
pub fn processed_data(input: &str, mode: SanitizeMode) -> String {
    let clean = sanitize(input);

    match mode {
        SanitizeMode::Single => clean.chars().take(PROCESSED_DATA_MAX_CHARS).collect(),
        SanitizeMode::LegacyRepeat => std::iter::repeat(clean.as_str())
            .take(LEGACY_REPEAT_COUNT)
            .flat_map(|copy| copy.chars().chain(std::iter::once(LEGACY_SEPARATOR)))
            .take(PROCESSED_DATA_MAX_CHARS)
            .collect(),
    }
}
