/// TikTok URL classification for the download form
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Validity of the URL field, derived from its current text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationState {
    Unvalidated,
    Valid,
    Invalid,
}

impl ValidationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationState::Unvalidated => "unvalidated",
            ValidationState::Valid => "valid",
            ValidationState::Invalid => "invalid",
        }
    }
}

/// Accepted URL shapes, checked in order:
/// 1. profile video:   https://www.tiktok.com/@user/video/123
/// 2. short path:      https://www.tiktok.com/t/ZTabc123
/// 3. short domain:    https://vm.tiktok.com/ZMabc123
/// 4. video with query https://tiktok.com/@user/video/123?lang=en
///
/// Patterns are anchored at the start only, so a matching prefix is enough.
/// Video ids are ASCII digits only; `\d` would also accept other scripts.
const URL_PATTERNS: [&str; 4] = [
    r"^https?://(www\.)?tiktok\.com/@[^/]+/video/[0-9]+",
    r"^https?://(www\.)?tiktok\.com/t/[A-Za-z0-9]+",
    r"^https?://vm\.tiktok\.com/[A-Za-z0-9]+",
    r"^https?://(www\.)?tiktok\.com/@[^/]+/video/[0-9]+\?.*",
];

static COMPILED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    URL_PATTERNS
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
});

/// Classify the raw input text of the URL field
///
/// Blank (empty or whitespace-only) input is `Unvalidated`. Anything else is
/// matched untrimmed against the accepted shapes; host matching is
/// case-sensitive and nothing is resolved over the network.
pub fn classify(url: &str) -> ValidationState {
    if url.trim().is_empty() {
        return ValidationState::Unvalidated;
    }

    if COMPILED_PATTERNS.iter().any(|pattern| pattern.is_match(url)) {
        ValidationState::Valid
    } else {
        ValidationState::Invalid
    }
}
