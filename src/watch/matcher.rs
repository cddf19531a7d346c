// src/watch/matcher.rs

use regex::Regex;

/// Precompiled line pattern.
///
/// Uses search semantics: the pattern may match anywhere in the line, so
/// `ERR` matches `2024 ERROR disk full`. Anchor with `^`/`$` for whole-line
/// matching.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn matches(&self, line_text: &str) -> bool {
        self.regex.is_match(line_text)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
