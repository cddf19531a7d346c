// src/exec/template.rs

use std::fmt;

/// Part of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Placeholder,
}

/// Command template with exactly one `%s` placeholder.
///
/// `%%` stands for a literal `%`; any other `%` sequence is rejected when
/// parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    raw: String,
    segments: Vec<Segment>,
    /// Whitespace-separated words, for running without a shell.
    words: Vec<Vec<Segment>>,
}

impl CommandTemplate {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let segments = parse_segments(raw)?;
        let placeholders = segments
            .iter()
            .filter(|s| **s == Segment::Placeholder)
            .count();
        if placeholders != 1 {
            return Err(format!(
                "command template must contain exactly one %s placeholder (found {placeholders}): {raw:?}"
            ));
        }

        let words = raw
            .split_whitespace()
            .map(parse_segments)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
            words,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Substitute `line` verbatim into the template.
    ///
    /// No quoting or escaping is applied: when the result is handed to a
    /// shell, metacharacters in `line` are interpreted by that shell.
    pub fn render(&self, line: &str) -> String {
        render_segments(&self.segments, line)
    }

    /// Render as an argument vector: the template split on whitespace, with
    /// `line` substituted inside the word holding the placeholder. The line
    /// always stays within a single argument.
    ///
    /// Splitting is on plain whitespace with no shell quoting rules: in
    /// `notify-send "Alert: %s"` the quote characters stay in the words
    /// `"Alert:` and `%s"`, and the two words are separate arguments.
    pub fn render_argv(&self, line: &str) -> Vec<String> {
        self.words
            .iter()
            .map(|word| render_segments(word, line))
            .collect()
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn render_segments(segments: &[Segment], line: &str) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Placeholder => out.push_str(line),
        }
    }
    out
}

fn parse_segments(raw: &str) -> Result<Vec<Segment>, String> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => text.push('%'),
            Some('s') => {
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(Segment::Placeholder);
            }
            Some(other) => {
                return Err(format!(
                    "unsupported format sequence %{other} in command template {raw:?} (use %s for the line, %% for a literal %)"
                ));
            }
            None => {
                return Err(format!(
                    "command template {raw:?} ends with a lone % (use %% for a literal %)"
                ));
            }
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    Ok(segments)
}
