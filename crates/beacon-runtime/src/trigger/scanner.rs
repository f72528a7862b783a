//! Trigger scanning over page text

use super::builder::TriggerIndex;
use regex::Regex;

/// One trigger occurrence in scanned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMatch {
    /// Byte offset of the first matched byte
    pub start: usize,
    /// Byte offset one past the last matched byte
    pub end: usize,
    /// Normalized trigger that matched
    pub trigger: String,
    pub entry_id: String,
}

/// Compiled matcher for every trigger of an index
pub struct TriggerScanner<'a> {
    index: &'a TriggerIndex,
    /// Trigger behind each capture group; group `i + 1` matches `triggers[i]`
    triggers: Vec<&'a str>,
    pattern: Option<Regex>,
}

impl<'a> TriggerScanner<'a> {
    /// Compile the index triggers into one case-insensitive alternation.
    ///
    /// Longer triggers are tried first so "annual recurring revenue" wins
    /// over "revenue". Word boundaries are only required on edges that are
    /// word characters, so triggers like "C++" still match.
    pub fn new(index: &'a TriggerIndex) -> Result<Self, regex::Error> {
        let mut triggers: Vec<&str> = index.term_map.keys().map(String::as_str).collect();
        if triggers.is_empty() {
            return Ok(Self {
                index,
                triggers,
                pattern: None,
            });
        }
        triggers.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let alternation: Vec<String> = triggers
            .iter()
            .map(|t| format!("({})", bounded(t)))
            .collect();
        let pattern = Regex::new(&format!("(?i)(?:{})", alternation.join("|")))?;

        Ok(Self {
            index,
            triggers,
            pattern: Some(pattern),
        })
    }

    /// Non-overlapping trigger occurrences, left to right.
    ///
    /// Spans are byte offsets into `text` itself, even where lowercasing
    /// changes a character's length.
    pub fn scan(&self, text: &str) -> Vec<TriggerMatch> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };
        let folded = FoldedText::new(text);

        pattern
            .captures_iter(&folded.text)
            .filter_map(|caps| {
                let (group, m) = caps
                    .iter()
                    .enumerate()
                    .skip(1)
                    .find_map(|(i, m)| m.map(|m| (i, m)))?;
                let trigger = *self.triggers.get(group - 1)?;
                let entry_id = self.index.term_map.get(trigger)?.clone();
                let (start, end) = folded.span(m.start(), m.end())?;
                Some(TriggerMatch {
                    start,
                    end,
                    trigger: trigger.to_string(),
                    entry_id,
                })
            })
            .collect()
    }
}

/// Lowercased copy of a text with a map back to the original byte offsets
struct FoldedText {
    text: String,
    /// Original char span behind each byte of `text`
    origin: Vec<(usize, usize)>,
}

impl FoldedText {
    fn new(source: &str) -> Self {
        let mut text = String::with_capacity(source.len());
        let mut origin = Vec::with_capacity(source.len());
        for (start, c) in source.char_indices() {
            let end = start + c.len_utf8();
            for lower in c.to_lowercase() {
                text.push(lower);
                origin.extend(std::iter::repeat((start, end)).take(lower.len_utf8()));
            }
        }
        Self { text, origin }
    }

    fn span(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        let (from, _) = *self.origin.get(start)?;
        let (_, to) = *self.origin.get(end.checked_sub(1)?)?;
        Some((from, to))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn bounded(trigger: &str) -> String {
    let escaped = regex::escape(trigger);
    let lead = if trigger.chars().next().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    let tail = if trigger.chars().last().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    format!("{}{}{}", lead, escaped, tail)
}

impl TriggerIndex {
    /// Compile a scanner over this index
    pub fn scanner(&self) -> Result<TriggerScanner<'_>, regex::Error> {
        TriggerScanner::new(self)
    }

    /// Convenience one-shot scan; compile a [`TriggerScanner`] to scan many texts
    pub fn scan(&self, text: &str) -> Vec<TriggerMatch> {
        match self.scanner() {
            Ok(scanner) => scanner.scan(text),
            Err(e) => {
                tracing::warn!(error = %e, "failed to compile trigger pattern");
                Vec::new()
            }
        }
    }
}
