//! Heading candidate scanning and filtering.
//!
//! A heading candidate is a line starting with a dotted numeral, followed
//! either by a title on the same line or by a title on the next line.
//! Candidates are cheap to produce and most of them are wrong (page
//! numbers, table rows, years); the filter and the sequence validator
//! weed them out.

use regex::Regex;

use super::Numeral;

/// A line provisionally recognized as a section heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingCandidate {
    /// Section numeral
    pub numeral: Numeral,
    /// Inferred title (may be empty before filtering)
    pub title: String,
    /// Byte offset of the match start (the newline before the numeral)
    pub start: usize,
    /// Byte offset of the match end
    pub end: usize,
    /// Title was taken from the line after the numeral
    pub title_on_next_line: bool,
}

impl HeadingCandidate {
    /// Heading as displayed: numeral and title, e.g. `2.1 Prior Work`.
    pub fn heading_text(&self) -> String {
        format!("{} {}", self.numeral, self.title)
    }

    /// Nesting depth of the numeral.
    pub fn depth(&self) -> usize {
        self.numeral.depth()
    }
}

/// Why a candidate title was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleRejection {
    /// No title found
    Empty,
    /// Title shorter than the minimum
    TooShort,
    /// Title longer than the maximum
    TooLong,
    /// Title starts with a lowercase letter
    Lowercase,
}

/// Heading filter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingFilterConfig {
    /// Minimum title length in characters
    pub min_title_len: usize,
    /// Maximum title length in characters
    pub max_title_len: usize,
}

impl Default for HeadingFilterConfig {
    fn default() -> Self {
        Self {
            min_title_len: 5,
            max_title_len: 50,
        }
    }
}

impl HeadingFilterConfig {
    /// Check a title against the shape rules.
    pub fn check(&self, title: &str) -> Option<TitleRejection> {
        let first = match title.chars().next() {
            Some(c) => c,
            None => return Some(TitleRejection::Empty),
        };
        let len = title.chars().count();
        if len < self.min_title_len {
            Some(TitleRejection::TooShort)
        } else if len > self.max_title_len {
            Some(TitleRejection::TooLong)
        } else if first.is_lowercase() {
            Some(TitleRejection::Lowercase)
        } else {
            None
        }
    }
}

/// Finds heading candidates in normalized text.
pub struct HeadingScanner {
    pattern: Regex,
    filter: HeadingFilterConfig,
}

impl HeadingScanner {
    /// Create a scanner with the default filter.
    pub fn new() -> Self {
        Self::with_filter(HeadingFilterConfig::default())
    }

    /// Create a scanner with a custom filter.
    pub fn with_filter(filter: HeadingFilterConfig) -> Self {
        Self {
            // newline, numeral, optional same-line title, optional next-line title
            pattern: Regex::new(
                r"\n([0-9]+(?:\.[0-9]+)*)\.?[ \t]*(\p{L}[^0-9.\n]*)?(?:\n([^0-9\n][^\n]*))?",
            )
            .expect("valid heading regex"),
            filter,
        }
    }

    /// All candidates in `text`, before title filtering.
    ///
    /// Numerals that do not fit in `u32` are dropped.
    pub fn scan(&self, text: &str) -> Vec<HeadingCandidate> {
        let mut candidates = Vec::new();
        for caps in self.pattern.captures_iter(text) {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let numeral = match caps[1].parse::<Numeral>() {
                Ok(numeral) => numeral,
                Err(e) => {
                    log::debug!("Skipping heading candidate at {}: {}", whole.start(), e);
                    continue;
                }
            };
            let same_line = caps.get(2);
            let next_line = caps.get(3).filter(|_| same_line.is_none());
            let title = same_line
                .or(next_line)
                .map(|m| m.as_str().trim())
                .unwrap_or("")
                .to_string();
            candidates.push(HeadingCandidate {
                numeral,
                title,
                start: whole.start(),
                end: whole.end(),
                title_on_next_line: next_line.is_some(),
            });
        }
        candidates
    }

    /// Candidates in `text` whose titles pass the filter.
    pub fn find(&self, text: &str) -> Vec<HeadingCandidate> {
        self.filter(self.scan(text))
    }

    /// Keep the scanned candidates whose titles pass the filter.
    pub fn filter(&self, candidates: Vec<HeadingCandidate>) -> Vec<HeadingCandidate> {
        let found = candidates.len();
        let kept: Vec<_> = candidates
            .into_iter()
            .filter(|candidate| match self.filter.check(&candidate.title) {
                Some(reason) => {
                    log::debug!(
                        "Rejected heading candidate {:?} ({:?})",
                        candidate.heading_text(),
                        reason
                    );
                    false
                }
                None => true,
            })
            .collect();
        log::debug!(
            "HeadingScanner: {} candidates, {} passed the title filter",
            found,
            kept.len()
        );
        kept
    }
}

impl Default for HeadingScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Find filtered heading candidates with default settings.
pub fn find_heading_candidates(text: &str) -> Vec<HeadingCandidate> {
    HeadingScanner::new().find(text)
}
