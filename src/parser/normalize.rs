//! Text normalization for the surviving prose blocks.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::TextBlock;

/// Options for text normalization.
///
/// The whitespace and hyphenation steps always run; the Unicode steps are
/// opt-in because they change character offsets relative to the backend
/// output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Fix ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,
}

impl NormalizeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Enable or disable ligature expansion.
    pub fn with_ligatures(mut self, fix: bool) -> Self {
        self.fix_ligatures = fix;
        self
    }
}

const LIGATURES: [(&str, &str); 7] = [
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
];

/// Collapses whitespace and repairs hyphenation across line breaks.
pub struct TextNormalizer {
    options: NormalizeOptions,
    newline_runs: Regex,
    space_runs: Regex,
}

impl TextNormalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            newline_runs: Regex::new(r"\n+").expect("valid newline regex"),
            space_runs: Regex::new(r" +").expect("valid space regex"),
        }
    }

    /// Join prose blocks one per line, then normalize.
    pub fn normalize_blocks<'a, I>(&self, blocks: I) -> String
    where
        I: IntoIterator<Item = &'a TextBlock>,
    {
        let mut text = String::new();
        for block in blocks {
            text.push_str(block.text.trim());
            text.push('\n');
        }
        self.normalize(&text)
    }

    /// Normalize already concatenated text.
    pub fn normalize(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        };

        if self.options.fix_ligatures {
            for (ligature, replacement) in LIGATURES {
                result = result.replace(ligature, replacement);
            }
        }

        let result = self.newline_runs.replace_all(&result, "\n");
        let result = self.space_runs.replace_all(&result, " ");
        result.replace("-\n", "")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

/// Normalize text with default options.
pub fn normalize_text(text: &str) -> String {
    TextNormalizer::default().normalize(text)
}
