//! Image placeholder substitution and HTML image conversion.
//!
//! Text coming from some extractors carries placeholders such as
//! `<image: figure of the encoder>` where an image sat on the page. They
//! are matched to extracted images purely by order of appearance. The
//! position in that order is an explicit [`ImageCursor`] passed in and
//! handed back, so rendering one section never depends on what another
//! render did before it.

use regex::{Captures, Regex};

use crate::error::{Error, Result};

/// Default placeholder pattern (English and Spanish tags).
pub const DEFAULT_IMAGE_TAG_PATTERN: &str = r"<image: .+?>|<Imagen: .+?>";

/// Index of the next image to hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageCursor {
    next: usize,
}

impl ImageCursor {
    /// Cursor at the first image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor at a given image index.
    pub fn at(index: usize) -> Self {
        Self { next: index }
    }

    /// Index of the next image.
    pub fn position(&self) -> usize {
        self.next
    }

    /// Cursor one image further.
    pub fn advance(self) -> Self {
        Self {
            next: self.next + 1,
        }
    }
}

/// A piece of text split at image placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPiece {
    /// Plain text between placeholders
    Text(String),
    /// A placeholder resolved to an image path
    Image {
        /// Index into the image path list
        index: usize,
        /// Image path
        path: String,
    },
}

/// Finds image placeholders in text.
#[derive(Debug, Clone)]
pub struct ImageTagger {
    pattern: Regex,
}

impl ImageTagger {
    /// Tagger for [`DEFAULT_IMAGE_TAG_PATTERN`].
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_IMAGE_TAG_PATTERN).expect("valid image tag regex"),
        }
    }

    /// Tagger for a custom placeholder pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::Other(format!("Invalid image tag pattern: {}", e)))?;
        Ok(Self { pattern })
    }

    /// Check if `text` contains any placeholder.
    pub fn has_tags(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Replace placeholders with Markdown image links, in order, starting
    /// at `cursor`. Placeholders beyond the available paths stay as they are.
    pub fn substitute(
        &self,
        text: &str,
        paths: &[String],
        cursor: ImageCursor,
    ) -> (String, ImageCursor) {
        let mut cursor = cursor;
        let replaced = self.pattern.replace_all(text, |caps: &Captures| {
            match paths.get(cursor.position()) {
                Some(path) => {
                    let link = format!("![Image {}]({})", cursor.position(), path);
                    cursor = cursor.advance();
                    link
                }
                None => caps[0].to_string(),
            }
        });
        (replaced.into_owned(), cursor)
    }

    /// Split `text` at placeholders, resolving each to the next image path.
    /// Unresolvable placeholders are kept inside the surrounding text.
    pub fn split(
        &self,
        text: &str,
        paths: &[String],
        cursor: ImageCursor,
    ) -> (Vec<TextPiece>, ImageCursor) {
        let mut cursor = cursor;
        let mut pieces = Vec::new();
        let mut pending = String::new();
        let mut last = 0;

        for m in self.pattern.find_iter(text) {
            pending.push_str(&text[last..m.start()]);
            last = m.end();
            match paths.get(cursor.position()) {
                Some(path) => {
                    if !pending.is_empty() {
                        pieces.push(TextPiece::Text(std::mem::take(&mut pending)));
                    }
                    pieces.push(TextPiece::Image {
                        index: cursor.position(),
                        path: path.clone(),
                    });
                    cursor = cursor.advance();
                }
                None => pending.push_str(m.as_str()),
            }
        }
        pending.push_str(&text[last..]);
        if !pending.is_empty() {
            pieces.push(TextPiece::Text(pending));
        }
        (pieces, cursor)
    }
}

impl Default for ImageTagger {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace default placeholders with Markdown image links.
pub fn substitute_image_tags(
    text: &str,
    paths: &[String],
    cursor: ImageCursor,
) -> (String, ImageCursor) {
    ImageTagger::new().substitute(text, paths, cursor)
}

/// Rewrite Markdown images as HTML `<img>` tags with a fixed width.
pub fn images_to_html(text: &str, width: u32) -> String {
    let re = Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("valid image link regex");
    re.replace_all(text, |caps: &Captures| {
        format!(
            "\n<img src=\"{}\" alt=\"{}\" width=\"{}px\">\n",
            &caps[2], &caps[1], width
        )
    })
    .into_owned()
}
