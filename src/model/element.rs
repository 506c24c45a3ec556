//! Content elements: the typed leaves of a section body.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of a content element.
///
/// Unknown kinds read from JSON are kept verbatim so that a JSON
/// round-trip never loses them; they render as nothing in Markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    /// Body text
    Paragraph,
    /// Reference to an extracted image
    Image,
    /// Any other kind
    Other(String),
}

impl ElementType {
    /// Tag used in the serialized form.
    pub fn as_str(&self) -> &str {
        match self {
            ElementType::Paragraph => "paragraph",
            ElementType::Image => "image",
            ElementType::Other(tag) => tag,
        }
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "paragraph" => ElementType::Paragraph,
            "image" => ElementType::Image,
            _ => ElementType::Other(tag),
        }
    }
}

impl From<ElementType> for String {
    fn from(kind: ElementType) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leaf unit of a section body (paragraph or image).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentElement {
    /// Element kind
    #[serde(rename = "type")]
    pub element_type: ElementType,

    /// Paragraph text
    #[serde(default)]
    pub text: Option<String>,

    /// Image path, as referenced from the rendered output
    #[serde(default)]
    pub path: Option<String>,

    /// Image description (alt text)
    #[serde(default)]
    pub description: Option<String>,

    /// Open metadata; only the JSON form keeps it
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ContentElement {
    /// Create an element of the given kind with no fields set.
    pub fn new(element_type: ElementType) -> Self {
        Self {
            element_type,
            text: None,
            path: None,
            description: None,
            metadata: HashMap::new(),
        }
    }

    /// Create a paragraph element.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(ElementType::Paragraph)
        }
    }

    /// Create an image element.
    pub fn image(path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            description: Some(description.into()),
            ..Self::new(ElementType::Image)
        }
    }

    /// Attach a metadata entry, replacing any previous value for the key.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check if this is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        self.element_type == ElementType::Paragraph
    }

    /// Check if this is an image.
    pub fn is_image(&self) -> bool {
        self.element_type == ElementType::Image
    }

    /// Paragraph text, if this is a paragraph with non-empty text.
    pub fn paragraph_text(&self) -> Option<&str> {
        match (&self.element_type, self.text.as_deref()) {
            (ElementType::Paragraph, Some(text)) if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    /// Image path and description, if this is an image with both non-empty.
    pub fn image_ref(&self) -> Option<(&str, &str)> {
        match (&self.element_type, self.path.as_deref(), self.description.as_deref()) {
            (ElementType::Image, Some(path), Some(description))
                if !path.is_empty() && !description.is_empty() =>
            {
                Some((path, description))
            }
            _ => None,
        }
    }

    /// Render as Markdown. Elements missing required fields, or of an
    /// unknown kind, render as an empty string.
    pub fn to_markdown(&self) -> String {
        if let Some(text) = self.paragraph_text() {
            return format!("{}{}\n\n", line_start_escape(text), text);
        }
        if let Some((path, description)) = self.image_ref() {
            return format!("![{}]({})\n\n", description, path);
        }
        String::new()
    }
}

/// Backslash needed in front of a paragraph line that would otherwise read
/// back as a heading or an image.
fn line_start_escape(text: &str) -> &'static str {
    if text.starts_with(|c: char| matches!(c, '#' | '!' | '\\')) {
        "\\"
    } else {
        ""
    }
}
