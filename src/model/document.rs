//! Document-level types.

use serde::{Deserialize, Serialize};

use super::Section;

/// A parsed paper: an ordered list of root sections.
///
/// Serializes as a bare JSON array of sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    /// Root sections in reading order
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Create a document from root sections.
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Add a root section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Check if the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of sections, including nested ones.
    pub fn total_sections(&self) -> usize {
        self.sections.iter().map(Section::total_sections).sum()
    }

    /// Render as Markdown without touching the filesystem.
    ///
    /// Use [`crate::render::to_markdown`] to verify image references.
    pub fn to_markdown(&self) -> String {
        self.sections
            .iter()
            .map(|section| section.to_markdown(1))
            .collect()
    }

    /// Parse Markdown produced by [`Document::to_markdown`] (or written by hand).
    pub fn from_markdown(markdown: &str) -> Self {
        crate::render::from_markdown(markdown)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        crate::render::to_json(self, crate::render::JsonFormat::Pretty)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        crate::render::from_json(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentElement;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.total_sections(), 0);
        assert_eq!(doc.to_markdown(), "");
    }

    #[test]
    fn test_document_sections() {
        let mut intro = Section::new("1 Introduction");
        intro.add_content(ContentElement::paragraph("Body text here."));
        let mut background = Section::new("2 Background");
        background.add_subsection(Section::new("2.1 Prior Work"));

        let doc = Document::from_sections(vec![intro, background]);
        assert_eq!(doc.total_sections(), 3);
        assert_eq!(
            doc.to_markdown(),
            "# 1 Introduction\nBody text here.\n\n# 2 Background\n## 2.1 Prior Work\n"
        );
    }

    #[test]
    fn test_document_serializes_as_array() {
        let doc = Document::from_sections(vec![Section::new("Intro")]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"[{"title":"Intro","content":[],"subsections":[]}]"#);
    }
}
