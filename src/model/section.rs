//! Section tree nodes.

use serde::{Deserialize, Serialize};

use super::ContentElement;

/// A document section with its body and nested subsections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Section {
    /// Section title, including its numeral when extracted from a PDF
    pub title: String,

    /// Body elements in reading order
    #[serde(default)]
    pub content: Vec<ContentElement>,

    /// Child sections in reading order
    #[serde(default)]
    pub subsections: Vec<Section>,
}

impl Section {
    /// Create an empty section.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Vec::new(),
            subsections: Vec::new(),
        }
    }

    /// Append a content element.
    pub fn add_content(&mut self, element: ContentElement) {
        self.content.push(element);
    }

    /// Append a subsection.
    pub fn add_subsection(&mut self, subsection: Section) {
        self.subsections.push(subsection);
    }

    /// Check if the section has neither content nor subsections.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.subsections.is_empty()
    }

    /// Number of sections in this subtree, including this one.
    pub fn total_sections(&self) -> usize {
        1 + self
            .subsections
            .iter()
            .map(Section::total_sections)
            .sum::<usize>()
    }

    /// Depth of the deepest section in this subtree (1 for a leaf).
    pub fn max_depth(&self) -> usize {
        1 + self
            .subsections
            .iter()
            .map(Section::max_depth)
            .max()
            .unwrap_or(0)
    }

    /// Render this section and its subsections as Markdown, with the
    /// heading at `level` (1 for roots).
    pub fn to_markdown(&self, level: usize) -> String {
        let mut md = format!("{} {}\n", "#".repeat(level.max(1)), self.title);
        for element in &self.content {
            md.push_str(&element.to_markdown());
        }
        for sub in &self.subsections {
            md.push_str(&sub.to_markdown(level + 1));
        }
        md
    }
}
