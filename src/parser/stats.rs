//! Statistics collected during extraction.

use serde::{Deserialize, Serialize};

use crate::model::{Document, Section};

/// Counts of what each pipeline stage kept and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Blocks delivered by the backend
    pub block_count: u32,

    /// Blocks classified as table/figure noise
    pub noise_block_count: u32,

    /// Heading candidates found by the scanner
    pub candidate_count: u32,

    /// Candidates that passed the title filter
    pub filtered_candidate_count: u32,

    /// Headings accepted by the sequence validator
    pub heading_count: u32,

    /// Sections in the resulting document, nested ones included
    pub section_count: u32,

    /// Paragraph elements in the resulting document
    pub paragraph_count: u32,

    /// Image elements in the resulting document
    pub image_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Headings dropped by the title filter or the sequence validator.
    pub fn rejected_heading_count(&self) -> u32 {
        self.candidate_count.saturating_sub(self.heading_count)
    }

    /// Count sections and elements of a finished document.
    pub fn count_document(&mut self, doc: &Document) {
        fn walk(stats: &mut ExtractionStats, section: &Section) {
            stats.section_count += 1;
            for element in &section.content {
                if element.is_paragraph() {
                    stats.paragraph_count += 1;
                } else if element.is_image() {
                    stats.image_count += 1;
                }
            }
            for sub in &section.subsections {
                walk(stats, sub);
            }
        }
        for section in &doc.sections {
            walk(self, section);
        }
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.block_count += other.block_count;
        self.noise_block_count += other.noise_block_count;
        self.candidate_count += other.candidate_count;
        self.filtered_candidate_count += other.filtered_candidate_count;
        self.heading_count += other.heading_count;
        self.section_count += other.section_count;
        self.paragraph_count += other.paragraph_count;
        self.image_count += other.image_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentElement;

    #[test]
    fn test_count_document() {
        let mut root = Section::new("1 Intro");
        root.add_content(ContentElement::paragraph("a"));
        let mut sub = Section::new("1.1 Detail");
        sub.add_content(ContentElement::image("x.png", "Image 0"));
        sub.add_content(ContentElement::paragraph("b"));
        root.add_subsection(sub);

        let mut stats = ExtractionStats::new();
        stats.count_document(&Document::from_sections(vec![root]));
        assert_eq!(stats.section_count, 2);
        assert_eq!(stats.paragraph_count, 2);
        assert_eq!(stats.image_count, 1);
    }

    #[test]
    fn test_stats_merge() {
        let mut stats1 = ExtractionStats {
            block_count: 10,
            heading_count: 3,
            ..Default::default()
        };
        let stats2 = ExtractionStats {
            block_count: 4,
            candidate_count: 6,
            heading_count: 2,
            ..Default::default()
        };
        stats1.merge(&stats2);
        assert_eq!(stats1.block_count, 14);
        assert_eq!(stats1.heading_count, 5);
        assert_eq!(stats1.rejected_heading_count(), 1);
    }
}
