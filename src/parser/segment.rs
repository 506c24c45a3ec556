//! Content segmentation and section nesting.
//!
//! Each validated heading owns the text from its own start offset up to
//! the next heading in the text. The heading's own lines are cut off the
//! front, and the bibliography is cut off the end of the final section.

use crate::model::{ContentElement, Document, Section};
use crate::render::{ImageCursor, ImageTagger, TextPiece};

use super::{HeadingCandidate, Numeral};

/// Raw text of one section, before it becomes content elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionText {
    /// Section numeral
    pub numeral: Numeral,
    /// Section title without the numeral
    pub title: String,
    /// Body text, newlines preserved
    pub body: String,
}

impl SectionText {
    /// Heading as displayed: numeral and title.
    pub fn heading_text(&self) -> String {
        format!("{} {}", self.numeral, self.title)
    }
}

/// Slices normalized text into per-section bodies.
#[derive(Debug, Clone)]
pub struct Segmenter {
    stop_marker: String,
}

impl Segmenter {
    /// Segmenter stopping the final section at a `References` line.
    pub fn new() -> Self {
        Self::with_stop_marker("References")
    }

    /// Segmenter stopping the final section at a custom marker line.
    pub fn with_stop_marker(marker: impl Into<String>) -> Self {
        Self {
            stop_marker: marker.into(),
        }
    }

    /// Split `text` at the validated `headings` (in numeral order).
    pub fn segment(&self, text: &str, headings: &[HeadingCandidate]) -> Vec<SectionText> {
        let mut starts: Vec<usize> = headings.iter().map(|h| h.start).collect();
        starts.sort_unstable();
        starts.dedup();

        if headings.windows(2).any(|w| w[1].start <= w[0].start) {
            log::warn!("Heading offsets are not in numeral order; spans follow text order");
        }

        let last = headings.len().saturating_sub(1);
        headings
            .iter()
            .enumerate()
            .map(|(i, heading)| {
                let next = starts.partition_point(|&s| s <= heading.start);
                let end = starts.get(next).copied().unwrap_or(text.len());
                let span = text.get(heading.start..end).unwrap_or("");

                let body = strip_heading_lines(span, heading);
                let body = if i == last {
                    self.truncate_at_marker(body)
                } else {
                    body
                };

                SectionText {
                    numeral: heading.numeral.clone(),
                    title: heading.title.clone(),
                    body: body.trim().to_string(),
                }
            })
            .collect()
    }

    fn truncate_at_marker<'t>(&self, body: &'t str) -> &'t str {
        let mut offset = 0;
        for line in body.split('\n') {
            if line == self.stop_marker {
                return &body[..offset];
            }
            offset += line.len() + 1;
        }
        body
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop the heading's own lines from the front of its span.
///
/// The span opens with the newline before the numeral, so the first piece
/// is empty. The numeral line follows, then the title line when the title
/// was found below the numeral.
fn strip_heading_lines<'t>(span: &'t str, heading: &HeadingCandidate) -> &'t str {
    let skip = if heading.title_on_next_line { 3 } else { 2 };
    span.splitn(skip + 1, '\n').nth(skip).unwrap_or("")
}

/// Turns section texts into a nested [`Document`].
pub struct DocumentBuilder<'a> {
    tagger: &'a ImageTagger,
    image_paths: &'a [String],
}

impl<'a> DocumentBuilder<'a> {
    /// Create a builder resolving image placeholders against `image_paths`.
    pub fn new(tagger: &'a ImageTagger, image_paths: &'a [String]) -> Self {
        Self {
            tagger,
            image_paths,
        }
    }

    /// Build the section tree. Sections are nested by numeral depth.
    pub fn build(&self, sections: Vec<SectionText>) -> Document {
        let mut cursor = ImageCursor::new();
        let mut items = Vec::with_capacity(sections.len());
        for text in sections {
            let mut section = Section::new(text.heading_text());
            cursor = self.fill_content(&mut section, &text.body, cursor);
            items.push((text.numeral.depth(), section));
        }
        Document::from_sections(nest_by_depth(items))
    }

    fn fill_content(&self, section: &mut Section, body: &str, cursor: ImageCursor) -> ImageCursor {
        let (pieces, cursor) = self.tagger.split(body, self.image_paths, cursor);
        for piece in pieces {
            match piece {
                TextPiece::Text(text) => {
                    let joined = join_lines(&text);
                    if !joined.is_empty() {
                        section.add_content(ContentElement::paragraph(joined));
                    }
                }
                TextPiece::Image { index, path } => {
                    section.add_content(ContentElement::image(path, format!("Image {}", index)));
                }
            }
        }
        cursor
    }
}

/// Join the lines of a body into one paragraph line.
fn join_lines(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Nest sections tagged with their depth: each section becomes a child of
/// the closest preceding open section that is shallower than itself.
pub fn nest_by_depth(items: Vec<(usize, Section)>) -> Vec<Section> {
    let mut roots = Vec::new();
    let mut stack: Vec<(usize, Section)> = Vec::new();

    for (depth, section) in items {
        while stack.last().is_some_and(|(d, _)| *d >= depth) {
            close_top(&mut stack, &mut roots);
        }
        match stack.last() {
            Some((parent_depth, parent)) if parent_depth + 1 != depth => {
                log::warn!(
                    "Section {:?} at depth {} nested under {:?} at depth {}",
                    section.title,
                    depth,
                    parent.title,
                    parent_depth
                );
            }
            None if depth > 1 => {
                log::warn!("Section {:?} has no parent; kept as a root", section.title);
            }
            _ => {}
        }
        stack.push((depth, section));
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }
    roots
}

fn close_top(stack: &mut Vec<(usize, Section)>, roots: &mut Vec<Section>) {
    if let Some((_, section)) = stack.pop() {
        match stack.last_mut() {
            Some((_, parent)) => parent.add_subsection(section),
            None => roots.push(section),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{find_heading_candidates, validate_sequence};

    const PAPER: &str = "\n1 Introduction\nBody text here.\n2 Background\nMore text.\n2.1 Prior Work\nEven more.\nReferences\n[1] foo";

    fn segment(text: &str) -> Vec<SectionText> {
        let headings = validate_sequence(find_heading_candidates(text));
        Segmenter::new().segment(text, &headings)
    }

    #[test]
    fn test_segment_bodies() {
        let sections = segment(PAPER);
        let bodies: Vec<_> = sections.iter().map(|s| s.body.as_str()).collect();
        assert_eq!(bodies, vec!["Body text here.", "More text.", "Even more."]);
    }

    #[test]
    fn test_next_line_title_not_repeated_in_body() {
        let sections = segment("\nT\n3\nExperiments\nWe ran things.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading_text(), "3 Experiments");
        assert_eq!(sections[0].body, "We ran things.");
    }

    #[test]
    fn test_references_only_cut_from_last_section() {
        let text = "\n1 Introduction\nSee References\nReferences\nstill intro\n2 Conclusion\nDone.\nReferences\n[1] foo";
        let sections = segment(text);
        assert_eq!(sections[0].body, "See References\nReferences\nstill intro");
        assert_eq!(sections[1].body, "Done.");
    }

    #[test]
    fn test_marker_must_match_whole_line() {
        let text = "\n1 Conclusion\nDone.\nReferences and notes\nMore.";
        let sections = segment(text);
        assert_eq!(sections[0].body, "Done.\nReferences and notes\nMore.");
    }

    #[test]
    fn test_custom_stop_marker() {
        let text = "\n1 Conclusion\nDone.\nBibliography\n[1] foo";
        let headings = validate_sequence(find_heading_candidates(text));
        let sections = Segmenter::with_stop_marker("Bibliography").segment(text, &headings);
        assert_eq!(sections[0].body, "Done.");
    }

    #[test]
    fn test_out_of_order_offsets() {
        // "2 Methods" appears before "1 Introduction" in the text
        let text = "\n2 Methods\nMethod body.\n1 Introduction\nIntro body.";
        let sections = segment(text);
        let found: Vec<_> = sections
            .iter()
            .map(|s| (s.heading_text(), s.body.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("1 Introduction".to_string(), "Intro body."),
                ("2 Methods".to_string(), "Method body."),
            ]
        );
    }

    #[test]
    fn test_build_nested_document() {
        let tagger = ImageTagger::new();
        let doc = DocumentBuilder::new(&tagger, &[]).build(segment(PAPER));

        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].title, "1 Introduction");
        assert_eq!(doc.sections[1].title, "2 Background");
        assert_eq!(doc.sections[1].subsections[0].title, "2.1 Prior Work");
        assert_eq!(
            doc.sections[1].subsections[0].content,
            vec![ContentElement::paragraph("Even more.")]
        );
    }

    #[test]
    fn test_multiline_body_joined() {
        let tagger = ImageTagger::new();
        let sections = vec![SectionText {
            numeral: "1".parse().unwrap(),
            title: "Intro".to_string(),
            body: "first line\nsecond line".to_string(),
        }];
        let doc = DocumentBuilder::new(&tagger, &[]).build(sections);
        assert_eq!(
            doc.sections[0].content,
            vec![ContentElement::paragraph("first line second line")]
        );
    }

    #[test]
    fn test_image_placeholders_become_elements() {
        let tagger = ImageTagger::new();
        let paths = vec!["imgs/image_0_0.png".to_string(), "imgs/image_1_0.png".to_string()];
        let sections = vec![
            SectionText {
                numeral: "1".parse().unwrap(),
                title: "Intro".to_string(),
                body: "Look:\n<image: model>\nNice.".to_string(),
            },
            SectionText {
                numeral: "2".parse().unwrap(),
                title: "Results".to_string(),
                body: "<image: chart>".to_string(),
            },
        ];
        let doc = DocumentBuilder::new(&tagger, &paths).build(sections);
        assert_eq!(
            doc.sections[0].content,
            vec![
                ContentElement::paragraph("Look:"),
                ContentElement::image("imgs/image_0_0.png", "Image 0"),
                ContentElement::paragraph("Nice."),
            ]
        );
        assert_eq!(
            doc.sections[1].content,
            vec![ContentElement::image("imgs/image_1_0.png", "Image 1")]
        );
    }

    #[test]
    fn test_nest_by_depth() {
        let items = vec![
            (1, Section::new("1")),
            (2, Section::new("1.1")),
            (3, Section::new("1.1.1")),
            (2, Section::new("1.2")),
            (1, Section::new("2")),
        ];
        let roots = nest_by_depth(items);
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].subsections.len(), 2);
        assert_eq!(roots[0].subsections[0].subsections[0].title, "1.1.1");
        assert_eq!(roots[0].subsections[1].title, "1.2");
        assert!(roots[1].subsections.is_empty());
    }

    #[test]
    fn test_orphan_becomes_root() {
        let roots = nest_by_depth(vec![(2, Section::new("3.1")), (2, Section::new("3.2"))]);
        assert_eq!(roots.len(), 2);
    }
}
