//! Plain text rendering for section trees.

use crate::model::{Document, Section};

/// Convert a document to plain text: section titles and paragraph text,
/// each separated by a blank line. Images are left out.
pub fn to_text(doc: &Document) -> String {
    let mut parts = Vec::new();
    for section in &doc.sections {
        collect_text(section, &mut parts);
    }
    parts.join("\n\n")
}

fn collect_text<'a>(section: &'a Section, parts: &mut Vec<&'a str>) {
    parts.push(&section.title);
    parts.extend(section.content.iter().filter_map(|e| e.paragraph_text()));
    for sub in &section.subsections {
        collect_text(sub, parts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentElement;

    #[test]
    fn test_to_text() {
        let mut intro = Section::new("1 Introduction");
        intro.add_content(ContentElement::paragraph("Hello, world!"));
        intro.add_content(ContentElement::image("a.png", "Image 0"));
        let mut scope = Section::new("1.1 Scope");
        scope.add_content(ContentElement::paragraph("Second paragraph."));
        intro.add_subsection(scope);

        let result = to_text(&Document::from_sections(vec![intro]));
        assert_eq!(
            result,
            "1 Introduction\n\nHello, world!\n\n1.1 Scope\n\nSecond paragraph."
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_text(&Document::new()), "");
    }
}
