//! Markdown rendering and parsing for section trees.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{ContentElement, Document, Section};

use super::{images_to_html, RenderOptions};

/// Convert a document to Markdown, checking image references first when
/// `options.verify_images` is set.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        if self.options.verify_images {
            self.verify_images(&doc.sections)?;
        }

        let mut output = String::new();
        for section in &doc.sections {
            self.render_section(&mut output, section, 1);
        }
        Ok(output)
    }

    fn verify_images(&self, sections: &[Section]) -> Result<()> {
        for section in sections {
            for element in &section.content {
                if let Some((path, _)) = element.image_ref() {
                    let resolved = self.options.resolve_image(path);
                    if !resolved.exists() {
                        log::warn!("Image {:?} referenced by {:?} is missing", path, section.title);
                        return Err(Error::ResourceNotFound(resolved));
                    }
                }
            }
            self.verify_images(&section.subsections)?;
        }
        Ok(())
    }

    fn render_section(&self, output: &mut String, section: &Section, level: usize) {
        output.push_str(&"#".repeat(level));
        output.push(' ');
        output.push_str(&section.title);
        output.push('\n');

        for element in &section.content {
            self.render_element(output, element);
        }
        for sub in &section.subsections {
            self.render_section(output, sub, level + 1);
        }
    }

    fn render_element(&self, output: &mut String, element: &ContentElement) {
        let markdown = element.to_markdown();
        match self.options.html_image_width {
            Some(width) if element.image_ref().is_some() => {
                output.push_str(&images_to_html(&markdown, width));
            }
            _ => output.push_str(&markdown),
        }
    }
}

fn image_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^!\[(.*?)\]\((.*?)\)").expect("valid image line regex"))
}

/// Parse Markdown into a section tree.
///
/// Works line by line: `#` runs open sections, `![desc](path)` lines
/// become images and every other non-blank line becomes its own
/// paragraph. Anything before the first heading is dropped.
pub fn from_markdown(markdown: &str) -> Document {
    let mut roots = Vec::new();
    let mut stack: Vec<Section> = Vec::new();

    for line in markdown.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }

        if line.starts_with('#') {
            let title = line.trim_start_matches('#');
            let depth = line.len() - title.len();
            while stack.len() >= depth {
                close_top(&mut stack, &mut roots);
            }
            stack.push(Section::new(title.trim()));
            continue;
        }

        let element = match image_line_regex().captures(line) {
            Some(caps) => ContentElement::image(&caps[2], &caps[1]),
            None => ContentElement::paragraph(unescape_line_start(line)),
        };
        match stack.last_mut() {
            Some(section) => section.add_content(element),
            None => log::debug!("Dropping content before the first heading: {:?}", line),
        }
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }
    Document::from_sections(roots)
}

/// Drop the backslash written in front of a paragraph starting with `#`,
/// `!` or `\`.
fn unescape_line_start(line: &str) -> &str {
    match line.strip_prefix('\\') {
        Some(rest) if rest.starts_with(|c: char| matches!(c, '#' | '!' | '\\')) => rest,
        _ => line,
    }
}

fn close_top(stack: &mut Vec<Section>, roots: &mut Vec<Section>) {
    if let Some(section) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.add_subsection(section),
            None => roots.push(section),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> Document {
        let mut intro = Section::new("1 Introduction");
        intro.add_content(ContentElement::paragraph("Body text here."));
        let mut background = Section::new("2 Background");
        let mut prior = Section::new("2.1 Prior Work");
        prior.add_content(ContentElement::image("images/image_0_0.png", "Image 0"));
        background.add_subsection(prior);
        Document::from_sections(vec![intro, background])
    }

    #[test]
    fn test_render_without_verification() {
        let options = RenderOptions::new().with_verify_images(false);
        let md = to_markdown(&sample(), &options).unwrap();
        assert_eq!(
            md,
            "# 1 Introduction\nBody text here.\n\n# 2 Background\n## 2.1 Prior Work\n![Image 0](images/image_0_0.png)\n\n"
        );
        assert_eq!(md, sample().to_markdown());
    }

    #[test]
    fn test_missing_image_is_error() {
        let options = RenderOptions::new().with_image_root("/nonexistent-papertree-root");
        match to_markdown(&sample(), &options) {
            Err(Error::ResourceNotFound(path)) => assert_eq!(
                path,
                PathBuf::from("/nonexistent-papertree-root/images/image_0_0.png")
            ),
            other => panic!("expected ResourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_html_images() {
        let options = RenderOptions::new()
            .with_verify_images(false)
            .with_html_images(300);
        let md = to_markdown(&sample(), &options).unwrap();
        assert!(md.contains("<img src=\"images/image_0_0.png\" alt=\"Image 0\" width=\"300px\">"));
        assert!(!md.contains("!["));
    }

    #[test]
    fn test_from_markdown_nesting() {
        let md = "# 1 Intro\nHello.\n## 1.1 Scope\n![fig](a.png)\n# 2 End\nBye.";
        let doc = from_markdown(md);
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].subsections[0].title, "1.1 Scope");
        assert_eq!(
            doc.sections[0].subsections[0].content,
            vec![ContentElement::image("a.png", "fig")]
        );
        assert_eq!(doc.sections[1].content, vec![ContentElement::paragraph("Bye.")]);
    }

    #[test]
    fn test_from_markdown_drops_preamble() {
        let doc = from_markdown("Preamble line\n# 1 Intro\nText");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].content.len(), 1);
    }

    #[test]
    fn test_from_markdown_one_paragraph_per_line() {
        let doc = from_markdown("# 1 Intro\nfirst line\nsecond line\n");
        assert_eq!(doc.sections[0].content.len(), 2);
    }

    #[test]
    fn test_from_markdown_deep_heading_without_parent() {
        let doc = from_markdown("### 1.1.1 Deep\nText\n# 2 Top");
        let titles: Vec<_> = doc.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["1.1.1 Deep", "2 Top"]);
    }

    #[test]
    fn test_markdown_roundtrip() {
        let doc = sample();
        assert_eq!(from_markdown(&doc.to_markdown()), doc);
    }

    #[test]
    fn test_markdown_roundtrip_with_marker_paragraphs() {
        let mut intro = Section::new("1 Intro");
        intro.add_content(ContentElement::paragraph("#1 priority is speed."));
        intro.add_content(ContentElement::paragraph("![not](an-image.png)"));
        intro.add_content(ContentElement::paragraph("!important"));
        intro.add_content(ContentElement::paragraph("\\# stays escaped"));
        intro.add_content(ContentElement::image("a.png", "Image 0"));
        let doc = Document::from_sections(vec![intro]);

        let md = doc.to_markdown();
        assert!(md.contains("\\#1 priority is speed.\n"));
        assert_eq!(from_markdown(&md), doc);
    }

    #[test]
    fn test_from_markdown_keeps_other_backslashes() {
        let doc = from_markdown("# 1 Intro\n\\alpha is a symbol");
        assert_eq!(
            doc.sections[0].content,
            vec![ContentElement::paragraph("\\alpha is a symbol")]
        );
    }
}
