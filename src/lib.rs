//! # papertree
//!
//! Section-tree extraction for numbered academic papers.
//!
//! This library takes the text blocks a PDF backend pulled out of a paper,
//! recovers the numbered section outline (`1`, `2`, `2.1`, ...) and
//! returns it as a tree of sections, paragraphs and images that converts
//! losslessly to JSON and readably to Markdown.
//!
//! ## Quick Start
//!
//! ```
//! use papertree::parser::MemoryBackend;
//! use papertree::Papertree;
//!
//! fn main() -> papertree::Result<()> {
//!     let backend = MemoryBackend::from_blocks(vec![
//!         (0usize, 0usize, "A Paper Title"),
//!         (0, 1, "1 Introduction"),
//!         (0, 2, "We introduce things."),
//!         (0, 3, "2 Conclusion"),
//!         (0, 4, "We concluded things."),
//!     ]);
//!
//!     let result = Papertree::new().parse(backend)?;
//!     assert_eq!(result.document().sections.len(), 2);
//!     println!("{}", result.to_markdown()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Block classification**: table and figure debris is dropped
//! - **Normalization**: whitespace collapsed, hyphenation repaired
//! - **Heading detection**: numbered lines with a plausible title
//! - **Sequence validation**: implausible outline steps are rejected
//! - **Segmentation**: bodies sliced per heading, bibliography cut
//! - **Nesting**: sections attached by numeral depth
//!
//! Headings are only recognized at the start of a line that follows a
//! newline. Blocks are trimmed and joined, so a heading in the very first
//! block is not detected, and the text under it is dropped along with
//! it. Papers normally open with a title block, which keeps the first
//! numbered heading out of that position.

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod translate;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{ContentElement, Document, ElementType, Section};
pub use parser::{
    ExtractOptions, ExtractedImage, ExtractionStats, GapPolicy, MemoryBackend, PaperParser,
    PdfBackend, TextBlock,
};
pub use render::{JsonFormat, RenderOptions};
pub use translate::{translate_document, Translator};

/// Parse a document from a backend with default options.
///
/// # Example
///
/// ```
/// use papertree::{parse_backend, MemoryBackend};
///
/// let backend = MemoryBackend::from_pages(vec!["Title\n1 Introduction\nHello."]);
/// let doc = parse_backend(backend).unwrap();
/// assert_eq!(doc.sections[0].title, "1 Introduction");
/// ```
pub fn parse_backend<B: PdfBackend>(backend: B) -> Result<Document> {
    PaperParser::new(backend).parse()
}

/// Parse a document from `(page, block, text)` tuples.
///
/// The first block is never read as a heading; see the crate docs.
pub fn parse_blocks<I, T>(blocks: I) -> Result<Document>
where
    I: IntoIterator<Item = T>,
    T: Into<TextBlock>,
{
    parse_backend(MemoryBackend::from_blocks(blocks))
}

/// Extract the section tree of already normalized text.
///
/// Headings are only recognized after a newline, so the text usually
/// starts with a title line or a blank line. A heading on the first line
/// is missed and its body is dropped.
pub fn parse_text(text: &str) -> Document {
    parser::extract_sections(text)
}

/// Parse several documents, in parallel.
pub fn parse_batch<B: PdfBackend + Sync>(backends: &[B]) -> Vec<Result<Document>> {
    parser::extract_documents(backends, &ExtractOptions::default())
}

/// Builder for extracting and rendering section trees.
///
/// # Example
///
/// ```
/// use papertree::{GapPolicy, MemoryBackend, Papertree};
///
/// let backend = MemoryBackend::from_pages(vec!["Title\n1 Introduction\nHello.\nBibliography\n[1] x"]);
/// let markdown = Papertree::new()
///     .with_gap_policy(GapPolicy::AllLevels)
///     .with_stop_marker("Bibliography")
///     .without_image_check()
///     .parse(backend)?
///     .to_markdown()?;
/// assert_eq!(markdown, "# 1 Introduction\nHello.\n\n");
/// # Ok::<(), papertree::Error>(())
/// ```
pub struct Papertree {
    extract_options: ExtractOptions,
    render_options: RenderOptions,
}

impl Papertree {
    /// Create a new Papertree builder.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Set how strictly numbering gaps are rejected.
    pub fn with_gap_policy(mut self, policy: GapPolicy) -> Self {
        self.extract_options = self.extract_options.with_gap_policy(policy);
        self
    }

    /// Set the line that starts the bibliography.
    pub fn with_stop_marker(mut self, marker: impl Into<String>) -> Self {
        self.extract_options = self.extract_options.with_stop_marker(marker);
        self
    }

    /// Set the heading title rules.
    pub fn with_heading_filter(mut self, filter: parser::HeadingFilterConfig) -> Self {
        self.extract_options = self.extract_options.with_heading_filter(filter);
        self
    }

    /// Set the block classifier thresholds.
    pub fn with_classifier(mut self, config: parser::ClassifierConfig) -> Self {
        self.extract_options = self.extract_options.with_classifier(config);
        self
    }

    /// Enable Unicode normalization and ligature expansion.
    pub fn with_unicode_cleanup(mut self) -> Self {
        self.extract_options = self.extract_options.with_normalize(
            parser::NormalizeOptions::new()
                .with_unicode(true)
                .with_ligatures(true),
        );
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.extract_options = self.extract_options.with_images(extract);
        self
    }

    /// Set the directory image paths are referenced under.
    pub fn with_image_dir(mut self, dir: impl Into<String>) -> Self {
        self.extract_options = self.extract_options.with_image_dir(dir);
        self
    }

    /// Set the directory image paths are resolved against when rendering.
    pub fn with_image_root(mut self, root: impl Into<std::path::PathBuf>) -> Self {
        self.render_options = self.render_options.with_image_root(root);
        self
    }

    /// Skip the image existence check when rendering Markdown.
    pub fn without_image_check(mut self) -> Self {
        self.render_options = self.render_options.with_verify_images(false);
        self
    }

    /// Render images as HTML tags of a fixed width.
    pub fn with_html_images(mut self, width: u32) -> Self {
        self.render_options = self.render_options.with_html_images(width);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.extract_options = self.extract_options.sequential();
        self
    }

    /// Replace the extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Parse a document from a backend and return a result wrapper.
    pub fn parse<B: PdfBackend>(self, backend: B) -> Result<PapertreeResult> {
        let parser = PaperParser::with_options(backend, self.extract_options);
        let (document, stats) = parser.parse_with_stats()?;
        Ok(PapertreeResult {
            document,
            stats,
            render_options: self.render_options,
        })
    }

    /// Parse already normalized text.
    pub fn parse_text(self, text: &str) -> Result<PapertreeResult> {
        let extractor = parser::SectionExtractor::with_options(&self.extract_options)?;
        let (document, stats) = extractor.extract_with_stats(text, &[]);
        Ok(PapertreeResult {
            document,
            stats,
            render_options: self.render_options,
        })
    }

    /// Parse several independent documents.
    pub fn parse_batch<B: PdfBackend + Sync>(&self, backends: &[B]) -> Vec<Result<Document>> {
        parser::extract_documents(backends, &self.extract_options)
    }
}

impl Default for Papertree {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of extracting a section tree.
pub struct PapertreeResult {
    /// The extracted document
    pub document: Document,
    /// What each pipeline stage kept
    pub stats: ExtractionStats,
    /// Render options to use
    render_options: RenderOptions,
}

impl PapertreeResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Translate the document, keeping stats and render options.
    pub fn translate<T: Translator + ?Sized>(&self, translator: &T) -> Result<PapertreeResult> {
        Ok(PapertreeResult {
            document: translate_document(&self.document, translator)?,
            stats: self.stats.clone(),
            render_options: self.render_options.clone(),
        })
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the extraction statistics.
    pub fn stats(&self) -> &ExtractionStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAPER: &str = "A Paper Title\n1 Introduction\nBody text here.\n2 Background\nMore text.\n2.1 Prior Work\nEven more.\nReferences\n[1] foo";

    #[test]
    fn test_papertree_builder() {
        let builder = Papertree::new()
            .with_gap_policy(GapPolicy::Off)
            .with_stop_marker("Bibliography")
            .without_image_check()
            .sequential();

        assert_eq!(builder.extract_options.gap_policy, GapPolicy::Off);
        assert_eq!(builder.extract_options.stop_marker, "Bibliography");
        assert!(!builder.render_options.verify_images);
        assert!(!builder.extract_options.parallel);
    }

    #[test]
    fn test_papertree_builder_default() {
        let builder = Papertree::default();
        assert!(builder.render_options.verify_images);
        assert_eq!(builder.extract_options.gap_policy, GapPolicy::TopLevel);
    }

    #[test]
    fn test_parse_text() {
        let doc = parse_text(PAPER);
        assert_eq!(doc.total_sections(), 3);
        assert_eq!(doc.sections[1].subsections[0].title, "2.1 Prior Work");
    }

    #[test]
    fn test_parse_text_result() {
        let result = Papertree::new().parse_text(PAPER).unwrap();
        assert_eq!(result.stats().heading_count, 3);
        assert_eq!(result.stats().section_count, 3);
        assert!(!result.to_text().contains("[1] foo"));
        let json = result.to_json(JsonFormat::Compact).unwrap();
        assert_eq!(Document::from_json(&json).unwrap(), result.document);
    }

    #[test]
    fn test_parse_blocks() {
        let doc = parse_blocks(vec![
            (0usize, 0usize, "A Paper Title"),
            (0, 1, "1 Introduction"),
            (0, 2, "Hello there."),
        ])
        .unwrap();
        assert_eq!(doc.sections[0].content[0].text.as_deref(), Some("Hello there."));
    }

    #[test]
    fn test_parse_empty_backend() {
        let doc = parse_backend(MemoryBackend::new()).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_result_translate() {
        let result = Papertree::new().parse_text(PAPER).unwrap();
        let upper = |text: &str| -> Result<String> { Ok(text.to_uppercase()) };
        let translated = result.translate(&upper).unwrap();
        assert_eq!(translated.document.sections[0].title, "1 INTRODUCTION");
        assert_eq!(translated.stats, result.stats);
    }

    #[test]
    fn test_json_formats() {
        let result = Papertree::new().parse_text(PAPER).unwrap();
        let pretty = result.to_json(JsonFormat::Pretty).unwrap();
        let compact = result.to_json(JsonFormat::Compact).unwrap();

        assert!(pretty.starts_with("[\n  {\n    \"title\": \"1 Introduction\""));
        assert!(compact.starts_with("[{\"title\":\"1 Introduction\""));
        assert!(!compact.contains('\n'));
        assert_eq!(JsonFormat::default(), JsonFormat::Pretty);
    }

    #[test]
    fn test_heading_in_first_block_is_missed() {
        let doc = parse_blocks(vec![
            (0usize, 0usize, "1 Introduction"),
            (0, 1, "Hello world text."),
            (0, 2, "2 Method"),
            (0, 3, "Method body."),
        ])
        .unwrap();
        let titles: Vec<_> = doc.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["2 Method"]);
        assert!(!doc.to_markdown().contains("Hello world text."));
    }
}
