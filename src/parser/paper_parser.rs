//! Section tree extraction from backend output.
//!
//! [`SectionExtractor`] runs the text-only part of the pipeline (headings,
//! validation, segmentation, nesting) on already normalized text, so it
//! can be driven without any PDF. [`PaperParser`] puts a [`PdfBackend`]
//! in front of it.

use rayon::prelude::*;

use crate::error::Result;
use crate::model::Document;
use crate::render::ImageTagger;

use super::backend::{image_paths, PdfBackend, TextBlock};
use super::classifier::BlockClassifier;
use super::heading::{HeadingCandidate, HeadingScanner};
use super::normalize::TextNormalizer;
use super::options::ExtractOptions;
use super::segment::{DocumentBuilder, SectionText, Segmenter};
use super::sequence::SequenceValidator;
use super::stats::ExtractionStats;

/// Heading detection, validation and segmentation over normalized text.
pub struct SectionExtractor {
    scanner: HeadingScanner,
    validator: SequenceValidator,
    segmenter: Segmenter,
    tagger: ImageTagger,
}

impl SectionExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self {
            scanner: HeadingScanner::new(),
            validator: SequenceValidator::new(),
            segmenter: Segmenter::new(),
            tagger: ImageTagger::new(),
        }
    }

    /// Create an extractor from extraction options.
    ///
    /// Fails only if the image placeholder pattern is not a valid regex.
    pub fn with_options(options: &ExtractOptions) -> Result<Self> {
        Ok(Self {
            scanner: HeadingScanner::with_filter(options.heading_filter.clone()),
            validator: SequenceValidator::with_policy(options.gap_policy),
            segmenter: Segmenter::with_stop_marker(options.stop_marker.clone()),
            tagger: ImageTagger::with_pattern(&options.image_tag_pattern)?,
        })
    }

    /// Validated headings of `text`, in numeral order.
    pub fn headings(&self, text: &str) -> Vec<HeadingCandidate> {
        self.validator.validate(self.scanner.find(text))
    }

    /// Per-section raw text of `text`.
    pub fn sections(&self, text: &str) -> Vec<SectionText> {
        let headings = self.headings(text);
        self.segmenter.segment(text, &headings)
    }

    /// Build the section tree of `text`, resolving image placeholders
    /// against `image_paths` by order of appearance.
    pub fn extract(&self, text: &str, image_paths: &[String]) -> Document {
        let mut stats = ExtractionStats::new();
        self.run(text, image_paths, &mut stats)
    }

    /// Like [`SectionExtractor::extract`], also reporting stage counts.
    pub fn extract_with_stats(&self, text: &str, image_paths: &[String]) -> (Document, ExtractionStats) {
        let mut stats = ExtractionStats::new();
        let doc = self.run(text, image_paths, &mut stats);
        (doc, stats)
    }

    fn run(
        &self,
        text: &str,
        image_paths: &[String],
        stats: &mut ExtractionStats,
    ) -> Document {
        let candidates = self.scanner.scan(text);
        stats.candidate_count = candidates.len() as u32;

        let filtered = self.scanner.filter(candidates);
        stats.filtered_candidate_count = filtered.len() as u32;

        let headings = self.validator.validate(filtered);
        stats.heading_count = headings.len() as u32;
        if headings.is_empty() {
            log::debug!("No section headings found; document is empty");
        }

        let sections = self.segmenter.segment(text, &headings);
        let doc = DocumentBuilder::new(&self.tagger, image_paths).build(sections);
        stats.count_document(&doc);
        doc
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the section tree of already normalized text.
pub fn extract_sections(text: &str) -> Document {
    SectionExtractor::new().extract(text, &[])
}

/// Paper parser: backend output in, section tree out.
pub struct PaperParser<B> {
    backend: B,
    options: ExtractOptions,
}

impl<B: PdfBackend> PaperParser<B> {
    /// Create a parser with default options.
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, ExtractOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(backend: B, options: ExtractOptions) -> Self {
        Self { backend, options }
    }

    /// The options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Prose text of the document: noise blocks dropped, whitespace
    /// collapsed, line-break hyphenation repaired.
    pub fn extract_text(&self) -> Result<String> {
        let mut stats = ExtractionStats::new();
        self.extract_text_with_stats(&mut stats)
    }

    fn extract_text_with_stats(&self, stats: &mut ExtractionStats) -> Result<String> {
        let blocks = self.backend.extract_text()?;
        let classifier = BlockClassifier::with_config(self.options.classifier.clone());

        let prose: Vec<&TextBlock> = blocks
            .iter()
            .filter(|block| match classifier.noise_reason(block.text.trim()) {
                Some(reason) => {
                    log::debug!(
                        "Dropping block {} on page {} ({:?})",
                        block.index,
                        block.page,
                        reason
                    );
                    false
                }
                None => true,
            })
            .collect();

        stats.block_count = blocks.len() as u32;
        stats.noise_block_count = (blocks.len() - prose.len()) as u32;
        log::debug!(
            "Kept {} of {} blocks as prose",
            prose.len(),
            blocks.len()
        );

        let normalizer = TextNormalizer::new(self.options.normalize.clone());
        Ok(normalizer.normalize_blocks(prose))
    }

    /// Reference paths of the document's images, indexed like the
    /// backend's image list. Empty when image extraction is disabled.
    pub fn extract_image_paths(&self) -> Result<Vec<String>> {
        if !self.options.extract_images {
            return Ok(Vec::new());
        }
        let images = self.backend.extract_images()?;
        Ok(image_paths(&images, &self.options.image_dir))
    }

    /// Per-section raw text, in numeral order.
    pub fn extract_sections(&self) -> Result<Vec<SectionText>> {
        let text = self.extract_text()?;
        let extractor = SectionExtractor::with_options(&self.options)?;
        Ok(extractor.sections(&text))
    }

    /// Parse the document into a section tree.
    pub fn parse(&self) -> Result<Document> {
        self.parse_with_stats().map(|(doc, _)| doc)
    }

    /// Parse the document and report what each stage kept.
    pub fn parse_with_stats(&self) -> Result<(Document, ExtractionStats)> {
        let mut stats = ExtractionStats::new();
        let extractor = SectionExtractor::with_options(&self.options)?;
        let text = self.extract_text_with_stats(&mut stats)?;
        let paths = self.extract_image_paths()?;
        let doc = extractor.run(&text, &paths, &mut stats);
        log::debug!(
            "Extracted {} sections ({} headings from {} candidates)",
            stats.section_count,
            stats.heading_count,
            stats.candidate_count
        );
        Ok((doc, stats))
    }
}

/// Parse several independent documents, in parallel when
/// `options.parallel` is set. Results keep the order of `backends`.
pub fn extract_documents<B>(backends: &[B], options: &ExtractOptions) -> Vec<Result<Document>>
where
    B: PdfBackend + Sync,
{
    let parse = |backend: &B| PaperParser::with_options(backend, options.clone()).parse();
    if options.parallel {
        backends.par_iter().map(parse).collect()
    } else {
        backends.iter().map(parse).collect()
    }
}
