//! PDF backend abstraction layer.
//!
//! The crate never decodes PDFs itself. A backend hands over the text
//! blocks and embedded images it extracted, and everything downstream
//! works on those materialized values.

use crate::error::{Error, Result};

/// One contiguous text unit as segmented by the PDF backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    /// Page index (0-based)
    pub page: usize,
    /// Block index within the page (0-based)
    pub index: usize,
    /// Raw block text
    pub text: String,
}

impl TextBlock {
    /// Create a new text block.
    pub fn new(page: usize, index: usize, text: impl Into<String>) -> Self {
        Self {
            page,
            index,
            text: text.into(),
        }
    }
}

impl<S: Into<String>> From<(usize, usize, S)> for TextBlock {
    fn from((page, index, text): (usize, usize, S)) -> Self {
        Self::new(page, index, text)
    }
}

/// An image blob pulled out of the PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    /// Page index (0-based)
    pub page: usize,
    /// Image index within the page (0-based)
    pub index: usize,
    /// Format tag / file extension (e.g. "png", "jpeg")
    pub format: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

impl ExtractedImage {
    /// Create a new extracted image.
    pub fn new(page: usize, index: usize, format: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            page,
            index,
            format: format.into(),
            data,
        }
    }

    /// File name the image is stored under: `image_{page}_{index}.{format}`.
    pub fn file_name(&self) -> String {
        format!("image_{}_{}.{}", self.page, self.index, self.format)
    }

    /// Path under `dir` used to reference the image from rendered output.
    pub fn relative_path(&self, dir: &str) -> String {
        let dir = dir.trim_end_matches('/');
        if dir.is_empty() {
            self.file_name()
        } else {
            format!("{}/{}", dir, self.file_name())
        }
    }

    /// Size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Reference paths for `images` under `dir`, indexed like `images`.
pub fn image_paths(images: &[ExtractedImage], dir: &str) -> Vec<String> {
    images.iter().map(|image| image.relative_path(dir)).collect()
}

/// Abstract interface to a PDF text-extraction backend.
///
/// Implementations return blocks in reading order: by page, then by
/// block index within the page.
pub trait PdfBackend {
    /// Return all text blocks of the document.
    fn extract_text(&self) -> Result<Vec<TextBlock>>;

    /// Return all embedded images of the document.
    fn extract_images(&self) -> Result<Vec<ExtractedImage>>;
}

impl<B: PdfBackend + ?Sized> PdfBackend for &B {
    fn extract_text(&self) -> Result<Vec<TextBlock>> {
        (**self).extract_text()
    }

    fn extract_images(&self) -> Result<Vec<ExtractedImage>> {
        (**self).extract_images()
    }
}

// ---------------------------------------------------------------------------
// MemoryBackend: blocks and images already materialized by the caller
// ---------------------------------------------------------------------------

/// [`PdfBackend`] over blocks and images the caller already holds.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    blocks: Vec<TextBlock>,
    images: Vec<ExtractedImage>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend from `(page, block, text)` tuples.
    pub fn from_blocks<I, T>(blocks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TextBlock>,
    {
        let mut blocks: Vec<TextBlock> = blocks.into_iter().map(Into::into).collect();
        blocks.sort_by_key(|b| (b.page, b.index));
        Self {
            blocks,
            images: Vec::new(),
        }
    }

    /// Create a backend holding the pages of an already extracted text,
    /// one block per page.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_blocks(
            pages
                .into_iter()
                .enumerate()
                .map(|(page, text)| TextBlock::new(page, 0, text)),
        )
    }

    /// Add a text block, keeping reading order.
    pub fn add_block(&mut self, block: TextBlock) {
        let pos = self
            .blocks
            .partition_point(|b| (b.page, b.index) <= (block.page, block.index));
        self.blocks.insert(pos, block);
    }

    /// Add an image.
    pub fn add_image(&mut self, image: ExtractedImage) {
        self.images.push(image);
    }

    /// Builder form of [`MemoryBackend::add_image`].
    pub fn with_image(mut self, image: ExtractedImage) -> Self {
        self.add_image(image);
        self
    }

    /// Number of pages seen in the blocks.
    pub fn page_count(&self) -> usize {
        self.blocks.last().map(|b| b.page + 1).unwrap_or(0)
    }
}

impl PdfBackend for MemoryBackend {
    fn extract_text(&self) -> Result<Vec<TextBlock>> {
        Ok(self.blocks.clone())
    }

    fn extract_images(&self) -> Result<Vec<ExtractedImage>> {
        for image in &self.images {
            if image.format.is_empty() {
                return Err(Error::Backend(format!(
                    "image {} on page {} has no format tag",
                    image.index, image.page
                )));
            }
        }
        Ok(self.images.clone())
    }
}
