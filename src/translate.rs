//! Section-tree translation through a pluggable text translator.
//!
//! A [`Translator`] turns one piece of text into another; the crate ships
//! no network client. [`translate_document`] walks a tree and swaps every
//! section title and paragraph text for its translation. The shape of the
//! tree (section count, nesting, element order) never changes.
//!
//! # Example
//!
//! ```
//! use papertree::model::{ContentElement, Document, Section};
//! use papertree::translate::translate_document;
//!
//! let mut section = Section::new("1 Introduction");
//! section.add_content(ContentElement::paragraph("hello"));
//! let doc = Document::from_sections(vec![section]);
//!
//! let upper = |text: &str| -> papertree::Result<String> { Ok(text.to_uppercase()) };
//! let translated = translate_document(&doc, &upper).unwrap();
//! assert_eq!(translated.sections[0].title, "1 INTRODUCTION");
//! ```

use crate::error::Result;
use crate::model::{ContentElement, Document, Section};

/// Trait for text translators.
///
/// Implementations report failures as [`crate::Error::Translation`].
pub trait Translator: Send + Sync {
    /// Translate a single piece of text.
    fn translate(&self, text: &str) -> Result<String>;

    /// Name of this translator, for logging.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Translator for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn translate(&self, text: &str) -> Result<String> {
        self(text)
    }
}

/// Translator returning its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "identity"
    }
}

/// Translate every title and paragraph of `doc`.
///
/// A title that translates to an empty string keeps its source text.
/// Images, unknown elements and metadata are copied as they are. The
/// first translator failure aborts the whole pass.
pub fn translate_document<T: Translator + ?Sized>(doc: &Document, translator: &T) -> Result<Document> {
    log::debug!(
        "Translating {} sections with {}",
        doc.total_sections(),
        translator.name()
    );
    let sections = doc
        .sections
        .iter()
        .map(|section| translate_section(section, translator))
        .collect::<Result<Vec<_>>>()?;
    Ok(Document::from_sections(sections))
}

fn translate_section<T: Translator + ?Sized>(section: &Section, translator: &T) -> Result<Section> {
    let translated = translator.translate(&section.title)?;
    let title = if translated.trim().is_empty() {
        log::warn!("Empty translation for title {:?}; keeping source", section.title);
        section.title.clone()
    } else {
        translated
    };

    let content = section
        .content
        .iter()
        .map(|element| translate_element(element, translator))
        .collect::<Result<Vec<_>>>()?;

    let subsections = section
        .subsections
        .iter()
        .map(|sub| translate_section(sub, translator))
        .collect::<Result<Vec<_>>>()?;

    Ok(Section {
        title,
        content,
        subsections,
    })
}

fn translate_element<T: Translator + ?Sized>(
    element: &ContentElement,
    translator: &T,
) -> Result<ContentElement> {
    let mut translated = element.clone();
    if element.is_paragraph() {
        if let Some(text) = element.text.as_deref().filter(|t| !t.is_empty()) {
            translated.text = Some(translator.translate(text)?);
        }
    }
    Ok(translated)
}
