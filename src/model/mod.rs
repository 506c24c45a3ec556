//! Document model types.
//!
//! A [`Document`] is a tree of [`Section`]s whose bodies are made of
//! [`ContentElement`]s. The tree is built by the extraction pipeline or
//! by reading Markdown/JSON, and is a plain value afterwards.

mod document;
mod element;
mod section;

pub use document::Document;
pub use element::{ContentElement, ElementType};
pub use section::Section;
