//! Rendering module for converting section trees to and from output formats.

mod images;
mod json;
mod markdown;
mod options;
mod text;

pub use images::{
    images_to_html, substitute_image_tags, ImageCursor, ImageTagger, TextPiece,
    DEFAULT_IMAGE_TAG_PATTERN,
};
pub use json::{from_json, to_json, JsonFormat};
pub use markdown::{from_markdown, to_markdown, MarkdownRenderer};
pub use options::RenderOptions;
pub use text::to_text;
