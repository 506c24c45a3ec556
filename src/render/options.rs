//! Rendering options and configuration.

use std::path::{Path, PathBuf};

/// Options for rendering a document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Check that every referenced image exists before rendering
    pub verify_images: bool,

    /// Directory image paths are resolved against (defaults to the
    /// current directory)
    pub image_root: Option<PathBuf>,

    /// Emit images as HTML `<img>` tags of this width instead of
    /// Markdown links
    pub html_image_width: Option<u32>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the image existence check.
    pub fn with_verify_images(mut self, verify: bool) -> Self {
        self.verify_images = verify;
        self
    }

    /// Set the directory image paths are resolved against.
    pub fn with_image_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.image_root = Some(root.into());
        self
    }

    /// Render images as HTML tags with a fixed pixel width.
    pub fn with_html_images(mut self, width: u32) -> Self {
        self.html_image_width = Some(width);
        self
    }

    /// Location on disk of an image referenced as `path`.
    pub fn resolve_image(&self, path: &str) -> PathBuf {
        match &self.image_root {
            Some(root) => root.join(path),
            None => Path::new(path).to_path_buf(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            verify_images: true,
            image_root: None,
            html_image_width: None,
        }
    }
}
