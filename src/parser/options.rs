//! Extraction options and configuration.

use super::{ClassifierConfig, GapPolicy, HeadingFilterConfig, NormalizeOptions};
use crate::render::DEFAULT_IMAGE_TAG_PATTERN;

/// Options for extracting a section tree from backend output.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Block classifier thresholds
    pub classifier: ClassifierConfig,

    /// Text normalization options
    pub normalize: NormalizeOptions,

    /// Heading title shape rules
    pub heading_filter: HeadingFilterConfig,

    /// Numbering gap strictness
    pub gap_policy: GapPolicy,

    /// Line that ends the final section (bibliography start)
    pub stop_marker: String,

    /// Directory image paths are referenced under
    pub image_dir: String,

    /// Pattern for image placeholders in the text
    pub image_tag_pattern: String,

    /// Whether to extract images at all
    pub extract_images: bool,

    /// Whether batch extraction runs documents in parallel
    pub parallel: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set classifier thresholds.
    pub fn with_classifier(mut self, config: ClassifierConfig) -> Self {
        self.classifier = config;
        self
    }

    /// Set normalization options.
    pub fn with_normalize(mut self, options: NormalizeOptions) -> Self {
        self.normalize = options;
        self
    }

    /// Set heading title rules.
    pub fn with_heading_filter(mut self, filter: HeadingFilterConfig) -> Self {
        self.heading_filter = filter;
        self
    }

    /// Set the gap policy.
    pub fn with_gap_policy(mut self, policy: GapPolicy) -> Self {
        self.gap_policy = policy;
        self
    }

    /// Set the bibliography marker line.
    pub fn with_stop_marker(mut self, marker: impl Into<String>) -> Self {
        self.stop_marker = marker.into();
        self
    }

    /// Set the image directory used in image paths.
    pub fn with_image_dir(mut self, dir: impl Into<String>) -> Self {
        self.image_dir = dir.into();
        self
    }

    /// Set the image placeholder pattern.
    pub fn with_image_tag_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.image_tag_pattern = pattern.into();
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.extract_images = extract;
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            normalize: NormalizeOptions::default(),
            heading_filter: HeadingFilterConfig::default(),
            gap_policy: GapPolicy::default(),
            stop_marker: "References".to_string(),
            image_dir: "images".to_string(),
            image_tag_pattern: DEFAULT_IMAGE_TAG_PATTERN.to_string(),
            extract_images: true,
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new()
            .with_gap_policy(GapPolicy::AllLevels)
            .with_stop_marker("Bibliography")
            .with_image_dir("paper_images")
            .with_images(false)
            .sequential();

        assert_eq!(options.gap_policy, GapPolicy::AllLevels);
        assert_eq!(options.stop_marker, "Bibliography");
        assert_eq!(options.image_dir, "paper_images");
        assert!(!options.extract_images);
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.gap_policy, GapPolicy::TopLevel);
        assert_eq!(options.stop_marker, "References");
        assert_eq!(options.heading_filter.min_title_len, 5);
        assert_eq!(options.heading_filter.max_title_len, 50);
        assert!(options.extract_images);
        assert!(options.parallel);
    }
}
