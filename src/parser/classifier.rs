//! Block classification: body prose versus table/figure noise.
//!
//! Tables and figure labels come out of the backend as blocks full of
//! digits, very short lines, or long runs of one-word lines. Any single
//! heuristic firing is enough to exclude the block from the prose text.

/// Block classifier configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Digit density above which a block is noise (0.0-1.0)
    pub max_digit_density: f32,
    /// Newline count above which a block is noise
    pub max_newlines: usize,
    /// Blocks with more characters than this are checked for line length
    pub min_chars_for_line_length: usize,
    /// Average line length below which a block is noise
    pub min_average_line_length: f32,
    /// Consecutive one-word lines above which a block is noise
    pub max_single_word_lines: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_digit_density: 0.3,
            max_newlines: 10,
            min_chars_for_line_length: 10,
            min_average_line_length: 5.0,
            max_single_word_lines: 5,
        }
    }
}

/// Which heuristic flagged a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseReason {
    /// Too many digit characters
    DigitDensity,
    /// Too many line breaks
    TooManyNewlines,
    /// Lines too short on average
    ShortLines,
    /// Too many consecutive one-word lines
    SingleWordRun,
}

/// Classifies backend blocks as prose or noise.
#[derive(Debug, Clone, Default)]
pub struct BlockClassifier {
    config: ClassifierConfig,
}

impl BlockClassifier {
    /// Create a classifier with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom thresholds.
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Check if the block is likely part of a table or figure.
    pub fn is_noise(&self, text: &str) -> bool {
        self.noise_reason(text).is_some()
    }

    /// Return the first heuristic that flags `text`, if any.
    pub fn noise_reason(&self, text: &str) -> Option<NoiseReason> {
        let config = &self.config;
        let total_chars = text.chars().count();

        if total_chars > 0 {
            let digits = text.chars().filter(|c| c.is_ascii_digit()).count();
            let density = digits as f32 / total_chars as f32;
            if density > config.max_digit_density {
                return Some(NoiseReason::DigitDensity);
            }
        }

        let newline_count = text.matches('\n').count();
        if newline_count > config.max_newlines {
            return Some(NoiseReason::TooManyNewlines);
        }

        if total_chars > config.min_chars_for_line_length {
            let average = total_chars as f32 / (newline_count + 1) as f32;
            if average < config.min_average_line_length {
                return Some(NoiseReason::ShortLines);
            }
        }

        let mut run = 0;
        for line in text.split('\n') {
            if line.split_whitespace().count() <= 1 {
                run += 1;
            } else {
                run = 0;
            }
            if run > config.max_single_word_lines {
                return Some(NoiseReason::SingleWordRun);
            }
        }

        None
    }
}

/// Check a block against the default thresholds.
pub fn is_likely_table_or_figure(text: &str) -> bool {
    BlockClassifier::new().is_noise(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_heavy_block_is_noise() {
        let block = format!("{}{}", "1".repeat(200), "a".repeat(50));
        assert_eq!(block.chars().count(), 250);
        assert_eq!(
            BlockClassifier::new().noise_reason(&block),
            Some(NoiseReason::DigitDensity)
        );
    }

    #[test]
    fn test_prose_block_is_kept() {
        let block = "Transformers replaced recurrence with attention in sequence models.\nThe results were strong overall.";
        assert!(block.chars().count() >= 90);
        assert!(!is_likely_table_or_figure(block));
    }

    #[test]
    fn test_many_newlines_is_noise() {
        let block = (0..12)
            .map(|_| "several words on this line")
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(
            BlockClassifier::new().noise_reason(&block),
            Some(NoiseReason::TooManyNewlines)
        );
    }

    #[test]
    fn test_short_lines_is_noise() {
        let block = "ab\ncd\nef\ngh";
        assert_eq!(
            BlockClassifier::new().noise_reason(block),
            Some(NoiseReason::ShortLines)
        );
    }

    #[test]
    fn test_short_block_skips_line_length_check() {
        // 8 chars, below the line-length threshold
        assert!(!is_likely_table_or_figure("ab cd ef"));
    }

    #[test]
    fn test_single_word_run_is_noise() {
        let block = "Model\nAccuracy\nRecall\nPrecision\nLatency\nThroughput";
        assert_eq!(
            BlockClassifier::new().noise_reason(block),
            Some(NoiseReason::SingleWordRun)
        );
    }

    #[test]
    fn test_single_word_run_resets() {
        let block = "Model\nAccuracy\nRecall\nPrecision\nthen a longer line\nLatency\nThroughput";
        assert!(!is_likely_table_or_figure(block));
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = BlockClassifier::with_config(ClassifierConfig {
            max_digit_density: 0.9,
            ..Default::default()
        });
        let block = format!("{}{}", "7".repeat(50), " words ".repeat(10));
        assert!(!classifier.is_noise(&block));
        assert!(is_likely_table_or_figure(&block));
    }
}
