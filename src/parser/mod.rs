//! Paper parsing module: backend blocks to section tree.

mod backend;
mod classifier;
mod heading;
mod normalize;
mod numeral;
mod options;
mod paper_parser;
mod segment;
mod sequence;
mod stats;

pub use backend::{image_paths, ExtractedImage, MemoryBackend, PdfBackend, TextBlock};
pub use classifier::{is_likely_table_or_figure, BlockClassifier, ClassifierConfig, NoiseReason};
pub use heading::{
    find_heading_candidates, HeadingCandidate, HeadingFilterConfig, HeadingScanner,
    TitleRejection,
};
pub use normalize::{normalize_text, NormalizeOptions, TextNormalizer};
pub use numeral::Numeral;
pub use options::ExtractOptions;
pub use paper_parser::{extract_documents, extract_sections, PaperParser, SectionExtractor};
pub use segment::{nest_by_depth, DocumentBuilder, SectionText, Segmenter};
pub use sequence::{
    is_large_gap, is_valid_transition, validate_sequence, GapPolicy, SequenceRejection,
    SequenceValidator,
};
pub use stats::ExtractionStats;
