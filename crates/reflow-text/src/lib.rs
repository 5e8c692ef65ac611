use thiserror::Error;

pub mod config;
pub mod dates;
pub mod hyphenation;
pub mod normalize;
pub mod pages;
pub mod reconstruct;
pub mod sections;
pub mod spacing;
pub mod symbols;

pub use config::{ListOverride, NormalizerConfig, NormalizerConfigBuilder};
pub use normalize::{Normalizer, Step, normalize};
pub use pages::{DEFAULT_PAGE_SEPARATOR, PageAssembler, TextPipeline};
pub use reconstruct::{LINE_THRESHOLD, LineReconstructor, PARAGRAPH_THRESHOLD, reconstruct_lines};
// Re-export the data model from core (canonical definitions live there)
pub use reflow_core::{Line, PositionedFragment};

/// Errors raised while building a normalizer. Normalization itself never fails.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("unknown normalization step: {0}")]
    UnknownStep(String),
}
