use std::collections::BTreeMap;

use reflow_core::PositionedFragment;

use crate::normalize::Normalizer;
use crate::reconstruct::LineReconstructor;

pub const DEFAULT_PAGE_SEPARATOR: &str = "\n\n";

/// Buffers per-page results that may complete out of order and joins them
/// in page order.
#[derive(Debug, Clone)]
pub struct PageAssembler {
    separator: String,
    pages: BTreeMap<usize, String>,
}

impl Default for PageAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SEPARATOR)
    }
}

impl PageAssembler {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            pages: BTreeMap::new(),
        }
    }

    /// Record the text for a zero-based page. Re-inserting an index replaces
    /// the earlier text.
    pub fn insert(&mut self, page_index: usize, text: String) {
        if self.pages.insert(page_index, text).is_some() {
            tracing::debug!(page = page_index, "replaced page text");
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Join pages in ascending index order, skipping empty ones.
    pub fn finish(self) -> String {
        self.pages
            .into_values()
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

/// Reconstruct-then-normalize for whole pages and documents.
#[derive(Debug, Clone)]
pub struct TextPipeline {
    reconstructor: LineReconstructor,
    normalizer: Normalizer,
    separator: String,
    raw: bool,
}

impl Default for TextPipeline {
    fn default() -> Self {
        Self::new(Normalizer::default())
    }
}

impl TextPipeline {
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            reconstructor: LineReconstructor::new(),
            normalizer,
            separator: DEFAULT_PAGE_SEPARATOR.to_string(),
            raw: false,
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Skip normalization and emit reconstructed text as-is.
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// A fresh assembler using this pipeline's page separator.
    pub fn assembler(&self) -> PageAssembler {
        PageAssembler::new(self.separator.clone())
    }

    pub fn process_page(&self, fragments: &[PositionedFragment]) -> String {
        let text = self.reconstructor.reconstruct(fragments);
        if self.raw {
            text
        } else {
            self.normalizer.normalize(&text)
        }
    }

    pub fn process_pages(&self, pages: &[Vec<PositionedFragment>]) -> String {
        let mut assembler = self.assembler();
        for (index, fragments) in pages.iter().enumerate() {
            assembler.insert(index, self.process_page(fragments));
        }
        assembler.finish()
    }
}
