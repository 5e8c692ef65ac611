use std::path::Path;

use mupdf::{Document, Page, TextPageFlags};

use reflow_core::{BackendError, FragmentSource, PositionedFragment, expand_ligatures};

/// MuPDF-based implementation of [`FragmentSource`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that the reconstruction and normalization crates
/// do not transitively depend on it.
///
/// Each MuPDF text line is split at whitespace into word fragments. `x` is
/// the left edge of the word's first glyph; `y` is the glyph baseline
/// flipped so that larger values are higher on the page.
///
/// By default, blocks in the bottom 5% of each page (footers) and top 4%
/// (headers) are excluded so running heads and page numbers do not leak
/// into paragraph text.
pub struct MupdfSource {
    /// Fraction of page height from bottom to exclude as footer (0.0–1.0).
    /// Default 0.05. `None` disables footer exclusion.
    footer_exclusion_ratio: Option<f32>,
    /// Fraction of page height from top to exclude as header (0.0–1.0).
    /// Default 0.04. `None` disables header exclusion.
    header_exclusion_ratio: Option<f32>,
}

impl Default for MupdfSource {
    fn default() -> Self {
        Self {
            footer_exclusion_ratio: Some(0.05),
            header_exclusion_ratio: Some(0.04),
        }
    }
}

impl MupdfSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footer exclusion ratio. Pass `0.0` to disable.
    pub fn with_footer_exclusion(mut self, ratio: f32) -> Self {
        self.footer_exclusion_ratio = if ratio > 0.0 { Some(ratio) } else { None };
        self
    }

    /// Set the header exclusion ratio. Pass `0.0` to disable.
    pub fn with_header_exclusion(mut self, ratio: f32) -> Self {
        self.header_exclusion_ratio = if ratio > 0.0 { Some(ratio) } else { None };
        self
    }

    pub fn footer_exclusion(&self) -> Option<f32> {
        self.footer_exclusion_ratio
    }

    pub fn header_exclusion(&self) -> Option<f32> {
        self.header_exclusion_ratio
    }

    fn open(path: &Path) -> Result<Document, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;
        Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))
    }

    fn page_words(&self, page: &Page) -> Result<Vec<PositionedFragment>, BackendError> {
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

        // MuPDF's page space has y growing downward.
        let page_bounds = page
            .bounds()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        let page_height = page_bounds.y1 - page_bounds.y0;

        let header_threshold = self
            .header_exclusion_ratio
            .map(|r| page_bounds.y0 + page_height * r);
        let footer_threshold = self
            .footer_exclusion_ratio
            .map(|r| page_bounds.y1 - page_height * r);

        let mut fragments = Vec::new();
        for block in text_page.blocks() {
            let block_bounds = block.bounds();

            // Skip blocks entirely within the header region
            if let Some(threshold) = header_threshold
                && block_bounds.y1 <= threshold
            {
                continue;
            }

            // Skip blocks whose top edge is in the footer region
            if let Some(threshold) = footer_threshold
                && block_bounds.y0 >= threshold
            {
                continue;
            }

            for line in block.lines() {
                let mut word = WordBuilder::default();
                for ch in line.chars() {
                    let c = ch.char().unwrap_or('\u{FFFD}');
                    if c.is_whitespace() {
                        word.flush_into(&mut fragments);
                        continue;
                    }
                    let quad = ch.quad();
                    let left = quad.ul.x.min(quad.ll.x);
                    let baseline = quad.ll.y.max(quad.lr.y);
                    word.push(c, left, page_bounds.y1 - baseline);
                }
                word.flush_into(&mut fragments);
            }
        }

        Ok(fragments)
    }
}

/// Accumulates glyphs of one word; position comes from its first glyph.
#[derive(Default)]
struct WordBuilder {
    text: String,
    x: f32,
    y: f32,
}

impl WordBuilder {
    fn push(&mut self, c: char, x: f32, y: f32) {
        if self.text.is_empty() {
            self.x = x;
            self.y = y;
        }
        self.text.push(c);
    }

    fn flush_into(&mut self, out: &mut Vec<PositionedFragment>) {
        if self.text.is_empty() {
            return;
        }
        let text = expand_ligatures(&std::mem::take(&mut self.text));
        out.push(PositionedFragment::new(text, self.x, self.y));
    }
}

/// Bounds-check a page index and convert it to MuPDF's `i32` page number.
fn checked_page_index(page_index: usize, count: usize) -> Result<i32, BackendError> {
    let out_of_range = || BackendError::PageOutOfRange {
        index: page_index,
        count,
    };
    if page_index >= count {
        return Err(out_of_range());
    }
    i32::try_from(page_index).map_err(|_| out_of_range())
}

impl FragmentSource for MupdfSource {
    fn page_count(&self, path: &Path) -> Result<usize, BackendError> {
        let document = Self::open(path)?;
        let count = document
            .page_count()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn page_fragments(
        &self,
        path: &Path,
        page_index: usize,
    ) -> Result<Vec<PositionedFragment>, BackendError> {
        let document = Self::open(path)?;
        let count = document
            .page_count()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        let count = usize::try_from(count).unwrap_or(0);
        let mupdf_index = checked_page_index(page_index, count)?;

        let page = document
            .load_page(mupdf_index)
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        let fragments = self.page_words(&page)?;
        tracing::debug!(page = page_index, fragments = fragments.len(), "extracted page fragments");
        Ok(fragments)
    }

    /// Opens the document once and walks every page.
    fn document_fragments(&self, path: &Path) -> Result<Vec<Vec<PositionedFragment>>, BackendError> {
        let document = Self::open(path)?;
        let mut pages = Vec::new();
        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            pages.push(self.page_words(&page)?);
        }
        tracing::debug!(pages = pages.len(), "extracted document fragments");
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_builder_keeps_first_glyph_position() {
        let mut word = WordBuilder::default();
        let mut out = Vec::new();
        word.push('\u{FB01}', 10.0, 700.0);
        word.push('n', 14.0, 700.5);
        word.push('d', 18.0, 700.0);
        word.flush_into(&mut out);
        word.flush_into(&mut out);
        assert_eq!(out, vec![PositionedFragment::new("find", 10.0, 700.0)]);
    }

    #[test]
    fn test_exclusion_ratios_can_be_disabled() {
        let source = MupdfSource::new()
            .with_header_exclusion(0.0)
            .with_footer_exclusion(0.1);
        assert_eq!(source.header_exclusion_ratio, None);
        assert_eq!(source.footer_exclusion_ratio, Some(0.1));
    }

    #[test]
    fn test_checked_page_index() {
        assert_eq!(checked_page_index(2, 3).unwrap(), 2);
        assert!(matches!(
            checked_page_index(3, 3),
            Err(BackendError::PageOutOfRange { index: 3, count: 3 })
        ));
        let huge = i32::MAX as usize + 1;
        assert!(matches!(
            checked_page_index(huge, usize::MAX),
            Err(BackendError::PageOutOfRange { index, .. }) if index == huge
        ));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = MupdfSource::new()
            .page_count(Path::new("/nonexistent/reflow-test.pdf"))
            .unwrap_err();
        assert!(matches!(err, BackendError::OpenError(_)));
    }
}
