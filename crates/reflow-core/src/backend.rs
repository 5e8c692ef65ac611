use std::path::Path;

use thiserror::Error;

use crate::PositionedFragment;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("page {index} out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for page-fragment sources.
///
/// Implementors resolve glyph content and positions for each page; line
/// reconstruction and normalization live in `reflow_text`.
pub trait FragmentSource: Send + Sync {
    /// Number of pages in the document.
    fn page_count(&self, path: &Path) -> Result<usize, BackendError>;

    /// Positioned fragments for one zero-based page, in no particular order.
    fn page_fragments(
        &self,
        path: &Path,
        page_index: usize,
    ) -> Result<Vec<PositionedFragment>, BackendError>;

    /// Fragments for every page, indexed by page.
    fn document_fragments(&self, path: &Path) -> Result<Vec<Vec<PositionedFragment>>, BackendError> {
        let count = self.page_count(path)?;
        (0..count)
            .map(|index| self.page_fragments(path, index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Vec<Vec<PositionedFragment>>);

    impl FragmentSource for FixedSource {
        fn page_count(&self, _path: &Path) -> Result<usize, BackendError> {
            Ok(self.0.len())
        }

        fn page_fragments(
            &self,
            _path: &Path,
            page_index: usize,
        ) -> Result<Vec<PositionedFragment>, BackendError> {
            self.0
                .get(page_index)
                .cloned()
                .ok_or(BackendError::PageOutOfRange {
                    index: page_index,
                    count: self.0.len(),
                })
        }
    }

    #[test]
    fn test_document_fragments_visits_every_page() {
        let source = FixedSource(vec![
            vec![PositionedFragment::new("one", 0.0, 10.0)],
            vec![],
            vec![PositionedFragment::new("three", 0.0, 10.0)],
        ]);
        let pages = source.document_fragments(Path::new("unused.pdf")).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[2][0].text, "three");
    }

    #[test]
    fn test_out_of_range_error_message() {
        let err = BackendError::PageOutOfRange { index: 5, count: 2 };
        assert_eq!(err.to_string(), "page 5 out of range (document has 2 pages)");
    }
}
