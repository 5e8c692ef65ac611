use std::cmp::Ordering;

use reflow_core::{Line, PositionedFragment};

use crate::hyphenation::join_line_hyphens;
use crate::spacing::{break_sentences, collapse_blank_lines};

/// Maximum vertical distance between a fragment and a line's baseline for
/// the fragment to join that line. Fixed, not configurable.
pub const LINE_THRESHOLD: f32 = 4.0;

/// Vertical gap between consecutive lines above which a paragraph break is
/// emitted. Fixed, not configurable.
pub const PARAGRAPH_THRESHOLD: f32 = 12.0;

/// Groups unordered positioned fragments into lines and paragraphs.
///
/// Assumes a single-column, left-to-right layout where larger `y` is
/// higher on the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineReconstructor;

impl LineReconstructor {
    pub fn new() -> Self {
        Self
    }

    /// Sort fragments into reading order and sweep them into lines.
    ///
    /// A fragment opens a new line when its `y` differs from the current
    /// line's representative `y` by more than [`LINE_THRESHOLD`]. The sort
    /// is stable, so fragments at identical positions keep input order.
    pub fn group_lines(&self, fragments: &[PositionedFragment]) -> Vec<Line> {
        let mut sorted: Vec<&PositionedFragment> = fragments.iter().collect();
        sorted.sort_by(|a, b| {
            b.y_or_zero()
                .partial_cmp(&a.y_or_zero())
                .unwrap_or(Ordering::Equal)
                .then(
                    a.x_or_zero()
                        .partial_cmp(&b.x_or_zero())
                        .unwrap_or(Ordering::Equal),
                )
        });

        let mut lines: Vec<Line> = Vec::new();
        for frag in sorted {
            let y = frag.y_or_zero();
            match lines.last_mut() {
                Some(line) if (y - line.y).abs() <= LINE_THRESHOLD => line.push_part(&frag.text),
                _ => {
                    let mut line = Line::new(y);
                    line.push_part(&frag.text);
                    lines.push(line);
                }
            }
        }

        tracing::trace!(fragments = fragments.len(), lines = lines.len(), "grouped lines");
        lines
    }

    /// Reconstruct one page's text from its fragments.
    ///
    /// Lines are joined with `\n`, or `\n\n` when a vertical gap between
    /// them exceeds [`PARAGRAPH_THRESHOLD`]. Whitespace-only lines emit
    /// nothing but their gaps still count. A light post-pass then joins
    /// hyphenated line breaks, collapses blank-line runs, and breaks
    /// paragraphs at sentence boundaries.
    pub fn reconstruct(&self, fragments: &[PositionedFragment]) -> String {
        let lines = self.group_lines(fragments);

        let mut text = String::new();
        let mut prev_y: Option<f32> = None;
        let mut paragraph = false;
        for line in &lines {
            if let Some(prev) = prev_y {
                paragraph |= (prev - line.y).abs() > PARAGRAPH_THRESHOLD;
            }
            prev_y = Some(line.y);

            if line.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push_str(if paragraph { "\n\n" } else { "\n" });
            }
            text.push_str(&line.text());
            paragraph = false;
        }

        let text = join_line_hyphens(&text);
        let text = collapse_blank_lines(&text);
        let text = break_sentences(&text);
        text.trim().to_string()
    }
}

/// Reconstruct text with a default [`LineReconstructor`].
pub fn reconstruct_lines(fragments: &[PositionedFragment]) -> String {
    LineReconstructor::new().reconstruct(fragments)
}
