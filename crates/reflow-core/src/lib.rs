use serde::{Deserialize, Serialize};

pub mod backend;
pub mod config_file;
pub mod text_utils;

pub use backend::{BackendError, FragmentSource};
pub use text_utils::expand_ligatures;

/// One positioned piece of extracted text, as reported by a rendering engine.
///
/// `x`/`y` are the baseline origin in page space. Larger `y` is higher on the
/// page. Missing coordinates deserialize as `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedFragment {
    pub text: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl PositionedFragment {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }

    /// `x` with non-finite values mapped to `0.0`.
    pub fn x_or_zero(&self) -> f32 {
        if self.x.is_finite() { self.x } else { 0.0 }
    }

    /// `y` with non-finite values mapped to `0.0`.
    pub fn y_or_zero(&self) -> f32 {
        if self.y.is_finite() { self.y } else { 0.0 }
    }
}

/// Fragment texts sharing an inferred baseline, in left-to-right order.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Baseline of the first fragment assigned to this line.
    pub y: f32,
    /// Fragment texts, each already carrying any inferred leading space.
    pub parts: Vec<String>,
}

impl Line {
    pub fn new(y: f32) -> Self {
        Self {
            y,
            parts: Vec::new(),
        }
    }

    /// Append a fragment text, inserting a single space only if the two
    /// neighbours would otherwise run together.
    pub fn push_part(&mut self, text: &str) {
        let needs_space = match self.parts.last() {
            Some(prev) => {
                !prev.ends_with(char::is_whitespace) && !text.starts_with(char::is_whitespace)
            }
            None => false,
        };
        if needs_space {
            self.parts.push(format!(" {text}"));
        } else {
            self.parts.push(text.to_string());
        }
    }

    /// The joined, trimmed text of the line.
    pub fn text(&self) -> String {
        self.parts.concat().trim().to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|p| p.trim().is_empty())
    }
}
