//! Page records produced by the segmenter.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// A single renderable slide, after incremental-reveal expansion.
///
/// A page is created by the segmenter, classified and laid out once, and
/// discarded as soon as the Driver has consumed its render plan; nothing is
/// retained across pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Title from the page's `#` heading (may be empty).
    pub title: String,

    /// Subtitle from the first `##` line (may be empty). Used as the
    /// headline label only when the title is empty.
    pub subtitle: String,

    /// Content lines in document order, image tokens excluded.
    pub content_lines: Vec<String>,

    /// Image token lines, extracted so reveal steps repeat them verbatim.
    pub image_lines: Vec<String>,

    /// 1-indexed source line numbers, parallel to `content_lines`.
    pub line_numbers: Vec<usize>,

    /// 1-indexed source line numbers, parallel to `image_lines`.
    pub image_line_numbers: Vec<usize>,

    /// Resolved configuration (document defaults merged with this page's
    /// override blocks).
    pub config: Config,

    /// Position of this page in the headline index (0-based, visible pages
    /// only).
    pub headline_index: usize,

    /// 1-indexed source line of the page's `#` heading.
    pub start_line: usize,
}

impl Page {
    /// Create an empty page with the given configuration.
    pub fn new(title: impl Into<String>, config: Config, start_line: usize) -> Self {
        Self {
            title: title.into(),
            subtitle: String::new(),
            content_lines: Vec::new(),
            image_lines: Vec::new(),
            line_numbers: Vec::new(),
            image_line_numbers: Vec::new(),
            config,
            headline_index: 0,
            start_line,
        }
    }

    /// The label this page contributes to the headline index: the title, or
    /// the subtitle when the title is empty.
    pub fn headline(&self) -> &str {
        if self.title.is_empty() {
            &self.subtitle
        } else {
            &self.title
        }
    }

    /// Whether the page carries no content at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.image_lines.is_empty()
            && self.content_lines.iter().all(|l| l.trim().is_empty())
    }
}
