//! Classified page content: what the classifier hands to the layout engine.

use serde::{Deserialize, Serialize};

/// Alt-text prefix that routes an image into the credit strip.
pub const CREDITS_PREFIX: &str = "credits:";

/// File extensions treated as vector formats (kept as-is unless the backend
/// prefers raster passthrough).
const VECTOR_EXTENSIONS: &[&str] = &["pdf", "ps", "eps", "svg"];

/// A markdown image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Source path or URL, possibly carrying a `#page` suffix for
    /// multi-page vector sources.
    pub src: String,
    /// Alt text.
    pub alt: String,
}

impl ImageRef {
    /// Parse an `![alt](src)` line. Returns `None` when the line is not an
    /// image token.
    pub fn parse(line: &str) -> Option<ImageRef> {
        let line = line.trim();
        let inner = line.strip_prefix("![")?.strip_suffix(')')?;
        let (alt, src) = inner.split_once("](")?;
        Some(ImageRef {
            src: src.to_string(),
            alt: alt.to_string(),
        })
    }

    /// Whether the alt text routes this image to the credit strip.
    pub fn is_credit(&self) -> bool {
        self.alt.starts_with(CREDITS_PREFIX)
    }

    /// Source path without the `#page` suffix.
    pub fn file_path(&self) -> &str {
        self.src.split('#').next().unwrap_or(&self.src)
    }

    /// Page number selected by a `#page` suffix, if any.
    pub fn page_selector(&self) -> Option<usize> {
        self.src.split_once('#')?.1.parse().ok()
    }

    /// Whether the source is a remote URL (never existence-checked).
    pub fn is_remote(&self) -> bool {
        let path = self.file_path();
        path.starts_with("http://") || path.starts_with("https://")
    }

    /// Whether the source is a vector format.
    pub fn is_vector(&self) -> bool {
        Self::vector_path(&self.src)
    }

    /// Whether a source path (with or without a `#page` suffix) points at a
    /// vector format.
    pub fn vector_path(src: &str) -> bool {
        let path = src.split('#').next().unwrap_or(src);
        match path.rsplit_once('.') {
            Some((_, ext)) => VECTOR_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
            None => false,
        }
    }
}

/// A callout box: content lines with the bold label already folded in as
/// the first line (boxes with an empty header have no label line).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalloutBox {
    /// Box content in draw order.
    pub lines: Vec<String>,
}

impl CalloutBox {
    /// Number of content lines (drives the box height).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// One page's content after classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedContent {
    /// Page title (may be empty).
    pub title: String,
    /// Page subtitle (may be empty).
    pub subtitle: String,
    /// Body lines, stripped per column segment, with bullet glyphs and
    /// bold transforms applied.
    pub body: Vec<String>,
    /// Main grid images.
    pub images: Vec<ImageRef>,
    /// Credit strip images.
    pub credit_images: Vec<ImageRef>,
    /// Callout boxes in document order.
    pub boxes: Vec<CalloutBox>,
}

impl ClassifiedContent {
    /// Whether any body line carries visible text.
    ///
    /// Title-only pages (no body text, no images) get their title centered
    /// vertically by the layout engine.
    pub fn has_body_text(&self) -> bool {
        self.body.iter().any(|line| !line.trim().is_empty())
    }

    /// Whether the page has main grid images.
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_parse() {
        let img = ImageRef::parse("![a cat](cat.png)").unwrap();
        assert_eq!(img.src, "cat.png");
        assert_eq!(img.alt, "a cat");
        assert!(!img.is_credit());

        assert!(ImageRef::parse("not an image").is_none());
        assert!(ImageRef::parse("![unclosed](x.png").is_none());
    }

    #[test]
    fn test_credit_routing() {
        let img = ImageRef::parse("![credits: press photo](press.jpg)").unwrap();
        assert!(img.is_credit());
    }

    #[test]
    fn test_vector_and_page_selector() {
        let img = ImageRef::parse("![chart](figure.pdf#2)").unwrap();
        assert!(img.is_vector());
        assert_eq!(img.file_path(), "figure.pdf");
        assert_eq!(img.page_selector(), Some(2));

        let img = ImageRef::parse("![photo](photo.jpg)").unwrap();
        assert!(!img.is_vector());
        assert_eq!(img.page_selector(), None);
    }

    #[test]
    fn test_remote_detection() {
        let img = ImageRef::parse("![x](https://example.org/x.png)").unwrap();
        assert!(img.is_remote());

        let img = ImageRef::parse("![x](local/x.png)").unwrap();
        assert!(!img.is_remote());
    }

    #[test]
    fn test_has_body_text_ignores_blank_lines() {
        let mut content = ClassifiedContent::default();
        content.body = vec!["".into(), "  ".into()];
        assert!(!content.has_body_text());

        content.body.push("World".into());
        assert!(content.has_body_text());
    }
}
