//! Page content classification.
//!
//! A small state machine walks one page's lines and separates title,
//! subtitle, body text, images and callout boxes. Each line is first
//! dispatched to a typed [`LineEvent`] by a pure function, then applied to
//! the classifier state, so no classification decision depends on shared
//! mutable closures.
//!
//! States: `Preamble`/`InBody` (a body line goes to the body) and `InBox`
//! (a `####` heading opened a callout box that swallows every following
//! non-structural line until the next heading or the end of the page).

use crate::model::{CalloutBox, ClassifiedContent, ImageRef, Page};

/// Bullet glyph substituted for a leading `* ` marker.
const BULLET_GLYPH: &str = "\u{2022} ";

/// Sentinel left behind by the single-asterisk escape pass for a line that
/// held nothing but one asterisk; dropped entirely.
const BLANK_SENTINEL: &str = "__";

/// Typed classification of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineEvent {
    /// `# ` title line.
    Title(String),
    /// `## ` subtitle line.
    Subtitle(String),
    /// `### ` line, kept as a bold body line.
    BoldBody(String),
    /// `#### ` line, opens a callout box with this label.
    OpenBox(String),
    /// `![alt](src)` image token.
    Image(ImageRef),
    /// Anything else.
    Body(String),
}

/// Classify one line, independent of state.
fn dispatch(line: &str) -> LineEvent {
    if let Some((level, text)) = heading(line) {
        return match level {
            1 => LineEvent::Title(text.to_string()),
            2 => LineEvent::Subtitle(text.to_string()),
            3 => LineEvent::BoldBody(format!("**{text}**")),
            _ => LineEvent::OpenBox(text.to_string()),
        };
    }
    if let Some(image) = ImageRef::parse(line) {
        return LineEvent::Image(image);
    }
    LineEvent::Body(line.to_string())
}

/// Heading level (1-4) and text, or `None` for non-heading lines. Five or
/// more hashes are not a heading.
fn heading(line: &str) -> Option<(usize, &str)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 4 {
        return None;
    }
    let rest = &line[hashes..];
    if rest.is_empty() {
        Some((hashes, ""))
    } else if let Some(text) = rest.strip_prefix(' ') {
        Some((hashes, text.trim()))
    } else {
        None
    }
}

/// A line of three or more dashes: a column divider inside body text,
/// consumed by the layout engine rather than rendered literally.
pub fn is_divider_line(line: &str) -> bool {
    line.len() > 2 && line.chars().all(|c| c == '-')
}

struct Classifier {
    bullet_glyphs: bool,
    content: ClassifiedContent,
    open_box: Option<(String, Vec<String>)>,
}

impl Classifier {
    fn new(bullet_glyphs: bool) -> Self {
        Self {
            bullet_glyphs,
            content: ClassifiedContent::default(),
            open_box: None,
        }
    }

    fn feed(&mut self, line: &str) {
        match dispatch(line) {
            LineEvent::Title(text) => {
                self.close_box();
                self.content.title = text;
            }
            LineEvent::Subtitle(text) => {
                self.close_box();
                self.content.subtitle = text;
            }
            LineEvent::BoldBody(text) => {
                self.close_box();
                self.content.body.push(text);
            }
            LineEvent::OpenBox(label) => {
                self.close_box();
                self.open_box = Some((label, Vec::new()));
            }
            LineEvent::Image(image) => {
                if image.is_credit() {
                    self.content.credit_images.push(image);
                } else {
                    self.content.images.push(image);
                }
            }
            LineEvent::Body(text) => {
                if text.trim() == BLANK_SENTINEL {
                    return;
                }
                let text = self.rewrite_bullet(&text);
                match self.open_box.as_mut() {
                    Some((_, lines)) => lines.push(text),
                    None => self.content.body.push(text),
                }
            }
        }
    }

    fn rewrite_bullet(&self, line: &str) -> String {
        if self.bullet_glyphs {
            if let Some(rest) = line.strip_prefix("* ") {
                return format!("{BULLET_GLYPH}{rest}");
            }
        }
        line.to_string()
    }

    /// Close the open callout box, if any. A box with a non-empty header
    /// gets a bold label line prefixed to its stripped content.
    fn close_box(&mut self) {
        if let Some((label, lines)) = self.open_box.take() {
            let mut folded = strip_segmented_lines(&lines);
            if !label.is_empty() {
                folded.insert(0, format!("**{label}**"));
            }
            self.content.boxes.push(CalloutBox { lines: folded });
        }
    }

    fn finish(mut self) -> ClassifiedContent {
        self.close_box();
        self.content.body = strip_segmented_lines(&self.content.body);
        self.content
    }
}

/// Classify raw lines directly.
///
/// `bullet_glyphs` substitutes the bullet glyph for leading `* ` markers;
/// it is enabled when a title font file is configured, the heuristic being
/// that such fonts carry the Unicode bullet.
pub fn classify_lines<'a, I>(lines: I, bullet_glyphs: bool) -> ClassifiedContent
where
    I: IntoIterator<Item = &'a str>,
{
    let mut classifier = Classifier::new(bullet_glyphs);
    for line in lines {
        classifier.feed(line);
    }
    classifier.finish()
}

/// Classify one segmented page.
pub fn classify(page: &Page) -> ClassifiedContent {
    let bullet_glyphs = page.config.fonts.font_file_title.is_some();
    let lines = page
        .content_lines
        .iter()
        .chain(page.image_lines.iter())
        .map(String::as_str);
    let mut content = classify_lines(lines, bullet_glyphs);
    if content.title.is_empty() {
        content.title = page.title.clone();
    }
    if content.subtitle.is_empty() {
        content.subtitle = page.subtitle.clone();
    }
    content
}

/// Strip leading and trailing blank lines independently per
/// column-divider-delimited segment, leaving the dividers and every other
/// segment untouched.
pub fn strip_segmented_lines(lines: &[String]) -> Vec<String> {
    let dividers: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_divider_line(line))
        .map(|(i, _)| i)
        .collect();

    let mut result = Vec::with_capacity(lines.len());
    let mut start = 0;
    for &at in &dividers {
        result.extend_from_slice(strip_segment(&lines[start..at]));
        result.push(lines[at].clone());
        start = at + 1;
    }
    result.extend_from_slice(strip_segment(&lines[start..]));
    result
}

fn strip_segment(segment: &[String]) -> &[String] {
    let first = match segment.iter().position(|l| !l.trim().is_empty()) {
        Some(i) => i,
        None => return &[],
    };
    let last = segment
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .expect("segment has a non-blank line");
    &segment[first..=last]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dispatch_priorities() {
        assert_eq!(dispatch("# T"), LineEvent::Title("T".into()));
        assert_eq!(dispatch("## S"), LineEvent::Subtitle("S".into()));
        assert_eq!(dispatch("### B"), LineEvent::BoldBody("**B**".into()));
        assert_eq!(dispatch("#### L"), LineEvent::OpenBox("L".into()));
        assert_eq!(dispatch("##### too deep"), LineEvent::Body("##### too deep".into()));
        assert!(matches!(dispatch("![a](b.png)"), LineEvent::Image(_)));
        assert_eq!(dispatch("plain"), LineEvent::Body("plain".into()));
    }

    #[test]
    fn test_basic_classification() {
        let content = classify_lines(
            ["# Title", "## Sub", "body one", "body two"].into_iter(),
            false,
        );
        assert_eq!(content.title, "Title");
        assert_eq!(content.subtitle, "Sub");
        assert_eq!(content.body, vec!["body one", "body two"]);
    }

    #[test]
    fn test_box_accumulates_until_next_heading() {
        let content = classify_lines(
            ["#### Note", "inside", "also inside", "## Sub", "outside"].into_iter(),
            false,
        );
        assert_eq!(content.boxes.len(), 1);
        assert_eq!(
            content.boxes[0].lines,
            vec!["**Note**", "inside", "also inside"]
        );
        assert_eq!(content.body, vec!["outside"]);
    }

    #[test]
    fn test_box_with_empty_header_has_no_label_line() {
        let content = classify_lines(["####", "inside"].into_iter(), false);
        assert_eq!(content.boxes[0].lines, vec!["inside"]);
    }

    #[test]
    fn test_box_closed_at_end_of_page() {
        let content = classify_lines(["body", "#### Last", "in box"].into_iter(), false);
        assert_eq!(content.body, vec!["body"]);
        assert_eq!(content.boxes[0].lines, vec!["**Last**", "in box"]);
    }

    #[test]
    fn test_images_route_past_open_boxes() {
        let content =
            classify_lines(["#### Box", "text", "![x](i.png)", "more"].into_iter(), false);
        assert_eq!(content.images.len(), 1);
        assert_eq!(content.boxes[0].lines, vec!["**Box**", "text", "more"]);
    }

    #[test]
    fn test_credit_images_route_to_strip() {
        let content = classify_lines(
            ["![credits: photo](a.png)", "![main](b.png)"].into_iter(),
            false,
        );
        assert_eq!(content.credit_images.len(), 1);
        assert_eq!(content.images.len(), 1);
        assert_eq!(content.images[0].src, "b.png");
    }

    #[test]
    fn test_bullet_glyph_requires_title_font() {
        let content = classify_lines(["* item"].into_iter(), false);
        assert_eq!(content.body, vec!["* item"]);

        let content = classify_lines(["* item"].into_iter(), true);
        assert_eq!(content.body, vec!["\u{2022} item"]);
    }

    #[test]
    fn test_blank_sentinel_dropped() {
        let content = classify_lines(["a", "__", "b"].into_iter(), false);
        assert_eq!(content.body, vec!["a", "b"]);
    }

    #[test]
    fn test_divider_detection() {
        assert!(is_divider_line("---"));
        assert!(is_divider_line("--------"));
        assert!(!is_divider_line("--"));
        assert!(!is_divider_line("- - -"));
        assert!(!is_divider_line(""));
    }

    #[test]
    fn test_strip_per_segment() {
        let input = lines(&["", "a", "", "----", "", "b", ""]);
        assert_eq!(
            strip_segmented_lines(&input),
            lines(&["a", "----", "b"])
        );
    }

    #[test]
    fn test_strip_keeps_interior_blanks() {
        let input = lines(&["", "a", "", "b", ""]);
        assert_eq!(strip_segmented_lines(&input), lines(&["a", "", "b"]));
    }

    #[test]
    fn test_strip_all_blank_segment() {
        let input = lines(&["", "", "----", "x"]);
        assert_eq!(strip_segmented_lines(&input), lines(&["----", "x"]));
    }
}
