//! Markdown segmentation: splits an annotated document into page records.
//!
//! The segmenter scans the document once, line by line. A line starting
//! with a single `#` begins a new page; a line exactly equal to `---` opens
//! (or closes) a YAML configuration block that merges onto the document
//! defaults while still in the preamble, or onto the current page
//! afterwards. Legacy inline-JSON comment pragmas are dropped but replaced
//! with an empty line so later line numbers stay correct for diagnostics.
//!
//! The returned pages are the ones that will actually render: hidden pages
//! are filtered out *before* the headline index is computed, and
//! `incremental_bullets` pages are expanded into their reveal steps, so the
//! index maps one entry to one final page.

mod reveal;

pub use reveal::expand_reveal_steps;

use serde_yaml::Value;

use crate::config::{merge_values, Config};
use crate::error::{Error, Result};
use crate::model::{ImageRef, Page};

/// Fence line delimiting a configuration block.
const CONFIG_FENCE: &str = "---";

/// Prefix of the legacy inline-JSON configuration pragma.
const PRAGMA_PREFIX: &str = "[//]: # (";

/// Result of segmenting a document: the renderable pages and the headline
/// index used to resolve internal links.
#[derive(Debug, Clone)]
pub struct Segmented {
    /// Renderable pages in document order (hidden pages removed, reveal
    /// steps expanded).
    pub pages: Vec<Page>,
    /// One headline per page: the title, or the subtitle when the title is
    /// empty. Internal links resolve to `position + 1`.
    pub headlines: Vec<String>,
}

impl Segmented {
    /// Resolve an internal link target to its 1-based page number.
    pub fn resolve_link(&self, target: &str) -> Option<usize> {
        self.headlines.iter().position(|h| h == target).map(|i| i + 1)
    }
}

/// A page while it is still being accumulated.
struct RawPage {
    title: String,
    start_line: usize,
    lines: Vec<String>,
    numbers: Vec<usize>,
    value: Value,
}

/// Segment a document with built-in defaults only.
pub fn segment(text: &str) -> Result<Segmented> {
    segment_with_defaults(text, &Config::empty_value())
}

/// Segment a document, merging `defaults` (an external defaults file)
/// beneath the document's own configuration blocks.
pub fn segment_with_defaults(text: &str, defaults: &Value) -> Result<Segmented> {
    let mut doc_value = match defaults {
        Value::Null => Config::empty_value(),
        other => other.clone(),
    };
    let mut pages_raw: Vec<RawPage> = Vec::new();
    let mut preamble_lines: Vec<String> = Vec::new();
    let mut preamble_numbers: Vec<usize> = Vec::new();
    let mut current: Option<RawPage> = None;
    let mut block: Option<(usize, Vec<String>)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let number = idx + 1;
        let raw = raw.trim_end_matches('\r');

        if block.is_some() {
            if raw.trim_end() == CONFIG_FENCE {
                let (start, lines) = block.take().expect("checked above");
                let value = parse_block(&lines, start)?;
                let target = match current.as_mut() {
                    Some(page) => &mut page.value,
                    None => &mut doc_value,
                };
                merge_values(target, value);
            } else {
                block.as_mut().expect("checked above").1.push(raw.to_string());
            }
            continue;
        }

        if raw.trim_end() == CONFIG_FENCE {
            block = Some((number, Vec::new()));
            continue;
        }

        let line = escape_single_asterisks(raw);

        if is_pragma(&line) {
            log::warn!("line {number}: legacy inline configuration comment ignored");
            push_line(
                &mut current,
                &mut preamble_lines,
                &mut preamble_numbers,
                String::new(),
                number,
            );
            continue;
        }

        if let Some(title) = page_heading(&line) {
            if let Some(done) = current.take() {
                pages_raw.push(done);
            }
            current = Some(RawPage {
                title: title.to_string(),
                start_line: number,
                lines: Vec::new(),
                numbers: Vec::new(),
                value: doc_value.clone(),
            });
            continue;
        }

        push_line(
            &mut current,
            &mut preamble_lines,
            &mut preamble_numbers,
            line,
            number,
        );
    }

    if let Some((start, _)) = block {
        return Err(Error::UnclosedConfigBlock { line: start });
    }

    // The trailing page is always flushed, even with empty content. A
    // document without any heading becomes one untitled page.
    match current.take() {
        Some(done) => pages_raw.push(done),
        None => pages_raw.push(RawPage {
            title: String::new(),
            start_line: 1,
            lines: preamble_lines,
            numbers: preamble_numbers,
            value: doc_value.clone(),
        }),
    }

    let mut visible: Vec<Page> = Vec::new();
    for raw in pages_raw {
        let config = Config::resolve(&raw.value, raw.start_line.max(1))?;
        if config.is_hidden() {
            log::debug!("line {}: page {:?} is hidden", raw.start_line, raw.title);
            continue;
        }
        visible.push(build_page(raw, config));
    }

    let mut pages: Vec<Page> = visible.into_iter().flat_map(expand_reveal_steps).collect();

    let headlines: Vec<String> = pages.iter().map(|p| p.headline().to_string()).collect();
    for (index, page) in pages.iter_mut().enumerate() {
        page.headline_index = index;
    }

    Ok(Segmented { pages, headlines })
}

fn build_page(raw: RawPage, config: Config) -> Page {
    let mut page = Page::new(raw.title, config, raw.start_line.max(1));
    for (line, number) in raw.lines.into_iter().zip(raw.numbers) {
        if ImageRef::parse(&line).is_some() {
            page.image_lines.push(line);
            page.image_line_numbers.push(number);
        } else {
            if let Some(rest) = subtitle_heading(&line) {
                page.subtitle = rest.to_string();
            }
            page.content_lines.push(line);
            page.line_numbers.push(number);
        }
    }
    page
}

fn push_line(
    current: &mut Option<RawPage>,
    preamble_lines: &mut Vec<String>,
    preamble_numbers: &mut Vec<usize>,
    line: String,
    number: usize,
) {
    match current.as_mut() {
        Some(page) => {
            page.lines.push(line);
            page.numbers.push(number);
        }
        None => {
            preamble_lines.push(line);
            preamble_numbers.push(number);
        }
    }
}

fn parse_block(lines: &[String], start: usize) -> Result<Value> {
    let text = lines.join("\n");
    let value: Value = serde_yaml::from_str(&text).map_err(|e| Error::ConfigParse {
        line: start,
        message: e.to_string(),
    })?;
    match value {
        Value::Null => Ok(Config::empty_value()),
        Value::Mapping(_) => Ok(value),
        other => Err(Error::ConfigParse {
            line: start,
            message: format!("expected a key/value mapping, got {:?}", other),
        }),
    }
}

/// Whether the line starts a page; returns the title text.
fn page_heading(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix("# ") {
        Some(rest.trim())
    } else if line.trim_end() == "#" {
        Some("")
    } else {
        None
    }
}

/// Whether the line is a `##` subtitle; returns the subtitle text.
fn subtitle_heading(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("## ")?;
    if rest.starts_with('#') {
        None
    } else {
        Some(rest.trim())
    }
}

fn is_pragma(line: &str) -> bool {
    line.starts_with(PRAGMA_PREFIX) && line.ends_with(')')
}

/// Rewrite single asterisks (markdown italics) to `__` so backends that
/// only understand the double-marker syntax render them correctly, then
/// restore asterisks inside `$...$` formula spans, which pass through to
/// the backend untouched.
fn escape_single_asterisks(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut escaped = String::with_capacity(line.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '*' {
            let after_star = i > 0 && chars[i - 1] == '*';
            let before_bad = match chars.get(i + 1) {
                Some('*') => true,
                Some(next) => next.is_whitespace(),
                None => false,
            };
            if !after_star && !before_bad {
                escaped.push_str("__");
                continue;
            }
        }
        escaped.push(c);
    }
    restore_formula_asterisks(&escaped)
}

fn restore_formula_asterisks(line: &str) -> String {
    if !line.contains('$') {
        return line.to_string();
    }
    line.split('$')
        .enumerate()
        .map(|(i, seg)| {
            if i % 2 == 1 {
                seg.replace("__", "*")
            } else {
                seg.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("$")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;

    #[test]
    fn test_single_page() {
        let seg = segment("# Hello\n\nWorld").unwrap();
        assert_eq!(seg.pages.len(), 1);
        assert_eq!(seg.pages[0].title, "Hello");
        assert_eq!(seg.pages[0].content_lines, vec!["", "World"]);
        assert_eq!(seg.pages[0].line_numbers, vec![2, 3]);
        assert_eq!(seg.headlines, vec!["Hello"]);
    }

    #[test]
    fn test_pages_split_at_top_level_headings() {
        let seg = segment("# One\na\n# Two\nb\n# Three").unwrap();
        assert_eq!(seg.pages.len(), 3);
        assert_eq!(seg.headlines, vec!["One", "Two", "Three"]);
        // trailing page flushed even with empty content
        assert!(seg.pages[2].content_lines.is_empty());
    }

    #[test]
    fn test_preamble_config_applies_to_all_pages() {
        let text = "---\nlayout: image_fill\n---\n# A\n# B";
        let seg = segment(text).unwrap();
        assert_eq!(seg.pages[0].config.layout, Layout::ImageFill);
        assert_eq!(seg.pages[1].config.layout, Layout::ImageFill);
    }

    #[test]
    fn test_page_override_does_not_leak() {
        let text = "# A\n---\ncolumns: 3\n---\n# B";
        let seg = segment(text).unwrap();
        assert_eq!(seg.pages[0].config.columns, 3);
        assert_eq!(seg.pages[1].config.columns, 1);
    }

    #[test]
    fn test_page_override_refines_document_config() {
        let text = "---\ndimensions:\n  page_width: 960\n---\n# A\n---\ncolumns: 2\n---";
        let seg = segment(text).unwrap();
        let config = &seg.pages[0].config;
        assert_eq!(config.dimensions.page_width, 960.0);
        assert_eq!(config.columns, 2);
    }

    #[test]
    fn test_malformed_block_is_fatal_with_line_number() {
        let text = "# A\n---\n{not yaml: [\n---";
        let err = segment(text).unwrap_err();
        match err {
            Error::ConfigParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unclosed_block_is_fatal() {
        let err = segment("# A\n---\ncolumns: 2").unwrap_err();
        assert!(matches!(err, Error::UnclosedConfigBlock { line: 2 }));
    }

    #[test]
    fn test_pragma_preserves_line_numbers() {
        let text = "# A\n[//]: # ({\"layout\": \"image_fill\"})\nbody";
        let seg = segment(text).unwrap();
        // pragma replaced with an empty line, numbering intact
        assert_eq!(seg.pages[0].content_lines, vec!["", "body"]);
        assert_eq!(seg.pages[0].line_numbers, vec![2, 3]);
        // and the legacy JSON is ignored entirely
        assert_eq!(seg.pages[0].config.layout, Layout::ImageCenter);
    }

    #[test]
    fn test_hidden_pages_are_excluded_from_index() {
        let text = "# A\n# B\n---\nhidden: true\n---\n# C";
        let seg = segment(text).unwrap();
        assert_eq!(seg.headlines, vec!["A", "C"]);
        assert_eq!(seg.resolve_link("C"), Some(2));
        assert_eq!(seg.resolve_link("B"), None);
    }

    #[test]
    fn test_headline_falls_back_to_subtitle() {
        let text = "#\n## Only Subtitle\nbody";
        let seg = segment(text).unwrap();
        assert_eq!(seg.headlines, vec!["Only Subtitle"]);
    }

    #[test]
    fn test_images_are_extracted_from_content() {
        let text = "# A\n![alt](pic.png)\nbody";
        let seg = segment(text).unwrap();
        assert_eq!(seg.pages[0].image_lines, vec!["![alt](pic.png)"]);
        assert_eq!(seg.pages[0].image_line_numbers, vec![2]);
        assert_eq!(seg.pages[0].content_lines, vec!["body"]);
    }

    #[test]
    fn test_document_without_headings_is_one_page() {
        let seg = segment("just\nsome text").unwrap();
        assert_eq!(seg.pages.len(), 1);
        assert_eq!(seg.pages[0].title, "");
        assert_eq!(seg.pages[0].content_lines, vec!["just", "some text"]);
    }

    #[test]
    fn test_escape_single_asterisks() {
        assert_eq!(escape_single_asterisks("a *b* c"), "a __b__ c");
        // bullets and bold markers are untouched
        assert_eq!(escape_single_asterisks("* item"), "* item");
        assert_eq!(escape_single_asterisks("**bold**"), "**bold**");
        // formula interiors keep their asterisks
        assert_eq!(escape_single_asterisks("$a*b$ and *it*"), "$a*b$ and __it__");
    }

    #[test]
    fn test_defaults_file_merges_beneath_preamble() {
        let defaults: Value = serde_yaml::from_str("layout: image_fill\ncolumns: 2").unwrap();
        let text = "---\ncolumns: 3\n---\n# A";
        let seg = segment_with_defaults(text, &defaults).unwrap();
        assert_eq!(seg.pages[0].config.layout, Layout::ImageFill);
        assert_eq!(seg.pages[0].config.columns, 3);
    }
}
