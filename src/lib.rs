//! # deckdown
//!
//! Slide deck compiler for annotated markdown.
//!
//! deckdown turns a markdown document into a sequence of slide pages:
//! every top-level heading starts a page, `---` blocks carry YAML
//! configuration (document-wide before the first heading, per-page after),
//! and the layout engine computes device-independent rectangles for every
//! element. Output formats are pluggable: any backend implementing the
//! [`render::Renderer`] trait can be driven, and the built-in
//! [`render::PlanRenderer`] records the draw-call stream as JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use deckdown::{render::PlanRenderer, DriveOptions};
//! use std::path::Path;
//!
//! fn main() -> deckdown::Result<()> {
//!     let text = std::fs::read_to_string("talk.md")?;
//!     let deck = deckdown::segment(&text)?;
//!
//!     let mut backend = PlanRenderer::new();
//!     deckdown::convert(&deck, &mut backend, &DriveOptions::new(), Path::new("talk.json"))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Segmenter**: pages, configuration inheritance, headline index,
//!   incremental-reveal expansion
//! - **Classifier**: title / subtitle / body / images / callout boxes
//! - **Layout engine**: rectangles for every element, image grids with
//!   contain/cover fitting, columns, stacked callout boxes
//! - **Driver**: replays each page's plan against the active backend

pub mod classify;
pub mod config;
pub mod driver;
pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod segment;

// Re-export commonly used types
pub use classify::{classify as classify_page, classify_lines};
pub use config::{Color, Config, Dimensions, Fonts, Layout, Margins};
pub use driver::{convert, render_document, DriveOptions};
pub use error::{Error, Result};
pub use layout::build_plan;
pub use model::{CalloutBox, ClassifiedContent, ImageRef, Page, PlanItem, Rect, RenderPlan};
pub use segment::{segment, segment_with_defaults, Segmented};

use std::path::Path;

/// Segment a markdown file into pages.
///
/// # Example
///
/// ```no_run
/// let deck = deckdown::segment_file("talk.md").unwrap();
/// println!("pages: {}", deck.pages.len());
/// ```
pub fn segment_file<P: AsRef<Path>>(path: P) -> Result<Segmented> {
    let text = std::fs::read_to_string(path)?;
    segment(&text)
}

/// Segment a markdown file with an external defaults file merged beneath
/// the document's own configuration.
pub fn segment_file_with_defaults<P, Q>(path: P, defaults: Q) -> Result<Segmented>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let base = Config::load_defaults_file(defaults)?;
    let text = std::fs::read_to_string(path)?;
    segment_with_defaults(&text, &base)
}

/// Build the render plans for every page of a document without touching a
/// backend. Useful for inspection and testing.
pub fn plan_document(deck: &Segmented) -> Vec<RenderPlan> {
    deck.pages
        .iter()
        .map(|page| {
            let content = classify::classify(page);
            layout::build_plan(&content, &page.config, &deck.headlines)
        })
        .collect()
}
