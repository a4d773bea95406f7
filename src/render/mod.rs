//! The renderer contract and the built-in plan-recording backend.
//!
//! Output formats are external collaborators: a backend implements the
//! [`Renderer`] trait and owns everything byte-level (PDF streams, HTML
//! serialization, office-XML packaging, image decoding and conversion).
//! The core drives any backend through the same handful of drawing
//! primitives and never branches on backend identity; the one capability
//! it may query is [`Renderer::prefers_raster_images`].

mod plan_backend;

pub use plan_backend::{DrawOp, PlanRenderer};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Color;
use crate::error::Result;
use crate::model::Rect;

/// Font category selected before a text drawing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontCategory {
    /// Body text.
    Standard,
    /// Title and subtitle text.
    Title,
    /// Footer text.
    Footer,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// Left-aligned (the default).
    #[default]
    Left,
    /// Centered within the rectangle.
    Center,
}

/// Handle to an internal link created by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkHandle(pub usize);

/// Drawing capability set every output backend implements.
///
/// Calls arrive strictly sequentially and in page order; backends are free
/// to keep cross-page mutable state (running page counts, forward link
/// targets). Repeated runs over unchanged input must not corrupt earlier
/// output: backends write assets existence-checked, with an explicit
/// overwrite opt-in.
pub trait Renderer {
    /// Start a new page.
    fn begin_page(&mut self) -> Result<()>;

    /// Set the color used for subsequent text.
    fn set_text_color(&mut self, color: &Color);

    /// Set the page background color.
    fn set_background_color(&mut self, color: &Color);

    /// Set the color used for rules and borders.
    fn set_draw_color(&mut self, color: &Color);

    /// Select a font for a category. `name` is a backend-resolved font
    /// file or family reference; `None` keeps the backend default.
    fn set_font(&mut self, category: FontCategory, name: Option<&str>, size: f32);

    /// Draw a block of text lines into a rectangle. `heading` carries the
    /// heading level for title/subtitle blocks; `markdown` says whether
    /// inline markdown syntax (and `$...$` formula spans) should be
    /// interpreted by the backend.
    fn text_box(
        &mut self,
        lines: &[String],
        rect: Rect,
        heading: Option<u8>,
        align: Align,
        markdown: bool,
    ) -> Result<()>;

    /// Draw an image into a cell. With `crop` the image covers the cell
    /// and is clipped to it; otherwise it is contained within the cell.
    /// The fit math lives in [`crate::layout::contain_rect`] and
    /// [`crate::layout::cover_rect`]; backends apply it once they know the
    /// source dimensions.
    fn image(&mut self, src: &str, rect: Rect, crop: bool) -> Result<()>;

    /// Draw a straight line.
    fn rule(&mut self, from: (f32, f32), to: (f32, f32)) -> Result<()>;

    /// Draw a table.
    fn table(&mut self, rows: &[Vec<String>], rect: Rect) -> Result<()>;

    /// Draw a bordered, filled callout box with its text lines.
    fn callout_box(
        &mut self,
        lines: &[String],
        rect: Rect,
        border: &Color,
        fill: &Color,
    ) -> Result<()>;

    /// Draw the footer line.
    fn footer_text(&mut self, text: &str, rect: Rect) -> Result<()>;

    /// Register an internal link to a 1-based page number.
    fn add_internal_link(&mut self, target_page: usize) -> LinkHandle;

    /// Open a drawing group. Backends may interpret groups (unbreakable or
    /// locally scoped drawing) or ignore them.
    fn begin_group(&mut self, label: &str) {
        let _ = label;
    }

    /// Close the innermost open group.
    fn end_group(&mut self) {}

    /// Whether this backend wants vector sources rasterized before
    /// placement. The sole capability flag the core queries.
    fn prefers_raster_images(&self) -> bool {
        false
    }

    /// Finish the document and write it to `output`.
    fn finalize(&mut self, output: &Path) -> Result<()>;
}
