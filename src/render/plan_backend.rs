//! Recording backend: captures the draw-call stream as data.
//!
//! `PlanRenderer` is the reference implementation of the renderer contract.
//! Every call is recorded as a [`DrawOp`] and `finalize` serializes the
//! whole stream to a JSON document, which makes it both the default CLI
//! backend (the "plan" output format) and the harness the Driver is tested
//! against. Format backends (HTML, PDF, office XML) live outside this
//! crate and implement the same trait.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Color;
use crate::error::{Error, Result};
use crate::model::Rect;

use super::{Align, FontCategory, LinkHandle, Renderer};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// `begin_page`
    BeginPage,
    /// `set_text_color`
    TextColor {
        /// Selected color.
        color: Color,
    },
    /// `set_background_color`
    BackgroundColor {
        /// Selected color.
        color: Color,
    },
    /// `set_draw_color`
    DrawColor {
        /// Selected color.
        color: Color,
    },
    /// `set_font`
    Font {
        /// Font category.
        category: FontCategory,
        /// Font reference, if configured.
        name: Option<String>,
        /// Font size.
        size: f32,
    },
    /// `text_box`
    TextBox {
        /// Text lines.
        lines: Vec<String>,
        /// Target rectangle.
        rect: Rect,
        /// Heading level for title/subtitle blocks.
        heading: Option<u8>,
        /// Horizontal alignment.
        align: Align,
        /// Whether inline markdown is interpreted.
        markdown: bool,
    },
    /// `image`
    Image {
        /// Source path or URL.
        src: String,
        /// Target cell.
        rect: Rect,
        /// Cover (`true`) or contain (`false`) fit.
        crop: bool,
    },
    /// `rule`
    Rule {
        /// Start point.
        from: (f32, f32),
        /// End point.
        to: (f32, f32),
    },
    /// `table`
    Table {
        /// Cell text by row.
        rows: Vec<Vec<String>>,
        /// Target rectangle.
        rect: Rect,
    },
    /// `callout_box`
    CalloutBox {
        /// Box lines.
        lines: Vec<String>,
        /// Box rectangle.
        rect: Rect,
        /// Border color.
        border: Color,
        /// Fill color.
        fill: Color,
    },
    /// `footer_text`
    Footer {
        /// Footer text.
        text: String,
        /// Footer rectangle.
        rect: Rect,
    },
    /// `add_internal_link`
    InternalLink {
        /// 1-based target page.
        target_page: usize,
        /// Handle returned to the caller.
        handle: usize,
    },
    /// `begin_group`
    BeginGroup {
        /// Group label.
        label: String,
    },
    /// `end_group`
    EndGroup,
}

/// Serialized form of a finalized plan document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlanDocument {
    page_count: usize,
    ops: Vec<DrawOp>,
}

/// Recording backend; see the module docs.
#[derive(Debug, Default)]
pub struct PlanRenderer {
    ops: Vec<DrawOp>,
    page_count: usize,
    next_link: usize,
    overwrite: bool,
    pretty: bool,
}

impl PlanRenderer {
    /// Create a recording backend that overwrites existing output.
    pub fn new() -> Self {
        Self {
            overwrite: true,
            pretty: true,
            ..Self::default()
        }
    }

    /// Control whether `finalize` may replace an existing output file.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Control pretty-printing of the JSON output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Recorded operations so far.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of pages begun so far.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Serialize the recorded stream to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let doc = PlanDocument {
            page_count: self.page_count,
            ops: self.ops.clone(),
        };
        let json = if self.pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };
        Ok(json)
    }
}

impl Renderer for PlanRenderer {
    fn begin_page(&mut self) -> Result<()> {
        self.page_count += 1;
        self.ops.push(DrawOp::BeginPage);
        Ok(())
    }

    fn set_text_color(&mut self, color: &Color) {
        self.ops.push(DrawOp::TextColor {
            color: color.clone(),
        });
    }

    fn set_background_color(&mut self, color: &Color) {
        self.ops.push(DrawOp::BackgroundColor {
            color: color.clone(),
        });
    }

    fn set_draw_color(&mut self, color: &Color) {
        self.ops.push(DrawOp::DrawColor {
            color: color.clone(),
        });
    }

    fn set_font(&mut self, category: FontCategory, name: Option<&str>, size: f32) {
        self.ops.push(DrawOp::Font {
            category,
            name: name.map(str::to_string),
            size,
        });
    }

    fn text_box(
        &mut self,
        lines: &[String],
        rect: Rect,
        heading: Option<u8>,
        align: Align,
        markdown: bool,
    ) -> Result<()> {
        self.ops.push(DrawOp::TextBox {
            lines: lines.to_vec(),
            rect,
            heading,
            align,
            markdown,
        });
        Ok(())
    }

    fn image(&mut self, src: &str, rect: Rect, crop: bool) -> Result<()> {
        self.ops.push(DrawOp::Image {
            src: src.to_string(),
            rect,
            crop,
        });
        Ok(())
    }

    fn rule(&mut self, from: (f32, f32), to: (f32, f32)) -> Result<()> {
        self.ops.push(DrawOp::Rule { from, to });
        Ok(())
    }

    fn table(&mut self, rows: &[Vec<String>], rect: Rect) -> Result<()> {
        self.ops.push(DrawOp::Table {
            rows: rows.to_vec(),
            rect,
        });
        Ok(())
    }

    fn callout_box(
        &mut self,
        lines: &[String],
        rect: Rect,
        border: &Color,
        fill: &Color,
    ) -> Result<()> {
        self.ops.push(DrawOp::CalloutBox {
            lines: lines.to_vec(),
            rect,
            border: border.clone(),
            fill: fill.clone(),
        });
        Ok(())
    }

    fn footer_text(&mut self, text: &str, rect: Rect) -> Result<()> {
        self.ops.push(DrawOp::Footer {
            text: text.to_string(),
            rect,
        });
        Ok(())
    }

    fn add_internal_link(&mut self, target_page: usize) -> LinkHandle {
        let handle = self.next_link;
        self.next_link += 1;
        self.ops.push(DrawOp::InternalLink {
            target_page,
            handle,
        });
        LinkHandle(handle)
    }

    fn begin_group(&mut self, label: &str) {
        self.ops.push(DrawOp::BeginGroup {
            label: label.to_string(),
        });
    }

    fn end_group(&mut self) {
        self.ops.push(DrawOp::EndGroup);
    }

    fn finalize(&mut self, output: &Path) -> Result<()> {
        if output.exists() && !self.overwrite {
            return Err(Error::Render(format!(
                "output file exists, not overwriting: {}",
                output.display()
            )));
        }
        std::fs::write(output, self.to_json()?)?;
        Ok(())
    }
}
