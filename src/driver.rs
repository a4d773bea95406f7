//! The driver: replays render plans against a backend.
//!
//! Pages are processed strictly sequentially in document order; a page's
//! plan is fully consumed before the next page begins, so backends can
//! rely on monotonically increasing page numbers for cross-page state.
//! The driver owns the one piece of I/O the core performs: checking that
//! local image files exist before they are given a grid slot.

use std::path::{Path, PathBuf};

use crate::classify::classify;
use crate::error::Result;
use crate::layout::build_plan;
use crate::model::{ImageRef, Page, PlanItem, RenderPlan};
use crate::render::{Align, FontCategory, Renderer};
use crate::segment::Segmented;

/// Options controlling one driver run.
#[derive(Debug, Clone)]
pub struct DriveOptions {
    /// Directory relative image paths resolve against (usually the input
    /// file's directory).
    pub base_dir: PathBuf,

    /// Treat vector image sources as needing rasterization even when the
    /// backend does not ask for it.
    pub raster_images: bool,
}

impl DriveOptions {
    /// Create options with the current directory as base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base directory for relative image paths.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Force raster passthrough for vector sources.
    pub fn with_raster_images(mut self, raster: bool) -> Self {
        self.raster_images = raster;
        self
    }
}

impl Default for DriveOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            raster_images: false,
        }
    }
}

/// Render every page of a segmented document against `renderer`, without
/// finalizing.
pub fn render_document<R: Renderer>(
    segmented: &Segmented,
    renderer: &mut R,
    options: &DriveOptions,
) -> Result<()> {
    for page in &segmented.pages {
        render_page(page, &segmented.headlines, renderer, options)?;
    }
    Ok(())
}

/// Render every page and finalize the backend into `output`.
pub fn convert<R: Renderer>(
    segmented: &Segmented,
    renderer: &mut R,
    options: &DriveOptions,
    output: &Path,
) -> Result<()> {
    render_document(segmented, renderer, options)?;
    renderer.finalize(output)
}

fn render_page<R: Renderer>(
    page: &Page,
    headlines: &[String],
    renderer: &mut R,
    options: &DriveOptions,
) -> Result<()> {
    let page = drop_missing_images(page, &options.base_dir);
    let content = classify(&page);
    let plan = build_plan(&content, &page.config, headlines);
    issue_plan(&plan, &page, renderer, options)
}

/// Remove images whose local file does not exist, so they never occupy a
/// grid slot. Remote URLs are kept; the backend fetches them.
fn drop_missing_images(page: &Page, base_dir: &Path) -> Page {
    if page.image_lines.is_empty() {
        return page.clone();
    }
    let mut filtered = page.clone();
    filtered.image_lines.clear();
    filtered.image_line_numbers.clear();
    for (line, &number) in page.image_lines.iter().zip(&page.image_line_numbers) {
        let available = ImageRef::parse(line)
            .map(|image| image_available(&image, base_dir))
            .unwrap_or(false);
        if available {
            filtered.image_lines.push(line.clone());
            filtered.image_line_numbers.push(number);
        } else {
            log::warn!("line {number}: image not found, dropping: {line}");
        }
    }
    filtered
}

fn image_available(image: &ImageRef, base_dir: &Path) -> bool {
    let file = image.file_path();
    if file.is_empty() {
        return false;
    }
    if image.is_remote() {
        return true;
    }
    let path = Path::new(file);
    if path.is_absolute() {
        path.exists()
    } else {
        base_dir.join(path).exists()
    }
}

fn issue_plan<R: Renderer>(
    plan: &RenderPlan,
    page: &Page,
    renderer: &mut R,
    options: &DriveOptions,
) -> Result<()> {
    let config = &page.config;
    let d = &config.dimensions;

    renderer.begin_page()?;
    renderer.set_font(
        FontCategory::Standard,
        config.fonts.font_file_standard.as_deref(),
        d.font_size_standard,
    );
    renderer.set_font(
        FontCategory::Title,
        config.fonts.font_file_title.as_deref(),
        d.font_size_title,
    );
    renderer.set_font(
        FontCategory::Footer,
        config.fonts.font_file_footer.as_deref(),
        d.font_size_footer,
    );
    renderer.set_text_color(&config.text_color);
    renderer.set_draw_color(&config.text_color);

    for item in plan {
        match item {
            PlanItem::Background { color } => renderer.set_background_color(color),
            PlanItem::Image { src, frame, crop } => {
                if ImageRef::vector_path(src)
                    && (renderer.prefers_raster_images() || options.raster_images)
                {
                    log::debug!("vector source handed to raster-preferring backend: {src}");
                }
                renderer.image(src, *frame, *crop)?;
            }
            PlanItem::Title { text, rect } => {
                renderer.text_box(&[text.clone()], *rect, Some(1), Align::Left, false)?;
            }
            PlanItem::Subtitle { text, rect } => {
                renderer.text_box(&[text.clone()], *rect, Some(2), Align::Left, false)?;
            }
            PlanItem::BodyLine { text, rect, links } => {
                for link in links {
                    renderer.add_internal_link(link.page);
                }
                renderer.text_box(&[text.clone()], *rect, None, Align::Left, true)?;
            }
            PlanItem::Rule { from, to } => renderer.rule(*from, *to)?,
            PlanItem::Table { rows, rect } => renderer.table(rows, *rect)?,
            PlanItem::CalloutBox {
                lines,
                rect,
                border,
                fill,
            } => renderer.callout_box(lines, *rect, border, fill)?,
            PlanItem::Footer { text, rect } => {
                renderer.set_text_color(&config.footer_color);
                renderer.footer_text(text, *rect)?;
                renderer.set_text_color(&config.text_color);
            }
            PlanItem::Logo { src, rect } => renderer.image(src, *rect, false)?,
            PlanItem::BeginGroup { label } => renderer.begin_group(label),
            PlanItem::EndGroup => renderer.end_group(),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, PlanRenderer};
    use crate::segment::segment;

    #[test]
    fn test_one_begin_page_per_visible_page() {
        let seg = segment("# A\n# B\n---\nhidden: true\n---\n# C").unwrap();
        let mut renderer = PlanRenderer::new();
        render_document(&seg, &mut renderer, &DriveOptions::new()).unwrap();
        assert_eq!(renderer.page_count(), 2);
    }

    #[test]
    fn test_internal_links_reach_the_backend() {
        let seg = segment("# A\n[go](#B)\n# B").unwrap();
        let mut renderer = PlanRenderer::new();
        render_document(&seg, &mut renderer, &DriveOptions::new()).unwrap();
        assert!(renderer
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::InternalLink { target_page: 2, .. })));
    }

    #[test]
    fn test_missing_images_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let seg = segment("# A\n![x](missing.png)").unwrap();
        let mut renderer = PlanRenderer::new();
        let options = DriveOptions::new().with_base_dir(dir.path());
        render_document(&seg, &mut renderer, &options).unwrap();
        assert!(!renderer
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Image { .. })));
    }

    #[test]
    fn test_existing_and_remote_images_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("real.png"), b"png").unwrap();
        let seg =
            segment("# A\n![x](real.png)\n![y](https://example.org/y.png)").unwrap();
        let mut renderer = PlanRenderer::new();
        let options = DriveOptions::new().with_base_dir(dir.path());
        render_document(&seg, &mut renderer, &options).unwrap();
        let images = renderer
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Image { .. }))
            .count();
        assert_eq!(images, 2);
    }

    #[test]
    fn test_footer_toggles_text_color() {
        let seg = segment("---\nfooter: deckdown\n---\n# A\nbody").unwrap();
        let mut renderer = PlanRenderer::new();
        render_document(&seg, &mut renderer, &DriveOptions::new()).unwrap();

        let ops = renderer.ops();
        let footer_at = ops
            .iter()
            .position(|op| matches!(op, DrawOp::Footer { .. }))
            .unwrap();
        assert!(matches!(ops[footer_at - 1], DrawOp::TextColor { .. }));
        assert!(matches!(ops[footer_at + 1], DrawOp::TextColor { .. }));
    }
}
