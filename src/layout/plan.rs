//! Render plan assembly: classified content + configuration → plan items.
//!
//! [`build_plan`] is the layout engine's top-level entry point. It walks a
//! page's classified content with a vertical cursor, tracking column slots
//! and pending table rows, and emits one plan item per drawable element.
//! It performs no I/O and has no side effects beyond the returned plan.

use regex::Regex;

use crate::config::{Config, Dimensions};
use crate::model::{ClassifiedContent, PlanItem, Rect, RenderPlan, ResolvedLink};

use super::boxes::callout_box_rects;
use super::columns::column_offsets;
use super::grid::{credit_cells, image_grid_cells};
use super::offsets::{page_offsets, text_offsets};
use crate::classify::is_divider_line;

/// Logo stamp width in document units.
pub const LOGO_WIDTH: f32 = 23.0;

/// Logo stamp height in document units.
pub const LOGO_HEIGHT: f32 = 30.0;

/// Vertical room one table row takes, as a multiple of the body line
/// height.
const TABLE_ROW_FACTOR: f32 = 1.8;

/// Build the render plan for one classified page.
///
/// `headlines` is the document's headline index; internal links in body
/// lines resolve against it, and targets that are missing degrade to plain
/// text with a warning.
pub fn build_plan(content: &ClassifiedContent, config: &Config, headlines: &[String]) -> RenderPlan {
    let d = &config.dimensions;
    let mut plan = RenderPlan::new();

    plan.push(PlanItem::Background {
        color: config.background_color.clone(),
    });

    if let Some(src) = &config.background_image {
        plan.push(PlanItem::Image {
            src: src.clone(),
            frame: Rect::new(0.0, 0.0, d.page_width, d.page_height),
            crop: true,
        });
    }

    let cells = image_grid_cells(
        content.images.len(),
        config.layout,
        d,
        content.has_body_text(),
        config.packed_images,
    );
    for (image, cell) in content.images.iter().zip(cells) {
        plan.push(PlanItem::Image {
            src: image.src.clone(),
            frame: cell,
            crop: config.crop_images,
        });
    }

    for (image, cell) in content
        .credit_images
        .iter()
        .zip(credit_cells(content.credit_images.len(), config.layout, d))
    {
        plan.push(PlanItem::Image {
            src: image.src.clone(),
            frame: cell,
            crop: true,
        });
    }

    push_title(&mut plan, content, config);
    push_body(&mut plan, content, config, headlines);

    if let Some(text) = &config.footer {
        plan.push(PlanItem::Footer {
            text: text.clone(),
            rect: Rect::from_size(
                d.margin_footer,
                d.page_height - d.margin_footer - d.em_footer,
                d.page_width - 2.0 * d.margin_footer,
                d.em_footer,
            ),
        });
    }

    if let Some(src) = &config.logo {
        plan.push(PlanItem::Logo {
            src: src.clone(),
            rect: Rect::from_size(
                d.page_width - LOGO_WIDTH - d.margin_footer,
                d.page_height - LOGO_HEIGHT - d.margin_footer,
                LOGO_WIDTH,
                LOGO_HEIGHT,
            ),
        });
    }

    let counts: Vec<usize> = content.boxes.iter().map(|b| b.line_count()).collect();
    for (callout, rect) in content.boxes.iter().zip(callout_box_rects(&counts, d)) {
        plan.push(PlanItem::BeginGroup {
            label: "callout".into(),
        });
        plan.push(PlanItem::CalloutBox {
            lines: callout.lines.clone(),
            rect,
            border: config.box_border_color.clone(),
            fill: config.box_fill_color.clone(),
        });
        plan.push(PlanItem::EndGroup);
    }

    plan
}

fn push_title(plan: &mut RenderPlan, content: &ClassifiedContent, config: &Config) {
    let d = &config.dimensions;
    let offsets = page_offsets(config.layout, d);

    // A title alone on the page is centered vertically, except on layouts
    // that anchor the title to a specific region.
    let title_only = !content.has_body_text()
        && content.images.is_empty()
        && content.credit_images.is_empty();
    let title_y = if title_only && !config.layout.is_center_family() && !config.layout.is_small() {
        d.page_height / 2.0 - d.em_title / 2.0
    } else {
        offsets.y0
    };

    if !content.title.is_empty() {
        plan.push(PlanItem::Title {
            text: content.title.clone(),
            rect: Rect::from_size(offsets.x0, title_y, offsets.w(), d.em_title),
        });
    }

    if !content.subtitle.is_empty() {
        plan.push(PlanItem::Subtitle {
            text: content.subtitle.clone(),
            rect: Rect::from_size(
                offsets.x0 + d.em,
                title_y + d.em_title / 2.0,
                (offsets.w() - d.em).max(0.0),
                d.em,
            ),
        });
    }
}

fn push_body(
    plan: &mut RenderPlan,
    content: &ClassifiedContent,
    config: &Config,
    headlines: &[String],
) {
    if content.body.is_empty() {
        return;
    }
    let d = &config.dimensions;
    let has_images = content.has_images() || !content.credit_images.is_empty();
    let text_area = text_offsets(config.layout, d, has_images);
    let columns = config.columns.max(1) as usize;

    plan.push(PlanItem::BeginGroup {
        label: "body".into(),
    });

    let mut column = 0;
    let mut slot = if columns > 1 {
        column_offsets(text_area, columns, 0, d.internal_margin)
    } else {
        text_area
    };
    let mut y = slot.y0;
    let mut table: Vec<Vec<String>> = Vec::new();

    for line in &content.body {
        if is_divider_line(line) && columns > 1 && column + 1 < columns {
            flush_table(plan, &mut table, &mut y, slot, d);
            column += 1;
            slot = column_offsets(text_area, columns, column, d.internal_margin);
            let x = slot.x0 - d.internal_margin / 2.0;
            plan.push(PlanItem::Rule {
                from: (x, text_area.y0),
                to: (x, text_area.y1),
            });
            y = slot.y0;
            continue;
        }

        if let Some(row) = table_row(line) {
            table.push(row);
            continue;
        }
        flush_table(plan, &mut table, &mut y, slot, d);

        if line.trim().is_empty() {
            y += 0.5 * d.em;
            continue;
        }

        if is_divider_line(line) {
            // horizontal rule: all column slots are already used up
            plan.push(PlanItem::Rule {
                from: (slot.x0, y + 0.5 * d.em),
                to: (slot.x1, y + 0.5 * d.em),
            });
            y += d.em;
            continue;
        }

        if y + d.em > slot.y1 {
            log::warn!("body line overflows the text area, skipping: {line:?}");
            continue;
        }

        let (text, links) = resolve_links(line, headlines);
        plan.push(PlanItem::BodyLine {
            text,
            rect: Rect::from_size(slot.x0, y, slot.w(), d.em),
            links,
        });
        y += d.em;
    }
    flush_table(plan, &mut table, &mut y, slot, d);

    plan.push(PlanItem::EndGroup);
}

fn flush_table(
    plan: &mut RenderPlan,
    table: &mut Vec<Vec<String>>,
    y: &mut f32,
    slot: Rect,
    d: &Dimensions,
) {
    if table.is_empty() {
        return;
    }
    let rows = std::mem::take(table);
    let h = d.em * rows.len() as f32 * TABLE_ROW_FACTOR;
    plan.push(PlanItem::Table {
        rows,
        rect: Rect::from_size(slot.x0, *y, slot.w(), h),
    });
    *y += h;
}

/// Parse a `|a|b|` table row into its cells.
fn table_row(line: &str) -> Option<Vec<String>> {
    let trimmed = line.trim();
    if trimmed.len() > 1 && trimmed.starts_with('|') && trimmed.ends_with('|') {
        Some(
            trimmed[1..trimmed.len() - 1]
                .split('|')
                .map(str::to_string)
                .collect(),
        )
    } else {
        None
    }
}

/// Resolve `[text](#Heading)` links against the headline index.
///
/// Resolved links keep their markdown form and gain a [`ResolvedLink`]
/// entry; links whose target is missing are degraded to their plain text
/// with a warning, leaving the rest of the line intact.
fn resolve_links(line: &str, headlines: &[String]) -> (String, Vec<ResolvedLink>) {
    if !line.contains("](#") {
        return (line.to_string(), Vec::new());
    }
    let re = Regex::new(r"\[([^\]]+)\]\(#([^)]+)\)").unwrap();

    let mut links = Vec::new();
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for caps in re.captures_iter(line) {
        let m = caps.get(0).expect("whole match");
        let text = &caps[1];
        let target = &caps[2];
        match headlines.iter().position(|h| h == target) {
            Some(index) => {
                out.push_str(&line[last..m.end()]);
                links.push(ResolvedLink {
                    text: text.to_string(),
                    page: index + 1,
                });
            }
            None => {
                log::warn!("internal link target not found: {target:?}");
                out.push_str(&line[last..m.start()]);
                out.push_str(text);
            }
        }
        last = m.end();
    }
    out.push_str(&line[last..]);
    (out, links)
}
