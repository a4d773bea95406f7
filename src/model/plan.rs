//! Rectangles and the render plan: the layout engine's only output.

use serde::{Deserialize, Serialize};

use crate::config::Color;

/// An axis-aligned rectangle in page-relative document units.
///
/// Width and height are derived from the corners; every constructor upholds
/// `x1 >= x0` and `y1 >= y0`, so both are always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x0: f32,
    /// Top edge.
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Bottom edge.
    pub y1: f32,
}

impl Rect {
    /// Create a rectangle from its corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        debug_assert!(x1 >= x0, "rect width must be non-negative ({x0}..{x1})");
        debug_assert!(y1 >= y0, "rect height must be non-negative ({y0}..{y1})");
        Self { x0, y0, x1, y1 }
    }

    /// Create a rectangle from its top-left corner and size.
    pub fn from_size(x0: f32, y0: f32, w: f32, h: f32) -> Self {
        Self::new(x0, y0, x0 + w, y0 + h)
    }

    /// Width of the rectangle.
    pub fn w(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    pub fn h(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Aspect ratio (width over height); zero-height rects return 0.
    pub fn aspect(&self) -> f32 {
        if self.h() == 0.0 {
            0.0
        } else {
            self.w() / self.h()
        }
    }

    /// Whether `other` lies entirely within this rectangle, borders
    /// included, within `tolerance` document units.
    pub fn contains(&self, other: &Rect, tolerance: f32) -> bool {
        other.x0 >= self.x0 - tolerance
            && other.y0 >= self.y0 - tolerance
            && other.x1 <= self.x1 + tolerance
            && other.y1 <= self.y1 + tolerance
    }

    /// Whether the interiors of two rectangles overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }
}

/// An internal link resolved against the headline index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLink {
    /// Link display text.
    pub text: String,
    /// 1-based target page number.
    pub page: usize,
}

/// One entry of a render plan: a kind, a rectangle and its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanItem {
    /// Fill the page with the background color.
    Background {
        /// Fill color.
        color: Color,
    },

    /// Place an image.
    Image {
        /// Source path or URL, possibly with a `#page` suffix.
        src: String,
        /// Cell the image occupies. The backend fits the image into it with
        /// the contain/cover math from [`crate::layout`].
        frame: Rect,
        /// Cover (`true`) or contain (`false`) fit.
        crop: bool,
    },

    /// Page title line.
    Title {
        /// Title text.
        text: String,
        /// Line box.
        rect: Rect,
    },

    /// Page subtitle line.
    Subtitle {
        /// Subtitle text.
        text: String,
        /// Line box.
        rect: Rect,
    },

    /// One body text line (markdown inline syntax preserved).
    BodyLine {
        /// Line text.
        text: String,
        /// Line box.
        rect: Rect,
        /// Internal links resolved to page numbers.
        links: Vec<ResolvedLink>,
    },

    /// A straight rule (horizontal separator or column divider).
    Rule {
        /// Start point.
        from: (f32, f32),
        /// End point.
        to: (f32, f32),
    },

    /// A table block.
    Table {
        /// Cell text by row.
        rows: Vec<Vec<String>>,
        /// Table box.
        rect: Rect,
    },

    /// A callout box with its folded label line.
    CalloutBox {
        /// Box content, label first when present.
        lines: Vec<String>,
        /// Box rectangle.
        rect: Rect,
        /// Border color.
        border: Color,
        /// Fill color.
        fill: Color,
    },

    /// Footer line near the bottom page edge.
    Footer {
        /// Footer text.
        text: String,
        /// Footer box.
        rect: Rect,
    },

    /// Logo stamped near the bottom-right corner.
    Logo {
        /// Logo image path.
        src: String,
        /// Logo box.
        rect: Rect,
    },

    /// Start of a drawing group; backends may interpret or ignore.
    BeginGroup {
        /// Group label.
        label: String,
    },

    /// End of the innermost open group.
    EndGroup,
}

impl PlanItem {
    /// The rectangle this item occupies, if it has one.
    pub fn rect(&self) -> Option<Rect> {
        match self {
            PlanItem::Image { frame, .. } => Some(*frame),
            PlanItem::Title { rect, .. }
            | PlanItem::Subtitle { rect, .. }
            | PlanItem::BodyLine { rect, .. }
            | PlanItem::Table { rect, .. }
            | PlanItem::CalloutBox { rect, .. }
            | PlanItem::Footer { rect, .. }
            | PlanItem::Logo { rect, .. } => Some(*rect),
            _ => None,
        }
    }
}

/// Ordered list of plan items for one page. No drawing side effects: the
/// Driver turns items into backend calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    /// Plan items in draw order.
    pub items: Vec<PlanItem>,
}

impl RenderPlan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item.
    pub fn push(&mut self, item: PlanItem) {
        self.items.push(item);
    }

    /// Iterate over the items in draw order.
    pub fn iter(&self) -> std::slice::Iter<'_, PlanItem> {
        self.items.iter()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the plan is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All image placements (main grid, credit strip and background image;
    /// the logo is its own kind).
    pub fn images(&self) -> impl Iterator<Item = &PlanItem> {
        self.items
            .iter()
            .filter(|item| matches!(item, PlanItem::Image { .. }))
    }
}

impl<'a> IntoIterator for &'a RenderPlan {
    type Item = &'a PlanItem;
    type IntoIter = std::slice::Iter<'a, PlanItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_accessors() {
        let r = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(r.w(), 100.0);
        assert_eq!(r.h(), 50.0);
        assert_eq!(r.aspect(), 2.0);
    }

    #[test]
    fn test_rect_from_size() {
        let r = Rect::from_size(5.0, 5.0, 30.0, 40.0);
        assert_eq!(r.x1, 35.0);
        assert_eq!(r.y1, 45.0);
    }

    #[test]
    fn test_rect_containment_and_overlap() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(10.0, 10.0, 90.0, 90.0);
        assert!(outer.contains(&inner, 0.0));
        assert!(!inner.contains(&outer, 0.0));
        assert!(outer.overlaps(&inner));

        let disjoint = Rect::new(200.0, 200.0, 300.0, 300.0);
        assert!(!outer.overlaps(&disjoint));
    }

    #[test]
    fn test_plan_round_trips_through_json() {
        let mut plan = RenderPlan::new();
        plan.push(PlanItem::Title {
            text: "Hello".into(),
            rect: Rect::from_size(30.0, 40.0, 420.0, 26.0),
        });
        plan.push(PlanItem::BeginGroup {
            label: "callout".into(),
        });
        plan.push(PlanItem::EndGroup);

        let json = serde_json::to_string(&plan).unwrap();
        let back: RenderPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(plan, back);
    }
}
