//! Geometry and layout engine.
//!
//! Pure rectangle math over the resolved configuration: where the title,
//! body text, image grid, credit strip, columns and callout boxes sit on a
//! page, and how images fit their cells. No I/O happens here; the single
//! entry point [`build_plan`] turns one page's classified content into a
//! [`crate::model::RenderPlan`] that the Driver replays against a backend.

mod boxes;
mod columns;
mod grid;
mod offsets;
mod plan;

pub use boxes::callout_box_rects;
pub use columns::column_offsets;
pub use grid::{
    contain_rect, cover_rect, credit_cells, grid_shape, image_grid_cells, GridShape,
    CREDIT_ASPECT, CREDIT_HEIGHT_FRACTION,
};
pub use offsets::{image_area, page_offsets, text_offsets};
pub use plan::{build_plan, LOGO_HEIGHT, LOGO_WIDTH};
