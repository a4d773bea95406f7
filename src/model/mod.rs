//! Page model types for slide deck compilation.
//!
//! This module defines the intermediate representation that bridges
//! markdown segmentation, content classification and layout. The model is
//! backend-agnostic: a [`RenderPlan`] describes what goes where on one
//! slide without committing to any output format.

mod content;
mod page;
mod plan;

pub use content::{CalloutBox, ClassifiedContent, ImageRef};
pub use page::Page;
pub use plan::{PlanItem, Rect, RenderPlan, ResolvedLink};
