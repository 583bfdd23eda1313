//! Tree rewriting stages
//!
//! The stages run in this order and each leaves the tree well-formed for
//! the next one:
//!
//! 1. [`annotate_depths`] records each section's distance from the root.
//! 2. [`resolve_breaks`] turns transitions and slide breaks into sections.
//! 3. [`restructure`] hoists sections at configured depths to top-level
//!    slides and unwraps nesting deeper than reveal.js can show.
//! 4. [`promote_title_slides`] gives section headings their own slide.

mod autobreak;
mod breaks;
mod depth;
mod title_slide;

pub use autobreak::{hoist_sections, restructure, unwrap_deep_sections, Restructured, UNWRAP_DEPTH};
pub use breaks::{effective_title, migrate_transitions, resolve_breaks};
pub use depth::{annotate_depths, section_depth};
pub use title_slide::{promote_title_slides, split_title_slide};
