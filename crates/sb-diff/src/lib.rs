pub mod html;
pub mod matcher;
pub mod render;
pub mod result;
pub mod tokenize;
pub mod unified;
pub mod worker;

pub use html::{render_html, segments_to_html};
pub use render::{render, DiffRenderer, REFINE_THRESHOLD};
pub use result::*;
pub use unified::{unified_diff, unified_diff_with_context};
pub use worker::{BatchConfig, BatchRenderer, DiffRequest, DiffResponse};
