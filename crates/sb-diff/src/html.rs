//! HTML span rendering for the songbook templates.
//!
//! Each segment becomes `<span class="KIND">TEXT</span>` with the text
//! escaped, so the output can be dropped into a page as-is. Styling
//! (strikethrough for `removed`, highlight for `added`) lives in the page's
//! stylesheet.

use sb_core::Segment;

use crate::render::render;

/// Render `prev` → `new` and format the segments as HTML spans.
pub fn render_html(prev: &str, new: &str) -> String {
    segments_to_html(&render(prev, new))
}

/// Format already-rendered segments as HTML spans.
pub fn segments_to_html(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push_str("<span class=\"");
        out.push_str(segment.kind.as_str());
        out.push_str("\">");
        out.push_str(&html_escape(&segment.text));
        out.push_str("</span>");
    }
    out
}

/// Escape text for use inside HTML element content or a quoted attribute.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
