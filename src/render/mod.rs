//! HTML rendering of the allocation dashboard.

pub mod html;

pub use html::render_html_dashboard;
