//! Askama templates for the web frontend.

use askama::Template;

use crate::network::KnownLine;

/// Home page listing the available routes.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub lines: Vec<KnownLine>,
    pub stop_count: usize,
}
