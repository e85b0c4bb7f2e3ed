//! Plain-text rendering of panels.
//!
//! A panel renders as a header followed by its body lines. While the first
//! load is pending the body is a single "Loading ..." line. Errors are not
//! shown: the loading line simply disappears, and records from an earlier
//! success (if any) stay on screen.

use std::borrow::Cow;

use crate::pagination::PaginationController;
use crate::panel::PanelController;
use crate::types::{Post, Record, Resource, Todo};

/// How one record is laid out in a panel.
pub trait ItemView: Record {
    fn heading(&self) -> &str;
    fn detail(&self) -> Cow<'_, str>;
}

impl ItemView for Post {
    fn heading(&self) -> &str {
        &self.title
    }

    fn detail(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.body)
    }
}

impl ItemView for Todo {
    fn heading(&self) -> &str {
        &self.title
    }

    fn detail(&self) -> Cow<'_, str> {
        Cow::Borrowed(if self.completed { "Completed" } else { "Incomplete" })
    }
}

/// Lines each record occupies: heading, detail, spacer.
pub const LINES_PER_ITEM: usize = 3;

pub fn header(resource: Resource) -> Vec<String> {
    let title = resource.title();
    vec![
        format!("{title}  [r {resource}] Refetch {title}"),
        "-".repeat(40),
    ]
}

pub fn loading_line(resource: Resource) -> String {
    format!("Loading {resource} ...")
}

pub fn render_item<R: ItemView>(item: &R, out: &mut Vec<String>) {
    out.push(item.heading().to_string());
    out.push(format!("  {}", item.detail().replace('\n', " ")));
    out.push(String::new());
}

/// Body lines (no header) of a single-fetch panel.
pub fn panel_body<R: ItemView>(panel: &PanelController<R>) -> Vec<String> {
    if panel.is_loading() {
        return vec![loading_line(R::RESOURCE)];
    }
    let mut out = Vec::new();
    for item in panel.data().unwrap_or_default() {
        render_item(item, &mut out);
    }
    out
}

/// Body lines (no header) of an incrementally loaded panel.
pub fn paged_body<R: ItemView>(pages: &PaginationController<R>) -> Vec<String> {
    if pages.is_loading() {
        return vec![loading_line(R::RESOURCE)];
    }
    let mut out = Vec::with_capacity(pages.item_count() * LINES_PER_ITEM + 1);
    for item in pages.items() {
        render_item(item, &mut out);
    }
    if pages.is_fetching_next_page() {
        out.push("Loading more ...".to_string());
    }
    out
}

pub fn render_panel<R: ItemView>(panel: &PanelController<R>) -> Vec<String> {
    let mut out = header(R::RESOURCE);
    out.extend(panel_body(panel));
    out
}
