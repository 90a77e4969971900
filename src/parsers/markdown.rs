//! HTML to Markdown conversion with re-aligned tables.
//!
//! Tables are first reduced to one pipe-delimited line per row by the row
//! and cell handlers, then [`format_table`] pads every column to a common
//! width. Everything else goes through htmd's stock handlers.

use crate::error::{Result, WikiError};
use crate::parsers::table::{ESCAPED_PIPE, TableRows, format_table};
use htmd::{
    Element, HtmlToMarkdown,
    element_handler::{HandlerResult, Handlers},
};
use markup5ever_rcdom::{Node, NodeData};
use std::rc::{Rc, Weak};

/// Build an htmd converter whose table handling produces aligned pipe tables
pub fn create_converter() -> HtmlToMarkdown {
    HtmlToMarkdown::builder()
        .add_handler(vec!["td", "th"], cell_handler)
        .add_handler(vec!["tr"], row_handler)
        .add_handler(vec!["thead", "tbody", "tfoot"], section_handler)
        .add_handler(vec!["caption"], caption_handler)
        .add_handler(vec!["table"], table_handler)
        .build()
}

/// Convert sanitized HTML into Markdown
pub fn convert(html: &str) -> Result<String> {
    let converter = create_converter();
    let markdown = converter
        .convert(html)
        .map_err(|e| WikiError::Conversion(e.to_string()))?;

    ::log::debug!(
        "Converted {} bytes of HTML into {} bytes of text",
        html.len(),
        markdown.len()
    );
    Ok(markdown)
}

/// `<table>`: collect the pipe rows of its children and re-align them
fn table_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let mut caption = None;
    let mut intermediate = String::new();

    for child in element.node.children.borrow().iter() {
        if tag_name(child).as_deref() == Some("caption") {
            caption = Some(single_line(&handlers.walk_children(child).content));
            continue;
        }
        if let Some(result) = handlers.handle(child) {
            intermediate.push_str(&result.content);
        }
    }

    if inside_cell(element.node) {
        return nested_table(&intermediate, caption.as_deref());
    }

    let table = format_table(&intermediate, caption.as_deref())?;
    Some(HandlerResult::from(format!("\n\n{}\n\n", table)))
}

/// A table inside a cell cannot keep its rows, so it becomes plain cell text
fn nested_table(intermediate: &str, caption: Option<&str>) -> Option<HandlerResult> {
    let text = TableRows::parse(intermediate).to_inline();
    let text = match caption.filter(|c| !c.is_empty()) {
        Some(caption) if text.is_empty() => caption.to_string(),
        Some(caption) => format!("{}: {}", caption, text),
        None if text.is_empty() => return None,
        None => text,
    };
    Some(HandlerResult::from(text))
}

fn section_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    Some(handlers.walk_children(element.node))
}

/// `<tr>`: one physical line, `|` followed by the cells
fn row_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let cells = single_line(&handlers.walk_children(element.node).content);
    if cells.is_empty() {
        return None;
    }
    Some(HandlerResult::from(format!("|{}\n", cells)))
}

/// `<td>` / `<th>`: cell text followed by its closing pipe
fn cell_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let content = single_line(&handlers.walk_children(element.node).content);
    let content = content.replace('|', ESCAPED_PIPE);
    Some(HandlerResult::from(format!(" {} |", content)))
}

/// A caption outside a table renders as a plain paragraph
fn caption_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let content = single_line(&handlers.walk_children(element.node).content);
    if content.is_empty() {
        return None;
    }
    Some(HandlerResult::from(format!("\n\n{}\n\n", content)))
}

fn inside_cell(node: &Rc<Node>) -> bool {
    let mut current = parent(node);
    while let Some(node) = current {
        match tag_name(&node).as_deref() {
            Some("td" | "th") => return true,
            Some("table") => return false,
            _ => current = parent(&node),
        }
    }
    false
}

fn parent(node: &Rc<Node>) -> Option<Rc<Node>> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(Weak::upgrade);
    node.parent.set(weak);
    parent
}

fn tag_name(node: &Rc<Node>) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

/// Collapse line breaks so the content fits on one row
fn single_line(content: &str) -> String {
    content
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
        .trim()
        .to_string()
}
