//! Whole-line editing commands: delete line, duplicate line, indent.
//!
//! Each command expands or reads the live selection, then hands the content
//! replacement to [`Document::insert_text`]. With no selection a command
//! declines.

use tracing::debug;

use crate::traits::Document;
use crate::types::{Boundary, NodeId, NodeKind, Outcome, SelectionRange};

/// Expands `range` to cover the whole first line through the whole last line.
///
/// In a text node the start moves to offset 0 and the end moves past the
/// node's next sibling (its terminating break), or to the end of the node
/// when it has none. In a container the start moves back one child and the
/// end stays put.
pub fn expand_to_lines<D: Document + ?Sized>(doc: &D, range: SelectionRange) -> SelectionRange {
    let start = match doc.kind(range.start.node) {
        NodeKind::Text => Boundary::new(range.start.node, 0),
        NodeKind::Container | NodeKind::Break => {
            Boundary::new(range.start.node, range.start.offset.saturating_sub(1))
        }
    };
    let end = match doc.kind(range.end.node) {
        NodeKind::Text => doc
            .next_inline_sibling(range.end.node)
            .and_then(|next| doc.after(next))
            .unwrap_or_else(|| Boundary::new(range.end.node, doc.text_len(range.end.node))),
        NodeKind::Container | NodeKind::Break => range.end,
    };
    SelectionRange::new(start, end)
}

pub fn delete_line<D: Document + ?Sized>(doc: &mut D) -> Outcome {
    let Some(range) = doc.selection() else {
        return Outcome::Declined;
    };
    let lines = expand_to_lines(doc, range);
    doc.set_selection(lines);
    doc.insert_text("");
    debug!(?lines, "deleted line");
    Outcome::Stop
}

/// Inserts a copy of the current line (collapsed selection) or of the
/// selected text right after itself.
pub fn duplicate_line<D: Document + ?Sized>(doc: &mut D) -> Outcome {
    let Some(mut range) = doc.selection() else {
        return Outcome::Declined;
    };
    let text = if range.is_collapsed() {
        range = current_line(doc, range.start);
        format!("\n{}", doc.selected_text(range))
    } else {
        doc.selected_text(range)
    };
    doc.set_selection(SelectionRange::caret(range.end));
    doc.insert_text(&text);
    debug!(len = text.len(), "duplicated line");
    Outcome::Stop
}

/// The line holding a collapsed caret. Inside a text node that is the whole
/// node; inside a container it runs between the nearest breaks around the
/// caret's child index, which is empty on an empty line.
fn current_line<D: Document + ?Sized>(doc: &D, caret: Boundary) -> SelectionRange {
    let node = caret.node;
    if doc.kind(node) == NodeKind::Text {
        return SelectionRange::new(
            Boundary::new(node, 0),
            Boundary::new(node, doc.boundary_len(node)),
        );
    }
    let count = doc.child_count(node);
    let index = caret.offset.min(count);
    let start = (0..index)
        .rev()
        .find(|&i| is_break_at(doc, node, i))
        .map_or(0, |i| i + 1);
    let end = (index..count)
        .find(|&i| is_break_at(doc, node, i))
        .unwrap_or(count);
    SelectionRange::new(Boundary::new(node, start), Boundary::new(node, end))
}

fn is_break_at<D: Document + ?Sized>(doc: &D, container: NodeId, index: u32) -> bool {
    doc.child_at(container, index)
        .is_some_and(|child| doc.kind(child) == NodeKind::Break)
}

/// Prefixes every line of `text` with `indent`.
pub fn indent_lines(text: &str, indent: &str) -> String {
    text.split('\n')
        .map(|line| format!("{indent}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn indent_selection<D: Document + ?Sized>(doc: &mut D, indent: &str) -> Outcome {
    let Some(range) = doc.selection() else {
        return Outcome::Declined;
    };
    let indented = indent_lines(&doc.selected_text(range), indent);
    doc.insert_text(&indented);
    Outcome::Stop
}
