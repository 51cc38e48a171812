//! Plain-Enter handling.
//!
//! A lone trailing break unit renders as no visible new line, so a break
//! inserted where nothing break-equivalent follows is doubled.

use std::iter;

use tracing::debug;

use crate::traits::Document;
use crate::types::{Boundary, NodeKind, Outcome, SelectionRange};

/// How many break units to insert at a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakPlan {
    pub breaks: usize,
}

impl BreakPlan {
    pub const SINGLE: BreakPlan = BreakPlan { breaks: 1 };
    pub const DOUBLE: BreakPlan = BreakPlan { breaks: 2 };
}

/// Whether any break-equivalent content follows `at`.
fn followed_by_content<D: Document + ?Sized>(doc: &D, at: Boundary) -> bool {
    match doc.kind(at.node) {
        NodeKind::Text => {
            at.offset < doc.text_len(at.node)
                || iter::successors(doc.next_inline_sibling(at.node), |n| {
                    doc.next_inline_sibling(*n)
                })
                .any(|n| doc.is_break_equivalent(n))
        }
        NodeKind::Container | NodeKind::Break => (at.offset..)
            .map_while(|i| doc.child_at(at.node, i))
            .any(|n| doc.is_break_equivalent(n)),
    }
}

/// Decides how many break units inserting a new line at `at` needs.
pub fn plan_break<D: Document + ?Sized>(doc: &D, at: Boundary) -> BreakPlan {
    if followed_by_content(doc, at) {
        BreakPlan::SINGLE
    } else {
        BreakPlan::DOUBLE
    }
}

/// Replaces the selection with a visible line break and puts the caret on
/// the new line.
pub fn insert_line_break<D: Document + ?Sized>(doc: &mut D) -> Outcome {
    let Some(range) = doc.selection() else {
        return Outcome::Declined;
    };
    let at = doc.delete_contents(range);
    let plan = plan_break(doc, at);
    let first = doc.insert_breaks(at, plan.breaks);
    if let Some(after) = doc.after(first) {
        doc.set_selection(SelectionRange::caret(after));
    }
    doc.notify_content_changed();
    debug!(breaks = plan.breaks, "inserted line break");
    Outcome::Stop
}
