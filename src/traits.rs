use crate::types::{Boundary, NodeId, NodeKind, SelectionRange};

/// The host's document model: live selection, content primitives and an
/// inline node walk.
pub trait Document {
    // Selection and content primitives
    fn selection(&self) -> Option<SelectionRange>;
    fn set_selection(&mut self, range: SelectionRange);

    /// Plain-text content of the whole editing surface.
    fn plain_text(&self) -> String;

    /// Plain text covered by `range`, scoped to the editor root.
    fn selected_text(&self, range: SelectionRange) -> String;

    /// Replaces the current selection with literal text and raises a
    /// content-changed notification.
    fn insert_text(&mut self, text: &str);

    fn notify_content_changed(&mut self);

    /// Removes everything covered by `range` and returns the boundary where
    /// the range collapsed.
    fn delete_contents(&mut self, range: SelectionRange) -> Boundary;

    /// Inserts `count` break units at `at`, splitting a text node when `at`
    /// falls inside one. Returns the first inserted break.
    fn insert_breaks(&mut self, at: Boundary, count: usize) -> NodeId;

    // Node walk
    fn kind(&self, node: NodeId) -> NodeKind;
    fn text_len(&self, node: NodeId) -> u32; // characters; 0 for non-text nodes
    fn child_count(&self, node: NodeId) -> u32;
    fn child_at(&self, container: NodeId, index: u32) -> Option<NodeId>;
    fn next_inline_sibling(&self, node: NodeId) -> Option<NodeId>;
    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn index_in_parent(&self, node: NodeId) -> Option<u32>;

    /// The largest valid offset inside `node`.
    fn boundary_len(&self, node: NodeId) -> u32 {
        match self.kind(node) {
            NodeKind::Text => self.text_len(node),
            NodeKind::Container => self.child_count(node),
            NodeKind::Break => 0,
        }
    }

    /// A break unit or a non-empty text node.
    fn is_break_equivalent(&self, node: NodeId) -> bool {
        match self.kind(node) {
            NodeKind::Break => true,
            NodeKind::Text => self.text_len(node) > 0,
            NodeKind::Container => false,
        }
    }

    /// The boundary immediately before `node` in its parent.
    fn before(&self, node: NodeId) -> Option<Boundary> {
        Some(Boundary::new(self.parent(node)?, self.index_in_parent(node)?))
    }

    /// The boundary immediately after `node` in its parent.
    fn after(&self, node: NodeId) -> Option<Boundary> {
        Some(Boundary::new(self.parent(node)?, self.index_in_parent(node)? + 1))
    }
}

/// The suggestion list's presentation state. Items are addressed by index.
pub trait HintList {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the list is currently shown.
    fn is_displayed(&self) -> bool;

    /// Index of the item carrying the "current" mark.
    fn current(&self) -> Option<usize>;

    /// Moves the "current" mark; at most one item carries it.
    fn set_current(&mut self, index: Option<usize>);
}

/// A host without a suggestion list.
impl HintList for () {
    fn len(&self) -> usize {
        0
    }

    fn is_displayed(&self) -> bool {
        false
    }

    fn current(&self) -> Option<usize> {
        None
    }

    fn set_current(&mut self, _index: Option<usize>) {}
}

/// Editor-level actions the dispatcher triggers.
pub trait Host {
    /// Escape was pressed; receives the plain-text content.
    fn on_escape(&mut self, _text: &str) {}

    /// Ctrl/Cmd+Enter was pressed; receives the plain-text content.
    fn on_ctrl_enter(&mut self, _text: &str) {}

    /// Inserts the chosen suggestion and closes the list.
    fn commit_hint(&mut self, index: usize);

    /// Runs the editor action bound to a shortcut-table entry.
    fn trigger_action(&mut self, name: &str);
}
