#![allow(dead_code)]

use hotkey_mini::traits::Document;
use hotkey_mini::types::{Boundary, NodeId, NodeKind, SelectionRange};
use unicode_segmentation::UnicodeSegmentation;

/// Inline content for building a flat document.
#[derive(Debug, Clone, Copy)]
pub enum Inline<'a> {
    Text(&'a str),
    Break,
}

#[derive(Debug, Clone)]
enum Data {
    Text(String),
    Break,
    Container(Vec<NodeId>),
}

#[derive(Debug, Clone)]
struct Slot {
    data: Data,
    parent: Option<NodeId>,
}

/// A DOM-like document: a root container holding text and break nodes.
///
/// Text offsets count grapheme clusters. Node ids stay stable across edits;
/// removed nodes are detached, never reused.
#[derive(Debug, Clone)]
pub struct MockDocument {
    nodes: Vec<Slot>,
    root: NodeId,
    selection: Option<SelectionRange>,
    pub changes: usize,
}

fn grapheme_len(s: &str) -> u32 {
    s.graphemes(true).count() as u32
}

fn byte_index(s: &str, offset: u32) -> usize {
    s.grapheme_indices(true)
        .nth(offset as usize)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl MockDocument {
    pub fn from_nodes(inline: &[Inline]) -> Self {
        let mut doc = Self {
            nodes: vec![Slot {
                data: Data::Container(Vec::new()),
                parent: None,
            }],
            root: NodeId(0),
            selection: None,
            changes: 0,
        };
        for (i, item) in inline.iter().enumerate() {
            let data = match item {
                Inline::Text(t) => Data::Text((*t).to_string()),
                Inline::Break => Data::Break,
            };
            let id = doc.alloc(data);
            doc.attach(id, i);
        }
        doc
    }

    /// Parses markup like `"ab|c<br>def"`.
    ///
    /// `<br>` is a break unit, `|` a caret, `[` and `]` the ends of a
    /// selection. A marker inside or right after text is a text boundary;
    /// a marker anywhere else is a boundary in the root container.
    pub fn parse(markup: &str) -> Self {
        let mut inline: Vec<String> = Vec::new();
        let mut is_break: Vec<bool> = Vec::new();
        let mut buf = String::new();
        // (child index, text offset)
        let mut markers: Vec<(char, usize, Option<u32>)> = Vec::new();

        let mut rest = markup;
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix("<br>") {
                if !buf.is_empty() {
                    inline.push(std::mem::take(&mut buf));
                    is_break.push(false);
                }
                inline.push(String::new());
                is_break.push(true);
                rest = after;
                continue;
            }
            let mut chars = rest.chars();
            let c = chars.next().unwrap_or_default();
            rest = chars.as_str();
            match c {
                '|' | '[' | ']' => {
                    if buf.is_empty() {
                        markers.push((c, inline.len(), None));
                    } else {
                        markers.push((c, inline.len(), Some(grapheme_len(&buf))));
                    }
                }
                _ => buf.push(c),
            }
        }
        if !buf.is_empty() {
            inline.push(buf);
            is_break.push(false);
        }

        let items: Vec<Inline> = inline
            .iter()
            .zip(&is_break)
            .map(|(t, br)| if *br { Inline::Break } else { Inline::Text(t) })
            .collect();
        let mut doc = Self::from_nodes(&items);

        let boundary = |doc: &Self, index: usize, offset: Option<u32>| match offset {
            Some(off) => Boundary::new(doc.child(index), off),
            None => Boundary::new(doc.root, index as u32),
        };
        let mut start = None;
        let mut end = None;
        for (marker, index, offset) in markers {
            let b = boundary(&doc, index, offset);
            match marker {
                '|' => {
                    start = Some(b);
                    end = Some(b);
                }
                '[' => start = Some(b),
                _ => end = Some(b),
            }
        }
        if let (Some(start), Some(end)) = (start, end) {
            doc.selection = Some(SelectionRange::new(start, end));
        }
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The root's child at `index`.
    pub fn child(&self, index: usize) -> NodeId {
        self.children(self.root)[index]
    }

    pub fn select(&mut self, range: Option<SelectionRange>) {
        self.selection = range;
    }

    /// Renders the document back to markup, selection markers included.
    pub fn render(&self) -> String {
        let markers_at = |b: Boundary| -> String {
            match self.selection {
                Some(r) if r.is_collapsed() && r.start == b => "|".into(),
                Some(r) if !r.is_collapsed() => {
                    let mut s = String::new();
                    if r.start == b {
                        s.push('[');
                    }
                    if r.end == b {
                        s.push(']');
                    }
                    s
                }
                _ => String::new(),
            }
        };

        let mut out = String::new();
        let children = self.children(self.root);
        for (i, id) in children.iter().enumerate() {
            out.push_str(&markers_at(Boundary::new(self.root, i as u32)));
            match &self.slot(*id).data {
                Data::Text(t) => {
                    for (g, grapheme) in t.graphemes(true).enumerate() {
                        out.push_str(&markers_at(Boundary::new(*id, g as u32)));
                        out.push_str(grapheme);
                    }
                    out.push_str(&markers_at(Boundary::new(*id, grapheme_len(t))));
                }
                Data::Break => out.push_str("<br>"),
                Data::Container(_) => out.push_str("<div/>"),
            }
        }
        out.push_str(&markers_at(Boundary::new(self.root, children.len() as u32)));
        out
    }

    pub fn break_count(&self) -> usize {
        self.children(self.root)
            .iter()
            .filter(|id| matches!(self.slot(**id).data, Data::Break))
            .count()
    }

    fn slot(&self, id: NodeId) -> &Slot {
        &self.nodes[id.0]
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.slot(id).data {
            Data::Container(children) => children,
            _ => &[],
        }
    }

    fn children_mut(&mut self, id: NodeId) -> &mut Vec<NodeId> {
        match &mut self.nodes[id.0].data {
            Data::Container(children) => children,
            _ => panic!("node {id:?} is not a container"),
        }
    }

    fn alloc(&mut self, data: Data) -> NodeId {
        self.nodes.push(Slot { data, parent: None });
        NodeId(self.nodes.len() - 1)
    }

    fn attach(&mut self, id: NodeId, index: usize) {
        let root = self.root;
        self.children_mut(root).insert(index, id);
        self.nodes[id.0].parent = Some(root);
    }

    fn text(&self, id: NodeId) -> &str {
        match &self.slot(id).data {
            Data::Text(t) => t,
            _ => "",
        }
    }

    fn text_mut(&mut self, id: NodeId) -> &mut String {
        match &mut self.nodes[id.0].data {
            Data::Text(t) => t,
            _ => panic!("node {id:?} is not text"),
        }
    }

    fn index_of(&self, id: NodeId) -> usize {
        self.children(self.root)
            .iter()
            .position(|c| *c == id)
            .unwrap_or_else(|| panic!("node {id:?} is detached"))
    }

    /// Linear position of a boundary over the flattened content, one unit per
    /// grapheme or break.
    fn linear(&self, b: Boundary) -> usize {
        let unit_len = |id: &NodeId| match &self.slot(*id).data {
            Data::Text(t) => grapheme_len(t) as usize,
            _ => 1,
        };
        let children = self.children(self.root);
        if b.node == self.root {
            children[..b.offset as usize].iter().map(unit_len).sum()
        } else {
            let i = self.index_of(b.node);
            children[..i].iter().map(unit_len).sum::<usize>() + b.offset as usize
        }
    }

    fn units(&self) -> Vec<&str> {
        self.children(self.root)
            .iter()
            .flat_map(|id| match &self.slot(*id).data {
                Data::Text(t) => t.graphemes(true).collect::<Vec<_>>(),
                _ => vec!["\n"],
            })
            .collect()
    }
}

impl Document for MockDocument {
    fn selection(&self) -> Option<SelectionRange> {
        self.selection
    }

    fn set_selection(&mut self, range: SelectionRange) {
        self.selection = Some(range);
    }

    fn plain_text(&self) -> String {
        self.units().concat()
    }

    fn selected_text(&self, range: SelectionRange) -> String {
        let (a, b) = (self.linear(range.start), self.linear(range.end));
        if a >= b {
            return String::new();
        }
        self.units()[a..b].concat()
    }

    fn insert_text(&mut self, text: &str) {
        let Some(range) = self.selection else {
            return;
        };
        let at = self.delete_contents(range);
        let inserted = grapheme_len(text);
        let caret = if text.is_empty() {
            at
        } else if at.node != self.root {
            let idx = byte_index(self.text(at.node), at.offset);
            self.text_mut(at.node).insert_str(idx, text);
            Boundary::new(at.node, at.offset + inserted)
        } else {
            let k = at.offset as usize;
            let children = self.children(self.root).to_vec();
            match (k.checked_sub(1).map(|p| children[p]), children.get(k)) {
                (Some(prev), _) if matches!(self.slot(prev).data, Data::Text(_)) => {
                    let len = grapheme_len(self.text(prev));
                    self.text_mut(prev).push_str(text);
                    Boundary::new(prev, len + inserted)
                }
                (_, Some(next)) if matches!(self.slot(*next).data, Data::Text(_)) => {
                    self.text_mut(*next).insert_str(0, text);
                    Boundary::new(*next, inserted)
                }
                _ => {
                    let id = self.alloc(Data::Text(text.to_string()));
                    self.attach(id, k);
                    Boundary::new(id, inserted)
                }
            }
        };
        self.selection = Some(SelectionRange::caret(caret));
        self.notify_content_changed();
    }

    fn notify_content_changed(&mut self) {
        self.changes += 1;
    }

    fn delete_contents(&mut self, range: SelectionRange) -> Boundary {
        if range.is_collapsed() {
            return range.start;
        }
        let (start, end) = (range.start, range.end);
        if start.node == end.node && start.node != self.root {
            let t = self.text(start.node);
            let (a, b) = (byte_index(t, start.offset), byte_index(t, end.offset));
            if a < b {
                self.text_mut(start.node).replace_range(a..b, "");
            }
            return start;
        }

        let first = if start.node == self.root {
            start.offset as usize
        } else {
            let idx = byte_index(self.text(start.node), start.offset);
            self.text_mut(start.node).truncate(idx);
            self.index_of(start.node) + 1
        };
        let last = if end.node == self.root {
            end.offset as usize
        } else {
            let idx = byte_index(self.text(end.node), end.offset);
            self.text_mut(end.node).replace_range(..idx, "");
            self.index_of(end.node)
        };
        if first < last {
            let root = self.root;
            let removed: Vec<NodeId> = self.children_mut(root).drain(first..last).collect();
            for id in removed {
                self.nodes[id.0].parent = None;
            }
        }
        if start.node == self.root {
            Boundary::new(self.root, first as u32)
        } else {
            start
        }
    }

    fn insert_breaks(&mut self, at: Boundary, count: usize) -> NodeId {
        let index = if at.node == self.root {
            at.offset as usize
        } else {
            let idx = self.index_of(at.node);
            let len = grapheme_len(self.text(at.node));
            if at.offset == 0 {
                idx
            } else if at.offset >= len {
                idx + 1
            } else {
                let split = byte_index(self.text(at.node), at.offset);
                let tail = self.text_mut(at.node).split_off(split);
                let tail_id = self.alloc(Data::Text(tail));
                self.attach(tail_id, idx + 1);
                idx + 1
            }
        };
        let ids: Vec<NodeId> = (0..count).map(|_| self.alloc(Data::Break)).collect();
        for (i, id) in ids.iter().enumerate() {
            self.attach(*id, index + i);
        }
        ids[0]
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        match self.slot(node).data {
            Data::Text(_) => NodeKind::Text,
            Data::Break => NodeKind::Break,
            Data::Container(_) => NodeKind::Container,
        }
    }

    fn text_len(&self, node: NodeId) -> u32 {
        grapheme_len(self.text(node))
    }

    fn child_count(&self, node: NodeId) -> u32 {
        self.children(node).len() as u32
    }

    fn child_at(&self, container: NodeId, index: u32) -> Option<NodeId> {
        self.children(container).get(index as usize).copied()
    }

    fn next_inline_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.slot(node).parent?;
        let siblings = self.children(parent);
        let i = siblings.iter().position(|c| *c == node)?;
        siblings.get(i + 1).copied()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slot(node).parent
    }

    fn index_in_parent(&self, node: NodeId) -> Option<u32> {
        let parent = self.slot(node).parent?;
        self.children(parent)
            .iter()
            .position(|c| *c == node)
            .map(|i| i as u32)
    }
}
