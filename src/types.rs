/// Opaque handle to a node in the host's document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// What a document node is, as far as line editing cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A text-bearing node. Boundary offsets count characters.
    Text,
    /// A break unit: the minimal node that forces a visual line break.
    Break,
    /// A node holding children. Boundary offsets count child nodes.
    Container,
}

/// One end of a selection: a node plus an offset inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub node: NodeId,
    pub offset: u32,
}

impl Boundary {
    pub fn new(node: NodeId, offset: u32) -> Self {
        Self { node, offset }
    }
}

/// A selection over the document tree.
///
/// Handlers read it fresh from the document on every event and never keep it
/// across events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    /// The start boundary (inclusive).
    pub start: Boundary,
    /// The end boundary (exclusive).
    pub end: Boundary,
}

impl SelectionRange {
    pub fn new(start: Boundary, end: Boundary) -> Self {
        Self { start, end }
    }

    /// A collapsed range (caret) at `at`.
    pub fn caret(at: Boundary) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// The result of offering a key event to one handler.
///
/// Ordered by strength, so the dispatcher can keep the strongest result seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Outcome {
    /// The handler did not act on the event.
    #[default]
    Declined,
    /// The handler acted but later handlers and the default behaviour still apply.
    Continue,
    /// The handler claimed the event: suppress the default behaviour and stop.
    Stop,
}

impl Outcome {
    /// Whether the host should prevent the event's default behaviour and
    /// stop propagating it.
    pub fn claims_event(self) -> bool {
        self == Outcome::Stop
    }
}
