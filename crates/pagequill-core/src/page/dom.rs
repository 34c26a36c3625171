//! Owned page document model.
//!
//! The real document belongs to the hosting page; the agent operates on
//! this explicit model of the parts it needs: focusable nodes with editable
//! values and selection ranges, the page's text selection, and an
//! observable event log standing in for DOM event dispatch.

#[cfg(test)]
#[path = "dom_tests.rs"]
mod tests;

/// Node identifier within one page.
pub type NodeId = u32;

/// What kind of element a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Single-line native text input.
    TextInput,
    /// Multi-line native text input.
    TextArea,
    /// Rich-editable node.
    ContentEditable,
    /// Anything else (divs, the document body, ...).
    Container,
}

/// Whether an element can receive pasted text.
pub fn is_inputable(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::TextInput | NodeKind::TextArea | NodeKind::ContentEditable
    )
}

/// Events observable by page-level listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum DomEvent {
    Focus { node: NodeId },
    Input { node: NodeId },
    Paste { node: NodeId, mime: String, data: Vec<u8> },
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    value: String,
    /// Byte-offset selection range within `value`, start <= end.
    selection: (usize, usize),
}

/// One page's document state.
#[derive(Debug)]
pub struct PageDom {
    nodes: Vec<Node>,
    focused: Option<NodeId>,
    selection_text: String,
    device_pixel_ratio: f64,
    events: Vec<DomEvent>,
}

/// The document body is always node 0.
pub const BODY: NodeId = 0;

impl Default for PageDom {
    fn default() -> Self {
        Self::new()
    }
}

impl PageDom {
    /// An empty page: just the body, focused, pixel ratio 1.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Container,
                value: String::new(),
                selection: (0, 0),
            }],
            focused: Some(BODY),
            selection_text: String::new(),
            device_pixel_ratio: 1.0,
            events: Vec::new(),
        }
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Add a node and return its id.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            kind,
            value: String::new(),
            selection: (0, 0),
        });
        (self.nodes.len() - 1) as NodeId
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.nodes.get(id as usize).map(|node| node.kind)
    }

    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id as usize).map(|node| node.value.as_str())
    }

    pub fn selection_range(&self, id: NodeId) -> Option<(usize, usize)> {
        self.nodes.get(id as usize).map(|node| node.selection)
    }

    /// The currently focused node; the body counts as "no useful focus".
    pub fn active_element(&self) -> Option<NodeId> {
        self.focused
    }

    /// Focus a node, raising a `Focus` event. Returns `false` for unknown
    /// ids.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if (id as usize) >= self.nodes.len() {
            return false;
        }
        self.focused = Some(id);
        self.events.push(DomEvent::Focus { node: id });
        true
    }

    /// Drop focus back to the body.
    pub fn blur(&mut self) {
        self.focused = Some(BODY);
    }

    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> bool {
        let Some(node) = self.nodes.get_mut(id as usize) else {
            return false;
        };
        node.value = value.into();
        let end = node.value.len();
        node.selection = (end, end);
        true
    }

    /// Set the selection range; offsets are clamped to the value length and
    /// rounded down to char boundaries, and swapped when reversed.
    pub fn set_selection_range(&mut self, id: NodeId, start: usize, end: usize) -> bool {
        let Some(node) = self.nodes.get_mut(id as usize) else {
            return false;
        };
        let start = clamp_boundary(&node.value, start);
        let end = clamp_boundary(&node.value, end);
        node.selection = (start.min(end), start.max(end));
        true
    }

    pub fn set_selection_text(&mut self, text: impl Into<String>) {
        self.selection_text = text.into();
    }

    /// The page's user-visible text selection, empty when none.
    pub fn selection_text(&self) -> &str {
        &self.selection_text
    }

    /// Splice text over the selection range of a native input, moving the
    /// caret behind the insertion and raising exactly one `Input` event.
    pub fn replace_selection(&mut self, id: NodeId, text: &str) -> bool {
        let Some(node) = self.nodes.get_mut(id as usize) else {
            return false;
        };
        let (start, end) = node.selection;
        node.value.replace_range(start..end, text);
        let caret = start + text.len();
        node.selection = (caret, caret);
        self.events.push(DomEvent::Input { node: id });
        true
    }

    /// Insert text at the caret of a rich-editable node via the native
    /// editing command; the command replaces any selected range itself and
    /// raises no synthetic event.
    pub fn insert_text_command(&mut self, id: NodeId, text: &str) -> bool {
        let Some(node) = self.nodes.get_mut(id as usize) else {
            return false;
        };
        let (start, end) = node.selection;
        node.value.replace_range(start..end, text);
        let caret = start + text.len();
        node.selection = (caret, caret);
        true
    }

    /// Dispatch a synthetic paste event at a node. Whether anything gets
    /// inserted is up to the page's own paste handling.
    pub fn dispatch_paste(&mut self, id: NodeId, mime: &str, data: Vec<u8>) -> bool {
        if (id as usize) >= self.nodes.len() {
            return false;
        }
        self.events.push(DomEvent::Paste {
            node: id,
            mime: mime.to_string(),
            data,
        });
        true
    }

    /// Drain the event log.
    pub fn take_events(&mut self) -> Vec<DomEvent> {
        std::mem::take(&mut self.events)
    }
}

fn clamp_boundary(value: &str, offset: usize) -> usize {
    let mut offset = offset.min(value.len());
    while offset > 0 && !value.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
