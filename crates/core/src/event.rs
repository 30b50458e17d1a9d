use std::fmt;

/// Identifies one mounted element within a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a click landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// A node (by `id` attribute) inside an element's presentation tree.
    Node { element: ElementId, node: String },
    /// The document itself, outside every widget.
    Background,
}

impl ClickTarget {
    pub fn node(element: ElementId, node: impl Into<String>) -> Self {
        Self::Node {
            element,
            node: node.into(),
        }
    }
}

/// A click travelling from its target out to the document.
///
/// Handlers on the target run first; document listeners only observe the
/// click if no target handler called [`ClickEvent::stop_propagation`].
#[derive(Debug, Clone)]
pub struct ClickEvent {
    target: ClickTarget,
    propagation_stopped: bool,
}

impl ClickEvent {
    pub fn new(target: ClickTarget) -> Self {
        Self {
            target,
            propagation_stopped: false,
        }
    }

    pub fn target(&self) -> &ClickTarget {
        &self.target
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
