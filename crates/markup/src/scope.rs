use crate::node::{ElementNode, Node};
use tracing::trace;

/// The isolated presentation scope a widget renders into.
///
/// Holds the most recently installed tree.  Interactive code may edit class
/// lists on the installed tree directly (e.g. dropdown visibility); the next
/// install replaces those edits wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowRoot {
    tree: Node,
    installs: u64,
}

impl Default for ShadowRoot {
    fn default() -> Self {
        Self {
            tree: Node::Fragment(Vec::new()),
            installs: 0,
        }
    }
}

impl ShadowRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole presentation tree.
    pub fn install(&mut self, tree: Node) {
        self.tree = tree;
        self.installs += 1;
        trace!(installs = self.installs, "presentation tree installed");
    }

    /// How many trees have been installed over this scope's lifetime.
    pub fn installs(&self) -> u64 {
        self.installs
    }

    pub fn tree(&self) -> &Node {
        &self.tree
    }

    /// Serialised form of the installed tree.
    pub fn html(&self) -> String {
        self.tree.to_html()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tree.find(id).is_some()
    }

    pub fn find(&self, id: &str) -> Option<&ElementNode> {
        self.tree.find(id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ElementNode> {
        self.tree.find_mut(id)
    }

    /// Value of `attr` on the nearest element, starting at the element with
    /// `id` and walking outwards, that carries that attribute.
    pub fn closest(&self, id: &str, attr: &str) -> Option<&str> {
        let mut path = Vec::new();
        if !self.tree.path_to(id, &mut path) {
            return None;
        }
        path.iter().rev().find_map(|el| el.attr_value(attr))
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.find(id).is_some_and(|el| el.has_class(class))
    }

    /// Add or remove `class` on the element with `id`.  Returns `false` when
    /// no such element is installed.
    pub fn set_class(&mut self, id: &str, class: &str, on: bool) -> bool {
        match self.find_mut(id) {
            Some(el) => {
                el.set_class(class, on);
                true
            }
            None => false,
        }
    }

    /// Flip `class` on the element with `id`, returning whether it is now
    /// present, or `None` when no such element is installed.
    pub fn toggle_class(&mut self, id: &str, class: &str) -> Option<bool> {
        self.find_mut(id).map(|el| el.toggle_class(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::el;

    fn sample() -> Node {
        Node::fragment([
            Node::from(el("style").child(Node::raw(".x{}"))),
            Node::from(
                el("div").id("outer").attr("data-trigger", "3").child(
                    el("div")
                        .id("content")
                        .class("dropdown-content")
                        .child(el("a").id("link").text("X")),
                ),
            ),
        ])
    }

    #[test]
    fn starts_empty() {
        let root = ShadowRoot::new();
        assert_eq!(root.html(), "");
        assert_eq!(root.installs(), 0);
    }

    #[test]
    fn closest_walks_outwards() {
        let mut root = ShadowRoot::new();
        root.install(sample());
        assert_eq!(root.closest("link", "data-trigger"), Some("3"));
        assert_eq!(root.closest("outer", "data-trigger"), Some("3"));
        assert_eq!(root.closest("nope", "data-trigger"), None);
    }

    #[test]
    fn class_edits_apply_to_installed_tree() {
        let mut root = ShadowRoot::new();
        root.install(sample());
        assert_eq!(root.toggle_class("content", "show"), Some(true));
        assert!(root.html().contains(r#"class="dropdown-content show""#));
        assert!(root.set_class("content", "show", false));
        assert!(!root.has_class("content", "show"));
        assert_eq!(root.toggle_class("missing", "show"), None);
        assert!(!root.set_class("missing", "show", true));
    }

    #[test]
    fn install_replaces_edits() {
        let mut root = ShadowRoot::new();
        root.install(sample());
        root.toggle_class("content", "show");
        root.install(sample());
        assert!(!root.has_class("content", "show"));
        assert_eq!(root.installs(), 2);
    }
}
