use std::fmt;

/// Elements serialised without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "wbr",
];

/// One node of a presentation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(ElementNode),
    /// Character data, escaped on serialisation.
    Text(String),
    /// Trusted markup emitted verbatim (stylesheets only).
    Raw(String),
    /// Ordered siblings without a wrapping element.
    Fragment(Vec<Node>),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn raw(markup: impl Into<String>) -> Self {
        Self::Raw(markup.into())
    }

    pub fn fragment<I, N>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        Self::Fragment(nodes.into_iter().map(Into::into).collect())
    }

    /// Serialise the tree to an HTML string.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Element(el) => el.write_html(out),
            Self::Text(text) => escape_into(out, text, false),
            Self::Raw(markup) => out.push_str(markup),
            Self::Fragment(nodes) => nodes.iter().for_each(|n| n.write_html(out)),
        }
    }

    /// Depth-first search for the element whose `id` attribute equals `id`.
    pub fn find(&self, id: &str) -> Option<&ElementNode> {
        match self {
            Self::Element(el) => {
                if el.attr_value("id") == Some(id) {
                    return Some(el);
                }
                el.children.iter().find_map(|c| c.find(id))
            }
            Self::Fragment(nodes) => nodes.iter().find_map(|c| c.find(id)),
            Self::Text(_) | Self::Raw(_) => None,
        }
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ElementNode> {
        match self {
            Self::Element(el) => {
                if el.attr_value("id") == Some(id) {
                    return Some(el);
                }
                el.children.iter_mut().find_map(|c| c.find_mut(id))
            }
            Self::Fragment(nodes) => nodes.iter_mut().find_map(|c| c.find_mut(id)),
            Self::Text(_) | Self::Raw(_) => None,
        }
    }

    /// Collect the chain of elements from the outermost ancestor down to the
    /// element with the given `id`.  Returns `false` if no such element exists.
    pub(crate) fn path_to<'a>(&'a self, id: &str, path: &mut Vec<&'a ElementNode>) -> bool {
        match self {
            Self::Element(el) => {
                path.push(el);
                if el.attr_value("id") == Some(id) || el.children.iter().any(|c| c.path_to(id, path)) {
                    return true;
                }
                path.pop();
                false
            }
            Self::Fragment(nodes) => nodes.iter().any(|c| c.path_to(id, path)),
            Self::Text(_) | Self::Raw(_) => false,
        }
    }

    /// Outermost elements whose tag is one of `tags`, in document order.
    /// Matches are not searched for nested matches.
    pub fn tagged(&self, tags: &[&str]) -> Vec<&ElementNode> {
        let mut out = Vec::new();
        self.collect_tagged(tags, &mut out);
        out
    }

    fn collect_tagged<'a>(&'a self, tags: &[&str], out: &mut Vec<&'a ElementNode>) {
        match self {
            Self::Element(el) if tags.contains(&el.tag.as_str()) => out.push(el),
            Self::Element(el) => el.children.iter().for_each(|c| c.collect_tagged(tags, out)),
            Self::Fragment(nodes) => nodes.iter().for_each(|c| c.collect_tagged(tags, out)),
            Self::Text(_) | Self::Raw(_) => {}
        }
    }

    /// Mutable form of [`Node::tagged`].
    pub fn tagged_mut(&mut self, tags: &[&str]) -> Vec<&mut ElementNode> {
        let mut out = Vec::new();
        self.collect_tagged_mut(tags, &mut out);
        out
    }

    fn collect_tagged_mut<'a>(&'a mut self, tags: &[&str], out: &mut Vec<&'a mut ElementNode>) {
        match self {
            Self::Element(el) => {
                if tags.contains(&el.tag.as_str()) {
                    out.push(el);
                } else {
                    for child in &mut el.children {
                        child.collect_tagged_mut(tags, out);
                    }
                }
            }
            Self::Fragment(nodes) => {
                for child in nodes {
                    child.collect_tagged_mut(tags, out);
                }
            }
            Self::Text(_) | Self::Raw(_) => {}
        }
    }

    /// Number of elements in the tree carrying `class`.
    #[must_use]
    pub fn count_class(&self, class: &str) -> usize {
        match self {
            Self::Element(el) => {
                usize::from(el.has_class(class))
                    + el.children.iter().map(|c| c.count_class(class)).sum::<usize>()
            }
            Self::Fragment(nodes) => nodes.iter().map(|c| c.count_class(class)).sum(),
            Self::Text(_) | Self::Raw(_) => 0,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

impl From<ElementNode> for Node {
    fn from(el: ElementNode) -> Self {
        Self::Element(el)
    }
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

/// Start building an element.
pub fn el(tag: impl Into<String>) -> ElementNode {
    ElementNode {
        tag: tag.into(),
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

impl ElementNode {
    /// Set an attribute, replacing any previous value of the same name.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Add one or more space-separated classes.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        for name in class.split_whitespace() {
            self.set_class(name, true);
        }
        self
    }

    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    #[must_use]
    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Append a child in place.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr_value("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    /// Add or remove `class`.  Returns `true` if the class list changed.
    pub fn set_class(&mut self, class: &str, on: bool) -> bool {
        if self.has_class(class) == on {
            return false;
        }
        let current = self.attr_value("class").unwrap_or_default();
        let next: Vec<&str> = if on {
            current.split_whitespace().chain([class]).collect()
        } else {
            current.split_whitespace().filter(|c| *c != class).collect()
        };
        let next = next.join(" ");
        self.set_attr("class", next);
        true
    }

    /// Flip `class` and return whether it is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        let on = !self.has_class(class);
        self.set_class(class, on);
        on
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(out, value, true);
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn escape_into(out: &mut String, s: &str, attribute: bool) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\'' if attribute => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
