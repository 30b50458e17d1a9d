use crate::{
    channel::ChannelValue,
    context::{InteractionContext, Subscription},
    error::{PortalError, Result},
    event::{ClickEvent, ElementId},
    widget::Widget,
};
use portal_markup::ShadowRoot;
use std::collections::BTreeMap;
use tracing::{debug, info, trace};

/// A widget instance as seen by its host: the declarative tag with its
/// attributes, the isolated presentation scope, and the lifecycle hooks.
///
/// Every successful channel write re-renders synchronously, so by the time a
/// write returns the new tree is installed.  A failed write changes nothing.
#[derive(Debug)]
pub struct Element {
    id: ElementId,
    widget: Box<dyn Widget>,
    root: ShadowRoot,
    /// Last successfully applied attribute text, by name.
    attributes: BTreeMap<String, String>,
    subscription: Option<Subscription>,
    attached: bool,
}

impl Element {
    pub fn new(id: ElementId, widget: Box<dyn Widget>) -> Self {
        Self {
            id,
            widget,
            root: ShadowRoot::new(),
            attributes: BTreeMap::new(),
            subscription: None,
            attached: false,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn tag(&self) -> &'static str {
        self.widget.tag()
    }

    pub fn widget(&self) -> &dyn Widget {
        self.widget.as_ref()
    }

    /// The installed presentation scope.
    pub fn root(&self) -> &ShadowRoot {
        &self.root
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn declares(&self, channel: &str) -> bool {
        self.widget.channels().contains(&channel)
    }

    /// Replace a channel's state and re-render.
    pub fn set_channel(&mut self, name: &str, value: impl Into<ChannelValue>) -> Result<()> {
        if !self.declares(name) {
            return Err(PortalError::UnknownChannel {
                tag: self.tag(),
                channel: name.to_string(),
            });
        }
        self.widget.write(name, value.into())?;
        self.refresh();
        Ok(())
    }

    /// Markup for the current state, without installing it.
    pub fn render(&self) -> String {
        self.widget.view().to_html()
    }

    /// Markup currently installed in the presentation scope.
    pub fn html(&self) -> String {
        self.root.html()
    }

    /// The element joined the visible tree.
    ///
    /// Renders the current (possibly default) state.  Document-click
    /// registration happens at most once however often this is called.
    pub fn on_attach(&mut self, ctx: &InteractionContext) {
        if self.widget.listens_to_document() && self.subscription.is_none() {
            self.subscription = ctx.subscribe(self.id);
        }
        if !self.attached {
            info!(element = %self.id, tag = self.tag(), "attached");
        }
        self.attached = true;
        self.refresh();
    }

    /// The element left the visible tree; releases its document listener.
    pub fn on_detach(&mut self) {
        self.subscription = None;
        if self.attached {
            info!(element = %self.id, tag = self.tag(), "detached");
        }
        self.attached = false;
    }

    /// Host bridge for attribute changes.
    ///
    /// Identical text is an echo and does nothing.  Undeclared attributes are
    /// not observed.  Removal (`new == None`) resets the channel to empty.
    pub fn on_attribute_change(
        &mut self,
        name: &str,
        previous: Option<&str>,
        new: Option<&str>,
    ) -> Result<()> {
        if previous == new {
            trace!(element = %self.id, attribute = name, "attribute unchanged");
            return Ok(());
        }
        if !self.declares(name) {
            debug!(element = %self.id, attribute = name, "attribute not observed");
            return Ok(());
        }
        match new {
            Some(text) => self.set_channel(name, text),
            None => {
                self.widget.reset(name)?;
                self.refresh();
                Ok(())
            }
        }
    }

    /// Set an attribute on the host tag, forwarding the change.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        let previous = self.attributes.get(name).cloned();
        self.on_attribute_change(name, previous.as_deref(), Some(value))?;
        self.attributes.insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn remove_attribute(&mut self, name: &str) -> Result<()> {
        let previous = self.attributes.get(name).cloned();
        self.on_attribute_change(name, previous.as_deref(), None)?;
        self.attributes.remove(name);
        Ok(())
    }

    /// Deliver a click that landed on `node` inside this element.
    pub fn click(&mut self, node: &str, event: &mut ClickEvent) -> Result<()> {
        debug!(element = %self.id, node, "click");
        self.widget.on_click(&mut self.root, node, event)
    }

    /// Deliver a click that reached the document.
    pub fn document_click(&mut self) {
        self.widget.on_document_click(&mut self.root);
    }

    fn refresh(&mut self) {
        let tree = self.widget.view();
        self.root.install(tree);
        self.widget.installed(&mut self.root);
        debug!(element = %self.id, tag = self.tag(), "rendered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::decode;
    use portal_markup::{el, Node};

    #[derive(Debug, Default)]
    struct Tags {
        items: Vec<String>,
        listens: bool,
    }

    impl Widget for Tags {
        fn tag(&self) -> &'static str {
            "tag-list"
        }

        fn channels(&self) -> &'static [&'static str] {
            &["items"]
        }

        fn write(&mut self, channel: &str, value: ChannelValue) -> Result<()> {
            self.items = decode(channel, value)?;
            Ok(())
        }

        fn reset(&mut self, _channel: &str) -> Result<()> {
            self.items.clear();
            Ok(())
        }

        fn view(&self) -> Node {
            el("ul")
                .children(self.items.iter().map(|i| el("li").text(i)))
                .into()
        }

        fn listens_to_document(&self) -> bool {
            self.listens
        }
    }

    fn element() -> Element {
        Element::new(ElementId(1), Box::new(Tags::default()))
    }

    #[test]
    fn attach_renders_empty_defaults() {
        let mut el = element();
        el.on_attach(&InteractionContext::new());
        assert_eq!(el.html(), "<ul></ul>");
        assert_eq!(el.root().installs(), 1);
    }

    #[test]
    fn set_channel_renders_before_returning() {
        let mut el = element();
        el.set_channel("items", r#"["a","b"]"#).unwrap();
        assert_eq!(el.html(), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn render_is_idempotent() {
        let mut el = element();
        el.set_channel("items", r#"["a"]"#).unwrap();
        assert_eq!(el.render(), el.render());
        assert_eq!(el.render(), el.html());
    }

    #[test]
    fn failed_decode_changes_nothing() {
        let mut el = element();
        el.set_channel("items", r#"["a"]"#).unwrap();
        let before = el.html();
        let err = el.set_channel("items", "[oops").unwrap_err();
        assert!(matches!(err, PortalError::Decode { .. }));
        assert_eq!(el.html(), before);
        assert_eq!(el.render(), before);
        assert_eq!(el.root().installs(), 1);
    }

    #[test]
    fn unknown_channel_is_a_configuration_error() {
        let mut el = element();
        let err = el.set_channel("colour", "[]").unwrap_err();
        assert!(matches!(err, PortalError::UnknownChannel { tag: "tag-list", .. }));
    }

    #[test]
    fn attribute_echo_is_ignored() {
        let mut el = element();
        el.set_attribute("items", r#"["a"]"#).unwrap();
        el.set_attribute("items", r#"["a"]"#).unwrap();
        assert_eq!(el.root().installs(), 1);
        el.on_attribute_change("items", Some("x"), Some("x")).unwrap();
        assert_eq!(el.root().installs(), 1);
    }

    #[test]
    fn rapid_writes_each_render() {
        let mut el = element();
        el.set_channel("items", r#"["a"]"#).unwrap();
        el.set_channel("items", r#"["a"]"#).unwrap();
        assert_eq!(el.root().installs(), 2);
    }

    #[test]
    fn failed_attribute_keeps_previous_text() {
        let mut el = element();
        el.set_attribute("items", r#"["a"]"#).unwrap();
        assert!(el.set_attribute("items", "{").is_err());
        assert_eq!(el.attribute("items"), Some(r#"["a"]"#));
        // the same bad text fails again rather than being treated as an echo
        assert!(el.set_attribute("items", "{").is_err());
    }

    #[test]
    fn removing_an_attribute_resets_the_channel() {
        let mut el = element();
        el.set_attribute("items", r#"["a"]"#).unwrap();
        el.remove_attribute("items").unwrap();
        assert_eq!(el.html(), "<ul></ul>");
        assert_eq!(el.attribute("items"), None);
    }

    #[test]
    fn undeclared_attributes_are_stored_but_not_observed() {
        let mut el = element();
        el.set_attribute("class", "wide").unwrap();
        assert_eq!(el.attribute("class"), Some("wide"));
        assert_eq!(el.root().installs(), 0);
    }

    #[test]
    fn repeated_attach_registers_once_and_detach_releases() {
        let ctx = InteractionContext::new();
        let mut el = Element::new(
            ElementId(4),
            Box::new(Tags {
                listens: true,
                ..Tags::default()
            }),
        );
        el.on_attach(&ctx);
        el.on_attach(&ctx);
        assert_eq!(ctx.listeners(), vec![ElementId(4)]);
        el.on_detach();
        assert!(ctx.listeners().is_empty());
        assert!(!el.is_attached());
    }
}
