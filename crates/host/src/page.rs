use portal_config::{ElementConfig, PortalConfig};
use portal_core::{
    ChannelValue, ClickEvent, ClickTarget, Element, ElementId, InteractionContext, PortalError,
    Result,
};
use portal_markup::{el, ElementNode, Node};
use portal_theme::Theme;
use portal_widgets::TAGS;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// A top-level element plus the widgets embedded in its presentation tree.
///
/// `embedded[n]` belongs to the n-th registered tag found in the installed
/// tree; `None` marks one that could not be created.
#[derive(Debug)]
struct Mounted {
    element: Element,
    embedded: Vec<Option<Element>>,
}

impl Mounted {
    fn all(&self) -> impl Iterator<Item = &Element> {
        std::iter::once(&self.element).chain(self.embedded.iter().flatten())
    }

    fn all_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        std::iter::once(&mut self.element).chain(self.embedded.iter_mut().flatten())
    }

    fn release(mut self) -> Element {
        for child in self.embedded.iter_mut().flatten() {
            child.on_detach();
        }
        self.element.on_detach();
        self.element
    }
}

/// A document hosting widget elements in order.
///
/// The page owns the shared [`InteractionContext`] and is the only place
/// clicks enter: the target element handles a click first, and document
/// listeners see it afterwards unless the target stopped propagation.
///
/// Slots are positional so that [`Page::apply`] can line them up with a
/// config's element list; a slot is empty when its element failed to build
/// or was unmounted.
#[derive(Debug)]
pub struct Page {
    theme: Theme,
    context: InteractionContext,
    slots: Vec<Option<Mounted>>,
    next_id: u64,
}

impl Page {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            context: InteractionContext::new(),
            slots: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a page and mount every configured element.
    pub fn from_config(config: &PortalConfig) -> Result<Self> {
        let mut page = Self::new(Theme::from_config(&config.theme, &config.assets));
        page.apply(&config.elements)?;
        Ok(page)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn context(&self) -> &InteractionContext {
        &self.context
    }

    /// Top-level elements in page order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.slots.iter().flatten().map(|m| &m.element)
    }

    /// Widgets embedded in the presentation tree of element `id`.
    pub fn embedded(&self, id: ElementId) -> impl Iterator<Item = &Element> {
        self.slots
            .iter()
            .flatten()
            .filter(move |m| m.element.id() == id)
            .flat_map(|m| m.embedded.iter().flatten())
    }

    /// Any element, top-level or embedded.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.slots
            .iter()
            .flatten()
            .flat_map(Mounted::all)
            .find(|e| e.id() == id)
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.slots
            .iter_mut()
            .flatten()
            .flat_map(Mounted::all_mut)
            .find(|e| e.id() == id)
            .ok_or(PortalError::UnknownElement(id.0))
    }

    /// Slot index of element `id`, and its position among the slot's
    /// embedded widgets if it is one of them.
    fn locate(&self, id: ElementId) -> Option<(usize, Option<usize>)> {
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            let mounted = slot.as_ref()?;
            if mounted.element.id() == id {
                return Some((index, None));
            }
            mounted
                .embedded
                .iter()
                .position(|e| e.as_ref().is_some_and(|e| e.id() == id))
                .map(|n| (index, Some(n)))
        })
    }

    /// Create an element, apply its attributes, and attach it at the end of
    /// the page.  Nothing is mounted if any attribute fails to decode.
    pub fn mount<'a, I>(&mut self, tag: &str, attributes: I) -> Result<ElementId>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mounted = self.build(tag, attributes)?;
        let id = mounted.element.id();
        self.slots.push(Some(mounted));
        Ok(id)
    }

    fn build<'a, I>(&mut self, tag: &str, attributes: I) -> Result<Mounted>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut mounted = Mounted {
            element: self.spawn(tag, attributes)?,
            embedded: Vec::new(),
        };
        self.embed(&mut mounted);
        Ok(mounted)
    }

    fn spawn<'a, I>(&mut self, tag: &str, attributes: I) -> Result<Element>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let widget = portal_widgets::create(tag, &self.theme)?;
        let id = ElementId(self.next_id);
        self.next_id += 1;

        let mut element = Element::new(id, widget);
        for (name, value) in attributes {
            element.set_attribute(name, value)?;
        }
        element.on_attach(&self.context);
        info!(element = %id, tag, "mounted");
        Ok(element)
    }

    /// Bring the embedded widgets in line with the registered tags found in
    /// the element's installed tree.  Same-tag widgets at the same position
    /// are kept and see only attribute changes.
    fn embed(&mut self, mounted: &mut Mounted) {
        let wanted: Vec<(String, BTreeMap<String, String>)> = mounted
            .element
            .root()
            .tree()
            .tagged(TAGS)
            .into_iter()
            .map(|node| {
                let attributes = node
                    .attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                (node.tag().to_string(), attributes)
            })
            .collect();

        let mut previous = std::mem::take(&mut mounted.embedded).into_iter();
        for (tag, attributes) in wanted {
            let kept = match previous.next() {
                Some(Some(mut child)) if child.tag() == tag => {
                    if let Err(e) = sync_attributes(&mut child, &attributes) {
                        warn!(element = %child.id(), "{e}");
                    }
                    Some(child)
                }
                Some(Some(stale)) => {
                    Mounted { element: stale, embedded: Vec::new() }.release();
                    None
                }
                Some(None) | None => None,
            };

            let child = match kept {
                Some(child) => Some(child),
                None => {
                    let pairs = attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()));
                    self.spawn(&tag, pairs)
                        .inspect_err(|e| warn!(parent = %mounted.element.id(), "{e}"))
                        .ok()
                }
            };
            mounted.embedded.push(child);
        }

        for stale in previous.flatten() {
            Mounted { element: stale, embedded: Vec::new() }.release();
        }
    }

    /// Run `change` against element `id`, then refresh the embedded widgets
    /// of the top-level element it belongs to.
    fn update<F>(&mut self, id: ElementId, change: F) -> Result<()>
    where
        F: FnOnce(&mut Element) -> Result<()>,
    {
        let (index, nested) = self.locate(id).ok_or(PortalError::UnknownElement(id.0))?;
        match nested {
            Some(n) => self
                .slots
                .get_mut(index)
                .and_then(Option::as_mut)
                .and_then(|m| m.embedded.get_mut(n))
                .and_then(Option::as_mut)
                .ok_or(PortalError::UnknownElement(id.0))
                .and_then(change),
            None => self.update_slot(index, change),
        }
    }

    fn update_slot<F>(&mut self, index: usize, change: F) -> Result<()>
    where
        F: FnOnce(&mut Element) -> Result<()>,
    {
        let Some(mut mounted) = self.slots.get_mut(index).and_then(Option::take) else {
            return Ok(());
        };
        let outcome = change(&mut mounted.element);
        self.embed(&mut mounted);
        self.slots[index] = Some(mounted);
        outcome
    }

    /// Detach and remove a top-level element together with its embedded
    /// widgets.  Its slot stays empty so config positions still line up.
    pub fn unmount(&mut self, id: ElementId) -> Option<Element> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|m| m.element.id() == id))?;
        let element = slot.take()?.release();
        info!(element = %id, tag = element.tag(), "unmounted");
        Some(element)
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> Result<()> {
        self.update(id, |el| el.set_attribute(name, value))
    }

    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> Result<()> {
        self.update(id, |el| el.remove_attribute(name))
    }

    /// Programmatic channel write, bypassing attribute text.
    pub fn set_channel(
        &mut self,
        id: ElementId,
        channel: &str,
        value: impl Into<ChannelValue>,
    ) -> Result<()> {
        self.update(id, |el| el.set_channel(channel, value))
    }

    /// Dispatch a click.
    ///
    /// Errors from the target's handler are returned only after document
    /// listeners have had their turn, so a stale target still counts as an
    /// outside click.
    pub fn click(&mut self, target: ClickTarget) -> Result<()> {
        let mut event = ClickEvent::new(target);

        let outcome = match event.target().clone() {
            ClickTarget::Node { element, node } => self
                .element_mut(element)
                .and_then(|el| el.click(&node, &mut event)),
            ClickTarget::Background => Ok(()),
        };

        if event.propagation_stopped() {
            debug!("click propagation stopped at target");
            return outcome;
        }

        for id in self.context.listeners() {
            if let Ok(element) = self.element_mut(id) {
                element.document_click();
            }
        }
        outcome
    }

    /// Reconcile the page against a new element list.
    ///
    /// Slot `n` always corresponds to `configs[n]`.  An element whose tag is
    /// unchanged is kept and only sees attribute changes (identical text is
    /// ignored); others are replaced, and a slot whose element cannot be
    /// built is left empty.  Every entry is attempted; the first failure is
    /// returned.
    pub fn apply(&mut self, configs: &[ElementConfig]) -> Result<()> {
        let mut first_error = None;
        let mut record = |e: PortalError| {
            warn!("{e}");
            first_error.get_or_insert(e);
        };

        for (index, config) in configs.iter().enumerate() {
            if index == self.slots.len() {
                self.slots.push(None);
            }

            let reuse = self.slots[index]
                .as_ref()
                .is_some_and(|m| m.element.tag() == config.tag);
            if reuse {
                if let Err(e) = self.update_slot(index, |el| sync_attributes(el, &config.attributes)) {
                    record(e);
                }
                continue;
            }

            if let Some(old) = self.slots[index].take() {
                old.release();
            }
            let attributes = config
                .attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()));
            match self.build(&config.tag, attributes) {
                Ok(mounted) => self.slots[index] = Some(mounted),
                Err(e) => record(e),
            }
        }

        while self.slots.len() > configs.len() {
            if let Some(extra) = self.slots.pop().flatten() {
                extra.release();
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Serialise the page: each host tag with its attributes and its
    /// installed presentation in an open shadow-root template.  Embedded
    /// widgets get a template of their own inside their tag.
    pub fn html(&self) -> String {
        Node::fragment(self.slots.iter().flatten().map(host_node)).to_html()
    }
}

fn host_node(mounted: &Mounted) -> ElementNode {
    let mut tree = mounted.element.root().tree().clone();
    for (node, child) in tree.tagged_mut(TAGS).into_iter().zip(&mounted.embedded) {
        if let Some(child) = child {
            node.push(shadow(Node::raw(child.html())));
        }
    }

    mounted
        .element
        .attributes()
        .fold(el(mounted.element.tag()), |host, (name, value)| host.attr(name, value))
        .child(shadow(tree))
}

fn shadow(content: Node) -> ElementNode {
    el("template").attr("shadowrootmode", "open").child(content)
}

/// Make `element`'s attributes match `attributes`.  Every change is
/// attempted; the first failure is returned.
fn sync_attributes(element: &mut Element, attributes: &BTreeMap<String, String>) -> Result<()> {
    let stale: Vec<String> = element
        .attributes()
        .filter(|(name, _)| !attributes.contains_key(*name))
        .map(|(name, _)| name.to_string())
        .collect();

    let mut first_error = None;
    for name in stale {
        if let Err(e) = element.remove_attribute(&name) {
            first_error.get_or_insert(e);
        }
    }
    for (name, value) in attributes {
        if let Err(e) = element.set_attribute(name, value) {
            first_error.get_or_insert(e);
        }
    }
    first_error.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAV: &str = r#"[{"name":"A"},{"name":"B","routes":["X","Y"]},{"name":"C","routes":["Z"]}]"#;
    const EVENTS: &str = r#"[{"date":"2024-01-01","title":"T1","image":"u1"}]"#;

    fn page_with_navbar() -> (Page, ElementId) {
        let mut page = Page::new(Theme::default());
        let id = page.mount("navbar-container", [("data", NAV)]).unwrap();
        (page, id)
    }

    fn shown(page: &Page, id: ElementId, trigger: usize) -> bool {
        page.element(id)
            .unwrap()
            .root()
            .has_class(&format!("dropdown-{trigger}-content"), "show")
    }

    fn tags(page: &Page) -> Vec<&'static str> {
        page.elements().map(Element::tag).collect()
    }

    fn first(page: &Page) -> &Element {
        page.elements().next().unwrap()
    }

    #[test]
    fn trigger_then_background() {
        let (mut page, nav) = page_with_navbar();
        page.click(ClickTarget::node(nav, "dropdown-1")).unwrap();
        assert!(shown(&page, nav, 1));
        page.click(ClickTarget::node(nav, "dropdown-2")).unwrap();
        assert!(!shown(&page, nav, 1));
        assert!(shown(&page, nav, 2));
        page.click(ClickTarget::Background).unwrap();
        assert!(!shown(&page, nav, 2));
    }

    #[test]
    fn clicks_in_other_widgets_dismiss_the_menu() {
        let (mut page, nav) = page_with_navbar();
        let crumbs = page
            .mount("breadcrumb-container", [("pages", r#"["Home"]"#)])
            .unwrap();
        page.click(ClickTarget::node(nav, "dropdown-1")).unwrap();
        page.click(ClickTarget::node(crumbs, "anything")).unwrap();
        assert!(!shown(&page, nav, 1));
    }

    #[test]
    fn stale_target_still_reaches_the_document() {
        let (mut page, nav) = page_with_navbar();
        page.click(ClickTarget::node(nav, "dropdown-2")).unwrap();
        page.set_attribute(nav, "data", r#"[{"name":"B","routes":["X"]}]"#)
            .unwrap();
        assert!(!shown(&page, nav, 0));
        let err = page.click(ClickTarget::node(nav, "dropdown-2")).unwrap_err();
        assert!(matches!(err, PortalError::StaleReference { .. }));
    }

    #[test]
    fn unmount_releases_the_document_listener() {
        let (mut page, nav) = page_with_navbar();
        assert_eq!(page.context().listeners(), vec![nav]);
        let element = page.unmount(nav).unwrap();
        assert!(!element.is_attached());
        assert!(page.context().listeners().is_empty());
        assert!(page.unmount(nav).is_none());
        assert_eq!(page.elements().count(), 0);
    }

    #[test]
    fn failed_mount_leaves_the_page_untouched() {
        let mut page = Page::new(Theme::default());
        assert!(page.mount("card-container", [("data", "{")]).is_err());
        assert_eq!(page.elements().count(), 0);
        assert!(matches!(
            page.mount("marquee-container", []),
            Err(PortalError::UnknownTag(_))
        ));
    }

    #[test]
    fn unknown_element_ids_are_reported() {
        let mut page = Page::new(Theme::default());
        assert!(matches!(
            page.set_attribute(ElementId(42), "pages", "[]"),
            Err(PortalError::UnknownElement(42))
        ));
    }

    #[test]
    fn apply_reuses_matching_elements() {
        let mut page = Page::new(Theme::default());
        let first_pass = vec![
            ElementConfig::new("breadcrumb-container").with("pages", r#"["Home"]"#),
            ElementConfig::new("event-card").with("title", "T"),
        ];
        page.apply(&first_pass).unwrap();
        let crumb_id = first(&page).id();
        let installs = first(&page).root().installs();

        let second_pass = vec![
            ElementConfig::new("breadcrumb-container").with("pages", r#"["Home"]"#),
            ElementConfig::new("footer-container"),
        ];
        page.apply(&second_pass).unwrap();

        assert_eq!(first(&page).id(), crumb_id);
        assert_eq!(first(&page).root().installs(), installs);
        assert_eq!(tags(&page), ["breadcrumb-container", "footer-container"]);

        page.apply(&second_pass[..1]).unwrap();
        assert_eq!(tags(&page), ["breadcrumb-container"]);
    }

    #[test]
    fn apply_removes_attributes_that_disappear() {
        let mut page = Page::new(Theme::default());
        page.apply(&[ElementConfig::new("event-card").with("title", "T")])
            .unwrap();
        page.apply(&[ElementConfig::new("event-card")]).unwrap();
        let card = first(&page);
        assert_eq!(card.attribute("title"), None);
        assert!(card.html().contains(r#"<div class="cardTitle"></div>"#));
    }

    #[test]
    fn apply_reports_the_first_failure_but_mounts_the_rest() {
        let mut page = Page::new(Theme::default());
        let err = page
            .apply(&[
                ElementConfig::new("breadcrumb-container").with("pages", "oops"),
                ElementConfig::new("footer-container"),
            ])
            .unwrap_err();
        assert!(matches!(err, PortalError::Decode { .. }));
        assert_eq!(tags(&page), ["footer-container"]);
    }

    #[test]
    fn reapplying_a_partly_failing_config_keeps_positions() {
        let mut page = Page::new(Theme::default());
        let configs = [
            ElementConfig::new("breadcrumb-container").with("pages", "oops"),
            ElementConfig::new("footer-container"),
        ];
        assert!(page.apply(&configs).is_err());
        let footer = first(&page).id();

        assert!(page.apply(&configs).is_err());
        assert_eq!(tags(&page), ["footer-container"]);
        assert_eq!(first(&page).id(), footer);

        let fixed = [
            ElementConfig::new("breadcrumb-container").with("pages", r#"["Home"]"#),
            ElementConfig::new("footer-container"),
        ];
        page.apply(&fixed).unwrap();
        assert_eq!(tags(&page), ["breadcrumb-container", "footer-container"]);
        assert_eq!(page.elements().nth(1).unwrap().id(), footer);
    }

    #[test]
    fn one_bad_attribute_does_not_block_the_others() {
        let mut page = Page::new(Theme::default());
        page.apply(&[ElementConfig::new("header-container")
            .with("icons", "[]")
            .with("routes", r#"["Inicio"]"#)])
            .unwrap();

        let err = page
            .apply(&[ElementConfig::new("header-container")
                .with("icons", "not json")
                .with("routes", r#"["Contacto"]"#)])
            .unwrap_err();
        assert!(matches!(err, PortalError::Decode { .. }));

        let header = first(&page);
        assert_eq!(header.attribute("icons"), Some("[]"));
        assert_eq!(header.attribute("routes"), Some(r#"["Contacto"]"#));
        assert!(header.html().contains(r#"<div class="route">Contacto</div>"#));
    }

    #[test]
    fn card_list_hosts_its_cards() {
        let mut page = Page::new(Theme::default());
        let list = page.mount("card-container", [("data", EVENTS)]).unwrap();

        let cards: Vec<_> = page.embedded(list).collect();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].tag(), "event-card");
        assert!(cards[0].html().contains(r#"<div class="cardTitle">T1</div>"#));

        let html = page.html();
        assert!(html.starts_with(r#"<card-container data="#));
        assert!(html.contains(
            r#"<event-card date="2024-01-01" title="T1" image="u1"><template shadowrootmode="open"><style>"#
        ));
        assert!(html.contains(r#"<img class="cardImage" src="u1">"#));
        assert!(html.contains(r#"<div class="cardTitle">T1</div>"#));
    }

    #[test]
    fn rewriting_the_list_reuses_embedded_cards() {
        let mut page = Page::new(Theme::default());
        let list = page.mount("card-container", [("data", EVENTS)]).unwrap();
        let card = page.embedded(list).next().unwrap().id();

        let two = r#"[{"date":"2024-01-01","title":"T2","image":"u1"},{"date":"d","title":"t","image":"i"}]"#;
        page.set_attribute(list, "data", two).unwrap();
        let cards: Vec<_> = page.embedded(list).collect();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id(), card);
        assert_eq!(cards[0].attribute("title"), Some("T2"));

        page.remove_attribute(list, "data").unwrap();
        assert_eq!(page.embedded(list).count(), 0);
        assert!(page.element(card).is_none());
    }

    #[test]
    fn embedded_cards_are_addressable() {
        let mut page = Page::new(Theme::default());
        let list = page.mount("card-container", [("data", EVENTS)]).unwrap();
        let card = page.embedded(list).next().unwrap().id();

        page.click(ClickTarget::node(card, "anything")).unwrap();
        page.set_attribute(card, "title", "Changed").unwrap();
        assert!(page.element(card).unwrap().html().contains(">Changed</div>"));
    }

    #[test]
    fn page_from_toml() {
        let config = portal_config::parse(
            r##"
            [theme]
            primary = "#FF0000"

            [[elements]]
            tag = "footer-container"
            attributes = { routes = '["Aviso"]' }
            "##,
        )
        .unwrap();
        let page = Page::from_config(&config).unwrap();
        assert_eq!(page.elements().count(), 1);
        let html = page.html();
        assert!(html.contains(r#"<div class="route">Aviso</div>"#));
        assert!(html.contains("#FF0000"));
    }

    #[test]
    fn page_html_wraps_each_scope() {
        let mut page = Page::new(Theme::default());
        page.mount("event-card", [("date", "2024-01-01")]).unwrap();
        let html = page.html();
        assert!(html.starts_with(r#"<event-card date="2024-01-01"><template shadowrootmode="open"><style>"#));
        assert!(html.ends_with("</template></event-card>"));
    }

    #[test]
    fn programmatic_writes_accept_structured_values() {
        let mut page = Page::new(Theme::default());
        let id = page.mount("breadcrumb-container", []).unwrap();
        let value = ChannelValue::from_value("pages", &["Home", "Events"]).unwrap();
        page.set_channel(id, "pages", value).unwrap();
        assert!(page.element(id).unwrap().html().contains(">Events</div>"));
        assert!(matches!(
            page.set_channel(id, "crumbs", "[]"),
            Err(PortalError::UnknownChannel { .. })
        ));
    }
}
