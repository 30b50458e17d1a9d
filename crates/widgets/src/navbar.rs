use crate::{
    dropdown::{content_id, trigger_id, DropdownCoordinator},
    style, svg_icon, unknown_channel,
};
use portal_core::{
    channel::decode, state::NavItem, ChannelValue, ClickEvent, PortalError, Result, Widget,
};
use portal_markup::{el, ElementNode, Node, ShadowRoot};
use portal_theme::{style as css, Theme};
use tracing::debug;

const CARET_VIEW_BOX: &str = "0 0 320 512";
const CARET_PATH: &str = "M137.4 374.6c12.5 12.5 32.8 12.5 45.3 0l128-128c9.2-9.2 11.9-22.9 6.9-34.9s-16.6-19.8-29.6-19.8L32 192c-12.9 0-24.6 7.8-29.6 19.8s-2.2 25.7 6.9 34.9l128 128z";
const SEARCH_VIEW_BOX: &str = "0 0 512 512";
const SEARCH_PATH: &str = "M416 208c0 45.9-14.9 88.3-40 122.7L502.6 457.4c12.5 12.5 12.5 32.8 0 45.3s-32.8 12.5-45.3 0L330.7 376c-34.4 25.2-76.8 40-122.7 40C93.1 416 0 322.9 0 208S93.1 0 208 0S416 93.1 416 208zM208 352a144 144 0 1 0 0-288 144 144 0 1 0 0 288z";

/// Attribute marking a dropdown trigger with its item index.
const TRIGGER_ATTR: &str = "data-trigger";

/// Navigation bar of plain links and dropdown menus, plus a search box.
///
/// Clicking a dropdown trigger (or anything inside it) opens that menu and
/// closes any other; clicking anywhere else on the document closes it.
#[derive(Debug)]
pub struct Navbar {
    items: Vec<NavItem>,
    dropdowns: DropdownCoordinator,
    stylesheet: String,
}

impl Navbar {
    pub const TAG: &'static str = "navbar-container";

    pub fn new(theme: &Theme) -> Self {
        Self {
            items: Vec::new(),
            dropdowns: DropdownCoordinator::new(),
            stylesheet: css::navbar(theme),
        }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// Index of the open dropdown, if any.
    pub fn open_trigger(&self) -> Option<usize> {
        self.dropdowns.open_trigger()
    }

    fn item(index: usize, item: &NavItem) -> ElementNode {
        let Some(routes) = item.dropdown_routes() else {
            return el("div").id(format!("route-{index}")).class("route").text(&item.name);
        };

        let links = routes.iter().enumerate().map(|(j, route)| {
            el("a")
                .id(format!("{}-route-{j}", trigger_id(index)))
                .attr("href", "#")
                .text(route)
        });

        el("div")
            .id(trigger_id(index))
            .class("dropdown")
            .attr(TRIGGER_ATTR, index.to_string())
            .child(el("div").text(&item.name))
            .child(svg_icon(CARET_VIEW_BOX, CARET_PATH))
            .child(
                el("div")
                    .id(content_id(index))
                    .class("dropdown-content")
                    .children(links),
            )
    }
}

impl Widget for Navbar {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn channels(&self) -> &'static [&'static str] {
        &["data"]
    }

    fn write(&mut self, channel: &str, value: ChannelValue) -> Result<()> {
        if channel != "data" {
            return Err(unknown_channel(Self::TAG, channel));
        }
        let items: Vec<NavItem> = decode(channel, value)?;
        if items != self.items {
            self.dropdowns.reset();
        }
        self.items = items;
        Ok(())
    }

    fn reset(&mut self, channel: &str) -> Result<()> {
        if channel != "data" {
            return Err(unknown_channel(Self::TAG, channel));
        }
        self.dropdowns.reset();
        self.items.clear();
        Ok(())
    }

    fn view(&self) -> Node {
        let items = self.items.iter().enumerate().map(|(i, item)| Self::item(i, item));

        Node::fragment([
            style(&self.stylesheet),
            el("div")
                .child(
                    el("div")
                        .class("container")
                        .child(el("div").class("dropdownContainer").children(items))
                        .child(
                            el("div")
                                .class("searchContainer")
                                .child(el("input"))
                                .child(
                                    el("div")
                                        .class("searchButton")
                                        .child(svg_icon(SEARCH_VIEW_BOX, SEARCH_PATH)),
                                ),
                        ),
                )
                .into(),
        ])
    }

    fn installed(&mut self, root: &mut ShadowRoot) {
        self.dropdowns.restore(root);
    }

    fn listens_to_document(&self) -> bool {
        true
    }

    fn on_click(&mut self, root: &mut ShadowRoot, node: &str, event: &mut ClickEvent) -> Result<()> {
        if !root.contains(node) {
            return Err(PortalError::StaleReference {
                node: node.to_string(),
            });
        }
        let Some(trigger) = root
            .closest(node, TRIGGER_ATTR)
            .and_then(|index| index.parse::<usize>().ok())
        else {
            debug!(node, "click outside any dropdown trigger");
            return Ok(());
        };

        if self.dropdowns.toggle(root, trigger) {
            // the document listener must not see this click and undo it
            event.stop_propagation();
        }
        Ok(())
    }

    fn on_document_click(&mut self, root: &mut ShadowRoot) {
        self.dropdowns.dismiss(root);
    }
}
