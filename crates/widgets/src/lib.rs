pub mod breadcrumb;
pub mod card;
pub mod card_list;
pub mod dropdown;
pub mod footer;
pub mod header;
pub mod navbar;

pub use breadcrumb::Breadcrumb;
pub use card::Card;
pub use card_list::CardList;
pub use dropdown::DropdownCoordinator;
pub use footer::Footer;
pub use header::Header;
pub use navbar::Navbar;

use portal_core::{PortalError, Result, Widget};
use portal_markup::{el, ElementNode, Node};
use portal_theme::Theme;

/// Every tag this crate can instantiate.
pub const TAGS: &[&str] = &[
    Breadcrumb::TAG,
    Card::TAG,
    CardList::TAG,
    Footer::TAG,
    Header::TAG,
    Navbar::TAG,
];

/// Instantiate the widget registered under `tag`.
pub fn create(tag: &str, theme: &Theme) -> Result<Box<dyn Widget>> {
    let widget: Box<dyn Widget> = match tag {
        Breadcrumb::TAG => Box::new(Breadcrumb::new(theme)),
        Card::TAG => Box::new(Card::new(theme)),
        CardList::TAG => Box::new(CardList::new(theme)),
        Footer::TAG => Box::new(Footer::new(theme)),
        Header::TAG => Box::new(Header::new(theme)),
        Navbar::TAG => Box::new(Navbar::new(theme)),
        other => return Err(PortalError::UnknownTag(other.to_string())),
    };
    Ok(widget)
}

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// `<style>` block for a widget's isolated scope.
fn style(css: &str) -> Node {
    el("style").child(Node::raw(css)).into()
}

/// Single-path vector icon.
fn svg_icon(view_box: &str, path: &str) -> ElementNode {
    el("svg")
        .attr("xmlns", SVG_NS)
        .attr("viewBox", view_box)
        .class("icon")
        .child(el("path").attr("d", path))
}

fn unknown_channel(tag: &'static str, channel: &str) -> PortalError {
    PortalError::UnknownChannel {
        tag,
        channel: channel.to_string(),
    }
}
