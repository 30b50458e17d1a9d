use crate::{style, svg_icon, unknown_channel};
use portal_core::{channel::decode, state::HeaderIcon, ChannelValue, Result, Widget};
use portal_markup::{el, ElementNode, Node};
use portal_theme::{style as css, Theme};

/// Site header: a row of captioned icons, the logo strip, and a row of
/// top-level routes.  Both rows put a vertical line between neighbours.
#[derive(Debug)]
pub struct Header {
    icons: Vec<HeaderIcon>,
    routes: Vec<String>,
    logos: Vec<String>,
    stylesheet: String,
}

impl Header {
    pub const TAG: &'static str = "header-container";

    pub fn new(theme: &Theme) -> Self {
        Self {
            icons: Vec::new(),
            routes: Vec::new(),
            logos: theme.logos.clone(),
            stylesheet: css::header(theme),
        }
    }

    pub fn icons(&self) -> &[HeaderIcon] {
        &self.icons
    }

    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    fn logo_strip(&self) -> ElementNode {
        let count = self.logos.len();
        let mut strip = el("div").class("logoContainer");
        for (index, url) in self.logos.iter().enumerate() {
            strip = strip.child(el("img").attr("src", url).class("logo"));
            if index + 1 < count {
                strip = strip.child(line());
            }
        }
        strip
    }
}

fn line() -> ElementNode {
    el("div").class("line")
}

/// Interleave `items` with separator lines, none after the last item.
fn separated(items: Vec<ElementNode>) -> Vec<ElementNode> {
    let count = items.len();
    let mut out = Vec::with_capacity(count * 2);
    for (index, item) in items.into_iter().enumerate() {
        out.push(item);
        if index + 1 < count {
            out.push(line());
        }
    }
    out
}

impl Widget for Header {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn channels(&self) -> &'static [&'static str] {
        &["icons", "routes"]
    }

    fn write(&mut self, channel: &str, value: ChannelValue) -> Result<()> {
        match channel {
            "icons" => self.icons = decode(channel, value)?,
            "routes" => self.routes = decode(channel, value)?,
            other => return Err(unknown_channel(Self::TAG, other)),
        }
        Ok(())
    }

    fn reset(&mut self, channel: &str) -> Result<()> {
        match channel {
            "icons" => self.icons.clear(),
            "routes" => self.routes.clear(),
            other => return Err(unknown_channel(Self::TAG, other)),
        }
        Ok(())
    }

    fn view(&self) -> Node {
        let icons = self
            .icons
            .iter()
            .map(|icon| {
                el("div")
                    .class("iconItem")
                    .child(el("div").class("name").text(&icon.name))
                    .child(el("div").class("circle").child(svg_icon(&icon.view_box, &icon.path)))
            })
            .collect();

        let routes = self
            .routes
            .iter()
            .map(|route| {
                el("div")
                    .class("routeContainer")
                    .child(el("div").class("route").text(route))
                    .child(el("div").class("bottomLine"))
            })
            .collect();

        Node::fragment([
            style(&self.stylesheet),
            el("div")
                .child(
                    el("div")
                        .class("container")
                        .child(el("div").class("iconContainer").children(separated(icons)))
                        .child(
                            el("div")
                                .class("menuContainer")
                                .child(self.logo_strip())
                                .child(
                                    el("div")
                                        .class("routesContainer")
                                        .children(separated(routes)),
                                ),
                        ),
                )
                .into(),
        ])
    }
}
