use crate::{style, svg_icon, unknown_channel};
use portal_core::{channel::decode, state::FooterIcon, ChannelValue, Result, Widget};
use portal_markup::{el, Node};
use portal_theme::{style as css, Theme};

/// Site footer: social icons and contact lines on the left, a column of
/// routes on the right.
#[derive(Debug)]
pub struct Footer {
    icons: Vec<FooterIcon>,
    infos: Vec<String>,
    routes: Vec<String>,
    stylesheet: String,
}

impl Footer {
    pub const TAG: &'static str = "footer-container";

    pub fn new(theme: &Theme) -> Self {
        Self {
            icons: Vec::new(),
            infos: Vec::new(),
            routes: Vec::new(),
            stylesheet: css::footer(theme),
        }
    }
}

impl Widget for Footer {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn channels(&self) -> &'static [&'static str] {
        &["icons", "infos", "routes"]
    }

    fn write(&mut self, channel: &str, value: ChannelValue) -> Result<()> {
        match channel {
            "icons" => self.icons = decode(channel, value)?,
            "infos" => self.infos = decode(channel, value)?,
            "routes" => self.routes = decode(channel, value)?,
            other => return Err(unknown_channel(Self::TAG, other)),
        }
        Ok(())
    }

    fn reset(&mut self, channel: &str) -> Result<()> {
        match channel {
            "icons" => self.icons.clear(),
            "infos" => self.infos.clear(),
            "routes" => self.routes.clear(),
            other => return Err(unknown_channel(Self::TAG, other)),
        }
        Ok(())
    }

    fn view(&self) -> Node {
        let icons = self.icons.iter().map(|i| svg_icon(&i.view_box, &i.path));
        let infos = self.infos.iter().map(|i| el("div").class("info").text(i));
        let routes = self.routes.iter().map(|route| {
            el("div")
                .class("routeContainer")
                .child(el("div").class("route").text(route))
                .child(el("div").class("line"))
        });

        Node::fragment([
            style(&self.stylesheet),
            el("div")
                .child(
                    el("div")
                        .class("container")
                        .child(
                            el("div")
                                .class("leftContainer")
                                .child(el("div").class("iconContainer").children(icons))
                                .child(el("div").class("infoContainer").children(infos)),
                        )
                        .child(
                            el("div")
                                .class("rightContainer")
                                .child(el("div").class("routesContainer").children(routes)),
                        ),
                )
                .into(),
        ])
    }
}
