use crate::{style, unknown_channel};
use portal_core::{channel::decode, ChannelValue, Result, Widget};
use portal_markup::{el, Node};
use portal_theme::{style as css, Theme};

/// Trail of page names, with a `>` separator between consecutive pages.
///
/// ```text
/// <breadcrumb-container pages='["Home","Events","Detail"]'>
/// ```
#[derive(Debug)]
pub struct Breadcrumb {
    pages: Vec<String>,
    stylesheet: String,
}

impl Breadcrumb {
    pub const TAG: &'static str = "breadcrumb-container";

    pub fn new(theme: &Theme) -> Self {
        Self {
            pages: Vec::new(),
            stylesheet: css::breadcrumb(theme),
        }
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }
}

impl Widget for Breadcrumb {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn channels(&self) -> &'static [&'static str] {
        &["pages"]
    }

    fn write(&mut self, channel: &str, value: ChannelValue) -> Result<()> {
        match channel {
            "pages" => self.pages = decode(channel, value)?,
            other => return Err(unknown_channel(Self::TAG, other)),
        }
        Ok(())
    }

    fn reset(&mut self, channel: &str) -> Result<()> {
        match channel {
            "pages" => self.pages.clear(),
            other => return Err(unknown_channel(Self::TAG, other)),
        }
        Ok(())
    }

    fn view(&self) -> Node {
        let count = self.pages.len();
        let mut items = Vec::with_capacity(count * 2);
        for (index, page) in self.pages.iter().enumerate() {
            items.push(el("div").class("pageName crumb").text(page));
            if index + 1 < count {
                items.push(el("div").class("pageName separator").text(">"));
            }
        }

        Node::fragment([
            style(&self.stylesheet),
            el("div")
                .child(el("div").class("container").children(items))
                .into(),
        ])
    }
}
