use crate::{card::Card, style, unknown_channel};
use portal_core::{channel::decode, state::EventRecord, ChannelValue, Result, Widget};
use portal_markup::{el, Node};
use portal_theme::{style as css, Theme};

/// Grid of event cards followed by a "see more" button.
///
/// Cards are embedded by tag: each record becomes an `<event-card>` whose
/// attributes carry the record's fields.
#[derive(Debug)]
pub struct CardList {
    data: Vec<EventRecord>,
    cta_label: String,
    stylesheet: String,
}

impl CardList {
    pub const TAG: &'static str = "card-container";

    pub fn new(theme: &Theme) -> Self {
        Self {
            data: Vec::new(),
            cta_label: theme.cta_label.clone(),
            stylesheet: css::card_list(theme),
        }
    }

    pub fn data(&self) -> &[EventRecord] {
        &self.data
    }
}

impl Widget for CardList {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn channels(&self) -> &'static [&'static str] {
        &["data"]
    }

    fn write(&mut self, channel: &str, value: ChannelValue) -> Result<()> {
        match channel {
            "data" => self.data = decode(channel, value)?,
            other => return Err(unknown_channel(Self::TAG, other)),
        }
        Ok(())
    }

    fn reset(&mut self, channel: &str) -> Result<()> {
        match channel {
            "data" => self.data.clear(),
            other => return Err(unknown_channel(Self::TAG, other)),
        }
        Ok(())
    }

    fn view(&self) -> Node {
        let cards = self.data.iter().map(|event| {
            el(Card::TAG)
                .attr("date", &event.date)
                .attr("title", &event.title)
                .attr("image", &event.image)
        });

        Node::fragment([
            style(&self.stylesheet),
            el("div")
                .child(
                    el("div")
                        .class("container")
                        .children(cards)
                        .child(el("div").class("seeMoreButton").text(&self.cta_label)),
                )
                .into(),
        ])
    }
}
