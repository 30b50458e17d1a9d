use crate::{style, unknown_channel};
use portal_core::{channel::raw_text, state::EventRecord, ChannelValue, Result, Widget};
use portal_markup::{el, Node};
use portal_theme::{style as css, Theme};

/// A single event: image on top, date badge and title beneath.
///
/// The three channels are plain text, not JSON.  Values are escaped on
/// output; an `image` URL is still used as-is for `src`.
#[derive(Debug)]
pub struct Card {
    record: EventRecord,
    stylesheet: String,
}

impl Card {
    pub const TAG: &'static str = "event-card";

    pub fn new(theme: &Theme) -> Self {
        Self {
            record: EventRecord::default(),
            stylesheet: css::card(theme),
        }
    }

    pub fn record(&self) -> &EventRecord {
        &self.record
    }

    fn field(&mut self, channel: &str) -> Result<&mut String> {
        match channel {
            "date" => Ok(&mut self.record.date),
            "title" => Ok(&mut self.record.title),
            "image" => Ok(&mut self.record.image),
            other => Err(unknown_channel(Self::TAG, other)),
        }
    }
}

impl Widget for Card {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn channels(&self) -> &'static [&'static str] {
        &["date", "title", "image"]
    }

    fn write(&mut self, channel: &str, value: ChannelValue) -> Result<()> {
        let text = raw_text(channel, value)?;
        *self.field(channel)? = text;
        Ok(())
    }

    fn reset(&mut self, channel: &str) -> Result<()> {
        self.field(channel)?.clear();
        Ok(())
    }

    fn view(&self) -> Node {
        Node::fragment([
            style(&self.stylesheet),
            el("div")
                .class("container")
                .child(el("img").class("cardImage").attr("src", &self.record.image))
                .child(
                    el("div")
                        .class("infoContainer")
                        .child(el("div").class("cardDate").text(&self.record.date))
                        .child(el("div").class("cardTitle").text(&self.record.title)),
                )
                .into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn channels_are_independent_scalars() {
        let mut card = Card::new(&Theme::default());
        card.write("date", "2024-01-01".into()).unwrap();
        card.write("title", json!("Open day").into()).unwrap();
        assert_eq!(card.record().date, "2024-01-01");
        assert_eq!(card.record().title, "Open day");
        assert_eq!(card.record().image, "");

        let html = card.view().to_html();
        assert!(html.contains(r#"<img class="cardImage" src="">"#));
        assert!(html.contains(r#"<div class="cardDate">2024-01-01</div>"#));
        assert!(html.contains(r#"<div class="cardTitle">Open day</div>"#));
    }

    #[test]
    fn non_string_json_is_rejected() {
        let mut card = Card::new(&Theme::default());
        card.write("title", "kept".into()).unwrap();
        assert!(card.write("title", json!(["x"]).into()).is_err());
        assert_eq!(card.record().title, "kept");
    }

    #[test]
    fn host_text_cannot_break_out_of_its_region() {
        let mut card = Card::new(&Theme::default());
        card.write("image", r#"x" onerror="alert(1)"#.into()).unwrap();
        card.write("title", "<script>".into()).unwrap();
        let html = card.view().to_html();
        assert!(html.contains(r#"src="x&quot; onerror=&quot;alert(1)""#));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn reset_clears_one_field() {
        let mut card = Card::new(&Theme::default());
        card.write("date", "d".into()).unwrap();
        card.write("title", "t".into()).unwrap();
        card.reset("date").unwrap();
        assert_eq!(card.record().date, "");
        assert_eq!(card.record().title, "t");
        assert!(card.reset("venue").is_err());
    }
}
