use crate::{channel::ChannelValue, error::Result, event::ClickEvent};
use portal_markup::{Node, ShadowRoot};

/// Every widget kind implements this trait.
///
/// A widget owns its decoded state and knows how to turn it into a
/// presentation tree.  The surrounding [`Element`](crate::Element) enforces
/// the lifecycle: channel validation, synchronous re-render after each write,
/// attribute echo suppression and document-click registration.
pub trait Widget: std::fmt::Debug {
    /// Host tag, e.g. `"breadcrumb-container"`.
    fn tag(&self) -> &'static str;

    /// The fixed set of channels this widget accepts.
    fn channels(&self) -> &'static [&'static str];

    /// Decode `value` and replace the named channel's state.
    ///
    /// Implementations must decode fully before touching state so that a
    /// failed write leaves the widget exactly as it was.
    fn write(&mut self, channel: &str, value: ChannelValue) -> Result<()>;

    /// Reset the named channel to its empty default.
    fn reset(&mut self, channel: &str) -> Result<()>;

    /// Build the presentation tree from current state.  Must not mutate.
    fn view(&self) -> Node;

    /// Called after a freshly rendered tree has been installed.
    fn installed(&mut self, _root: &mut ShadowRoot) {}

    /// Whether the widget observes clicks anywhere on the document.
    fn listens_to_document(&self) -> bool {
        false
    }

    /// A click landed on `node` inside this widget's tree.
    fn on_click(&mut self, _root: &mut ShadowRoot, _node: &str, _event: &mut ClickEvent) -> Result<()> {
        Ok(())
    }

    /// A click reached the document without being stopped.
    fn on_document_click(&mut self, _root: &mut ShadowRoot) {}
}
