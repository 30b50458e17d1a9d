pub mod channel;
pub mod context;
pub mod element;
pub mod error;
pub mod event;
pub mod state;
pub mod widget;

pub use channel::ChannelValue;
pub use context::{InteractionContext, Subscription};
pub use element::Element;
pub use error::{PortalError, Result};
pub use event::{ClickEvent, ClickTarget, ElementId};
pub use widget::Widget;
