use crate::event::ElementId;
use std::{cell::RefCell, collections::BTreeSet, fmt, rc::Rc};
use tracing::debug;

/// Shared interaction context for one document.
///
/// Elements that need to observe every click on the document (outside-click
/// dismissal) subscribe here instead of touching a global.  Registration is
/// idempotent per element and released when the returned [`Subscription`]
/// is dropped.
#[derive(Clone, Default)]
pub struct InteractionContext {
    listeners: Rc<RefCell<BTreeSet<ElementId>>>,
}

impl fmt::Debug for InteractionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionContext")
            .field("listeners", &self.listeners.borrow())
            .finish()
    }
}

impl InteractionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `owner` for document clicks.
    ///
    /// Returns `None` if `owner` is already registered; the existing
    /// subscription stays in force.
    pub fn subscribe(&self, owner: ElementId) -> Option<Subscription> {
        if !self.listeners.borrow_mut().insert(owner) {
            return None;
        }
        debug!(%owner, "document click listener registered");
        Some(Subscription {
            listeners: Rc::clone(&self.listeners),
            owner,
        })
    }

    /// Elements currently listening, in mount order.
    pub fn listeners(&self) -> Vec<ElementId> {
        self.listeners.borrow().iter().copied().collect()
    }

    pub fn is_listening(&self, owner: ElementId) -> bool {
        self.listeners.borrow().contains(&owner)
    }
}

/// Live document-click registration.  Dropping it unregisters the owner.
pub struct Subscription {
    listeners: Rc<RefCell<BTreeSet<ElementId>>>,
    owner: ElementId,
}

impl Subscription {
    pub fn owner(&self) -> ElementId {
        self.owner
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("owner", &self.owner)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.listeners.borrow_mut().remove(&self.owner);
        debug!(owner = %self.owner, "document click listener released");
    }
}
