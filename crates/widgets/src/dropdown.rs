use portal_markup::ShadowRoot;
use tracing::debug;

/// Class that makes a dropdown's content region visible.
pub const SHOW: &str = "show";

/// `id` of trigger `index`'s node.
pub fn trigger_id(index: usize) -> String {
    format!("dropdown-{index}")
}

/// `id` of trigger `index`'s content region.
pub fn content_id(index: usize) -> String {
    format!("dropdown-{index}-content")
}

/// Keeps at most one navbar dropdown open.
///
/// Visibility is edited directly on the installed tree rather than through a
/// re-render.  After a fresh install with unchanged items, [`restore`]
/// re-applies the open region; when the items change, [`reset`] must be
/// called first because the old trigger indices no longer mean anything.
///
/// [`restore`]: DropdownCoordinator::restore
/// [`reset`]: DropdownCoordinator::reset
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DropdownCoordinator {
    open: Option<usize>,
}

impl DropdownCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the open trigger, if any.
    pub fn open_trigger(&self) -> Option<usize> {
        self.open
    }

    /// A trigger was clicked: close any other open region, then flip this one.
    ///
    /// Returns `false` (and changes nothing) if `trigger` has no content
    /// region in `root`.
    pub fn toggle(&mut self, root: &mut ShadowRoot, trigger: usize) -> bool {
        let content = content_id(trigger);
        if !root.contains(&content) {
            return false;
        }

        if let Some(previous) = self.open.filter(|&open| open != trigger) {
            root.set_class(&content_id(previous), SHOW, false);
        }

        let now_open = root.toggle_class(&content, SHOW).unwrap_or(false);
        self.open = now_open.then_some(trigger);
        debug!(trigger, open = now_open, "dropdown toggled");
        true
    }

    /// A click reached the document: close whatever is open.
    pub fn dismiss(&mut self, root: &mut ShadowRoot) {
        if let Some(open) = self.open.take() {
            root.set_class(&content_id(open), SHOW, false);
            debug!(trigger = open, "dropdown dismissed");
        }
    }

    /// Forget the open trigger without touching any tree.
    pub fn reset(&mut self) {
        self.open = None;
    }

    /// Re-apply the open region to a freshly installed tree.
    pub fn restore(&mut self, root: &mut ShadowRoot) {
        if let Some(open) = self.open {
            if !root.set_class(&content_id(open), SHOW, true) {
                self.open = None;
            }
        }
    }
}
