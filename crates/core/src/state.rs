use serde::{Deserialize, Serialize};

/// One event shown by a card: `{date, title, image}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub date: String,
    pub title: String,
    /// Image URL.
    pub image: String,
}

/// Vector icon with a caption, shown in the header's icon row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderIcon {
    pub name: String,
    #[serde(rename = "viewBox")]
    pub view_box: String,
    /// SVG path data.
    pub path: String,
}

/// Caption-less vector icon shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterIcon {
    #[serde(rename = "viewBox")]
    pub view_box: String,
    pub path: String,
}

/// A navigation bar entry.
///
/// Entries with a non-empty `routes` list are dropdown triggers; anything
/// else is a plain link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<String>>,
}

impl NavItem {
    pub fn link(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            routes: None,
        }
    }

    pub fn dropdown<I, S>(name: impl Into<String>, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            routes: Some(routes.into_iter().map(Into::into).collect()),
        }
    }

    /// The dropdown's routes, or `None` for a plain link.
    #[must_use]
    pub fn dropdown_routes(&self) -> Option<&[String]> {
        self.routes.as_deref().filter(|r| !r.is_empty())
    }
}
