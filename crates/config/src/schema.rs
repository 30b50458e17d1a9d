use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration structure parsed from `portal.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PortalConfig {
    /// Colours and typography shared by every widget.
    pub theme: ThemeConfig,
    /// Static asset URLs and fixed labels.
    pub assets: AssetConfig,
    /// The page: widget tags in document order, with their attribute text.
    pub elements: Vec<ElementConfig>,
}

/// Theme / styling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Main brand colour: header menu, footer, links, buttons.
    pub primary: String,
    /// Darker brand colour: card dates, navbar text.
    pub deep: String,
    /// Card list background.
    pub surface: String,
    /// Header icon row text and circles.
    pub muted: String,
    /// Header icon row background, dropdown borders.
    pub light: String,
    /// Card title text.
    pub text: String,
    /// Font family name.
    pub font: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: "#2080CD".to_string(),
            deep:    "#004A98".to_string(),
            surface: "#E6ECF2".to_string(),
            muted:   "#706F6F".to_string(),
            light:   "#D9D9D9".to_string(),
            text:    "#333333".to_string(),
            font:    "Open Sans".to_string(),
        }
    }
}

/// Asset URLs and labels that are part of the page chrome, not widget data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Logos shown in the header menu row, separated by a vertical line.
    pub logos: Vec<String>,
    /// Label of the card list's call-to-action button.
    pub cta_label: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            logos: vec![
                "https://www.uapauaslp.mx/Content/Images/EMBLEMA-UASLP.png".to_string(),
                "https://i.ibb.co/Hn1m8Kw/ingenieria-logo.png".to_string(),
            ],
            cta_label: "Conocer más...".to_string(),
        }
    }
}

/// One widget instance on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementConfig {
    /// Widget tag, e.g. `"navbar-container"`.
    pub tag: String,
    /// Attribute text exactly as it would appear on the host tag.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl ElementConfig {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_sections_keep_defaults() {
        let config: PortalConfig = toml::from_str(
            r##"
            [theme]
            primary = "#112233"

            [[elements]]
            tag = "breadcrumb-container"
            attributes = { pages = '["Home","Events"]' }

            [[elements]]
            tag = "event-card"
            "##,
        )
        .unwrap();

        assert_eq!(config.theme.primary, "#112233");
        assert_eq!(config.theme.font, "Open Sans");
        assert_eq!(config.assets, AssetConfig::default());
        assert_eq!(config.elements.len(), 2);
        assert_eq!(
            config.elements[0].attributes.get("pages").map(String::as_str),
            Some(r#"["Home","Events"]"#)
        );
        assert!(config.elements[1].attributes.is_empty());
    }
}
