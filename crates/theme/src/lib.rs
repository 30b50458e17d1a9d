pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::Stylesheet;

use portal_config::{AssetConfig, ThemeConfig};

/// Compiled theme derived from [`ThemeConfig`] and [`AssetConfig`].
///
/// All colors are pre-parsed from hex strings.  Calling
/// [`Theme::from_config`] is infallible: invalid color strings fall back to
/// the stock palette.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub primary:   Color,
    pub deep:      Color,
    pub surface:   Color,
    pub muted:     Color,
    pub light:     Color,
    pub text:      Color,
    pub font:      String,
    /// Header logo URLs.
    pub logos:     Vec<String>,
    /// Card list call-to-action label.
    pub cta_label: String,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` and `[assets]` sections.
    pub fn from_config(theme: &ThemeConfig, assets: &AssetConfig) -> Self {
        Self {
            primary:   parse_or("primary", &theme.primary, Color::BLUE),
            deep:      parse_or("deep", &theme.deep, Color::NAVY),
            surface:   parse_or("surface", &theme.surface, Color::ICE),
            muted:     parse_or("muted", &theme.muted, Color::GREY),
            light:     parse_or("light", &theme.light, Color::SILVER),
            text:      parse_or("text", &theme.text, Color::CHARCOAL),
            font:      font_or_default(&theme.font),
            logos:     assets.logos.clone(),
            cta_label: assets.cta_label.clone(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default(), &AssetConfig::default())
    }
}

fn parse_or(name: &str, hex: &str, fallback: Color) -> Color {
    Color::from_hex(hex).unwrap_or_else(|| {
        tracing::warn!("invalid {name} colour '{hex}'; using default");
        fallback
    })
}

/// Font family names are interpolated into a quoted CSS string, so only
/// plain names are accepted.
fn font_or_default(font: &str) -> String {
    let plain = !font.trim().is_empty()
        && font
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'));
    if plain {
        return font.to_string();
    }
    tracing::warn!("invalid font family '{font}'; using default");
    ThemeConfig::default().font
}
