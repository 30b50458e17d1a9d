/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLUE:     Self = Self { r: 0.125, g: 0.502, b: 0.804, a: 1.0 }; // #2080CD
    pub const NAVY:     Self = Self { r: 0.0,   g: 0.290, b: 0.596, a: 1.0 }; // #004A98
    pub const ICE:      Self = Self { r: 0.902, g: 0.925, b: 0.949, a: 1.0 }; // #E6ECF2
    pub const GREY:     Self = Self { r: 0.439, g: 0.435, b: 0.435, a: 1.0 }; // #706F6F
    pub const SILVER:   Self = Self { r: 0.851, g: 0.851, b: 0.851, a: 1.0 }; // #D9D9D9
    pub const CHARCOAL: Self = Self { r: 0.2,   g: 0.2,   b: 0.2,   a: 1.0 }; // #333333
    pub const WHITE:    Self = Self { r: 1.0,   g: 1.0,   b: 1.0,   a: 1.0 };
    pub const BLACK:    Self = Self { r: 0.0,   g: 0.0,   b: 0.0,   a: 1.0 };

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');

        let byte = |s: &str| -> Option<f32> {
            u8::from_str_radix(s, 16).ok().map(|b| f32::from(b) / 255.0)
        };

        match hex.len() {
            6 | 8 if hex.is_ascii() => Some(Self {
                r: byte(&hex[0..2])?,
                g: byte(&hex[2..4])?,
                b: byte(&hex[4..6])?,
                a: if hex.len() == 8 { byte(&hex[6..8])? } else { 1.0 },
            }),
            _ => None,
        }
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }

    /// CSS notation: `#rrggbb` when opaque, `rgba(...)` otherwise.
    pub fn to_css(self) -> String {
        let [r, g, b] = [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        if self.a >= 1.0 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("rgba({r},{g},{b},{:.2})", self.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_through_css() {
        assert_eq!(Color::from_hex("#2080CD").unwrap().to_css(), "#2080CD");
        assert_eq!(Color::from_hex("004a98").unwrap().to_css(), "#004A98");
    }

    #[test]
    fn translucent_colours_use_rgba() {
        assert_eq!(Color::BLACK.with_alpha(0.2).to_css(), "rgba(0,0,0,0.20)");
        assert_eq!(Color::from_hex("#00000080").unwrap().a, 128.0 / 255.0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#zzzzzz").is_none());
        assert!(Color::from_hex("#ééé").is_none());
    }
}
