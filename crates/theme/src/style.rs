//! Per-widget stylesheets.
//!
//! Each widget renders its own `<style>` block inside its isolated scope, so
//! class names only need to be unique within one widget.

use crate::{colors::Color, Theme};

/// Minimal CSS writer: one rule per call, declarations in order.
#[derive(Debug, Default)]
pub struct Stylesheet {
    css: String,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rule(mut self, selector: &str, declarations: &[(&str, &str)]) -> Self {
        self.css.push_str(selector);
        self.css.push('{');
        for (property, value) in declarations {
            self.css.push_str(property);
            self.css.push(':');
            self.css.push_str(value);
            self.css.push(';');
        }
        self.css.push('}');
        self
    }

    pub fn finish(self) -> String {
        self.css
    }
}

fn font(theme: &Theme) -> String {
    format!("'{}', sans-serif", theme.font)
}

pub fn breadcrumb(theme: &Theme) -> String {
    let primary = theme.primary.to_css();
    let font = font(theme);
    Stylesheet::new()
        .rule(".container", &[
            ("width", "1300px"),
            ("display", "flex"),
            ("flex-wrap", "wrap"),
            ("align-items", "center"),
            ("padding", "5px 0"),
            ("margin-bottom", "20px"),
        ])
        .rule(".pageName", &[
            ("color", &primary[..]),
            ("font-family", &font[..]),
            ("font-size", "20px"),
            ("font-weight", "600"),
            ("margin", "5px 15px 5px 0"),
        ])
        .rule(".crumb", &[("cursor", "pointer")])
        .finish()
}

pub fn card(theme: &Theme) -> String {
    let deep = theme.deep.to_css();
    let text = theme.text.to_css();
    let white = Color::WHITE.to_css();
    let black = Color::BLACK.to_css();
    let font = font(theme);
    Stylesheet::new()
        .rule(".container", &[
            ("display", "flex"),
            ("flex-direction", "column"),
            ("width", "250px"),
            ("height", "315px"),
            ("cursor", "pointer"),
            ("background-color", &black[..]),
            ("margin", "16px 12px"),
        ])
        .rule(".cardImage", &[
            ("width", "250px"),
            ("height", "200px"),
            ("object-fit", "cover"),
        ])
        .rule(".infoContainer", &[
            ("display", "flex"),
            ("flex-direction", "column"),
            ("flex", "1"),
            ("background-color", &white[..]),
        ])
        .rule(".cardDate", &[
            ("width", "fit-content"),
            ("background-color", &deep[..]),
            ("color", &white[..]),
            ("font-size", "18px"),
            ("font-family", "system-ui"),
            ("padding", "8px"),
            ("margin", "13px 0 0 16px"),
        ])
        .rule(".cardTitle", &[
            ("color", &text[..]),
            ("font-size", "18px"),
            ("font-family", &font[..]),
            ("overflow", "hidden"),
            ("text-overflow", "ellipsis"),
            ("display", "-webkit-box"),
            ("-webkit-line-clamp", "2"),
            ("-webkit-box-orient", "vertical"),
            ("margin", "2px 16px"),
        ])
        .finish()
}

pub fn card_list(theme: &Theme) -> String {
    let primary = theme.primary.to_css();
    let surface = theme.surface.to_css();
    let white = Color::WHITE.to_css();
    let font = font(theme);
    Stylesheet::new()
        .rule(".container", &[
            ("width", "1100px"),
            ("background-color", &surface[..]),
            ("margin-bottom", "20px"),
            ("display", "flex"),
            ("flex-wrap", "wrap"),
            ("justify-content", "center"),
        ])
        .rule(".seeMoreButton", &[
            ("background-color", &primary[..]),
            ("color", &white[..]),
            ("border-radius", "20px"),
            ("font-family", &font[..]),
            ("font-size", "20px"),
            ("font-weight", "700"),
            ("text-align", "center"),
            ("padding", "5px 20px"),
            ("margin", "0 0 16px 0"),
            ("cursor", "pointer"),
        ])
        .finish()
}

pub fn header(theme: &Theme) -> String {
    let primary = theme.primary.to_css();
    let muted = theme.muted.to_css();
    let light = theme.light.to_css();
    let white = Color::WHITE.to_css();
    let font = font(theme);
    let muted_rule = format!("2px solid {muted}");
    let white_rule = format!("2px solid {white}");
    let primary_rule = format!("2px solid {primary}");
    Stylesheet::new()
        .rule(".container", &[
            ("width", "1500px"),
            ("display", "flex"),
            ("flex-direction", "column"),
        ])
        .rule(".iconContainer", &[
            ("background-color", &light[..]),
            ("color", &muted[..]),
            ("display", "flex"),
            ("align-items", "center"),
            ("flex-direction", "row-reverse"),
            ("flex-wrap", "wrap"),
            ("font-family", &font[..]),
            ("font-size", "18px"),
            ("font-weight", "500"),
            ("padding", "10px 0"),
        ])
        .rule(".iconItem", &[
            ("cursor", "pointer"),
            ("display", "flex"),
            ("align-items", "center"),
            ("flex-direction", "row-reverse"),
        ])
        .rule(".menuContainer", &[
            ("min-height", "125px"),
            ("background-color", &primary[..]),
            ("display", "flex"),
            ("align-items", "center"),
        ])
        .rule(".name", &[("margin-right", "10px")])
        .rule(".circle", &[
            ("width", "30px"),
            ("height", "30px"),
            ("background-color", &muted[..]),
            ("border-radius", "50%"),
            ("display", "flex"),
            ("align-items", "center"),
            ("justify-content", "center"),
            ("margin-right", "10px"),
        ])
        .rule(".icon", &[("width", "18px"), ("height", "18px"), ("fill", &white[..])])
        .rule(".line", &[
            ("height", "25px"),
            ("border-left", &muted_rule[..]),
            ("margin-right", "10px"),
        ])
        .rule(".logoContainer", &[
            ("width", "500px"),
            ("display", "flex"),
            ("justify-content", "center"),
            ("align-items", "center"),
            ("gap", "20px"),
            ("cursor", "pointer"),
        ])
        .rule(".logo", &[("width", "200px"), ("height", "80px")])
        .rule(".logoContainer .line", &[("height", "80px"), ("border-left", &white_rule[..])])
        .rule(".routesContainer", &[
            ("flex-grow", "1"),
            ("color", &white[..]),
            ("display", "flex"),
            ("justify-content", "right"),
            ("align-items", "center"),
            ("flex-wrap", "wrap"),
            ("font-family", &font[..]),
            ("font-size", "18px"),
            ("font-weight", "500"),
            ("gap", "10px"),
            ("padding", "10px"),
        ])
        .rule(".routesContainer .line", &[
            ("height", "20px"),
            ("border-left", &white_rule[..]),
            ("margin", "0"),
        ])
        .rule(".route", &[("cursor", "pointer")])
        .rule(".bottomLine", &[("border-bottom", &primary_rule[..])])
        .rule(".routeContainer:hover .bottomLine", &[("border-bottom", &white_rule[..])])
        .finish()
}

pub fn footer(theme: &Theme) -> String {
    let primary = theme.primary.to_css();
    let white = Color::WHITE.to_css();
    let font = font(theme);
    let primary_rule = format!("2px solid {primary}");
    let white_rule = format!("2px solid {white}");
    Stylesheet::new()
        .rule(".container", &[
            ("width", "1500px"),
            ("background-color", &primary[..]),
            ("display", "flex"),
        ])
        .rule(".leftContainer", &[("width", "1000px"), ("margin", "20px")])
        .rule(".rightContainer", &[("flex-grow", "1"), ("margin", "20px"), ("padding", "5px")])
        .rule(".iconContainer", &[
            ("display", "flex"),
            ("flex-wrap", "wrap"),
            ("align-items", "center"),
            ("gap", "15px"),
            ("padding", "5px 0"),
        ])
        .rule(".infoContainer", &[("display", "flex"), ("flex-direction", "column"), ("gap", "3px")])
        .rule(".routesContainer", &[("display", "flex"), ("flex-direction", "column"), ("gap", "5px")])
        .rule(".info", &[
            ("color", &white[..]),
            ("font-family", &font[..]),
            ("font-size", "20px"),
            ("font-weight", "300"),
        ])
        .rule(".icon", &[
            ("width", "30px"),
            ("height", "30px"),
            ("fill", &white[..]),
            ("cursor", "pointer"),
        ])
        .rule(".routeContainer", &[("width", "fit-content")])
        .rule(".route", &[
            ("color", &white[..]),
            ("font-family", &font[..]),
            ("font-size", "20px"),
            ("font-weight", "700"),
            ("cursor", "pointer"),
        ])
        .rule(".line", &[("border-bottom", &primary_rule[..])])
        .rule(".routeContainer:hover .line", &[("border-bottom", &white_rule[..])])
        .finish()
}

pub fn navbar(theme: &Theme) -> String {
    let primary = theme.primary.to_css();
    let deep = theme.deep.to_css();
    let light = theme.light.to_css();
    let white = Color::WHITE.to_css();
    let shadow = format!("0px 8px 16px 0px {}", Color::BLACK.with_alpha(0.2).to_css());
    let border = format!("1px solid {light}");
    let input_border = format!("1px solid {deep}");
    let font = font(theme);
    Stylesheet::new()
        .rule(".container", &[("width", "1500px"), ("display", "flex"), ("margin-top", "10px")])
        .rule(".dropdownContainer", &[
            ("flex-grow", "1"),
            ("color", &deep[..]),
            ("display", "flex"),
            ("flex-wrap", "wrap"),
            ("align-items", "center"),
            ("font-family", &font[..]),
            ("font-size", "24px"),
            ("font-weight", "500"),
            ("gap", "20px"),
            ("padding", "0 10px"),
        ])
        .rule(".searchContainer", &[
            ("width", "250px"),
            ("height", "50px"),
            ("display", "flex"),
            ("justify-content", "center"),
            ("align-items", "center"),
        ])
        .rule(".searchButton", &[
            ("width", "70px"),
            ("height", "30px"),
            ("background-color", &primary[..]),
            ("display", "flex"),
            ("justify-content", "center"),
            ("align-items", "center"),
            ("cursor", "pointer"),
        ])
        .rule("input", &[("width", "120px"), ("height", "27px"), ("border", &input_border[..])])
        .rule(".icon", &[("width", "12px"), ("height", "12px"), ("fill", &white[..])])
        .rule(".route", &[("cursor", "pointer"), ("padding", "8px")])
        .rule(".route:hover", &[("background-color", &primary[..]), ("color", &white[..])])
        .rule(".dropdown", &[
            ("position", "relative"),
            ("display", "flex"),
            ("align-items", "center"),
            ("cursor", "pointer"),
            ("padding", "8px"),
        ])
        .rule(".dropdown:hover", &[("background-color", &primary[..]), ("color", &white[..])])
        .rule(".dropdown .icon", &[("width", "16px"), ("height", "16px"), ("fill", &deep[..])])
        .rule(".dropdown:hover .icon", &[("fill", &white[..])])
        .rule(".dropdown-content", &[
            ("display", "none"),
            ("position", "absolute"),
            ("background-color", &white[..]),
            ("min-width", "160px"),
            ("box-shadow", &shadow[..]),
            ("border", &border[..]),
            ("z-index", "1"),
            ("top", "50px"),
            ("left", "0"),
            ("padding", "5px 0"),
        ])
        .rule(".dropdown-content a", &[
            ("color", &primary[..]),
            ("padding", "12px 16px"),
            ("text-decoration", "none"),
            ("display", "block"),
            ("white-space", "nowrap"),
        ])
        .rule("a:hover", &[("background-color", &primary[..]), ("color", &white[..])])
        .rule(".show", &[("display", "block")])
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_are_written_in_order() {
        let css = Stylesheet::new()
            .rule(".a", &[("color", "red"), ("margin", "0")])
            .rule(".b", &[])
            .finish();
        assert_eq!(css, ".a{color:red;margin:0;}.b{}");
    }

    #[test]
    fn theme_colours_reach_the_stylesheet() {
        let mut theme = Theme::default();
        theme.primary = Color::from_hex("#112233").unwrap();
        assert!(navbar(&theme).contains("background-color:#112233;"));
        assert!(breadcrumb(&theme).contains("color:#112233;"));
    }

    #[test]
    fn dropdown_content_is_hidden_unless_shown() {
        let css = navbar(&Theme::default());
        assert!(css.contains(".dropdown-content{display:none;"));
        assert!(css.contains(".show{display:block;}"));
    }
}
