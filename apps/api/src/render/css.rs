//! Ordered inline-style declarations.

use std::fmt::Write;

/// An ordered list of CSS declarations rendered into a `style` attribute.
///
/// Order is insertion order and setting an existing property overwrites it in place,
/// so two resolutions of the same input always serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Css(Vec<(&'static str, String)>);

impl Css {
    pub fn new() -> Self {
        Css(Vec::new())
    }

    pub fn set(mut self, property: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.0.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.0.push((property, value)),
        }
        self
    }

    /// Layers `other` on top of `self`; properties in `other` win.
    pub fn merge(mut self, other: &Css) -> Self {
        for (property, value) in &other.0 {
            self = self.set(property, value.clone());
        }
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `prop: value; prop: value` without escaping; callers escape for the attribute context.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, (property, value)) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{property}: {value};");
        }
        out
    }
}

/// Strips characters that could break out of a declaration value.
/// Applied to every externally sourced color before it reaches a `Css`.
pub fn sanitize_value(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || "#(),.%-/ ".contains(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_in_place() {
        let css = Css::new()
            .set("color", "red")
            .set("margin", "0")
            .set("color", "blue");
        assert_eq!(css.render(), "color: blue; margin: 0;");
    }

    #[test]
    fn test_merge_prefers_other() {
        let base = Css::new().set("color", "red").set("padding", "1rem");
        let top = Css::new().set("color", "green");
        assert_eq!(base.merge(&top).get("color"), Some("green"));
    }

    #[test]
    fn test_sanitize_value_drops_breakout_characters() {
        assert_eq!(sanitize_value("#fff;} body{display:none"), "#fff bodydisplaynone");
        assert_eq!(sanitize_value(" rgba(0, 0, 0, 0.5) "), "rgba(0, 0, 0, 0.5)");
        assert_eq!(sanitize_value("\"><script>"), "script");
    }
}
