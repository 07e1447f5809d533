//! CSS color parsing and WCAG contrast helpers used by the style resolver.
//!
//! Parsing goes through `csscolorparser`, so every CSS color notation is understood: hex,
//! `rgb()`, `hsl()`, `hwb()` and the full named-color table. Anything else (custom properties,
//! `currentColor`, fully transparent colors) parses to `None` and callers fall back.

/// An sRGB color with 8-bit channels. Alpha is ignored for contrast purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Minimum contrast accepted for heading-sized text (WCAG AA, large text).
pub const MIN_HEADING_CONTRAST: f32 = 3.0;

impl Rgb {
    pub fn parse(input: &str) -> Option<Rgb> {
        let color = csscolorparser::parse(input.trim()).ok()?;
        if color.a <= 0.0 {
            return None;
        }
        let [r, g, b, _] = color.to_rgba8();
        Some(Rgb { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// WCAG 2.x relative luminance in [0, 1].
    pub fn relative_luminance(self) -> f32 {
        fn channel(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    pub fn is_light(self) -> bool {
        self.relative_luminance() > 0.5
    }
}

/// WCAG contrast ratio between two colors, in [1, 21].
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f32 {
    let (la, lb) = (a.relative_luminance(), b.relative_luminance());
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Picks the candidate with maximal contrast against `surface`.
///
/// Candidates are returned verbatim so the palette's own spelling survives into the output.
/// When no candidate reaches [`MIN_HEADING_CONTRAST`], pure black or white is used instead,
/// whichever contrasts more. A surface that cannot be parsed is treated as light, so the
/// darkest parseable candidate wins.
pub fn legible_on(surface: &str, candidates: &[&str]) -> String {
    let parsed = candidates
        .iter()
        .filter_map(|c| Rgb::parse(c).map(|rgb| (*c, rgb)));

    let Some(surface_rgb) = Rgb::parse(surface) else {
        return parsed
            .min_by(|(_, a), (_, b)| a.relative_luminance().total_cmp(&b.relative_luminance()))
            .map(|(c, _)| c.to_string())
            .unwrap_or_else(|| BLACK.to_hex());
    };

    let best = parsed
        .map(|(c, rgb)| (c, contrast_ratio(surface_rgb, rgb)))
        .fold(None::<(&str, f32)>, |best, (c, ratio)| match best {
            Some((_, best_ratio)) if best_ratio >= ratio => best,
            _ => Some((c, ratio)),
        });

    match best {
        Some((c, ratio)) if ratio >= MIN_HEADING_CONTRAST => c.to_string(),
        _ => black_or_white(surface_rgb).to_hex(),
    }
}

/// The opaque color seen when `over` is painted at `alpha` on top of `under`.
pub fn blend(over: &str, alpha: f32, under: &str) -> Option<Rgb> {
    let (over, under) = (Rgb::parse(over)?, Rgb::parse(under)?);
    let alpha = alpha.clamp(0.0, 1.0);
    let mix = |o: u8, u: u8| (o as f32 * alpha + u as f32 * (1.0 - alpha)).round() as u8;
    Some(Rgb {
        r: mix(over.r, under.r),
        g: mix(over.g, under.g),
        b: mix(over.b, under.b),
    })
}

pub fn black_or_white(surface: Rgb) -> Rgb {
    if contrast_ratio(surface, BLACK) >= contrast_ratio(surface, WHITE) {
        BLACK
    } else {
        WHITE
    }
}

/// Renders `color` with the given opacity as `rgba()`. Unparseable colors come back as-is,
/// which keeps them valid CSS at full opacity rather than dropping them.
pub fn with_alpha(color: &str, alpha: f32) -> String {
    match Rgb::parse(color) {
        Some(Rgb { r, g, b }) => format!("rgba({r}, {g}, {b}, {:.2})", alpha.clamp(0.0, 1.0)),
        None => color.trim().to_string(),
    }
}

/// True when the color parses and is light. Unknown colors count as light, matching the
/// white page most templates assume.
pub fn is_light_color(color: &str) -> bool {
    Rgb::parse(color).map(Rgb::is_light).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Rgb::parse("#fff"), Some(WHITE));
        assert_eq!(Rgb::parse("#000000"), Some(BLACK));
        assert_eq!(
            Rgb::parse("#2563EB"),
            Some(Rgb {
                r: 0x25,
                g: 0x63,
                b: 0xeb
            })
        );
        assert_eq!(Rgb::parse("#ffffff80"), Some(WHITE));
        assert_eq!(Rgb::parse("#ggg"), None);
        assert_eq!(Rgb::parse("#12345"), None);
    }

    #[test]
    fn test_parse_rgb_functions_and_names() {
        assert_eq!(
            Rgb::parse("rgb(255, 0, 10)"),
            Some(Rgb { r: 255, g: 0, b: 10 })
        );
        assert_eq!(
            Rgb::parse("rgba(1,2,3,0.5)"),
            Some(Rgb { r: 1, g: 2, b: 3 })
        );
        assert_eq!(Rgb::parse("White"), Some(WHITE));
        assert_eq!(Rgb::parse("var(--brand)"), None);
        assert_eq!(Rgb::parse("transparent"), None);
    }

    #[test]
    fn test_parse_hsl_and_extended_names() {
        assert_eq!(Rgb::parse("hsl(0, 100%, 50%)"), Some(Rgb { r: 255, g: 0, b: 0 }));
        assert_eq!(Rgb::parse("hsla(0 0% 100% / 0.5)"), Some(WHITE));
        assert_eq!(
            Rgb::parse("rebeccapurple"),
            Some(Rgb {
                r: 0x66,
                g: 0x33,
                b: 0x99
            })
        );
        assert_eq!(
            Rgb::parse("LightSkyBlue"),
            Some(Rgb {
                r: 0x87,
                g: 0xce,
                b: 0xfa
            })
        );
    }

    #[test]
    fn test_contrast_ratio_extremes() {
        assert!((contrast_ratio(BLACK, WHITE) - 21.0).abs() < 0.01);
        assert!((contrast_ratio(WHITE, WHITE) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_legible_on_pale_accent_picks_dark_text() {
        // pale pink accent on a white page: white text would vanish
        let chosen = legible_on("#fce7f3", &["#ffffff", "#222222"]);
        assert_eq!(chosen, "#222222");
    }

    #[test]
    fn test_legible_on_dark_accent_picks_background() {
        let chosen = legible_on("#1e3a8a", &["#ffffff", "#222222"]);
        assert_eq!(chosen, "#ffffff");
    }

    #[test]
    fn test_legible_on_falls_back_when_candidates_too_close() {
        // both candidates are mid greys against a mid grey surface
        let chosen = legible_on("#777777", &["#808080", "#707070"]);
        assert!(chosen == "#000000" || chosen == "#ffffff");
        let ratio = contrast_ratio(Rgb::parse("#777777").unwrap(), Rgb::parse(&chosen).unwrap());
        assert!(ratio >= MIN_HEADING_CONTRAST);
    }

    #[test]
    fn test_legible_on_pale_hsl_accent_picks_text() {
        let chosen = legible_on("hsl(50, 100%, 92%)", &["#ffffff", "#111111"]);
        assert_eq!(chosen, "#111111");
    }

    #[test]
    fn test_legible_on_unparseable_surface_prefers_darkest_candidate() {
        assert_eq!(legible_on("var(--x)", &["#ffffff", "#111111"]), "#111111");
        assert_eq!(legible_on("var(--x)", &["nonsense", "#222"]), "#222");
        assert_eq!(legible_on("var(--x)", &["nonsense"]), "#000000");
    }

    #[test]
    fn test_blend() {
        assert_eq!(blend("#ffffff", 0.25, "#000000"), Some(Rgb { r: 64, g: 64, b: 64 }));
        assert_eq!(blend("#ff0000", 1.0, "#0000ff"), Some(Rgb { r: 255, g: 0, b: 0 }));
        assert_eq!(blend("var(--x)", 0.5, "#000000"), None);
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(with_alpha("#ff0000", 0.25), "rgba(255, 0, 0, 0.25)");
        assert_eq!(with_alpha("hsl(0 100% 50%)", 0.25), "rgba(255, 0, 0, 0.25)");
        assert_eq!(with_alpha("var(--brand)", 0.25), "var(--brand)");
    }
}
