//! Style Resolver: maps a `DesignConfig` to fully resolved rendering directives.
//!
//! One total function per style axis, each an exhaustive `match` over its enum.
//! The resolver owns legibility: every foreground/background pair it emits has been
//! checked (see [`crate::render::color::legible_on`]), so the compositor never has to
//! second-guess a color.

use crate::models::design::{
    DesignConfig, HeaderAlignment, HeaderConfig, HeaderStyle, LayoutKind, NameSize, Palette,
    SectionStyle, SectionsConfig, Spacing, TitleStyle,
};
use crate::models::CvData;
use crate::render::color::{
    blend, contrast_ratio, is_light_color, legible_on, with_alpha, Rgb,
};
use crate::render::css::{sanitize_value, Css};
use crate::render::decor::{resolve_frame, resolve_overlays, Overlay};

/// Below this ratio text is treated as invisible against its surface and replaced.
const MIN_VISIBLE_CONTRAST: f32 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub layout: LayoutKind,
    pub colors: Palette,
    /// Root canvas: background, body text color and body font.
    pub page: Css,
    pub heading_font: String,
    pub spacing: SpacingTier,
    pub header: HeaderDirective,
    /// Name treatment of the asymmetric layout's oversized header.
    pub display_name: Css,
    pub display_title: Css,
    pub section_title: TitleDirective,
    pub experience: ExperienceDirective,
    pub contact: ContactDirective,
    pub panels: PanelStyles,
    pub skills: SkillDirective,
    pub education: EducationDirective,
    pub overlays: Vec<Overlay>,
    pub frame: Option<Css>,
}

/// Vertical rhythm between sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacingTier {
    pub section_gap: &'static str,
    pub section_margin: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderDirective {
    pub alignment: HeaderAlignment,
    pub container: Css,
    pub name: Css,
    pub title: Css,
    /// True when the container paints its own full-bleed background.
    pub full_bleed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TitleTreatment {
    Plain,
    Bracketed { bracket: Css, text: Css },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleDirective {
    pub css: Css,
    pub treatment: TitleTreatment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExperienceTreatment {
    /// Plain block; `left-border` adds a left accent rule.
    Block { container: Css },
    /// Bordered, shadowed card with a pill-shaped date badge.
    Card { container: Css, badge: Css },
    /// Left rule with one dot per entry and a combined company/date line.
    Timeline { container: Css, dot: Css },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceDirective {
    pub treatment: ExperienceTreatment,
    pub role: Css,
    pub company: Css,
    pub dates: Css,
    pub description: Css,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactDirective {
    /// Contact line inside the header (layouts without a sidebar).
    pub inline: Css,
    /// Contact column inside a sidebar.
    pub stacked: Css,
    /// Icon glyph styling; `None` when icons are disabled.
    pub icon: Option<Css>,
}

/// Per-layout region surfaces. Only the fields relevant to `layout` carry declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelStyles {
    pub sidebar: Css,
    pub main: Css,
    /// Small uppercase labels used for section headings inside a sidebar.
    pub sidebar_label: Css,
    /// Tinted panel painted behind the narrow column (asymmetric only).
    pub backdrop: Option<Css>,
    /// Text color that is legible on the sidebar surface.
    pub sidebar_ink: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillDirective {
    pub chip: Css,
    pub row: Css,
    pub track: Css,
    pub fill: Css,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EducationDirective {
    pub item: Css,
    pub school: Css,
    pub degree: Css,
    pub year: Css,
}

/// Resolves the style of the unique template for `cv`, substituting the documented
/// default when no design has been generated yet.
pub fn resolve_for(cv: &CvData) -> ResolvedStyle {
    match &cv.design_config {
        Some(config) => resolve(config),
        None => resolve(&DesignConfig::default()),
    }
}

pub fn resolve(config: &DesignConfig) -> ResolvedStyle {
    let colors = sanitize_palette(&config.colors);
    let heading_font = config.fonts.heading.css_stack();
    let body_font = config.fonts.body.css_stack();

    let page = Css::new()
        .set("background-color", colors.background.clone())
        .set("color", visible_on(&colors.text, &colors.background))
        .set("font-family", body_font);

    let panels = resolve_panels(config.layout, &colors);
    let sidebar_ink = panels.sidebar_ink.clone();

    ResolvedStyle {
        layout: config.layout,
        spacing: resolve_spacing(config.sections.spacing),
        header: resolve_header(&config.header, &colors, &heading_font),
        display_name: name_tier(config.header.name_size)
            .set("font-weight", "900")
            .set("line-height", "1")
            .set("margin", "0 0 0.5rem 0")
            .set("font-family", heading_font.clone())
            .set("color", visible_on(&colors.primary, &colors.background)),
        display_title: Css::new()
            .set("font-size", "1.25rem")
            .set("font-weight", "700")
            .set("margin", "0 0 2rem 0")
            .set("color", visible_on(&colors.secondary, &colors.background)),
        section_title: resolve_title(config.sections.title_style, &colors, &heading_font),
        experience: resolve_experience(&config.sections, &colors),
        contact: resolve_contact(config.decorative.use_icons, config.layout, &colors, &sidebar_ink),
        skills: resolve_skills(config.layout, &colors, &sidebar_ink),
        education: resolve_education(&colors),
        overlays: resolve_overlays(config.decorative.shape, &colors),
        frame: resolve_frame(config.decorative.border_style, &colors),
        panels,
        page,
        heading_font,
        colors,
    }
}

fn sanitize_palette(colors: &Palette) -> Palette {
    let clean = |raw: &str, fallback: &str| {
        let value = sanitize_value(raw);
        if value.is_empty() {
            fallback.to_string()
        } else {
            value
        }
    };
    let defaults = DesignConfig::default().colors;
    Palette {
        primary: clean(&colors.primary, &defaults.primary),
        secondary: clean(&colors.secondary, &defaults.secondary),
        background: clean(&colors.background, &defaults.background),
        text: clean(&colors.text, &defaults.text),
        accent: clean(&colors.accent, &defaults.accent),
    }
}

/// Keeps `fg` unless it would disappear against `bg`.
fn visible_on(fg: &str, bg: &str) -> String {
    match (Rgb::parse(fg), Rgb::parse(bg)) {
        (Some(f), Some(b)) if contrast_ratio(f, b) < MIN_VISIBLE_CONTRAST => {
            legible_on(bg, &[])
        }
        _ => fg.to_string(),
    }
}

pub fn resolve_spacing(spacing: Spacing) -> SpacingTier {
    match spacing {
        Spacing::Compact => SpacingTier {
            section_gap: "1rem",
            section_margin: "1.5rem",
        },
        Spacing::Normal => SpacingTier {
            section_gap: "1.5rem",
            section_margin: "2rem",
        },
        Spacing::Spacious => SpacingTier {
            section_gap: "2.5rem",
            section_margin: "3rem",
        },
    }
}

pub fn name_tier(size: NameSize) -> Css {
    match size {
        NameSize::Normal => Css::new()
            .set("font-size", "1.875rem")
            .set("letter-spacing", "0"),
        NameSize::Large => Css::new()
            .set("font-size", "2.25rem")
            .set("letter-spacing", "-0.025em"),
        NameSize::Huge => Css::new()
            .set("font-size", "3.75rem")
            .set("letter-spacing", "-0.05em"),
    }
}

fn alignment_css(alignment: HeaderAlignment) -> (&'static str, &'static str) {
    match alignment {
        HeaderAlignment::Left => ("left", "flex-start"),
        HeaderAlignment::Center => ("center", "center"),
        HeaderAlignment::Right => ("right", "flex-end"),
    }
}

pub fn resolve_header(header: &HeaderConfig, colors: &Palette, heading_font: &str) -> HeaderDirective {
    let (text_align, align_items) = alignment_css(header.alignment);
    let base = Css::new()
        .set("position", "relative")
        .set("z-index", "10")
        .set("display", "flex")
        .set("flex-direction", "column")
        .set("text-align", text_align)
        .set("align-items", align_items)
        .set("margin-bottom", "2.5rem");

    let (container, name_color, title_color, title_opacity, full_bleed) = match header.style {
        HeaderStyle::Clean => (
            base,
            visible_on(&colors.text, &colors.background),
            visible_on(&colors.primary, &colors.background),
            "0.9",
            false,
        ),
        HeaderStyle::Banner => {
            let ink = legible_on(&colors.primary, &[&colors.background, &colors.text]);
            (
                base.set("background-color", colors.primary.clone())
                    .set("color", ink.clone())
                    .set("padding", "2rem")
                    .set("margin-bottom", "3rem"),
                ink.clone(),
                ink,
                "0.8",
                true,
            )
        }
        HeaderStyle::FloatingBox => {
            let surface = if is_light_color(&colors.background) {
                colors.background.clone()
            } else {
                "#ffffff".to_string()
            };
            let ink = legible_on(&surface, &[&colors.text, "#000000"]);
            let title = legible_on(&surface, &[&colors.primary, &ink]);
            (
                base.set("background-color", surface)
                    .set("color", ink.clone())
                    .set("padding", "2rem")
                    .set("border-radius", "0.75rem")
                    .set(
                        "box-shadow",
                        "0 10px 15px -3px rgba(0, 0, 0, 0.1), 0 4px 6px -4px rgba(0, 0, 0, 0.1)",
                    )
                    .set("margin-bottom", "3rem"),
                ink,
                title,
                "0.9",
                false,
            )
        }
        HeaderStyle::Underlined => (
            base.set("border-bottom", format!("2px solid {}", colors.accent))
                .set("padding-bottom", "1.5rem"),
            visible_on(&colors.text, &colors.background),
            visible_on(&colors.primary, &colors.background),
            "0.9",
            false,
        ),
    };

    HeaderDirective {
        alignment: header.alignment,
        container,
        name: name_tier(header.name_size)
            .set("font-weight", "700")
            .set("line-height", "1")
            .set("margin", "0 0 0.5rem 0")
            .set("font-family", heading_font.to_string())
            .set("color", name_color),
        title: Css::new()
            .set("font-size", "1.25rem")
            .set("font-weight", "500")
            .set("margin", "0")
            .set("opacity", title_opacity)
            .set("color", title_color),
        full_bleed,
    }
}

pub fn resolve_title(style: TitleStyle, colors: &Palette, heading_font: &str) -> TitleDirective {
    let primary = visible_on(&colors.primary, &colors.background);
    let base = Css::new()
        .set("margin", "0 0 1rem 0")
        .set("font-family", heading_font.to_string())
        .set("color", primary.clone());

    match style {
        TitleStyle::Simple => TitleDirective {
            css: base.set("font-size", "1.25rem").set("font-weight", "600"),
            treatment: TitleTreatment::Plain,
        },
        TitleStyle::UppercaseBold => TitleDirective {
            css: base
                .set("font-size", "0.875rem")
                .set("font-weight", "700")
                .set("text-transform", "uppercase")
                .set("letter-spacing", "0.1em"),
            treatment: TitleTreatment::Plain,
        },
        TitleStyle::Underlined => TitleDirective {
            css: base
                .set("font-size", "1.125rem")
                .set("font-weight", "700")
                .set("border-bottom", format!("2px solid {}", colors.accent))
                .set("padding-bottom", "0.25rem"),
            treatment: TitleTreatment::Plain,
        },
        TitleStyle::Highlighted => TitleDirective {
            css: base
                .set("font-size", "1.125rem")
                .set("font-weight", "700")
                .set("display", "inline-block")
                .set("padding", "0.25rem 0.5rem")
                .set("background-color", colors.accent.clone())
                .set(
                    "color",
                    legible_on(&colors.accent, &[&colors.background, &colors.text]),
                ),
            treatment: TitleTreatment::Plain,
        },
        TitleStyle::Bracketed => TitleDirective {
            css: Css::new()
                .set("margin", "0 0 1rem 0")
                .set("font-family", heading_font.to_string())
                .set("font-size", "1.25rem")
                .set("font-weight", "700")
                .set("text-align", "center"),
            treatment: TitleTreatment::Bracketed {
                bracket: Css::new().set("color", visible_on(&colors.secondary, &colors.background)),
                text: Css::new().set("color", primary),
            },
        },
    }
}

pub fn resolve_experience(sections: &SectionsConfig, colors: &Palette) -> ExperienceDirective {
    let text = visible_on(&colors.text, &colors.background);
    let primary = visible_on(&colors.primary, &colors.background);
    let secondary = visible_on(&colors.secondary, &colors.background);

    let role = Css::new()
        .set("font-size", "1.125rem")
        .set("font-weight", "700")
        .set("margin", "0")
        .set("color", text);
    let description = Css::new()
        .set("font-size", "0.875rem")
        .set("line-height", "1.625")
        .set("white-space", "pre-wrap")
        .set("margin", "0")
        .set("opacity", "0.85");

    match sections.style {
        SectionStyle::Clean | SectionStyle::LeftBorder => {
            let mut container = Css::new().set("margin-bottom", "1.5rem");
            if sections.style == SectionStyle::LeftBorder {
                container = container
                    .set("border-left", format!("4px solid {}", colors.primary))
                    .set("padding-left", "1rem");
            }
            ExperienceDirective {
                treatment: ExperienceTreatment::Block { container },
                role,
                company: Css::new()
                    .set("font-size", "0.875rem")
                    .set("font-weight", "600")
                    .set("margin-bottom", "0.5rem")
                    .set("color", primary),
                dates: Css::new()
                    .set("font-size", "0.875rem")
                    .set("font-weight", "500")
                    .set("opacity", "0.6")
                    .set("color", secondary),
                description,
            }
        }
        SectionStyle::Cards => {
            let surface = if is_light_color(&colors.background) {
                "rgba(0, 0, 0, 0.03)"
            } else {
                "rgba(255, 255, 255, 0.05)"
            };
            let badge_ink = primary.clone();
            ExperienceDirective {
                treatment: ExperienceTreatment::Card {
                    container: Css::new()
                        .set("padding", "1.25rem")
                        .set("border-radius", "0.5rem")
                        .set("background-color", surface)
                        .set("border", format!("1px solid {}", with_alpha(&colors.accent, 0.25)))
                        .set("box-shadow", "0 1px 2px 0 rgba(0, 0, 0, 0.05)"),
                    badge: Css::new()
                        .set("font-size", "0.75rem")
                        .set("font-weight", "700")
                        .set("padding", "0.25rem 0.5rem")
                        .set("border-radius", "9999px")
                        .set("white-space", "nowrap")
                        .set("background-color", with_alpha(&colors.primary, 0.12))
                        .set("color", badge_ink),
                },
                role,
                company: Css::new()
                    .set("font-size", "0.875rem")
                    .set("font-weight", "500")
                    .set("margin-bottom", "0.75rem")
                    .set("color", secondary.clone()),
                dates: Css::new().set("color", secondary),
                description,
            }
        }
        SectionStyle::Timeline => ExperienceDirective {
            treatment: ExperienceTreatment::Timeline {
                container: Css::new()
                    .set("position", "relative")
                    .set("padding-left", "1.5rem")
                    .set("border-left", format!("2px solid {}", colors.accent)),
                dot: Css::new()
                    .set("position", "absolute")
                    .set("left", "-5px")
                    .set("top", "0.375rem")
                    .set("width", "0.5rem")
                    .set("height", "0.5rem")
                    .set("border-radius", "9999px")
                    .set("background-color", colors.primary.clone()),
            },
            role: role.set("line-height", "1").set("margin-bottom", "0.25rem"),
            company: Css::new()
                .set("font-size", "0.875rem")
                .set("margin-bottom", "0.5rem")
                .set("opacity", "0.7")
                .set("color", secondary.clone()),
            dates: Css::new().set("color", secondary),
            description,
        },
    }
}

fn resolve_panels(layout: LayoutKind, colors: &Palette) -> PanelStyles {
    let sidebar_label = Css::new()
        .set("font-size", "0.75rem")
        .set("font-weight", "700")
        .set("text-transform", "uppercase")
        .set("letter-spacing", "0.05em")
        .set("opacity", "0.7")
        .set("margin", "0 0 1rem 0");
    let page_ink = visible_on(&colors.text, &colors.background);

    match layout {
        LayoutKind::SidebarLeft => {
            let ink = legible_on(&colors.secondary, &[&colors.background, &colors.text]);
            PanelStyles {
                sidebar: Css::new()
                    .set("background-color", colors.secondary.clone())
                    .set("color", ink.clone()),
                main: Css::new(),
                sidebar_label,
                backdrop: None,
                sidebar_ink: ink,
            }
        }
        LayoutKind::SidebarRight => {
            let surface = if is_light_color(&colors.background) {
                "#fcfcfc"
            } else {
                "rgba(0, 0, 0, 0.02)"
            };
            PanelStyles {
                sidebar: Css::new()
                    .set("background-color", surface)
                    .set("border-left", format!("1px solid {}", colors.accent)),
                main: Css::new(),
                sidebar_label,
                backdrop: None,
                sidebar_ink: page_ink,
            }
        }
        LayoutKind::Asymmetric => PanelStyles {
            sidebar: Css::new()
                .set("background-color", with_alpha(&colors.background, 0.5))
                .set("padding", "1.5rem")
                .set("border-radius", "0.75rem")
                .set("border", "1px solid rgba(255, 255, 255, 0.2)")
                .set("box-shadow", "0 1px 2px 0 rgba(0, 0, 0, 0.05)")
                .set("color", page_ink.clone()),
            main: Css::new(),
            sidebar_label,
            backdrop: Some(
                Css::new()
                    .set("position", "absolute")
                    .set("top", "0")
                    .set("right", "0")
                    .set("width", "40%")
                    .set("height", "100%")
                    .set("background-color", colors.accent.clone())
                    .set("opacity", "0.1")
                    .set("z-index", "0"),
            ),
            sidebar_ink: page_ink,
        },
        LayoutKind::SingleColumn | LayoutKind::MinimalGrid => PanelStyles {
            sidebar: Css::new(),
            main: Css::new(),
            sidebar_label,
            backdrop: None,
            sidebar_ink: page_ink,
        },
    }
}

fn resolve_contact(
    use_icons: bool,
    layout: LayoutKind,
    colors: &Palette,
    sidebar_ink: &str,
) -> ContactDirective {
    let icon_color = match layout {
        LayoutKind::SidebarLeft => sidebar_ink.to_string(),
        _ => visible_on(&colors.primary, &colors.background),
    };
    ContactDirective {
        inline: Css::new()
            .set("display", "flex")
            .set("flex-wrap", "wrap")
            .set("gap", "1rem")
            .set("font-size", "0.875rem")
            .set("margin-top", "1rem")
            .set("color", visible_on(&colors.secondary, &colors.background)),
        stacked: Css::new()
            .set("display", "flex")
            .set("flex-direction", "column")
            .set("gap", "0.5rem")
            .set("font-size", "0.875rem")
            .set("color", sidebar_ink.to_string()),
        icon: use_icons.then(|| {
            Css::new()
                .set("display", "inline-block")
                .set("width", "1rem")
                .set("margin-right", "0.5rem")
                .set("color", icon_color)
        }),
    }
}

fn resolve_skills(layout: LayoutKind, colors: &Palette, sidebar_ink: &str) -> SkillDirective {
    let chip_surface = match layout {
        LayoutKind::SidebarLeft => with_alpha(&colors.accent, 0.25),
        _ => colors.accent.clone(),
    };
    let chip_ink = match layout {
        // the chip sits on the translucent accent over the sidebar panel
        LayoutKind::SidebarLeft => match blend(&colors.accent, 0.25, &colors.secondary) {
            Some(seen) => legible_on(
                &seen.to_hex(),
                &[sidebar_ink, &colors.text, &colors.background],
            ),
            None => sidebar_ink.to_string(),
        },
        _ => legible_on(&colors.accent, &[&colors.text, &colors.background]),
    };
    SkillDirective {
        chip: Css::new()
            .set("display", "inline-block")
            .set("padding", "0.25rem 0.5rem")
            .set("font-size", "0.75rem")
            .set("border-radius", "0.25rem")
            .set("border", format!("1px solid {}", colors.accent))
            .set("background-color", chip_surface)
            .set("color", chip_ink),
        row: Css::new()
            .set("display", "flex")
            .set("justify-content", "space-between")
            .set("align-items", "center")
            .set("font-size", "0.875rem")
            .set("padding-bottom", "0.25rem")
            .set("border-bottom", format!("1px solid {}", colors.accent)),
        track: Css::new()
            .set("width", "3rem")
            .set("height", "0.25rem")
            .set("border-radius", "9999px")
            .set("overflow", "hidden")
            .set("background-color", "#e5e7eb"),
        fill: Css::new()
            .set("height", "100%")
            .set("background-color", colors.primary.clone()),
    }
}

fn resolve_education(colors: &Palette) -> EducationDirective {
    EducationDirective {
        item: Css::new()
            .set("border-left", format!("2px solid {}", colors.accent))
            .set("padding-left", "0.75rem"),
        school: Css::new().set("font-weight", "700").set("font-size", "0.875rem"),
        degree: Css::new().set("font-size", "0.75rem").set("opacity", "0.8"),
        year: Css::new().set("font-size", "0.75rem").set("opacity", "0.5"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::design::{DecorativeShape, FontFamily};
    use crate::render::color::MIN_HEADING_CONTRAST;

    fn config() -> DesignConfig {
        DesignConfig::default()
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut cfg = config();
        cfg.layout = LayoutKind::Asymmetric;
        cfg.decorative.shape = DecorativeShape::Geometric;
        let a = resolve(&cfg);
        let b = resolve(&cfg);
        assert_eq!(a, b);
        assert_eq!(format!("{a:?}"), format!("{b:?}"));
    }

    #[test]
    fn test_missing_design_uses_default() {
        let cv = CvData::default();
        assert_eq!(resolve_for(&cv), resolve(&DesignConfig::default()));
    }

    #[test]
    fn test_name_tiers_are_ordered() {
        let size = |s: NameSize| {
            name_tier(s)
                .get("font-size")
                .unwrap()
                .trim_end_matches("rem")
                .parse::<f32>()
                .unwrap()
        };
        assert!(size(NameSize::Normal) < size(NameSize::Large));
        assert!(size(NameSize::Large) < size(NameSize::Huge));
    }

    #[test]
    fn test_spacing_tiers_are_ordered() {
        let gap = |s: Spacing| {
            resolve_spacing(s)
                .section_gap
                .trim_end_matches("rem")
                .parse::<f32>()
                .unwrap()
        };
        assert!(gap(Spacing::Compact) < gap(Spacing::Normal));
        assert!(gap(Spacing::Normal) < gap(Spacing::Spacious));
    }

    #[test]
    fn test_highlighted_title_on_pale_accent_uses_text_color() {
        let mut colors = config().colors;
        colors.background = "#ffffff".to_string();
        colors.accent = "#fde2e4".to_string();
        colors.text = "#1f2937".to_string();
        let title = resolve_title(TitleStyle::Highlighted, &colors, "Inter");
        assert_eq!(title.css.get("background-color"), Some("#fde2e4"));
        assert_eq!(title.css.get("color"), Some("#1f2937"));
    }

    #[test]
    fn test_highlighted_title_on_dark_accent_uses_background_color() {
        let mut colors = config().colors;
        colors.background = "#ffffff".to_string();
        colors.accent = "#111827".to_string();
        let title = resolve_title(TitleStyle::Highlighted, &colors, "Inter");
        assert_eq!(title.css.get("color"), Some("#ffffff"));
    }

    #[test]
    fn test_highlighted_title_is_always_legible() {
        let accents = ["#ffffff", "#000000", "#777777", "#ff0000", "#ffff00", "#1e3a8a"];
        for accent in accents {
            let mut colors = config().colors;
            colors.accent = accent.to_string();
            colors.text = "#888888".to_string();
            colors.background = "#999999".to_string();
            let title = resolve_title(TitleStyle::Highlighted, &colors, "Inter");
            let ink = Rgb::parse(title.css.get("color").unwrap()).unwrap();
            let ratio = contrast_ratio(ink, Rgb::parse(accent).unwrap());
            assert!(ratio >= MIN_HEADING_CONTRAST, "accent {accent}: {ratio}");
        }
    }

    #[test]
    fn test_bracketed_title_colors() {
        let mut colors = config().colors;
        colors.primary = "#1d4ed8".to_string();
        colors.secondary = "#9333ea".to_string();
        let title = resolve_title(TitleStyle::Bracketed, &colors, "Inter");
        assert_eq!(title.css.get("text-align"), Some("center"));
        match title.treatment {
            TitleTreatment::Bracketed { bracket, text } => {
                assert_eq!(bracket.get("color"), Some("#9333ea"));
                assert_eq!(text.get("color"), Some("#1d4ed8"));
            }
            TitleTreatment::Plain => panic!("bracketed title must carry bracket glyph styling"),
        }
    }

    #[test]
    fn test_uppercase_title() {
        let title = resolve_title(TitleStyle::UppercaseBold, &config().colors, "Inter");
        assert_eq!(title.css.get("text-transform"), Some("uppercase"));
        assert_eq!(title.css.get("font-weight"), Some("700"));
    }

    #[test]
    fn test_banner_header_ink_contrasts_with_primary() {
        let mut cfg = config();
        cfg.header.style = HeaderStyle::Banner;
        cfg.colors.primary = "#fef3c7".to_string();
        cfg.colors.background = "#ffffff".to_string();
        cfg.colors.text = "#111111".to_string();
        let header = resolve(&cfg).header;
        assert!(header.full_bleed);
        assert_eq!(header.name.get("color"), Some("#111111"));
    }

    #[test]
    fn test_sidebar_left_ink_contrasts_with_secondary() {
        let mut cfg = config();
        cfg.layout = LayoutKind::SidebarLeft;
        cfg.colors.secondary = "#0f172a".to_string();
        cfg.colors.background = "#ffffff".to_string();
        let style = resolve(&cfg);
        assert_eq!(style.panels.sidebar_ink, "#ffffff");
        assert_eq!(style.contact.stacked.get("color"), Some("#ffffff"));
    }

    #[test]
    fn test_sidebar_chip_ink_reads_on_blended_surface() {
        let mut cfg = config();
        cfg.layout = LayoutKind::SidebarLeft;
        cfg.colors.secondary = "#6b7280".to_string();
        cfg.colors.background = "#ffffff".to_string();
        cfg.colors.text = "#111111".to_string();
        cfg.colors.accent = "#fde047".to_string();
        let style = resolve(&cfg);
        assert_eq!(style.panels.sidebar_ink, "#ffffff");
        assert_eq!(
            style.skills.chip.get("background-color"),
            Some("rgba(253, 224, 71, 0.25)")
        );
        assert_eq!(style.skills.chip.get("color"), Some("#111111"));
    }

    #[test]
    fn test_highlighted_title_on_pale_hsl_accent_uses_text_color() {
        let mut colors = config().colors;
        colors.background = "#ffffff".to_string();
        colors.accent = "hsl(50, 100%, 92%)".to_string();
        colors.text = "#111111".to_string();
        let title = resolve_title(TitleStyle::Highlighted, &colors, "Inter");
        assert_eq!(title.css.get("color"), Some("#111111"));
    }

    #[test]
    fn test_invisible_text_is_replaced() {
        let mut cfg = config();
        cfg.colors.text = "#ffffff".to_string();
        cfg.colors.background = "#ffffff".to_string();
        let style = resolve(&cfg);
        assert_eq!(style.page.get("color"), Some("#000000"));
    }

    #[test]
    fn test_experience_treatments() {
        let colors = config().colors;
        let mk = |style| SectionsConfig {
            style,
            title_style: TitleStyle::Simple,
            spacing: Spacing::Normal,
        };
        assert!(matches!(
            resolve_experience(&mk(SectionStyle::Cards), &colors).treatment,
            ExperienceTreatment::Card { .. }
        ));
        assert!(matches!(
            resolve_experience(&mk(SectionStyle::Timeline), &colors).treatment,
            ExperienceTreatment::Timeline { .. }
        ));
        match resolve_experience(&mk(SectionStyle::LeftBorder), &colors).treatment {
            ExperienceTreatment::Block { container } => {
                assert!(container.get("border-left").is_some())
            }
            other => panic!("unexpected {other:?}"),
        }
        match resolve_experience(&mk(SectionStyle::Clean), &colors).treatment {
            ExperienceTreatment::Block { container } => {
                assert!(container.get("border-left").is_none())
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_palette_values_are_sanitized() {
        let mut cfg = config();
        cfg.colors.primary = "red;} .x{color:blue".to_string();
        cfg.colors.accent = ";;;".to_string();
        let style = resolve(&cfg);
        assert!(!style.colors.primary.contains(';'));
        assert_eq!(style.colors.accent, DesignConfig::default().colors.accent);
    }

    #[test]
    fn test_fonts_flow_into_directives() {
        let mut cfg = config();
        cfg.fonts.heading = FontFamily::PlayfairDisplay;
        cfg.fonts.body = FontFamily::RobotoMono;
        let style = resolve(&cfg);
        assert_eq!(style.heading_font, "'Playfair Display', serif");
        assert_eq!(style.page.get("font-family"), Some("'Roboto Mono', monospace"));
        assert_eq!(
            style.header.name.get("font-family"),
            Some("'Playfair Display', serif")
        );
    }

    #[test]
    fn test_icons_toggle() {
        let mut cfg = config();
        cfg.decorative.use_icons = false;
        assert!(resolve(&cfg).contact.icon.is_none());
        cfg.decorative.use_icons = true;
        assert!(resolve(&cfg).contact.icon.is_some());
    }

    #[test]
    fn test_asymmetric_has_backdrop() {
        let mut cfg = config();
        cfg.layout = LayoutKind::Asymmetric;
        assert!(resolve(&cfg).panels.backdrop.is_some());
        cfg.layout = LayoutKind::SidebarRight;
        assert!(resolve(&cfg).panels.backdrop.is_none());
    }
}
