//! `DesignConfig`: the closed style descriptor produced by the generative service.
//!
//! Every axis is a closed enum except the palette, which carries free-form color strings.
//! All fields are required on the wire: a partial config fails deserialization.

use serde::{Deserialize, Serialize};

/// Page composition shape. Drives region assignment in the layout compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    SidebarLeft,
    SidebarRight,
    SingleColumn,
    MinimalGrid,
    Asymmetric,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 5] = [
        LayoutKind::SidebarLeft,
        LayoutKind::SidebarRight,
        LayoutKind::SingleColumn,
        LayoutKind::MinimalGrid,
        LayoutKind::Asymmetric,
    ];

    /// True for the layouts whose contact details live in a sidebar column.
    pub fn has_sidebar(self) -> bool {
        matches!(
            self,
            LayoutKind::SidebarLeft | LayoutKind::SidebarRight | LayoutKind::Asymmetric
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderAlignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderStyle {
    Clean,
    Banner,
    FloatingBox,
    Underlined,
}

impl HeaderStyle {
    pub const ALL: [HeaderStyle; 4] = [
        HeaderStyle::Clean,
        HeaderStyle::Banner,
        HeaderStyle::FloatingBox,
        HeaderStyle::Underlined,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameSize {
    Normal,
    Large,
    Huge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionStyle {
    Clean,
    Cards,
    LeftBorder,
    Timeline,
}

impl SectionStyle {
    pub const ALL: [SectionStyle; 4] = [
        SectionStyle::Clean,
        SectionStyle::Cards,
        SectionStyle::LeftBorder,
        SectionStyle::Timeline,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TitleStyle {
    Simple,
    UppercaseBold,
    Underlined,
    Highlighted,
    Bracketed,
}

impl TitleStyle {
    pub const ALL: [TitleStyle; 5] = [
        TitleStyle::Simple,
        TitleStyle::UppercaseBold,
        TitleStyle::Underlined,
        TitleStyle::Highlighted,
        TitleStyle::Bracketed,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Spacing {
    Compact,
    Normal,
    Spacious,
}

/// The five font families the generative service may pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    Inter,
    Merriweather,
    #[serde(rename = "Playfair Display")]
    PlayfairDisplay,
    #[serde(rename = "Roboto Mono")]
    RobotoMono,
    Lato,
}

impl FontFamily {
    pub const ALL: [FontFamily; 5] = [
        FontFamily::Inter,
        FontFamily::Merriweather,
        FontFamily::PlayfairDisplay,
        FontFamily::RobotoMono,
        FontFamily::Lato,
    ];

    /// Family name as written on the wire and in CSS.
    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Inter => "Inter",
            FontFamily::Merriweather => "Merriweather",
            FontFamily::PlayfairDisplay => "Playfair Display",
            FontFamily::RobotoMono => "Roboto Mono",
            FontFamily::Lato => "Lato",
        }
    }

    /// CSS `font-family` value with a generic fallback.
    pub fn css_stack(self) -> String {
        let generic = match self {
            FontFamily::Inter | FontFamily::Lato => "sans-serif",
            FontFamily::Merriweather | FontFamily::PlayfairDisplay => "serif",
            FontFamily::RobotoMono => "monospace",
        };
        format!("'{}', {}", self.name(), generic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecorativeShape {
    None,
    Dots,
    Geometric,
    Waves,
    TechLines,
}

impl DecorativeShape {
    pub const ALL: [DecorativeShape; 5] = [
        DecorativeShape::None,
        DecorativeShape::Dots,
        DecorativeShape::Geometric,
        DecorativeShape::Waves,
        DecorativeShape::TechLines,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    None,
    Solid,
    Double,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderConfig {
    pub alignment: HeaderAlignment,
    pub style: HeaderStyle,
    pub name_size: NameSize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionsConfig {
    pub style: SectionStyle,
    pub title_style: TitleStyle,
    pub spacing: Spacing,
}

/// Free-form palette. Values are expected to be CSS colors but are not validated here;
/// the style resolver degrades gracefully on anything it cannot parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontPair {
    pub heading: FontFamily,
    pub body: FontFamily,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorativeConfig {
    pub shape: DecorativeShape,
    pub border_style: BorderStyle,
    pub use_icons: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignConfig {
    pub layout: LayoutKind,
    pub header: HeaderConfig,
    pub sections: SectionsConfig,
    pub colors: Palette,
    pub fonts: FontPair,
    pub decorative: DecorativeConfig,
}

impl Default for DesignConfig {
    /// Monochrome single-column fallback used when the unique template has no generated design.
    fn default() -> Self {
        DesignConfig {
            layout: LayoutKind::SingleColumn,
            header: HeaderConfig {
                alignment: HeaderAlignment::Left,
                style: HeaderStyle::Clean,
                name_size: NameSize::Large,
            },
            sections: SectionsConfig {
                style: SectionStyle::Clean,
                title_style: TitleStyle::UppercaseBold,
                spacing: Spacing::Normal,
            },
            colors: Palette {
                primary: "#000000".to_string(),
                secondary: "#444444".to_string(),
                background: "#ffffff".to_string(),
                text: "#222222".to_string(),
                accent: "#dddddd".to_string(),
            },
            fonts: FontPair {
                heading: FontFamily::Inter,
                body: FontFamily::Inter,
            },
            decorative: DecorativeConfig {
                shape: DecorativeShape::None,
                border_style: BorderStyle::None,
                use_icons: true,
            },
        }
    }
}
