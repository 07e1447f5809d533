//! The dynamic template: writes a [`Composition`] using a [`ResolvedStyle`].
//!
//! Nothing here picks colors. Every color comes out of the style resolver already checked
//! for legibility; this module only decides structure.

use crate::layout::compositor::{
    Block, ContactItem, EducationItem, ExperienceItem, HeaderBlock, SkillItem,
};
use crate::layout::{compose, Composition, Region, SkillDisplay};
use crate::models::design::{HeaderAlignment, LayoutKind};
use crate::models::CvData;
use crate::render::css::Css;
use crate::render::decor::{Overlay, CONTENT_LAYER};
use crate::render::html::{escape_html, Html};
use crate::render::style::{resolve_for, ExperienceTreatment, ResolvedStyle, TitleTreatment};
use crate::render::RenderedPage;

/// Inner padding of every region that touches the page edge.
const EDGE_PAD: &str = "12mm";

pub fn render(cv: &CvData) -> RenderedPage {
    let style = resolve_for(cv);
    let composition = compose(cv, style.layout);
    RenderedPage {
        canvas: style.page.clone().set("padding", "0"),
        body: write_page(&composition, &style),
    }
}

pub fn write_page(composition: &Composition, style: &ResolvedStyle) -> String {
    let mut html = Html::new();
    write_overlays(&mut html, style);

    let body = Css::new()
        .set("position", "relative")
        .set("z-index", CONTENT_LAYER)
        .set("min-height", "297mm");

    match composition.layout {
        LayoutKind::SidebarLeft | LayoutKind::SidebarRight => {
            html.open("div", &body.set("display", "grid").set(
                "grid-template-columns",
                composition.columns.unwrap_or("30% 70%"),
            ));
            let sidebar = |html: &mut Html| {
                html.open(
                    "aside",
                    &style
                        .panels
                        .sidebar
                        .clone()
                        .set("padding", format!("{EDGE_PAD} 8mm")),
                );
                write_blocks(html, composition.region(Region::Sidebar), Region::Sidebar, style);
                html.close("aside");
            };
            let main = |html: &mut Html| {
                html.open("main", &style.panels.main.clone().set("padding", EDGE_PAD));
                write_header(html, &composition.header, composition.region(Region::Header), style);
                write_blocks(html, composition.region(Region::Main), Region::Main, style);
                html.close("main");
            };
            if composition.sidebar_first {
                sidebar(&mut html);
                main(&mut html);
            } else {
                main(&mut html);
                sidebar(&mut html);
            }
            html.close("div");
        }
        LayoutKind::MinimalGrid => {
            html.open("div", &body.set("padding", EDGE_PAD));
            write_header(&mut html, &composition.header, composition.region(Region::Header), style);
            html.open(
                "div",
                &Css::new()
                    .set("display", "grid")
                    .set("grid-template-columns", composition.columns.unwrap_or("4fr 8fr"))
                    .set("gap", "2rem"),
            );
            html.open("aside", &style.panels.sidebar);
            write_blocks(&mut html, composition.region(Region::Sidebar), Region::Sidebar, style);
            html.close("aside");
            html.open("main", &style.panels.main);
            write_blocks(&mut html, composition.region(Region::Main), Region::Main, style);
            html.close("main");
            html.close("div");
            html.close("div");
        }
        LayoutKind::Asymmetric => {
            if let Some(backdrop) = &style.panels.backdrop {
                html.open("div", backdrop).close("div");
            }
            html.open(
                "div",
                &body
                    .set("display", "grid")
                    .set("grid-template-columns", composition.columns.unwrap_or("2fr 1fr"))
                    .set("gap", "2.5rem")
                    .set("padding", EDGE_PAD),
            );
            html.open("main", &style.panels.main);
            html.open("header", &Css::new().set("margin-bottom", "3rem"));
            html.element("h1", &style.display_name, &composition.header.name);
            html.element("p", &style.display_title, &composition.header.title);
            html.close("header");
            write_blocks(&mut html, composition.region(Region::Main), Region::Main, style);
            html.close("main");

            html.open("div", &Css::new().set("padding-top", "5rem"));
            for block in composition.region(Region::Aside) {
                if let Block::Summary(text) = block {
                    html.element(
                        "p",
                        &Css::new()
                            .set("font-size", "1.125rem")
                            .set("line-height", "1.625")
                            .set("font-weight", "500")
                            .set("margin-bottom", "2rem")
                            .set("padding-left", "1rem")
                            .set("border-left", format!("4px solid {}", style.colors.primary)),
                        text,
                    );
                }
            }
            if !composition.region(Region::Sidebar).is_empty() {
                html.open("aside", &style.panels.sidebar);
                write_blocks(&mut html, composition.region(Region::Sidebar), Region::Sidebar, style);
                html.close("aside");
            }
            html.close("div");
            html.close("div");
        }
        LayoutKind::SingleColumn => {
            html.open(
                "div",
                &body
                    .set("padding", EDGE_PAD)
                    .set("max-width", "48rem")
                    .set("margin", "0 auto"),
            );
            write_header(&mut html, &composition.header, composition.region(Region::Header), style);
            write_blocks(&mut html, composition.region(Region::Main), Region::Main, style);
            let footer = composition.region(Region::Footer);
            if !footer.is_empty() {
                html.open(
                    "div",
                    &Css::new()
                        .set("display", "grid")
                        .set("grid-template-columns", "1fr 1fr")
                        .set("gap", "2rem"),
                );
                for block in footer {
                    html.open("div", &Css::new());
                    write_block(&mut html, block, Region::Footer, style);
                    html.close("div");
                }
                html.close("div");
            }
            html.close("div");
        }
    }

    html.finish()
}

fn write_overlays(html: &mut Html, style: &ResolvedStyle) {
    for overlay in &style.overlays {
        match overlay {
            Overlay::Layer { css, markers } => {
                html.open("div", css);
                for marker in markers {
                    html.open("div", marker).close("div");
                }
                html.close("div");
            }
            Overlay::Svg {
                css,
                view_box,
                paths,
            } => {
                html.open("div", css);
                html.raw(&format!(
                    "<svg viewBox=\"{view_box}\" preserveAspectRatio=\"none\" width=\"100%\" height=\"100%\">"
                ));
                for path in paths {
                    html.raw(&format!(
                        "<path d=\"{}\" fill=\"{}\" fill-opacity=\"{:.2}\"/>",
                        path.d,
                        escape_html(&path.fill),
                        path.opacity
                    ));
                }
                html.raw("</svg>");
                html.close("div");
            }
        }
    }
    if let Some(frame) = &style.frame {
        html.open("div", frame).close("div");
    }
}

fn write_header(html: &mut Html, header: &HeaderBlock, blocks: &[Block], style: &ResolvedStyle) {
    let directive = &style.header;
    let mut container = directive.container.clone();
    if directive.full_bleed {
        container = container
            .set("margin", format!("-{EDGE_PAD} -{EDGE_PAD} 3rem -{EDGE_PAD}"))
            .set("padding", format!("2rem {EDGE_PAD}"));
    }
    html.open("header", &container);
    html.element("h1", &directive.name, &header.name);
    html.element("p", &directive.title, &header.title);

    for block in blocks {
        match block {
            Block::Contact(items) => {
                let mut inline = style.contact.inline.clone();
                inline = match container.get("color") {
                    Some(ink) => inline.set("color", ink.to_string()),
                    None => inline,
                };
                inline = match directive.alignment {
                    HeaderAlignment::Left => inline,
                    HeaderAlignment::Center => {
                        inline.set("justify-content", "center")
                    }
                    HeaderAlignment::Right => {
                        inline.set("justify-content", "flex-end")
                    }
                };
                html.open("div", &inline);
                for item in items {
                    write_contact_item(html, item, style, false);
                }
                html.close("div");
            }
            Block::Summary(text) => {
                html.element(
                    "p",
                    &Css::new()
                        .set("margin-top", "1rem")
                        .set("max-width", "42rem")
                        .set("line-height", "1.625")
                        .set("opacity", "0.9"),
                    text,
                );
            }
            other => write_block(html, other, Region::Header, style),
        }
    }
    html.close("header");
}

fn write_contact_item(html: &mut Html, item: &ContactItem, style: &ResolvedStyle, stacked: bool) {
    let row = if stacked {
        Css::new().set("display", "flex").set("align-items", "center")
    } else {
        Css::new()
    };
    html.open("span", &row);
    if let Some(icon) = &style.contact.icon {
        let icon = if stacked {
            icon.clone().set("color", style.panels.sidebar_ink.clone())
        } else {
            icon.clone()
        };
        html.element("span", &icon, item.kind.glyph());
    }
    html.text(&item.text);
    html.close("span");
}

fn write_title(html: &mut Html, label: &str, region: Region, style: &ResolvedStyle) {
    if region == Region::Sidebar && style.layout == LayoutKind::SidebarLeft {
        html.element("h2", &style.panels.sidebar_label, label);
        return;
    }
    let title = &style.section_title;
    match &title.treatment {
        TitleTreatment::Plain => {
            html.element("h2", &title.css, label);
        }
        TitleTreatment::Bracketed { bracket, text } => {
            html.open("h2", &title.css);
            html.element("span", bracket, "[ ");
            html.element("span", text, label);
            html.element("span", bracket, " ]");
            html.close("h2");
        }
    }
}

fn section_label(block: &Block) -> &'static str {
    match block {
        Block::Contact(_) => "Contact",
        Block::Summary(_) => "Profil",
        Block::Experience(_) => "Expérience",
        Block::Education(_) => "Formation",
        Block::Skills { .. } => "Compétences",
    }
}

fn write_blocks(html: &mut Html, blocks: &[Block], region: Region, style: &ResolvedStyle) {
    for block in blocks {
        write_block(html, block, region, style);
    }
}

fn write_block(html: &mut Html, block: &Block, region: Region, style: &ResolvedStyle) {
    html.open(
        "section",
        &Css::new().set("margin-bottom", style.spacing.section_margin),
    );
    write_title(html, section_label(block), region, style);
    match block {
        Block::Contact(items) => {
            html.open("div", &style.contact.stacked);
            for item in items {
                write_contact_item(html, item, style, true);
            }
            html.close("div");
        }
        Block::Summary(text) => {
            html.element(
                "p",
                &Css::new().set("font-size", "0.875rem").set("line-height", "1.625"),
                text,
            );
        }
        Block::Experience(items) => write_experience(html, items, style),
        Block::Education(items) => write_education(html, items, style),
        Block::Skills { items, display } => write_skills(html, items, *display, style),
    }
    html.close("section");
}

fn write_experience(html: &mut Html, items: &[ExperienceItem], style: &ResolvedStyle) {
    let directive = &style.experience;
    let list = Css::new()
        .set("display", "flex")
        .set("flex-direction", "column")
        .set("gap", style.spacing.section_gap);

    match &directive.treatment {
        ExperienceTreatment::Block { container } => {
            html.open("div", &list);
            for item in items {
                html.open("article", container);
                html.open(
                    "div",
                    &Css::new()
                        .set("display", "flex")
                        .set("justify-content", "space-between")
                        .set("align-items", "baseline")
                        .set("gap", "1rem"),
                );
                html.element("h3", &directive.role, &item.role);
                if let Some(dates) = &item.dates {
                    html.element("span", &directive.dates, dates);
                }
                html.close("div");
                if !item.company.trim().is_empty() {
                    html.element("p", &directive.company, &item.company);
                }
                write_description(html, &item.description, style);
                html.close("article");
            }
            html.close("div");
        }
        ExperienceTreatment::Card { container, badge } => {
            html.open("div", &list);
            for item in items {
                html.open("article", container);
                html.open(
                    "div",
                    &Css::new()
                        .set("display", "flex")
                        .set("justify-content", "space-between")
                        .set("align-items", "flex-start")
                        .set("gap", "1rem")
                        .set("margin-bottom", "0.5rem"),
                );
                html.element("h3", &directive.role, &item.role);
                if let Some(dates) = &item.dates {
                    html.element("span", badge, dates);
                }
                html.close("div");
                if !item.company.trim().is_empty() {
                    html.element("p", &directive.company, &item.company);
                }
                write_description(html, &item.description, style);
                html.close("article");
            }
            html.close("div");
        }
        ExperienceTreatment::Timeline { container, dot } => {
            html.open("div", &container.clone().merge(&list));
            for item in items {
                html.open("article", &Css::new().set("position", "relative"));
                html.open(
                    "span",
                    &dot.clone().set("left", "calc(-1.5rem - 5px)"),
                )
                .close("span");
                html.element("h3", &directive.role, &item.role);
                let line = match (item.company.trim(), item.dates.as_deref()) {
                    ("", None) => None,
                    (company, None) => Some(company.to_string()),
                    ("", Some(dates)) => Some(dates.to_string()),
                    (company, Some(dates)) => Some(format!("{company} | {dates}")),
                };
                if let Some(line) = line {
                    html.element("p", &directive.company, &line);
                }
                write_description(html, &item.description, style);
                html.close("article");
            }
            html.close("div");
        }
    }
}

fn write_description(html: &mut Html, description: &str, style: &ResolvedStyle) {
    if !description.trim().is_empty() {
        html.element("p", &style.experience.description, description);
    }
}

fn write_education(html: &mut Html, items: &[EducationItem], style: &ResolvedStyle) {
    let directive = &style.education;
    html.open(
        "div",
        &Css::new()
            .set("display", "flex")
            .set("flex-direction", "column")
            .set("gap", "1rem"),
    );
    for item in items {
        html.open("div", &directive.item);
        html.element("div", &directive.school, &item.school);
        if !item.degree.trim().is_empty() {
            html.element("div", &directive.degree, &item.degree);
        }
        if !item.year.trim().is_empty() {
            html.element("div", &directive.year, &item.year);
        }
        html.close("div");
    }
    html.close("div");
}

fn write_skills(html: &mut Html, items: &[SkillItem], display: SkillDisplay, style: &ResolvedStyle) {
    let directive = &style.skills;
    match display {
        SkillDisplay::Chips => {
            html.open(
                "div",
                &Css::new()
                    .set("display", "flex")
                    .set("flex-wrap", "wrap")
                    .set("gap", "0.5rem"),
            );
            for item in items {
                html.element("span", &directive.chip, &item.name);
            }
            html.close("div");
        }
        SkillDisplay::Bars => {
            html.open(
                "div",
                &Css::new()
                    .set("display", "flex")
                    .set("flex-direction", "column")
                    .set("gap", "0.5rem"),
            );
            for item in items {
                html.open("div", &directive.row);
                html.element("span", &Css::new(), &item.name);
                html.open("div", &directive.track);
                html.open(
                    "div",
                    &directive.fill.clone().set("width", format!("{}%", item.percent)),
                )
                .close("div");
                html.close("div");
                html.close("div");
            }
            html.close("div");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::design::{
        DecorativeShape, DesignConfig, HeaderStyle, SectionStyle, TitleStyle,
    };
    use crate::models::{Education, Experience, Skill, TemplateId};

    fn populated_cv() -> CvData {
        let mut cv = CvData::default();
        cv.template_id = TemplateId::Unique;
        cv.personal.full_name = "Camille Durand".to_string();
        cv.personal.job_title = "Ingénieure Logiciel".to_string();
        cv.personal.email = "camille@example.com".to_string();
        cv.personal.phone = "06 12 34 56 78".to_string();
        cv.personal.summary = "Backend & systèmes distribués.".to_string();
        cv.experience.push(Experience {
            company: "Acme".to_string(),
            role: "Lead Dev".to_string(),
            start_date: "2021".to_string(),
            end_date: "Present".to_string(),
            description: "Migration vers Rust.\nÉquipe de 5.".to_string(),
            ..Experience::blank()
        });
        cv.education.push(Education {
            school: "INSA Lyon".to_string(),
            degree: "Ingénieur".to_string(),
            year: "2018".to_string(),
            ..Education::blank()
        });
        cv.skills.push(Skill {
            name: "Rust".to_string(),
            level: 5,
            ..Skill::blank()
        });
        cv
    }

    fn with_design(cv: &CvData, design: DesignConfig) -> CvData {
        CvData {
            design_config: Some(design),
            ..cv.clone()
        }
    }

    #[test]
    fn test_every_axis_combination_renders_header_and_sections() {
        let cv = populated_cv();
        for layout in LayoutKind::ALL {
            for header in HeaderStyle::ALL {
                for section in SectionStyle::ALL {
                    for title in TitleStyle::ALL {
                        let mut design = DesignConfig::default();
                        design.layout = layout;
                        design.header.style = header;
                        design.sections.style = section;
                        design.sections.title_style = title;
                        let page = render(&with_design(&cv, design));
                        let combo = format!("{layout:?}/{header:?}/{section:?}/{title:?}");
                        assert!(page.body.contains("Camille Durand"), "{combo}");
                        assert!(page.body.contains("Ingénieure Logiciel"), "{combo}");
                        assert!(page.body.contains("Lead Dev"), "{combo}");
                        assert!(page.body.contains("Formation"), "{combo}");
                        assert!(page.body.contains("INSA Lyon"), "{combo}");
                        assert!(page.body.contains("Rust"), "{combo}");
                        assert_eq!(
                            page.body.matches("camille@example.com").count(),
                            1,
                            "{combo}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_no_education_heading_when_empty() {
        let mut cv = populated_cv();
        cv.education.clear();
        for layout in LayoutKind::ALL {
            for title in TitleStyle::ALL {
                let mut design = DesignConfig::default();
                design.layout = layout;
                design.sections.title_style = title;
                let page = render(&with_design(&cv, design));
                assert!(!page.body.contains("Formation"), "{layout:?}/{title:?}");
            }
        }
    }

    #[test]
    fn test_missing_design_renders_default() {
        let mut cv = populated_cv();
        cv.design_config = None;
        let page = render(&cv);
        assert!(page.body.contains("Camille Durand"));
        assert_eq!(page.canvas.get("background-color"), Some("#ffffff"));
        assert!(page.body.contains("text-transform: uppercase"));
    }

    #[test]
    fn test_blank_cv_still_shows_header() {
        let cv = CvData {
            template_id: TemplateId::Unique,
            ..CvData::default()
        };
        let page = render(&cv);
        assert!(page.body.contains("Votre Nom"));
        assert!(page.body.contains("Titre du poste"));
        assert!(!page.body.contains("<section"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut cv = populated_cv();
        cv.personal.full_name = "<script>alert(1)</script>".to_string();
        let page = render(&cv);
        assert!(!page.body.contains("<script>"));
        assert!(page.body.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_bracketed_titles_wrap_label() {
        let mut design = DesignConfig::default();
        design.sections.title_style = TitleStyle::Bracketed;
        let page = render(&with_design(&populated_cv(), design));
        assert!(page.body.contains("[ </span>"));
        assert!(page.body.contains("> ]</span>"));
    }

    #[test]
    fn test_waves_draws_svg() {
        let mut design = DesignConfig::default();
        design.decorative.shape = DecorativeShape::Waves;
        let page = render(&with_design(&populated_cv(), design));
        assert!(page.body.contains("<svg"));
    }

    #[test]
    fn test_minimal_grid_renders_skill_bars() {
        let mut design = DesignConfig::default();
        design.layout = LayoutKind::MinimalGrid;
        let page = render(&with_design(&populated_cv(), design));
        assert!(page.body.contains("width: 100%;"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let cv = populated_cv();
        assert_eq!(render(&cv).body, render(&cv).body);
    }
}
