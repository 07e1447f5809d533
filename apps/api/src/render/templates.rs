//! The three static templates. They read `theme_color` and never `design_config`.

use crate::layout::compositor::{
    contact_items, date_line, or_placeholder, NAME_PLACEHOLDER, TITLE_PLACEHOLDER,
};
use crate::models::cv::DEFAULT_THEME_COLOR;
use crate::models::design::FontFamily;
use crate::models::CvData;
use crate::render::color::{legible_on, with_alpha};
use crate::render::css::{sanitize_value, Css};
use crate::render::html::Html;
use crate::render::RenderedPage;

const INK: &str = "#1f2937";
const MUTED: &str = "#6b7280";

fn theme(cv: &CvData) -> String {
    let value = sanitize_value(cv.theme_color());
    if value.is_empty() {
        DEFAULT_THEME_COLOR.to_string()
    } else {
        value
    }
}

fn heading(theme: &str) -> Css {
    Css::new()
        .set("font-size", "1.125rem")
        .set("font-weight", "700")
        .set("text-transform", "uppercase")
        .set("letter-spacing", "0.05em")
        .set("color", theme.to_string())
        .set("margin-bottom", "0.75rem")
}

fn section() -> Css {
    Css::new().set("margin-bottom", "1.5rem")
}

fn paragraph() -> Css {
    Css::new()
        .set("font-size", "0.875rem")
        .set("line-height", "1.625")
        .set("white-space", "pre-wrap")
}

// ────────────────────────────────────────────────────────────────────────────
// Modern
// ────────────────────────────────────────────────────────────────────────────

/// Header rule and headings in the theme color over an 8/4 two-column body.
pub fn modern(cv: &CvData) -> RenderedPage {
    let theme = theme(cv);
    let p = &cv.personal;
    let mut html = Html::new();

    html.open(
        "header",
        &Css::new()
            .set("border-bottom", format!("2px solid {theme}"))
            .set("padding-bottom", "1.5rem")
            .set("margin-bottom", "1.5rem"),
    );
    html.element(
        "h1",
        &Css::new()
            .set("font-size", "2.25rem")
            .set("font-weight", "700")
            .set("text-transform", "uppercase")
            .set("letter-spacing", "-0.025em"),
        &or_placeholder(&p.full_name, NAME_PLACEHOLDER),
    );
    html.element(
        "p",
        &Css::new()
            .set("font-size", "1.25rem")
            .set("font-weight", "500")
            .set("margin-top", "0.25rem")
            .set("color", theme.clone()),
        &or_placeholder(&p.job_title, TITLE_PLACEHOLDER),
    );
    let contacts = contact_items(p);
    if !contacts.is_empty() {
        html.open(
            "div",
            &Css::new()
                .set("display", "flex")
                .set("flex-wrap", "wrap")
                .set("gap", "1rem")
                .set("margin-top", "1rem")
                .set("font-size", "0.875rem")
                .set("color", MUTED),
        );
        for item in &contacts {
            html.element("span", &Css::new(), &item.text);
        }
        html.close("div");
    }
    html.close("header");

    html.open(
        "div",
        &Css::new()
            .set("display", "grid")
            .set("grid-template-columns", "8fr 4fr")
            .set("gap", "2rem"),
    );

    html.open("div", &Css::new());
    if !p.summary.trim().is_empty() {
        html.open("section", &section());
        html.element("h2", &heading(&theme), "Profil");
        html.element("p", &paragraph(), p.summary.trim());
        html.close("section");
    }
    if !cv.experience.is_empty() {
        html.open("section", &section());
        html.element("h2", &heading(&theme), "Expérience Professionnelle");
        for exp in &cv.experience {
            html.open("article", &Css::new().set("margin-bottom", "1rem"));
            html.open(
                "div",
                &Css::new()
                    .set("display", "flex")
                    .set("justify-content", "space-between")
                    .set("align-items", "baseline"),
            );
            html.element("h3", &Css::new().set("font-weight", "700"), &exp.role);
            if let Some(dates) = date_line(&exp.start_date, &exp.end_date) {
                html.element(
                    "span",
                    &Css::new().set("font-size", "0.875rem").set("color", MUTED),
                    &dates,
                );
            }
            html.close("div");
            if !exp.company.trim().is_empty() {
                html.element(
                    "p",
                    &Css::new()
                        .set("font-weight", "500")
                        .set("margin-bottom", "0.25rem")
                        .set("color", theme.clone()),
                    &exp.company,
                );
            }
            if !exp.description.trim().is_empty() {
                html.element("p", &paragraph(), &exp.description);
            }
            html.close("article");
        }
        html.close("section");
    }
    html.close("div");

    html.open("div", &Css::new());
    if !cv.education.is_empty() {
        html.open("section", &section());
        html.element("h2", &heading(&theme), "Formation");
        for edu in &cv.education {
            html.open("div", &Css::new().set("margin-bottom", "0.75rem"));
            html.element("div", &Css::new().set("font-weight", "700"), &edu.school);
            html.element("div", &Css::new().set("font-size", "0.875rem"), &edu.degree);
            html.element(
                "div",
                &Css::new().set("font-size", "0.75rem").set("color", MUTED),
                &edu.year,
            );
            html.close("div");
        }
        html.close("section");
    }
    if !cv.skills.is_empty() {
        html.open("section", &section());
        html.element("h2", &heading(&theme), "Compétences");
        html.open(
            "div",
            &Css::new()
                .set("display", "flex")
                .set("flex-wrap", "wrap")
                .set("gap", "0.5rem"),
        );
        for skill in &cv.skills {
            html.element(
                "span",
                &Css::new()
                    .set("padding", "0.25rem 0.5rem")
                    .set("font-size", "0.75rem")
                    .set("border-radius", "0.25rem")
                    .set("background-color", with_alpha(&theme, 0.1))
                    .set("color", legible_on("#ffffff", &[&theme, INK])),
                &skill.name,
            );
        }
        html.close("div");
        html.close("section");
    }
    html.close("div");
    html.close("div");

    RenderedPage {
        canvas: Css::new()
            .set("background-color", "#ffffff")
            .set("color", INK)
            .set("font-family", FontFamily::Inter.css_stack()),
        body: html.finish(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Classic
// ────────────────────────────────────────────────────────────────────────────

/// Centered serif header, skills first, justified body text.
pub fn classic(cv: &CvData) -> RenderedPage {
    let theme = theme(cv);
    let p = &cv.personal;
    let mut html = Html::new();

    let rule_heading = Css::new()
        .set("font-size", "1rem")
        .set("font-weight", "700")
        .set("text-transform", "uppercase")
        .set("letter-spacing", "0.1em")
        .set("border-bottom", format!("1px solid {theme}"))
        .set("padding-bottom", "0.25rem")
        .set("margin-bottom", "0.75rem");

    html.open(
        "header",
        &Css::new()
            .set("text-align", "center")
            .set("margin-bottom", "2rem"),
    );
    html.element(
        "h1",
        &Css::new()
            .set("font-size", "1.875rem")
            .set("font-weight", "700")
            .set("color", theme.clone()),
        &or_placeholder(&p.full_name, NAME_PLACEHOLDER),
    );
    html.element(
        "p",
        &Css::new()
            .set("font-size", "1.125rem")
            .set("font-style", "italic")
            .set("margin-top", "0.25rem"),
        &or_placeholder(&p.job_title, TITLE_PLACEHOLDER),
    );
    let contacts: Vec<String> = contact_items(p).into_iter().map(|c| c.text).collect();
    if !contacts.is_empty() {
        html.element(
            "p",
            &Css::new()
                .set("font-size", "0.875rem")
                .set("margin-top", "0.5rem")
                .set("color", MUTED),
            &contacts.join(" \u{2022} "),
        );
    }
    html.close("header");

    if !p.summary.trim().is_empty() {
        html.open("section", &section());
        html.element("h2", &rule_heading, "Profil");
        html.element(
            "p",
            &paragraph().set("text-align", "justify"),
            p.summary.trim(),
        );
        html.close("section");
    }

    if !cv.skills.is_empty() {
        html.open("section", &section());
        html.element("h2", &rule_heading, "Compétences Clés");
        let names: Vec<&str> = cv
            .skills
            .iter()
            .map(|s| s.name.trim())
            .filter(|n| !n.is_empty())
            .collect();
        html.element("p", &paragraph(), &names.join(" \u{2022} "));
        html.close("section");
    }

    if !cv.experience.is_empty() {
        html.open("section", &section());
        html.element("h2", &rule_heading, "Expérience Professionnelle");
        for exp in &cv.experience {
            html.open("article", &Css::new().set("margin-bottom", "1rem"));
            html.open(
                "div",
                &Css::new()
                    .set("display", "flex")
                    .set("justify-content", "space-between")
                    .set("align-items", "baseline"),
            );
            let heading = match exp.company.trim() {
                "" => exp.role.clone(),
                company => format!("{}, {company}", exp.role),
            };
            html.element("h3", &Css::new().set("font-weight", "700"), &heading);
            if let Some(dates) = date_line(&exp.start_date, &exp.end_date) {
                html.element(
                    "span",
                    &Css::new().set("font-size", "0.875rem").set("font-style", "italic"),
                    &dates,
                );
            }
            html.close("div");
            if !exp.description.trim().is_empty() {
                html.element(
                    "p",
                    &paragraph().set("text-align", "justify"),
                    &exp.description,
                );
            }
            html.close("article");
        }
        html.close("section");
    }

    if !cv.education.is_empty() {
        html.open("section", &section());
        html.element("h2", &rule_heading, "Formation");
        for edu in &cv.education {
            html.open(
                "div",
                &Css::new()
                    .set("display", "flex")
                    .set("justify-content", "space-between")
                    .set("margin-bottom", "0.5rem"),
            );
            let line = match edu.degree.trim() {
                "" => edu.school.clone(),
                degree => format!("{degree}, {}", edu.school),
            };
            html.element("span", &Css::new().set("font-weight", "600"), &line);
            html.element("span", &Css::new().set("font-style", "italic"), &edu.year);
            html.close("div");
        }
        html.close("section");
    }

    RenderedPage {
        canvas: Css::new()
            .set("background-color", "#ffffff")
            .set("color", INK)
            .set("font-family", FontFamily::Merriweather.css_stack()),
        body: html.finish(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Elegant
// ────────────────────────────────────────────────────────────────────────────

/// First letter of the name for the avatar, uppercased. Empty when the name is blank.
pub fn initial(full_name: &str) -> String {
    full_name
        .trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Theme-colored sidebar with avatar and skill bars; timeline experience in the main column.
pub fn elegant(cv: &CvData) -> RenderedPage {
    let theme = theme(cv);
    let ink = legible_on(&theme, &["#ffffff", INK]);
    let p = &cv.personal;
    let mut html = Html::new();

    let side_heading = Css::new()
        .set("font-size", "0.875rem")
        .set("font-weight", "700")
        .set("text-transform", "uppercase")
        .set("letter-spacing", "0.1em")
        .set("border-bottom", format!("1px solid {}", with_alpha(&ink, 0.3)))
        .set("padding-bottom", "0.5rem")
        .set("margin-bottom", "1rem");

    html.open(
        "div",
        &Css::new().set("display", "flex").set("min-height", "297mm"),
    );

    html.open(
        "aside",
        &Css::new()
            .set("width", "32%")
            .set("padding", "12mm 8mm")
            .set("background-color", theme.clone())
            .set("color", ink.clone()),
    );
    html.element(
        "div",
        &Css::new()
            .set("width", "6rem")
            .set("height", "6rem")
            .set("margin", "0 auto 2rem auto")
            .set("border-radius", "9999px")
            .set("display", "flex")
            .set("align-items", "center")
            .set("justify-content", "center")
            .set("font-size", "2.25rem")
            .set("font-weight", "700")
            .set("background-color", with_alpha(&ink, 0.2)),
        &initial(&p.full_name),
    );

    let contacts = contact_items(p);
    if !contacts.is_empty() {
        html.open("section", &Css::new().set("margin-bottom", "2rem"));
        html.element("h2", &side_heading, "Contact");
        for item in &contacts {
            html.element(
                "div",
                &Css::new()
                    .set("font-size", "0.875rem")
                    .set("margin-bottom", "0.5rem")
                    .set("word-break", "break-all"),
                &item.text,
            );
        }
        html.close("section");
    }

    if !cv.skills.is_empty() {
        html.open("section", &Css::new().set("margin-bottom", "2rem"));
        html.element("h2", &side_heading, "Compétences");
        for skill in &cv.skills {
            html.open("div", &Css::new().set("margin-bottom", "0.75rem"));
            html.element("div", &Css::new().set("font-size", "0.875rem"), &skill.name);
            html.open(
                "div",
                &Css::new()
                    .set("height", "0.375rem")
                    .set("margin-top", "0.25rem")
                    .set("border-radius", "9999px")
                    .set("background-color", with_alpha(&ink, 0.2)),
            );
            html.open(
                "div",
                &Css::new()
                    .set("height", "100%")
                    .set("border-radius", "9999px")
                    .set("width", format!("{}%", skill.bar_percent()))
                    .set("background-color", ink.clone()),
            )
            .close("div");
            html.close("div");
            html.close("div");
        }
        html.close("section");
    }
    html.close("aside");

    html.open("main", &Css::new().set("width", "68%").set("padding", "12mm 10mm"));
    html.open("header", &Css::new().set("margin-bottom", "2rem"));
    html.element(
        "h1",
        &Css::new()
            .set("font-size", "2.25rem")
            .set("font-weight", "700")
            .set("font-family", FontFamily::PlayfairDisplay.css_stack()),
        &or_placeholder(&p.full_name, NAME_PLACEHOLDER),
    );
    html.element(
        "p",
        &Css::new()
            .set("font-size", "1.125rem")
            .set("letter-spacing", "0.05em")
            .set("margin-top", "0.25rem")
            .set("color", legible_on("#ffffff", &[&theme, INK])),
        &or_placeholder(&p.job_title, TITLE_PLACEHOLDER),
    );
    html.close("header");

    let main_heading = heading(&legible_on("#ffffff", &[&theme, INK]));
    if !p.summary.trim().is_empty() {
        html.open("section", &section());
        html.element("h2", &main_heading, "Profil");
        html.element("p", &paragraph(), p.summary.trim());
        html.close("section");
    }

    if !cv.experience.is_empty() {
        html.open("section", &section());
        html.element("h2", &main_heading, "Expériences");
        html.open(
            "div",
            &Css::new()
                .set("border-left", format!("2px solid {}", with_alpha(&theme, 0.3)))
                .set("padding-left", "1.5rem"),
        );
        for exp in &cv.experience {
            html.open(
                "article",
                &Css::new()
                    .set("position", "relative")
                    .set("margin-bottom", "1.25rem"),
            );
            html.open(
                "span",
                &Css::new()
                    .set("position", "absolute")
                    .set("left", "calc(-1.5rem - 6px)")
                    .set("top", "0.375rem")
                    .set("width", "0.625rem")
                    .set("height", "0.625rem")
                    .set("border-radius", "9999px")
                    .set("background-color", theme.clone()),
            )
            .close("span");
            html.element("h3", &Css::new().set("font-weight", "700"), &exp.role);
            let meta = match (exp.company.trim(), date_line(&exp.start_date, &exp.end_date)) {
                ("", None) => None,
                (company, None) => Some(company.to_string()),
                ("", Some(dates)) => Some(dates),
                (company, Some(dates)) => Some(format!("{company} | {dates}")),
            };
            if let Some(meta) = meta {
                html.element(
                    "p",
                    &Css::new()
                        .set("font-size", "0.875rem")
                        .set("color", MUTED)
                        .set("margin-bottom", "0.25rem"),
                    &meta,
                );
            }
            if !exp.description.trim().is_empty() {
                html.element("p", &paragraph(), &exp.description);
            }
            html.close("article");
        }
        html.close("div");
        html.close("section");
    }

    if !cv.education.is_empty() {
        html.open("section", &section());
        html.element("h2", &main_heading, "Formation");
        for edu in &cv.education {
            html.open(
                "div",
                &Css::new()
                    .set("border-left", format!("3px solid {theme}"))
                    .set("background-color", "#f9fafb")
                    .set("padding", "0.75rem")
                    .set("margin-bottom", "0.75rem"),
            );
            html.element("div", &Css::new().set("font-weight", "700"), &edu.school);
            html.element("div", &Css::new().set("font-size", "0.875rem"), &edu.degree);
            html.element(
                "div",
                &Css::new().set("font-size", "0.75rem").set("color", MUTED),
                &edu.year,
            );
            html.close("div");
        }
        html.close("section");
    }
    html.close("main");
    html.close("div");

    RenderedPage {
        canvas: Css::new()
            .set("background-color", "#ffffff")
            .set("color", INK)
            .set("font-family", FontFamily::Lato.css_stack()),
        body: html.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::design::DesignConfig;
    use crate::models::{Education, Experience, Skill};

    fn cv() -> CvData {
        let mut cv = CvData::default();
        cv.personal.full_name = "élodie Petit".to_string();
        cv.personal.job_title = "Designer".to_string();
        cv.personal.email = "elodie@example.com".to_string();
        cv.theme_color = "#059669".to_string();
        cv.experience.push(Experience {
            company: "Studio".to_string(),
            role: "UX".to_string(),
            start_date: "2019".to_string(),
            ..Experience::blank()
        });
        cv.skills.push(Skill {
            name: "Figma".to_string(),
            level: -3,
            ..Skill::blank()
        });
        cv
    }

    fn all(cv: &CvData) -> [RenderedPage; 3] {
        [modern(cv), classic(cv), elegant(cv)]
    }

    #[test]
    fn test_static_templates_use_theme_color() {
        for page in all(&cv()) {
            assert!(page.body.contains("#059669"));
        }
    }

    #[test]
    fn test_static_templates_ignore_design_config() {
        let plain = cv();
        let mut designed = cv();
        let mut design = DesignConfig::default();
        design.colors.primary = "#ff00ff".to_string();
        designed.design_config = Some(design);
        for (a, b) in all(&plain).into_iter().zip(all(&designed)) {
            assert_eq!(a.body, b.body);
        }
    }

    #[test]
    fn test_no_education_heading_when_empty() {
        for page in all(&cv()) {
            assert!(!page.body.contains("Formation"));
        }
        let mut with_edu = cv();
        with_edu.education.push(Education {
            school: "ENSAD".to_string(),
            ..Education::blank()
        });
        for page in all(&with_edu) {
            assert!(page.body.contains("Formation"));
        }
    }

    #[test]
    fn test_classic_lists_skills_before_experience() {
        let body = classic(&cv()).body;
        let skills = body.find("Compétences Clés").unwrap();
        let experience = body.find("Expérience Professionnelle").unwrap();
        assert!(skills < experience);
    }

    #[test]
    fn test_elegant_avatar_and_clamped_bar() {
        let body = elegant(&cv()).body;
        assert!(body.contains(">É</div>"));
        assert!(body.contains("width: 0%;"));
        assert_eq!(initial("   "), "");
    }

    #[test]
    fn test_blank_theme_color_falls_back() {
        let mut data = cv();
        data.theme_color = ";".to_string();
        assert!(modern(&data).body.contains(DEFAULT_THEME_COLOR));
    }

    #[test]
    fn test_placeholders() {
        for page in all(&CvData::default()) {
            assert!(page.body.contains(NAME_PLACEHOLDER));
            assert!(page.body.contains(TITLE_PLACEHOLDER));
        }
    }
}
