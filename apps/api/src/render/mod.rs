// Rendering: the Style Resolver, the dynamic template writer, the static templates,
// and the document shell they all share.

pub mod color;
pub mod css;
pub mod decor;
pub mod html;
pub mod style;
pub mod templates;
pub mod unique;

use crate::layout::{PageSpec, RenderMode};
use crate::models::{CvData, TemplateId};
use css::Css;

/// A template's output before it is wrapped into a document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    /// Declarations for the page canvas itself (background, ink, body font).
    pub canvas: Css,
    pub body: String,
}

/// Renders `cv` with its selected template into a standalone HTML document.
///
/// Infallible: every syntactically valid snapshot renders, with or without a design.
pub fn render_document(cv: &CvData, mode: RenderMode) -> String {
    let page = match cv.template_id {
        TemplateId::Modern => templates::modern(cv),
        TemplateId::Classic => templates::classic(cv),
        TemplateId::Elegant => templates::elegant(cv),
        TemplateId::Unique => unique::render(cv),
    };
    let title = match cv.personal.full_name.trim() {
        "" => "CV".to_string(),
        name => format!("CV - {name}"),
    };
    html::document(
        &title,
        PageSpec::for_template(cv.template_id),
        mode,
        &page.canvas,
        &page.body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Skill;

    #[test]
    fn test_every_template_renders_a_document() {
        for template in [
            TemplateId::Modern,
            TemplateId::Classic,
            TemplateId::Elegant,
            TemplateId::Unique,
        ] {
            let cv = CvData {
                template_id: template,
                ..CvData::default()
            };
            let doc = render_document(&cv, RenderMode::Print);
            assert!(doc.starts_with("<!DOCTYPE html>"), "{template:?}");
            assert!(doc.contains("Votre Nom"), "{template:?}");
            assert!(doc.ends_with("</html>"), "{template:?}");
        }
    }

    #[test]
    fn test_unique_without_design_uses_monochrome_default() {
        let cv = CvData {
            template_id: TemplateId::Unique,
            ..CvData::default()
        };
        let doc = render_document(&cv, RenderMode::preview(0.85));
        assert!(doc.contains("background-color: #ffffff"));
        assert!(doc.contains("scale(0.85)"));
    }

    #[test]
    fn test_skill_bars_stay_in_range() {
        let mut cv = CvData {
            template_id: TemplateId::Elegant,
            ..CvData::default()
        };
        for level in [0, 6, -3] {
            cv.skills.push(Skill {
                name: format!("level {level}"),
                level,
                ..Skill::blank()
            });
        }
        let doc = render_document(&cv, RenderMode::Print);
        assert_eq!(doc.matches("width: 0%;").count(), 2);
        assert_eq!(doc.matches("width: 100%;").count(), 1);
        assert!(!doc.contains("width: 120%"));
    }
}
