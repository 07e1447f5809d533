//! Minimal HTML writer and the document shell shared by every template.

use std::fmt::Write;

use crate::layout::{PageSpec, RenderMode};
use crate::render::css::Css;

const FONT_STYLESHEET: &str = "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700;900&family=Lato:wght@400;700&family=Merriweather:wght@400;700&family=Playfair+Display:wght@400;700;900&family=Roboto+Mono:wght@400;500;700&display=swap";

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Append-only markup buffer. Text and attribute values are always escaped on the way in.
#[derive(Debug, Default)]
pub struct Html {
    buf: String,
}

impl Html {
    pub fn new() -> Self {
        Html::default()
    }

    /// Opens `tag`, with a `style` attribute when `style` is non-empty.
    pub fn open(&mut self, tag: &str, style: &Css) -> &mut Self {
        if style.is_empty() {
            let _ = write!(self.buf, "<{tag}>");
        } else {
            let _ = write!(self.buf, "<{tag} style=\"{}\">", escape_html(&style.render()));
        }
        self
    }

    pub fn close(&mut self, tag: &str) -> &mut Self {
        let _ = write!(self.buf, "</{tag}>");
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(&escape_html(text));
        self
    }

    /// `<tag style>text</tag>`
    pub fn element(&mut self, tag: &str, style: &Css, text: &str) -> &mut Self {
        self.open(tag, style).text(text).close(tag)
    }

    /// Trusted markup produced by this module's callers (SVG paths, fixed glyph spans).
    pub fn raw(&mut self, markup: &str) -> &mut Self {
        self.buf.push_str(markup);
        self
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Wraps a rendered page body into a standalone document.
///
/// The canvas is laid out at the physical A4 width. Preview mode adds a screen-only scale
/// transform which `@media print` removes, so printing a preview still yields physical size.
pub fn document(title: &str, page: PageSpec, mode: RenderMode, canvas: &Css, body: &str) -> String {
    let mut canvas_css = Css::new()
        .set("position", "relative")
        .set("overflow", "hidden")
        .set("box-sizing", "border-box")
        .set("width", format!("{}mm", page.width_mm))
        .set("min-height", format!("{}mm", page.min_height_mm))
        .set("padding", format!("{}mm", page.margin_mm))
        .merge(canvas);

    let body_bg = match mode.screen_scale() {
        Some(scale) => {
            canvas_css = canvas_css
                .set("margin", "2rem auto")
                .set("box-shadow", "0 25px 50px -12px rgba(0, 0, 0, 0.25)")
                .set("transform", format!("scale({scale})"))
                .set("transform-origin", "top center");
            "#e5e7eb"
        }
        None => "#ffffff",
    };

    let mut out = String::with_capacity(body.len() + 2048);
    out.push_str("<!DOCTYPE html><html lang=\"fr\"><head><meta charset=\"utf-8\">");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    let _ = write!(out, "<title>{}</title>", escape_html(title));
    out.push_str("<link rel=\"preconnect\" href=\"https://fonts.googleapis.com\">");
    let _ = write!(out, "<link rel=\"stylesheet\" href=\"{}\">", escape_html(FONT_STYLESHEET));
    out.push_str("<style>");
    out.push_str("*{box-sizing:border-box;-webkit-print-color-adjust:exact;print-color-adjust:exact}");
    let _ = write!(out, "body{{margin:0;background:{body_bg}}}");
    out.push_str("h1,h2,h3,h4,p,ul{margin:0}");
    out.push_str("@page{size:A4;margin:0}");
    out.push_str("@media print{body{background:none}.cv-page{transform:none!important;margin:0!important;box-shadow:none!important}}");
    out.push_str("</style></head><body>");
    let _ = write!(
        out,
        "<div class=\"cv-page\" style=\"{}\">",
        escape_html(&canvas_css.render())
    );
    out.push_str(body);
    out.push_str("</div></body></html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_writer_escapes_text_and_style() {
        let mut html = Html::new();
        html.element("p", &Css::new().set("font-family", "'Inter', sans-serif"), "a < b");
        assert_eq!(
            html.finish(),
            "<p style=\"font-family: &#39;Inter&#39;, sans-serif;\">a &lt; b</p>"
        );
    }

    #[test]
    fn test_empty_style_is_omitted() {
        let mut html = Html::new();
        html.element("span", &Css::new(), "x");
        assert_eq!(html.finish(), "<span>x</span>");
    }

    #[test]
    fn test_preview_document_is_scaled_on_screen_only() {
        let doc = document("CV", PageSpec::a4(12.0), RenderMode::preview(0.5), &Css::new(), "");
        assert!(doc.contains("transform: scale(0.5)"));
        assert!(doc.contains("@media print"));
        assert!(doc.contains("width: 210mm"));
    }

    #[test]
    fn test_print_document_is_unscaled_a4() {
        let doc = document("CV", PageSpec::a4(15.0), RenderMode::Print, &Css::new(), "<p>x</p>");
        assert!(!doc.contains("scale("));
        assert!(doc.contains("@page{size:A4;margin:0}"));
        assert!(doc.contains("padding: 15mm"));
        assert!(doc.contains("<p>x</p>"));
    }
}
