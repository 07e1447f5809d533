//! Decorative overlays and the page frame.
//!
//! Overlays are absolutely positioned and sit one layer above the content, so opaque panels
//! cannot hide them. They never take pointer events, and opacity stays at or below 0.3 so the
//! text underneath keeps its contrast.

use crate::models::design::{BorderStyle, DecorativeShape, Palette};
use crate::render::color::with_alpha;
use crate::render::css::Css;

/// One path of an inline SVG overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPath {
    pub d: &'static str,
    pub fill: String,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// A positioned box, optionally carrying small absolutely placed markers.
    Layer { css: Css, markers: Vec<Css> },
    /// An inline SVG stretched over the positioned box.
    Svg {
        css: Css,
        view_box: &'static str,
        paths: Vec<SvgPath>,
    },
}

/// Stacking layer of the page body holding every content region.
pub const CONTENT_LAYER: &str = "1";
const OVERLAY_LAYER: &str = "2";

fn backdrop() -> Css {
    Css::new()
        .set("position", "absolute")
        .set("pointer-events", "none")
        .set("z-index", OVERLAY_LAYER)
}

const WAVE_BACK: &str = "M0 60 C 120 20 240 100 360 60 C 480 20 600 100 720 60 L 720 120 L 0 120 Z";
const WAVE_FRONT: &str = "M0 80 C 140 50 260 110 400 80 C 540 50 620 100 720 85 L 720 120 L 0 120 Z";

/// Resolves `decorative.shape` into overlay layers. `None` yields nothing.
pub fn resolve_overlays(shape: DecorativeShape, colors: &Palette) -> Vec<Overlay> {
    match shape {
        DecorativeShape::None => Vec::new(),
        DecorativeShape::Dots => vec![Overlay::Layer {
            css: backdrop()
                .set("top", "0")
                .set("right", "0")
                .set("width", "200px")
                .set("height", "200px")
                .set("opacity", "0.1")
                .set(
                    "background-image",
                    format!("radial-gradient({} 1px, transparent 1px)", colors.primary),
                )
                .set("background-size", "10px 10px"),
            markers: Vec::new(),
        }],
        DecorativeShape::Geometric => vec![
            Overlay::Layer {
                css: backdrop()
                    .set("top", "-50px")
                    .set("left", "-50px")
                    .set("width", "200px")
                    .set("height", "200px")
                    .set("border-radius", "50%")
                    .set("background-color", colors.accent.clone())
                    .set("opacity", "0.1"),
                markers: Vec::new(),
            },
            Overlay::Layer {
                css: backdrop()
                    .set("bottom", "100px")
                    .set("right", "-50px")
                    .set("width", "150px")
                    .set("height", "150px")
                    .set("transform", "rotate(45deg)")
                    .set("background-color", colors.primary.clone())
                    .set("opacity", "0.05"),
                markers: Vec::new(),
            },
        ],
        DecorativeShape::Waves => vec![Overlay::Svg {
            css: backdrop()
                .set("left", "0")
                .set("right", "0")
                .set("bottom", "0")
                .set("height", "90px"),
            view_box: "0 0 720 120",
            paths: vec![
                SvgPath {
                    d: WAVE_BACK,
                    fill: colors.accent.clone(),
                    opacity: 0.15,
                },
                SvgPath {
                    d: WAVE_FRONT,
                    fill: colors.primary.clone(),
                    opacity: 0.08,
                },
            ],
        }],
        DecorativeShape::TechLines => {
            let marker = |edge: &'static str, offset: &'static str| {
                Css::new()
                    .set("position", "absolute")
                    .set(edge, offset)
                    .set("left", "-2px")
                    .set("width", "5px")
                    .set("height", "5px")
                    .set("background-color", colors.primary.clone())
            };
            vec![Overlay::Layer {
                css: backdrop()
                    .set("top", "0")
                    .set("bottom", "0")
                    .set("left", "20px")
                    .set("width", "1px")
                    .set("background-color", colors.accent.clone())
                    .set("opacity", "0.3"),
                markers: vec![marker("top", "10%"), marker("bottom", "20%")],
            }]
        }
    }
}

/// Inset frame around the page canvas for `decorative.borderStyle`.
pub fn resolve_frame(border: BorderStyle, colors: &Palette) -> Option<Css> {
    let (width, style) = match border {
        BorderStyle::None => return None,
        BorderStyle::Solid => ("1px", "solid"),
        BorderStyle::Double => ("4px", "double"),
        BorderStyle::Dashed => ("1px", "dashed"),
    };
    Some(
        backdrop()
            .set("inset", "6mm")
            .set(
                "border",
                format!("{width} {style} {}", with_alpha(&colors.accent, 0.8)),
            ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DesignConfig;

    fn palette() -> Palette {
        DesignConfig::default().colors
    }

    fn overlay_css(overlay: &Overlay) -> &Css {
        match overlay {
            Overlay::Layer { css, .. } | Overlay::Svg { css, .. } => css,
        }
    }

    #[test]
    fn test_none_emits_nothing() {
        assert!(resolve_overlays(DecorativeShape::None, &palette()).is_empty());
    }

    fn above_content(css: &Css) -> bool {
        let layer = |z: &str| z.parse::<i32>().unwrap();
        css.get("z-index").map(layer) > Some(layer(CONTENT_LAYER))
    }

    #[test]
    fn test_every_overlay_is_above_content_and_inert() {
        for shape in DecorativeShape::ALL {
            for overlay in resolve_overlays(shape, &palette()) {
                let css = overlay_css(&overlay);
                assert!(above_content(css), "{shape:?}");
                assert_eq!(css.get("pointer-events"), Some("none"), "{shape:?}");
                if let Some(opacity) = css.get("opacity") {
                    assert!(opacity.parse::<f32>().unwrap() <= 0.3, "{shape:?}");
                }
            }
        }
    }

    #[test]
    fn test_geometric_places_shapes_in_opposite_corners() {
        let overlays = resolve_overlays(DecorativeShape::Geometric, &palette());
        assert_eq!(overlays.len(), 2);
        assert!(overlay_css(&overlays[0]).get("top").is_some());
        assert!(overlay_css(&overlays[1]).get("bottom").is_some());
    }

    #[test]
    fn test_tech_lines_has_two_markers() {
        let overlays = resolve_overlays(DecorativeShape::TechLines, &palette());
        match &overlays[0] {
            Overlay::Layer { markers, .. } => assert_eq!(markers.len(), 2),
            other => panic!("unexpected overlay {other:?}"),
        }
    }

    #[test]
    fn test_waves_is_drawn() {
        let overlays = resolve_overlays(DecorativeShape::Waves, &palette());
        assert!(matches!(overlays.as_slice(), [Overlay::Svg { paths, .. }] if paths.len() == 2));
    }

    #[test]
    fn test_frame() {
        assert!(resolve_frame(BorderStyle::None, &palette()).is_none());
        let frame = resolve_frame(BorderStyle::Double, &palette()).unwrap();
        assert!(frame.get("border").unwrap().contains("double"));
        assert!(above_content(&frame));
        assert_eq!(frame.get("pointer-events"), Some("none"));
    }
}
