//! Physical page geometry shared by every template.
//!
//! The canvas is always laid out at ISO A4 width. On-screen display applies a uniform
//! scale transform on top; print output ignores it and uses the physical size as-is.

use serde::{Deserialize, Serialize};

use crate::models::TemplateId;

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

pub const MIN_PREVIEW_SCALE: f32 = 0.3;
pub const MAX_PREVIEW_SCALE: f32 = 1.0;
pub const DEFAULT_PREVIEW_SCALE: f32 = 0.85;

/// Page geometry for one template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub width_mm: f32,
    pub min_height_mm: f32,
    /// Inner padding of the canvas. Zero for templates that paint full-bleed panels
    /// and pad their regions individually.
    pub margin_mm: f32,
}

impl PageSpec {
    pub fn a4(margin_mm: f32) -> Self {
        PageSpec {
            width_mm: A4_WIDTH_MM,
            min_height_mm: A4_HEIGHT_MM,
            margin_mm,
        }
    }

    /// Margins embedded per template, between 12 and 15mm for padded canvases.
    pub fn for_template(template: TemplateId) -> Self {
        match template {
            TemplateId::Modern => PageSpec::a4(12.0),
            TemplateId::Classic => PageSpec::a4(15.0),
            TemplateId::Elegant => PageSpec::a4(0.0),
            TemplateId::Unique => PageSpec::a4(12.0),
        }
    }
}

/// How a document is going to be consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderMode {
    /// On-screen preview, scaled uniformly around the top edge.
    Preview { scale: f32 },
    /// Paginated output at physical size.
    Print,
}

impl RenderMode {
    pub fn preview(scale: f32) -> Self {
        RenderMode::Preview {
            scale: clamp_scale(scale),
        }
    }

    /// Scale applied on screen; `None` for print.
    pub fn screen_scale(self) -> Option<f32> {
        match self {
            RenderMode::Preview { scale } => Some(clamp_scale(scale)),
            RenderMode::Print => None,
        }
    }
}

/// Clamps a preview scale into the supported range. Non-finite input yields the default.
pub fn clamp_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(MIN_PREVIEW_SCALE, MAX_PREVIEW_SCALE)
    } else {
        DEFAULT_PREVIEW_SCALE
    }
}
