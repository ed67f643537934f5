use serde::{Deserialize, Serialize};

/// Page geometry and typography for the laid-out quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutStyles {
    /// Page width in millimetres.
    pub page_width_mm: f32,

    /// Page height in millimetres.
    pub page_height_mm: f32,

    /// Page margin in millimetres (applied uniformly).
    pub margin_mm: f32,

    /// Company name size in points.
    pub letterhead_size: f32,

    /// Title size in points.
    pub title_size: f32,

    /// Body text size in points.
    pub body_size: f32,

    /// Letterhead details and footer size in points.
    pub small_size: f32,

    /// Line height as a multiple of the font size.
    pub line_spacing: f32,

    /// Payment table header fill, RGB in `0.0..=1.0`.
    pub table_header_fill: (f32, f32, f32),
}

impl Default for LayoutStyles {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 20.0,
            letterhead_size: 16.0,
            title_size: 18.0,
            body_size: 11.0,
            small_size: 9.0,
            line_spacing: 1.4,
            table_header_fill: (0.85, 0.90, 0.96),
        }
    }
}
