use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    /// Backdrop behind slides in overview and presenter layouts.
    pub chrome_background: Color32,
    pub notes_foreground: Color32,
    pub heading_size: f32,
    pub body_size: f32,
    pub notes_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            chrome_background: Color32::from_rgb(0x12, 0x12, 0x12),
            notes_foreground: Color32::from_rgb(0xE0, 0xE0, 0xE0),
            heading_size: 96.0,
            body_size: 44.0,
            notes_size: 22.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x3E),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            chrome_background: Color32::from_rgb(0x2B, 0x2D, 0x33),
            notes_foreground: Color32::from_rgb(0xF0, 0xF0, 0xF0),
            heading_size: 96.0,
            body_size: 44.0,
            notes_size: 22.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}
