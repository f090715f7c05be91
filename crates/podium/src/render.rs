use eframe::egui;

use crate::controller::Size;
use crate::deck::Slide;
use crate::theme::Theme;

const PADDING: f32 = 80.0;
const HEADING_GAP: f32 = 40.0;

pub fn to_vec2(size: Size) -> egui::Vec2 {
    egui::vec2(size.width, size.height)
}

pub fn from_vec2(v: egui::Vec2) -> Size {
    Size::new(v.x, v.y)
}

/// Draw `slide` laid out at its design size, scaled by `scale` and centered in
/// `container`. Returns the rect the slide occupies on screen.
pub fn draw_slide(
    painter: &egui::Painter,
    slide: &Slide,
    theme: &Theme,
    container: egui::Rect,
    design: Size,
    scale: f32,
) -> egui::Rect {
    let rect = egui::Rect::from_center_size(container.center(), to_vec2(design) * scale);
    let painter = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
    painter.rect_filled(rect, 0.0, theme.background);

    let content = rect.shrink(PADDING * scale);
    let mut y = content.top();

    if let Some(title) = &slide.title {
        let galley = painter.layout(
            title.clone(),
            egui::FontId::proportional(theme.heading_size * scale),
            theme.heading_color,
            content.width(),
        );
        let height = galley.rect.height();
        painter.galley(egui::pos2(content.left(), y), galley, theme.heading_color);
        y += height + HEADING_GAP * scale;
    }

    if !slide.body.is_empty() {
        let galley = painter.layout(
            body_text(&slide.body),
            egui::FontId::proportional(theme.body_size * scale),
            theme.foreground,
            content.width(),
        );
        painter.galley(egui::pos2(content.left(), y), galley, theme.foreground);
    }

    rect
}

/// Flatten light markdown for display: list markers become bullets, `##`
/// prefixes and emphasis markers are dropped.
fn body_text(body: &str) -> String {
    body.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            let text = if let Some(item) = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
            {
                format!("{indent}\u{2022} {item}")
            } else {
                format!("{indent}{}", trimmed.trim_start_matches('#').trim_start())
            };
            text.replace("**", "").replace('`', "")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Draw wrapped text at the top-left of `rect`, clipped to it.
pub fn draw_text(
    painter: &egui::Painter,
    text: &str,
    font: egui::FontId,
    color: egui::Color32,
    rect: egui::Rect,
) {
    let painter = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
    let galley = painter.layout(text.to_string(), font, color, rect.width());
    painter.galley(rect.left_top(), galley, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_text_bullets_and_headings() {
        let text = body_text("- one\n  * two\n## Sub\n**bold** `code`");
        assert_eq!(text, "\u{2022} one\n  \u{2022} two\nSub\nbold code");
    }

    #[test]
    fn test_size_conversions() {
        let size = Size::new(1920.0, 1080.0);
        assert_eq!(from_vec2(to_vec2(size)), size);
    }
}
