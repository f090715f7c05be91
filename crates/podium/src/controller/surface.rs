use super::mode::DisplayMode;

/// Named state marker applied to the top-level presentation container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Mode(DisplayMode),
    BlackScreen,
}

impl Marker {
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Mode(DisplayMode::Show) => "podium-show",
            Self::Mode(DisplayMode::Overview) => "podium-overview",
            Self::Mode(DisplayMode::Presenter) => "podium-presenter",
            Self::BlackScreen => "podium-black",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Measured sizes of one slide: the box it is shown in and its natural content size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlideMetrics {
    pub container: Size,
    pub content: Size,
}

impl SlideMetrics {
    /// Uniform scale fitting the content inside the container without distortion.
    /// `None` when the content has no area to scale.
    pub fn fit_scale(&self) -> Option<f32> {
        if self.content.width <= 0.0 || self.content.height <= 0.0 {
            return None;
        }
        let scale = (self.container.width / self.content.width)
            .min(self.container.height / self.content.height);
        scale.is_finite().then_some(scale.max(0.0))
    }
}

/// The rendering collaborator a controller drives.
///
/// Slides are addressed by index; the controller never sees the content itself.
pub trait Surface {
    /// Move the "current" mark from `previous` to `current` (they may be equal).
    fn mark_current(&mut self, previous: usize, current: usize);

    /// Formatted position, e.g. `"3 / 12"`.
    fn write_index(&mut self, text: &str);

    fn write_notes(&mut self, current: &str, next: &str);

    fn write_timer(&mut self, text: &str);

    fn apply_marker(&mut self, marker: Marker);

    fn remove_marker(&mut self, marker: Marker);

    /// Sizes for the slide at `index`, or `None` if it has not been laid out yet.
    fn slide_metrics(&self, index: usize) -> Option<SlideMetrics>;

    fn apply_scale(&mut self, index: usize, scale: f32);
}
