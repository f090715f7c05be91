use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use eframe::egui;
use tracing::{debug, info, trace};

use crate::config::Config;
use crate::controller::{
    Address, Clock, CloneWindow, Controller, DisplayMode, Event, EventKind, Input, KeyCode,
    LinkedWindow, Marker, Modifiers, Size, SlideMetrics, Surface, SystemClock, WindowOpener,
};
use crate::deck::Slide;
use crate::render;
use crate::theme::Theme;

const HEADER_HEIGHT: f32 = 64.0;
const GAP: f32 = 16.0;
/// Share of the presenter layout given to the current slide.
const PRESENTER_SPLIT: f32 = 0.62;

type PodiumController = Controller<ViewState, FrameClock>;

fn clone_viewport_id() -> egui::ViewportId {
    egui::ViewportId::from_hash_of("podium-clone")
}

// ─── Surface ────────────────────────────────────────────────────────────────

/// Everything the controller has told this view, read back when painting.
pub struct ViewState {
    current: usize,
    index_text: String,
    current_notes: String,
    next_notes: String,
    timer_text: String,
    mode: DisplayMode,
    black: bool,
    design: Size,
    containers: Vec<Option<egui::Rect>>,
    scales: Vec<f32>,
}

impl ViewState {
    pub fn new(slide_count: usize, design: Size) -> Self {
        Self {
            current: 0,
            index_text: String::new(),
            current_notes: String::new(),
            next_notes: String::new(),
            timer_text: crate::controller::timer::ZERO_DISPLAY.to_string(),
            mode: DisplayMode::Show,
            black: false,
            design,
            containers: vec![None; slide_count],
            scales: vec![1.0; slide_count],
        }
    }

    /// Store this frame's container rects. Returns `true` if any size changed.
    fn set_containers(&mut self, containers: Vec<Option<egui::Rect>>) -> bool {
        let sizes = |c: &[Option<egui::Rect>]| {
            c.iter().map(|r| r.map(|r| r.size())).collect::<Vec<_>>()
        };
        let changed = sizes(&self.containers) != sizes(&containers);
        self.containers = containers;
        changed
    }

    fn scale(&self, index: usize) -> f32 {
        self.scales.get(index).copied().unwrap_or(1.0)
    }
}

impl Surface for ViewState {
    fn mark_current(&mut self, _previous: usize, current: usize) {
        self.current = current;
    }

    fn write_index(&mut self, text: &str) {
        self.index_text = text.to_string();
    }

    fn write_notes(&mut self, current: &str, next: &str) {
        self.current_notes = current.to_string();
        self.next_notes = next.to_string();
    }

    fn write_timer(&mut self, text: &str) {
        self.timer_text = text.to_string();
    }

    fn apply_marker(&mut self, marker: Marker) {
        trace!(marker = marker.class_name(), "apply marker");
        match marker {
            Marker::Mode(mode) => self.mode = mode,
            Marker::BlackScreen => self.black = true,
        }
    }

    fn remove_marker(&mut self, marker: Marker) {
        if marker == Marker::BlackScreen {
            self.black = false;
        }
    }

    fn slide_metrics(&self, index: usize) -> Option<SlideMetrics> {
        let container = self.containers.get(index).copied().flatten()?;
        Some(SlideMetrics {
            container: render::from_vec2(container.size()),
            content: self.design,
        })
    }

    fn apply_scale(&mut self, index: usize, scale: f32) {
        if let Some(slot) = self.scales.get_mut(index) {
            *slot = scale;
        }
    }
}

// ─── Clock ──────────────────────────────────────────────────────────────────

/// Wall clock whose wake-ups schedule an egui repaint.
pub struct FrameClock {
    inner: SystemClock,
    ctx: egui::Context,
}

impl FrameClock {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            inner: SystemClock::default(),
            ctx,
        }
    }

    /// Whether the pending wake-up is due at `now`.
    ///
    /// egui delivers `request_repaint_after` one predicted frame early, so a
    /// repaint can land just before the deadline. In that case the repaint is
    /// requested again for the remainder, or the wake-up would never fire.
    fn poll(&mut self, now: Instant) -> bool {
        if self.inner.take_due(now) {
            return true;
        }
        if let Some(deadline) = self.inner.deadline() {
            self.ctx
                .request_repaint_after(deadline.saturating_duration_since(now));
        }
        false
    }
}

impl Clock for FrameClock {
    fn now(&self) -> Instant {
        self.inner.now()
    }

    fn wake_after(&mut self, delay: Duration) {
        self.inner.wake_after(delay);
        self.ctx.request_repaint_after(delay);
    }
}

// ─── Clone viewport ─────────────────────────────────────────────────────────

struct CloneViewport {
    controller: Rc<RefCell<PodiumController>>,
    closed: Rc<Cell<bool>>,
}

/// Opens the audience view as a second native window in this process.
struct ViewportOpener {
    slot: Rc<RefCell<Option<CloneViewport>>>,
    slides: Rc<[Slide]>,
    design: Size,
    ctx: egui::Context,
}

impl WindowOpener for ViewportOpener {
    fn open(&mut self, address: &Address) -> anyhow::Result<Box<dyn CloneWindow>> {
        let controller = Controller::new(
            Rc::clone(&self.slides),
            address.clone(),
            ViewState::new(self.slides.len(), self.design),
            FrameClock::new(self.ctx.clone()),
        )?;
        let controller = Rc::new(RefCell::new(controller));
        let closed = Rc::new(Cell::new(false));

        let ctx = self.ctx.clone();
        let window = LinkedWindow::new(&controller, Rc::clone(&closed)).on_focus(move || {
            ctx.send_viewport_cmd_to(clone_viewport_id(), egui::ViewportCommand::Focus);
        });

        *self.slot.borrow_mut() = Some(CloneViewport { controller, closed });
        self.ctx.request_repaint();
        Ok(Box::new(window))
    }
}

// ─── Input ──────────────────────────────────────────────────────────────────

fn key_code(key: egui::Key) -> KeyCode {
    match key {
        egui::Key::ArrowRight => KeyCode::ArrowRight,
        egui::Key::ArrowDown => KeyCode::ArrowDown,
        egui::Key::ArrowLeft => KeyCode::ArrowLeft,
        egui::Key::ArrowUp => KeyCode::ArrowUp,
        egui::Key::PageDown => KeyCode::PageDown,
        egui::Key::PageUp => KeyCode::PageUp,
        egui::Key::Space => KeyCode::Space,
        egui::Key::Home => KeyCode::Home,
        egui::Key::End => KeyCode::End,
        egui::Key::Escape => KeyCode::Escape,
        egui::Key::Enter => KeyCode::Enter,
        egui::Key::B => KeyCode::B,
        egui::Key::C => KeyCode::C,
        egui::Key::O => KeyCode::O,
        egui::Key::P => KeyCode::P,
        egui::Key::T => KeyCode::T,
        _ => KeyCode::Other,
    }
}

fn modifiers(m: egui::Modifiers) -> Modifiers {
    Modifiers {
        alt: m.alt,
        ctrl: m.ctrl,
        meta: m.mac_cmd,
        shift: m.shift,
    }
}

/// Keyboard and wheel gestures from this frame, in arrival order.
fn collect_inputs(input: &egui::InputState) -> Vec<Input> {
    input
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers: m,
                ..
            } => Some(Input::Key {
                code: key_code(*key),
                modifiers: modifiers(*m),
            }),
            // egui reports scrolling down as a negative delta
            egui::Event::MouseWheel { delta, .. } if delta.y != 0.0 => {
                Some(Input::Wheel { delta_y: -delta.y })
            }
            _ => None,
        })
        .collect()
}

// ─── Layout ─────────────────────────────────────────────────────────────────

/// Where each part of a view goes for one frame.
#[derive(Debug, Default)]
struct Layout {
    containers: Vec<Option<egui::Rect>>,
    header: Option<egui::Rect>,
    notes: Option<egui::Rect>,
}

fn grid_columns(count: usize) -> usize {
    if count <= 4 {
        2
    } else if count <= 9 {
        3
    } else {
        4
    }
}

fn layout(
    mode: DisplayMode,
    count: usize,
    current: usize,
    area: egui::Rect,
    design: Size,
) -> Layout {
    let aspect = design.width / design.height;
    match mode {
        DisplayMode::Show => Layout {
            containers: vec![Some(area); count],
            ..Default::default()
        },
        DisplayMode::Overview => {
            let cols = grid_columns(count);
            let rows = count.div_ceil(cols).max(1);
            let inner = area.shrink(GAP);
            let mut cell_w = (inner.width() - GAP * (cols as f32 - 1.0)) / cols as f32;
            let mut cell_h = cell_w / aspect;
            let fit_h = (inner.height() - GAP * (rows as f32 - 1.0)) / rows as f32;
            if cell_h > fit_h {
                cell_h = fit_h;
                cell_w = cell_h * aspect;
            }
            let grid_w = cell_w * cols as f32 + GAP * (cols as f32 - 1.0);
            let left = inner.left() + (inner.width() - grid_w) / 2.0;
            let containers = (0..count)
                .map(|i| {
                    let (row, col) = (i / cols, i % cols);
                    let min = egui::pos2(
                        left + col as f32 * (cell_w + GAP),
                        inner.top() + row as f32 * (cell_h + GAP),
                    );
                    Some(egui::Rect::from_min_size(min, egui::vec2(cell_w, cell_h)))
                })
                .collect();
            Layout {
                containers,
                ..Default::default()
            }
        }
        DisplayMode::Presenter => {
            let header =
                egui::Rect::from_min_size(area.min, egui::vec2(area.width(), HEADER_HEIGHT));
            let body =
                egui::Rect::from_min_max(egui::pos2(area.left(), header.bottom()), area.max);
            let split = body.left() + body.width() * PRESENTER_SPLIT;
            let main =
                egui::Rect::from_min_max(body.min, egui::pos2(split, body.bottom())).shrink(GAP);
            let side =
                egui::Rect::from_min_max(egui::pos2(split, body.top()), body.max).shrink(GAP);
            let next = egui::Rect::from_min_size(
                side.min,
                egui::vec2(side.width(), side.width() / aspect),
            );
            let notes = egui::Rect::from_min_max(
                egui::pos2(side.left(), next.bottom() + GAP),
                side.max,
            );
            let containers = (0..count)
                .map(|i| match i {
                    i if i == current => Some(main),
                    i if i == current + 1 => Some(next),
                    _ => None,
                })
                .collect();
            Layout {
                containers,
                header: Some(header),
                notes: Some(notes),
            }
        }
    }
}

// ─── Painting ───────────────────────────────────────────────────────────────

/// Lay out and paint one controller's view. Returns slide clicks as inputs.
fn show_view(ui: &mut egui::Ui, controller: &mut PodiumController, theme: &Theme) -> Vec<Input> {
    let area = ui.max_rect();
    let view = controller.surface();
    let plan = layout(
        view.mode,
        controller.slide_count(),
        controller.current_index(),
        area,
        view.design,
    );
    if controller.surface_mut().set_containers(plan.containers) {
        controller.rescale();
        ui.ctx().request_repaint();
    }

    let view = controller.surface();
    let slides = controller.slides();
    let painter = ui.painter();
    let mut clicks = Vec::new();

    match view.mode {
        DisplayMode::Show => {
            painter.rect_filled(area, 0.0, egui::Color32::BLACK);
            if view.black {
                return clicks;
            }
            if let Some(container) = view.containers.get(view.current).copied().flatten() {
                let index = view.current;
                render::draw_slide(
                    painter,
                    &slides[index],
                    theme,
                    container,
                    view.design,
                    view.scale(index),
                );
            }
        }
        DisplayMode::Overview => {
            painter.rect_filled(area, 0.0, theme.chrome_background);
            for (index, container) in view.containers.iter().enumerate() {
                let Some(container) = *container else {
                    continue;
                };
                let rect = render::draw_slide(
                    painter,
                    &slides[index],
                    theme,
                    container,
                    view.design,
                    view.scale(index),
                );
                if index == view.current {
                    painter.rect_stroke(
                        rect,
                        0.0,
                        egui::Stroke::new(3.0, theme.accent),
                        egui::StrokeKind::Outside,
                    );
                }
                let id = ui.id().with(("slide", index));
                if ui.interact(rect, id, egui::Sense::click()).clicked() {
                    clicks.push(Input::Select { index });
                }
            }
        }
        DisplayMode::Presenter => {
            painter.rect_filled(area, 0.0, theme.chrome_background);
            if let Some(header) = plan.header {
                let header = header.shrink2(egui::vec2(GAP, 0.0));
                let font = egui::FontId::monospace(theme.notes_size * 1.5);
                painter.text(
                    header.left_center(),
                    egui::Align2::LEFT_CENTER,
                    &view.index_text,
                    font.clone(),
                    theme.notes_foreground,
                );
                painter.text(
                    header.right_center(),
                    egui::Align2::RIGHT_CENTER,
                    &view.timer_text,
                    font,
                    theme.notes_foreground,
                );
            }
            for (index, container) in view.containers.iter().enumerate() {
                let Some(container) = *container else {
                    continue;
                };
                let rect = render::draw_slide(
                    painter,
                    &slides[index],
                    theme,
                    container,
                    view.design,
                    view.scale(index),
                );
                if index != view.current {
                    let dim = Theme::with_opacity(theme.chrome_background, 0.3);
                    painter.rect_filled(rect, 0.0, dim);
                }
                let id = ui.id().with(("slide", index));
                if ui.interact(rect, id, egui::Sense::click()).clicked() {
                    clicks.push(Input::Select { index });
                }
            }
            if let Some(notes) = plan.notes {
                let font = egui::FontId::proportional(theme.notes_size);
                let mut text = view.current_notes.clone();
                if !view.next_notes.is_empty() {
                    text.push_str("\n\nNext:\n");
                    text.push_str(&view.next_notes);
                }
                render::draw_text(painter, &text, font, theme.notes_foreground, notes);
            }
        }
    }
    clicks
}

/// Deck title and address fragment, plus what the audience currently sees.
fn window_title(deck_title: &str, fragment: &str, audience_open: bool, black: bool) -> String {
    let mut title = format!("{deck_title} #{fragment}");
    if audience_open {
        title.push_str(" (audience view open)");
    }
    if black {
        title.push_str(" [black]");
    }
    title
}

// ─── App ────────────────────────────────────────────────────────────────────

pub struct PodiumApp {
    deck_title: String,
    theme: Theme,
    primary: PodiumController,
    clone: Rc<RefCell<Option<CloneViewport>>>,
    title: String,
}

impl PodiumApp {
    fn new(
        ctx: &egui::Context,
        deck_title: String,
        slides: Rc<[Slide]>,
        address: Address,
        config: &Config,
        start_mode: DisplayMode,
    ) -> anyhow::Result<Self> {
        let design = config.slide_size();
        let clone = Rc::new(RefCell::new(None));
        let opener = ViewportOpener {
            slot: Rc::clone(&clone),
            slides: Rc::clone(&slides),
            design,
            ctx: ctx.clone(),
        };

        let mut primary = Controller::new(
            Rc::clone(&slides),
            address,
            ViewState::new(slides.len(), design),
            FrameClock::new(ctx.clone()),
        )?
        .with_opener(opener);

        for kind in EventKind::ALL {
            primary.on(kind, |event| {
                match event {
                    Event::NavigationStart { slide, .. }
                    | Event::NavigationEnd { slide, .. } => {
                        let title = slide.title.as_deref().unwrap_or("(untitled)");
                        debug!(?event, title, "controller event");
                    }
                    _ => debug!(?event, "controller event"),
                }
                Ok(())
            });
        }
        if start_mode != DisplayMode::Show {
            primary.toggle_mode(start_mode);
        }

        let theme = Theme::from_name(config.theme().unwrap_or("light"));
        debug!(theme = %theme.name, "loaded theme");

        Ok(Self {
            deck_title,
            theme,
            primary,
            clone,
            title: String::new(),
        })
    }

    fn window_title(&self) -> String {
        window_title(
            &self.deck_title,
            self.primary.address().fragment().unwrap_or("0"),
            self.primary.clone_link().live().is_some(),
            self.primary.black_screen(),
        )
    }

    fn show_clone(&mut self, ctx: &egui::Context) {
        let Some((controller, closed)) = self
            .clone
            .borrow()
            .as_ref()
            .map(|c| (Rc::clone(&c.controller), Rc::clone(&c.closed)))
        else {
            return;
        };
        if closed.get() {
            info!("clone view closed");
            *self.clone.borrow_mut() = None;
            return;
        }

        let title = format!("{} (audience)", self.deck_title);
        let theme = &self.theme;
        ctx.show_viewport_immediate(
            clone_viewport_id(),
            egui::ViewportBuilder::default()
                .with_title(title)
                .with_inner_size([1280.0, 720.0]),
            |ctx, _class| {
                if ctx.input(|i| i.viewport().close_requested()) {
                    closed.set(true);
                    ctx.request_repaint_of(egui::ViewportId::ROOT);
                    return;
                }
                let mut controller = controller.borrow_mut();
                if controller.clock_mut().poll(Instant::now()) {
                    controller.tick();
                }
                egui::CentralPanel::default()
                    .frame(egui::Frame::NONE)
                    .show(ctx, |ui| {
                        // the audience window is commanded only; clicks are dropped
                        show_view(ui, &mut controller, theme);
                    });
            },
        );
    }
}

impl eframe::App for PodiumApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.primary.clock_mut().poll(Instant::now()) {
            self.primary.tick();
        }

        // ctx.input holds the input lock; viewport commands go out after it
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let inputs = ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) && !i.modifiers.any() {
                viewport_cmds.push(egui::ViewportCommand::Close);
            }
            if i.key_pressed(egui::Key::F) && !i.modifiers.any() {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
            }
            collect_inputs(i)
        });
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
        for input in inputs {
            self.primary.handle_input(input);
        }

        let clicks = egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| show_view(ui, &mut self.primary, &self.theme))
            .inner;
        for input in clicks {
            self.primary.handle_input(input);
        }

        let title = self.window_title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }

        self.show_clone(ctx);
    }
}

pub fn run(
    file: PathBuf,
    windowed: bool,
    start_slide: Option<usize>,
    start_mode: Option<DisplayMode>,
) -> anyhow::Result<()> {
    let deck = crate::deck::load(&file)?;
    let config = Config::load_or_default();

    let deck_title = deck.title.clone().unwrap_or_else(|| {
        file.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Podium".to_string())
    });

    let mut address = Address::for_deck(&file)?;
    if let Some(n) = start_slide {
        // a 1-based 0 lands out of range and falls back to the first slide
        address = address.with_fragment(&(n as i64 - 1).to_string());
    }
    let start_mode = start_mode.or(config.start_mode()).unwrap_or_default();
    info!(%address, slides = deck.slides.len(), mode = %start_mode, "presenting");

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&deck_title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&deck_title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let app_name = deck_title.clone();
    let slides = deck.slides;
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| {
            let app = PodiumApp::new(
                &cc.egui_ctx,
                deck_title,
                slides,
                address,
                &config,
                start_mode,
            )?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
