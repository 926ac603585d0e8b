//! Standalone scatter viewer implementing [`eframe::App`].
//!
//! Each frame the app turns egui input on the plot area into [`ViewEvent`]s,
//! lets the session fold them, uploads the frame as a texture when a new one
//! was drawn, and paints the overlays (axes, legend, hover tooltip) on top.

use std::path::Path;
use std::sync::mpsc::Receiver;

use eframe::egui;

use crate::config::ScatterConfig;
use crate::data::dataset::Dataset;
use crate::error::ScatterError;
use crate::render::export;
use crate::session::ScatterSession;
use crate::sink::ViewEvent;
use crate::transform::Gesture;

use super::overlay;

/// Scroll distance (points) that doubles or halves the scale.
const SCROLL_PER_DOUBLING: f32 = 200.0;

pub struct ScatterApp {
    config: ScatterConfig,
    /// Held until the first frame tells us the plot size.
    pending_dataset: Option<Dataset>,
    /// External event source, handed to the session once it exists.
    pending_rx: Option<Receiver<ViewEvent>>,
    session: Option<ScatterSession>,
    /// Terminal setup/render failure shown instead of the plot.
    error: Option<String>,
    texture: Option<egui::TextureHandle>,
    uploaded_serial: u64,
    /// Pointer position (plot-area pixels) last sent to the session.
    last_pointer: Option<(f64, f64)>,
    /// Outcome of the last PNG export, shown in the top bar.
    status: Option<StatusLine>,
    color_scheme_applied: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct StatusLine {
    text: String,
    is_error: bool,
}

impl StatusLine {
    fn for_export(path: &Path, result: &image::ImageResult<()>) -> Self {
        match result {
            Ok(()) => Self {
                text: format!("Saved {}", path.display()),
                is_error: false,
            },
            Err(e) => Self {
                text: format!("Export failed: {e}"),
                is_error: true,
            },
        }
    }
}

/// Hover event for a pointer that was at `prev` last frame and is at `now`.
/// Nothing is sent while the pointer stands still; the session re-tests the
/// hover itself when the view changes.
fn pointer_event(prev: Option<(f64, f64)>, now: Option<(f64, f64)>) -> Option<ViewEvent> {
    match (prev, now) {
        (_, Some((x, y))) if prev != now => Some(ViewEvent::PointerMove { x, y }),
        (Some(_), None) => Some(ViewEvent::PointerLeave),
        _ => None,
    }
}

impl ScatterApp {
    pub fn new(dataset: Dataset, config: ScatterConfig) -> Self {
        Self {
            config,
            pending_dataset: Some(dataset),
            pending_rx: None,
            session: None,
            error: None,
            texture: None,
            uploaded_serial: 0,
            last_pointer: None,
            status: None,
            color_scheme_applied: false,
        }
    }

    /// Also accept events from a [`ViewSink`](crate::sink::ViewSink).
    pub fn with_receiver(mut self, rx: Receiver<ViewEvent>) -> Self {
        self.pending_rx = Some(rx);
        self
    }

    pub fn session(&self) -> Option<&ScatterSession> {
        self.session.as_ref()
    }

    fn plot_rect(&self, available: egui::Rect) -> egui::Rect {
        let m = &self.config.margins;
        let rect = egui::Rect::from_min_max(
            available.min + egui::vec2(m.left, m.top),
            available.max - egui::vec2(m.right, m.bottom),
        );
        if rect.is_positive() {
            rect
        } else {
            egui::Rect::from_min_size(rect.min, egui::Vec2::ZERO)
        }
    }

    /// Create the session on the first frame with a usable plot area.
    fn ensure_session(&mut self, width: u32, height: u32) {
        if self.session.is_some() || self.error.is_some() || width == 0 || height == 0 {
            return;
        }
        let Some(dataset) = self.pending_dataset.take() else {
            return;
        };
        match ScatterSession::new(dataset, &self.config, width, height) {
            Ok(mut session) => {
                if let Some(rx) = self.pending_rx.take() {
                    session.attach(rx);
                }
                self.session = Some(session);
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail<E: Into<ScatterError>>(&mut self, e: E) {
        let e: ScatterError = e.into();
        log::error!("{e}");
        self.error = Some(e.to_string());
        self.session = None;
        self.texture = None;
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("scatter_top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong(&self.config.title);
                ui.separator();
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                if ui.button("Reset view").clicked() {
                    session.submit(ViewEvent::Gesture(Gesture::Reset));
                }
                if ui.button("Save PNG…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .set_file_name(export::default_export_name())
                        .add_filter("PNG", &["png"])
                        .save_file()
                    {
                        let result = export::save_png(session.frame(), &path);
                        self.status = Some(StatusLine::for_export(&path, &result));
                    }
                }
                ui.separator();
                let t = session.transform();
                ui.label(format!("zoom {:.2}×", t.scale));
                ui.label(format!(
                    "{} points, {} categories",
                    session.dataset().len(),
                    session.color_table().len()
                ));
                if let Some(status) = &self.status {
                    ui.separator();
                    if status.is_error {
                        ui.colored_label(ui.visuals().error_fg_color, &status.text);
                    } else {
                        ui.label(&status.text);
                    }
                }
            });
        });
    }

    /// Translate egui input on the plot area into session events.
    fn collect_input(&mut self, ui: &egui::Ui, response: &egui::Response, plot_rect: egui::Rect) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if response.double_clicked() {
            session.submit(ViewEvent::Gesture(Gesture::Reset));
        }

        if response.dragged() {
            let d = response.drag_delta();
            if d != egui::Vec2::ZERO {
                session.submit(ViewEvent::Gesture(Gesture::Pan {
                    dx: d.x as f64,
                    dy: d.y as f64,
                }));
            }
        }

        let pointer = response.hover_pos().map(|pos| {
            let local = pos - plot_rect.min;
            (local.x as f64, local.y as f64)
        });
        if let Some((x, y)) = pointer {
            let (scroll, pinch) = ui.input(|i| (i.smooth_scroll_delta.y, i.zoom_delta()));
            let factor = pinch * (scroll / SCROLL_PER_DOUBLING).exp2();
            if (factor - 1.0).abs() > f32::EPSILON {
                session.submit(ViewEvent::Gesture(Gesture::Zoom {
                    factor: factor as f64,
                    anchor_x: x,
                    anchor_y: y,
                }));
            }
        }
        if let Some(event) = pointer_event(self.last_pointer, pointer) {
            session.submit(event);
        }
        self.last_pointer = pointer;
    }

    fn upload_frame(&mut self, ctx: &egui::Context) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if self.texture.is_some() && self.uploaded_serial == session.frame_serial() {
            return;
        }
        let frame = session.frame();
        let image = egui::ColorImage::from_rgba_premultiplied(
            [frame.width() as usize, frame.height() as usize],
            frame.data(),
        );
        match &mut self.texture {
            Some(tex) => tex.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(ctx.load_texture("scatter_frame", image, egui::TextureOptions::NEAREST))
            }
        }
        self.uploaded_serial = session.frame_serial();
    }

    fn central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(msg) = &self.error {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(ui.visuals().error_fg_color, format!("Cannot render: {msg}"));
                });
                return;
            }

            let plot_rect = self.plot_rect(ui.max_rect());
            let width = plot_rect.width().floor().max(0.0) as u32;
            let height = plot_rect.height().floor().max(0.0) as u32;
            self.ensure_session(width, height);

            let response = ui.allocate_rect(plot_rect, egui::Sense::click_and_drag());
            if let Some(session) = self.session.as_mut() {
                if session.viewport() != (width, height) {
                    session.submit(ViewEvent::Resize { width, height });
                }
            }
            self.collect_input(ui, &response, plot_rect);

            if let Some(session) = self.session.as_mut() {
                if let Err(e) = session.process_pending() {
                    self.fail(e);
                    return;
                }
            }
            self.upload_frame(ctx);

            let (Some(session), Some(texture)) = (self.session.as_ref(), self.texture.as_ref())
            else {
                return;
            };
            let painter = ui.painter_at(ui.max_rect());
            // the frame may lag a zero-area resize; draw it at its own size
            let (fw, fh) = session.viewport();
            let image_rect =
                egui::Rect::from_min_size(plot_rect.min, egui::vec2(fw as f32, fh as f32));
            painter.with_clip_rect(plot_rect).image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            let scheme = self.config.color_scheme;
            if self.config.features.axes {
                overlay::draw_axes(&painter, session, plot_rect, scheme);
            }
            if let Some(hit) = session.hovered_hit() {
                overlay::draw_hover_ring(&painter, &hit, &self.config, plot_rect);
                if self.config.features.tooltip {
                    if let Some(point) = session.hovered() {
                        overlay::draw_tooltip(&painter, point, &hit, plot_rect, scheme);
                    }
                }
            }
            if self.config.features.legend {
                overlay::draw_legend(&painter, session, plot_rect, scheme);
            }
        });
    }
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.color_scheme_applied {
            self.config.color_scheme.apply(ctx);
            self.color_scheme_applied = true;
        }
        self.top_bar(ctx);
        self.central_panel(ctx);
    }
}
